//! Host actor registry abstraction
//!
//! When power control is delegated, the power actor switches another host
//! actor on and off instead of zeroing its DAC channel. The host hands in a
//! registry capable of resolving that actor by id.

/// Identifier of a host actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ActorId(u32);

impl ActorId {
    /// Wrap a raw host id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Return the raw host id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ActorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// On/off state of a host actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActorState {
    /// Switched off.
    #[default]
    Off,
    /// Switched on.
    On,
}

impl ActorState {
    /// `true` for [`ActorState::On`].
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Failure reported by a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No actor with this id is registered.
    UnknownActor(ActorId),
    /// The actor exists but refused the switch request.
    Rejected(ActorId),
}

#[cfg(feature = "std")]
impl std::error::Error for RegistryError {}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownActor(id) => write!(f, "no actor {id} is registered"),
            Self::Rejected(id) => write!(f, "actor {id} rejected the switch request"),
        }
    }
}

/// Lookup and switching of host actors by id.
pub trait ActorRegistry {
    /// Switch the actor on.
    fn switch_actor_on(&mut self, id: ActorId) -> Result<(), RegistryError>;

    /// Switch the actor off.
    fn switch_actor_off(&mut self, id: ActorId) -> Result<(), RegistryError>;

    /// Current state, `None` if the id cannot be resolved.
    fn actor_state(&self, id: ActorId) -> Option<ActorState>;
}

/// Registry for actors that never delegate: every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegistry;

impl ActorRegistry for NoRegistry {
    fn switch_actor_on(&mut self, id: ActorId) -> Result<(), RegistryError> {
        Err(RegistryError::UnknownActor(id))
    }

    fn switch_actor_off(&mut self, id: ActorId) -> Result<(), RegistryError> {
        Err(RegistryError::UnknownActor(id))
    }

    fn actor_state(&self, _id: ActorId) -> Option<ActorState> {
        None
    }
}

impl<R: ActorRegistry + ?Sized> ActorRegistry for &mut R {
    fn switch_actor_on(&mut self, id: ActorId) -> Result<(), RegistryError> {
        (**self).switch_actor_on(id)
    }

    fn switch_actor_off(&mut self, id: ActorId) -> Result<(), RegistryError> {
        (**self).switch_actor_off(id)
    }

    fn actor_state(&self, id: ActorId) -> Option<ActorState> {
        (**self).actor_state(id)
    }
}
