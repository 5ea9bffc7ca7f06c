//! Error types for the power actor
//!
//! Bus failures are classified through `embedded_hal`'s [`BusErrorKind`] so
//! the actor's error type does not depend on the concrete DAC driver.

use platform::{ActorId, BusError, BusErrorKind, DacAddress, RegistryError};

/// Result alias used throughout this crate.
pub type Result<T, E = ActorError> = core::result::Result<T, E>;

/// Failure of a power actor operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror_no_std::Error)]
pub enum ActorError {
    /// The DAC is unreachable or rejected a transfer.
    #[error("DAC device error: {0}")]
    Device(BusErrorKind),

    /// A setting is invalid or the delegated actor cannot be resolved.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl ActorError {
    /// Wrap a driver error.
    pub fn device<E: BusError>(err: &E) -> Self {
        Self::Device(err.kind())
    }

    /// `true` for [`ActorError::Device`].
    pub fn is_device(&self) -> bool {
        matches!(self, Self::Device(_))
    }
}

/// Invalid actor configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror_no_std::Error)]
pub enum ConfigurationError {
    /// A numeric setting lies outside its allowed range.
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        /// Host label of the setting.
        field: &'static str,
        /// Rejected value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// The driver handed to the actor talks to a different DAC than configured.
    #[error("DAC address {configured} configured but driver is bound to {driver}")]
    AddressMismatch {
        /// Minor address from the settings.
        configured: DacAddress,
        /// Minor address the driver was built for.
        driver: DacAddress,
    },

    /// Actor power control was selected without naming an actor.
    #[error("power control \"Actor\" requires a power actor")]
    MissingDelegate,

    /// The delegated actor is not known to the registry.
    #[error("power actor {0} cannot be resolved")]
    UnresolvedActor(ActorId),

    /// The registry refused to switch the delegated actor.
    #[error("power actor {0} refused the switch request")]
    DelegateRejected(ActorId),
}

impl From<RegistryError> for ConfigurationError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownActor(id) => Self::UnresolvedActor(id),
            RegistryError::Rejected(id) => Self::DelegateRejected(id),
        }
    }
}

impl From<RegistryError> for ActorError {
    fn from(err: RegistryError) -> Self {
        Self::Configuration(err.into())
    }
}

/// Failure to load [`PluginSettings`](crate::settings::PluginSettings).
#[derive(Debug, thiserror_no_std::Error)]
pub enum SettingsError {
    /// The settings document is not valid JSON for the settings schema.
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The settings parsed but describe an invalid configuration.
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}
