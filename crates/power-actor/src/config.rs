//! Typed actor configuration
//!
//! Built once from the host's settings and immutable afterwards.

use platform::{ActorId, DacAddress, DacChannel, Gain, NotificationDuration, ReferenceMode, VrefSource};

/// Which DAC, which output, which reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Minor bus address of the DAC.
    pub address: DacAddress,
    /// Output channel driven by this actor.
    pub channel: DacChannel,
    /// Reference selection; fixes both the VREF and the gain bit.
    pub reference: ReferenceMode,
}

impl ChannelConfig {
    /// VREF bit programmed at init.
    pub fn vref(&self) -> VrefSource {
        self.reference.vref()
    }

    /// Gain bit programmed at init.
    pub fn gain(&self) -> Gain {
        self.reference.gain()
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            address: DacAddress::DEFAULT,
            channel: DacChannel::A,
            reference: ReferenceMode::Vdd,
        }
    }
}

/// How "off" is realised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerControl {
    /// Off writes code 0 to the channel; set_power while off is held back.
    #[default]
    DacZeroing,
    /// Off switches the referenced host actor off; the channel keeps its code.
    DelegatedActor(ActorId),
}

impl PowerControl {
    /// The delegated actor, if any.
    pub fn delegate(self) -> Option<ActorId> {
        match self {
            Self::DacZeroing => None,
            Self::DelegatedActor(id) => Some(id),
        }
    }
}

/// Complete configuration of one power actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActorConfig {
    /// DAC channel settings.
    pub channel: ChannelConfig,
    /// On/off strategy.
    pub power_control: PowerControl,
    /// Banner display time; zero disables banners.
    pub notification: NotificationDuration,
}

impl ActorConfig {
    /// Configuration that zeroes `channel` of the DAC at `address` when off.
    pub fn dac_zeroing(address: DacAddress, channel: DacChannel, reference: ReferenceMode) -> Self {
        Self {
            channel: ChannelConfig {
                address,
                channel,
                reference,
            },
            power_control: PowerControl::DacZeroing,
            notification: NotificationDuration::default(),
        }
    }

    /// Same configuration with on/off delegated to `actor`.
    #[must_use]
    pub fn delegated_to(mut self, actor: ActorId) -> Self {
        self.power_control = PowerControl::DelegatedActor(actor);
        self
    }

    /// Same configuration with a different banner duration.
    #[must_use]
    pub fn with_notification(mut self, notification: NotificationDuration) -> Self {
        self.notification = notification;
        self
    }
}
