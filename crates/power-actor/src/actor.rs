//! The power actor state machine
//!
//! # State machine
//!
//! ```text
//!            on(p)                      set_power(p): stores p, never
//!   ┌─────┐ ──────► ┌────┐              changes state
//!   │ Off │         │ On │
//!   └─────┘ ◄────── └────┘
//!            off()
//! ```
//!
//! What "off" means depends on [`PowerControl`]:
//!
//! | Mode             | `off()`                          | `set_power` while off |
//! |------------------|----------------------------------|-----------------------|
//! | `DacZeroing`     | channel ← 0                      | stored, not written   |
//! | `DelegatedActor` | delegated actor switched off     | written               |
//!
//! Every write that reaches the DAC is followed by a read-back banner when
//! notifications are enabled. Banner failures are logged and dropped.

use platform::{
    ActorRegistry, ActorState, BusError, DacCode, DacDriver, Notification, NotificationKind, Notifier, PowerPercent,
    VrefSource,
};

use platform::config::DEFAULT_POWER_PERCENT;

use crate::config::{ActorConfig, PowerControl};
use crate::error::{ActorError, ConfigurationError, Result};

/// Headline of the banner shown once the DAC has been configured.
pub const CONNECTED_HEADLINE: &str = "Connected to MCP4728";

/// Headline of the banner shown when the DAC cannot be configured.
pub const UNREACHABLE_HEADLINE: &str = "MCP4728 not responding";

/// Drives one DAC channel as a power output.
///
/// Owns its DAC driver exclusively; the registry and notifier are host
/// capabilities handed in at construction and returned by
/// [`release`](Self::release).
pub struct PowerActor<D, R, N> {
    config: ActorConfig,
    dac: D,
    registry: R,
    notifier: N,
    state: ActorState,
    power: PowerPercent,
    code: DacCode,
}

impl<D, R, N> PowerActor<D, R, N>
where
    D: DacDriver,
    R: ActorRegistry,
    N: Notifier,
{
    /// Configure the DAC channel and start in the off state at zero power.
    ///
    /// Programs the channel's reference (and, for the internal reference,
    /// its gain). In `DacZeroing` mode the channel is also driven to 0.
    ///
    /// Fails with [`ConfigurationError::AddressMismatch`] before any bus
    /// traffic if `dac` is bound to another address than the configuration.
    pub fn init(config: ActorConfig, dac: D, registry: R, notifier: N) -> Result<Self> {
        let driver = dac.address();
        if driver != config.channel.address {
            tracing::error!(
                configured = config.channel.address.get(),
                driver = driver.get(),
                "DAC driver bound to another address"
            );
            return Err(ConfigurationError::AddressMismatch {
                configured: config.channel.address,
                driver,
            }
            .into());
        }

        let power = PowerPercent::new(DEFAULT_POWER_PERCENT);
        let mut actor = Self {
            config,
            dac,
            registry,
            notifier,
            state: ActorState::Off,
            power,
            code: DacCode::from_power(power),
        };

        if let Err(err) = actor.configure_channel() {
            let message = format!(
                "DAC Address {}, DAC Channel {}: {err}",
                config.channel.address, config.channel.channel
            );
            actor.notify(UNREACHABLE_HEADLINE, &message, NotificationKind::Danger);
            tracing::error!(
                address = config.channel.address.get(),
                channel = config.channel.channel.index(),
                %err,
                "MCP4728 initialisation failed"
            );
            return Err(err);
        }

        tracing::info!(
            address = config.channel.address.get(),
            channel = config.channel.channel.index(),
            reference = config.channel.reference.label(),
            control = ?config.power_control,
            "MCP4728 actor ready"
        );
        let message = format!(
            "DAC Address {}, DAC Channel {}",
            config.channel.address, config.channel.channel
        );
        actor.notify(CONNECTED_HEADLINE, &message, NotificationKind::Success);
        actor.notify_read_back();
        Ok(actor)
    }

    fn configure_channel(&mut self) -> Result<()> {
        let channel = self.config.channel;
        self.dac
            .set_vref(channel.channel, channel.vref())
            .map_err(|e| ActorError::device(&e))?;
        // Gain only applies to the internal reference.
        if channel.vref() == VrefSource::Internal {
            self.dac
                .set_gain(channel.channel, channel.gain())
                .map_err(|e| ActorError::device(&e))?;
        }
        if self.config.power_control == PowerControl::DacZeroing {
            self.write(DacCode::ZERO)?;
        }
        Ok(())
    }

    /// Store a new power level.
    ///
    /// In `DacZeroing` mode the code is only written while on; otherwise it
    /// is always written. Never changes the on/off state.
    pub fn set_power(&mut self, power: PowerPercent) -> Result<()> {
        self.store_power(power);
        if self.config.power_control == PowerControl::DacZeroing && !self.state.is_on() {
            tracing::debug!(power = power.get(), code = self.code.get(), "Power stored while off");
            return Ok(());
        }
        self.write(self.code)?;
        self.notify_read_back();
        Ok(())
    }

    /// Switch on, optionally at a new power level.
    ///
    /// `None` or zero reuses the stored power. A new power goes through
    /// [`set_power`](Self::set_power) first, so in delegated mode it reaches
    /// the channel before the delegated actor is switched on. The stored code
    /// is then written on every call.
    pub fn on(&mut self, power: Option<PowerPercent>) -> Result<()> {
        if let Some(power) = power.filter(|p| !p.is_zero()) {
            self.set_power(power)?;
        }
        if let PowerControl::DelegatedActor(id) = self.config.power_control {
            self.registry.switch_actor_on(id)?;
        }
        self.state = ActorState::On;
        tracing::info!(power = self.power.get(), code = self.code.get(), "Actor on");
        self.write(self.code)?;
        self.notify_read_back();
        Ok(())
    }

    /// Switch off.
    ///
    /// Zeroes the channel or switches the delegated actor off. Repeating the
    /// call has no further effect.
    pub fn off(&mut self) -> Result<()> {
        self.state = ActorState::Off;
        tracing::info!("Actor off");
        match self.config.power_control {
            PowerControl::DacZeroing => {
                self.write(DacCode::ZERO)?;
                self.notify_read_back();
            }
            PowerControl::DelegatedActor(id) => self.registry.switch_actor_off(id)?,
        }
        Ok(())
    }

    /// Current on/off state.
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// `true` while switched on.
    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    /// Stored power level.
    pub fn power(&self) -> PowerPercent {
        self.power
    }

    /// Code corresponding to the stored power level.
    pub fn code(&self) -> DacCode {
        self.code
    }

    /// Configuration the actor was built with.
    pub fn config(&self) -> &ActorConfig {
        &self.config
    }

    /// Live value of the channel as read from the DAC.
    pub fn read_back(&mut self) -> Result<DacCode> {
        self.dac
            .get_value(self.config.channel.channel)
            .map_err(|e| ActorError::device(&e))
    }

    /// State of the delegated actor, `None` in `DacZeroing` mode.
    pub fn delegated_state(&self) -> Result<Option<ActorState>> {
        match self.config.power_control {
            PowerControl::DacZeroing => Ok(None),
            PowerControl::DelegatedActor(id) => self
                .registry
                .actor_state(id)
                .map(Some)
                .ok_or(ActorError::Configuration(ConfigurationError::UnresolvedActor(id))),
        }
    }

    /// Tear down, handing the collaborators back to the host.
    pub fn release(self) -> (D, R, N) {
        (self.dac, self.registry, self.notifier)
    }

    fn store_power(&mut self, power: PowerPercent) {
        self.power = power;
        self.code = DacCode::from_power(power);
    }

    fn write(&mut self, code: DacCode) -> Result<()> {
        let channel = self.config.channel.channel;
        tracing::debug!(channel = channel.index(), code = code.get(), "DAC write");
        self.dac.write_value(channel, code).map_err(|e| {
            tracing::warn!(channel = channel.index(), kind = ?e.kind(), "DAC write failed");
            ActorError::device(&e)
        })
    }

    fn notify_read_back(&mut self) {
        if !self.config.notification.is_enabled() {
            return;
        }
        let channel = self.config.channel.channel;
        match self.dac.get_value(channel) {
            Ok(value) => {
                let headline = format!("MCP4728 Channel {channel} Value {}", value.get());
                self.notify(&headline, "", NotificationKind::Info);
            }
            Err(err) => {
                let message = format!("Channel {channel}: {}", err.kind());
                self.notify("MCP4728 read-back failed", &message, NotificationKind::Warning);
            }
        }
    }

    fn notify(&mut self, headline: &str, message: &str, kind: NotificationKind) {
        let duration = self.config.notification;
        if !duration.is_enabled() {
            return;
        }
        let notification = Notification {
            headline,
            message,
            kind,
            duration,
        };
        if let Err(err) = self.notifier.notify(&notification) {
            tracing::warn!(headline, error = ?err, "Notification dropped");
        }
    }
}

impl<D, R, N> core::fmt::Debug for PowerActor<D, R, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PowerActor")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("power", &self.power)
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}
