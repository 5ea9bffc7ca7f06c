//! Host property values and their validation
//!
//! The host stores every property as the text shown in its settings form,
//! so numeric fields accept either JSON numbers or numeric strings and the
//! option fields use the host's labels verbatim.
//!
//! ```
//! use power_actor::settings::PluginSettings;
//! use power_actor::ActorConfig;
//!
//! let settings = PluginSettings::from_json(
//!     r#"{ "address": "0", "channel": "2", "voltage_ref": "Internal 4.096V" }"#,
//! ).unwrap();
//! let config = ActorConfig::try_from(&settings).unwrap();
//! assert_eq!(config.channel.channel.index(), 2);
//! ```

use platform::config::DEFAULT_NOTIFICATION_MS;
use platform::{ActorId, DacAddress, DacChannel, NotificationDuration, ReferenceMode};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{ActorConfig, ChannelConfig, PowerControl};
use crate::error::{ConfigurationError, SettingsError};

// ---------------------------------------------------------------------------
// Host labels
// ---------------------------------------------------------------------------

/// Label of the DAC address property.
pub const LABEL_ADDRESS: &str = "DAC Address";
/// Label of the channel property.
pub const LABEL_CHANNEL: &str = "Channel";
/// Label of the voltage reference property.
pub const LABEL_VOLTAGE_REF: &str = "Voltage reference";
/// Label of the power control property.
pub const LABEL_POWER_CONTROL: &str = "Power control";
/// Label of the delegated actor property.
pub const LABEL_POWER_ACTOR: &str = "Power actor";
/// Label of the notification duration property.
pub const LABEL_TIMEOUT: &str = "Notification duration (ms)";

/// Kind of form control the host renders for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Drop-down with fixed options.
    Select(&'static [&'static str]),
    /// Free numeric input.
    Number,
    /// Picker over the host's configured actors.
    Actor,
}

/// A property as declared to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Field name in [`PluginSettings`].
    pub key: &'static str,
    /// Label shown by the host.
    pub label: &'static str,
    /// Form control.
    pub kind: PropertyKind,
    /// Help text shown under the control.
    pub description: &'static str,
}

/// Every property of the plugin, in the order the host shows them.
pub const PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor {
        key: "address",
        label: LABEL_ADDRESS,
        kind: PropertyKind::Select(&["0", "1", "2", "3", "4", "5", "6", "7"]),
        description: "Minor address of the MCP4728 DAC unit. Use 0 unless you have changed the address manually",
    },
    PropertyDescriptor {
        key: "channel",
        label: LABEL_CHANNEL,
        kind: PropertyKind::Select(&["0", "1", "2", "3"]),
        description: "The channel to output the voltage",
    },
    PropertyDescriptor {
        key: "voltage_ref",
        label: LABEL_VOLTAGE_REF,
        kind: PropertyKind::Select(&["Vdd", "Internal 2.048V", "Internal 4.096V"]),
        description: "Full-scale output: the supply voltage or the internal reference (x2 gain for 4.096V)",
    },
    PropertyDescriptor {
        key: "power_control",
        label: LABEL_POWER_CONTROL,
        kind: PropertyKind::Select(&["DAC", "Actor"]),
        description: "Switch off by driving the DAC output to zero, or by switching another actor",
    },
    PropertyDescriptor {
        key: "power_actor",
        label: LABEL_POWER_ACTOR,
        kind: PropertyKind::Actor,
        description: "Actor switched on and off when power control is set to Actor",
    },
    PropertyDescriptor {
        key: "timeout",
        label: LABEL_TIMEOUT,
        kind: PropertyKind::Number,
        description: "0ms will disable notifications completely",
    },
];

/// Look up a property by its field name.
pub fn property(key: &str) -> Option<&'static PropertyDescriptor> {
    PROPERTIES.iter().find(|p| p.key == key)
}

// ---------------------------------------------------------------------------
// Option values
// ---------------------------------------------------------------------------

/// Voltage reference option, serialized with the host's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VoltageReference {
    /// Supply voltage.
    #[default]
    #[serde(rename = "Vdd")]
    Vdd,
    /// Internal 2.048 V, gain x1.
    #[serde(rename = "Internal 2.048V")]
    Internal2V048,
    /// 4.096 V (internal 2.048 V, gain x2).
    #[serde(rename = "Internal 4.096V")]
    Internal4V096,
}

impl From<VoltageReference> for ReferenceMode {
    fn from(value: VoltageReference) -> Self {
        match value {
            VoltageReference::Vdd => Self::Vdd,
            VoltageReference::Internal2V048 => Self::Internal2V048,
            VoltageReference::Internal4V096 => Self::Internal4V096,
        }
    }
}

impl From<ReferenceMode> for VoltageReference {
    fn from(value: ReferenceMode) -> Self {
        match value {
            ReferenceMode::Vdd => Self::Vdd,
            ReferenceMode::Internal2V048 => Self::Internal2V048,
            ReferenceMode::Internal4V096 => Self::Internal4V096,
        }
    }
}

/// Power control option, serialized with the host's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerControlMode {
    /// Zero the DAC output when off.
    #[default]
    #[serde(rename = "DAC")]
    Dac,
    /// Switch the power actor when off.
    #[serde(rename = "Actor")]
    Actor,
}

// ---------------------------------------------------------------------------
// Settings document
// ---------------------------------------------------------------------------

/// Property values as stored by the host.
///
/// Missing fields take the host's defaults. Range checks happen in the
/// conversion to [`ActorConfig`], not during deserialization, so the error
/// can name the offending property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Minor DAC address.
    #[serde(deserialize_with = "number_or_text")]
    pub address: i64,
    /// DAC channel index.
    #[serde(deserialize_with = "number_or_text")]
    pub channel: i64,
    /// Voltage reference.
    pub voltage_ref: VoltageReference,
    /// Off strategy.
    pub power_control: PowerControlMode,
    /// Delegated actor id; empty text counts as unset.
    #[serde(deserialize_with = "optional_number_or_text")]
    pub power_actor: Option<i64>,
    /// Notification duration in milliseconds.
    #[serde(deserialize_with = "number_or_text")]
    pub timeout: i64,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            address: 0,
            channel: 0,
            voltage_ref: VoltageReference::Vdd,
            power_control: PowerControlMode::Dac,
            power_actor: None,
            timeout: i64::from(DEFAULT_NOTIFICATION_MS),
        }
    }
}

impl PluginSettings {
    /// Parse a JSON settings document and validate it.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        ActorConfig::try_from(&settings)?;
        Ok(settings)
    }

    /// Serialize back into the host's JSON shape.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&ActorConfig> for PluginSettings {
    fn from(config: &ActorConfig) -> Self {
        let (power_control, power_actor) = match config.power_control {
            PowerControl::DacZeroing => (PowerControlMode::Dac, None),
            PowerControl::DelegatedActor(id) => (PowerControlMode::Actor, Some(i64::from(id.get()))),
        };
        Self {
            address: i64::from(config.channel.address.get()),
            channel: i64::from(config.channel.channel.index()),
            voltage_ref: config.channel.reference.into(),
            power_control,
            power_actor,
            timeout: i64::from(config.notification.as_millis()),
        }
    }
}

fn in_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, ConfigurationError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigurationError::OutOfRange { field, value, min, max })
    }
}

fn narrow<T: TryFrom<i64>>(field: &'static str, value: i64, max: i64) -> Result<T, ConfigurationError> {
    let value = in_range(field, value, 0, max)?;
    T::try_from(value).map_err(|_| ConfigurationError::OutOfRange {
        field,
        value,
        min: 0,
        max,
    })
}

impl TryFrom<&PluginSettings> for ActorConfig {
    type Error = ConfigurationError;

    fn try_from(settings: &PluginSettings) -> Result<Self, Self::Error> {
        let out_of_range = |field, value, max| ConfigurationError::OutOfRange {
            field,
            value,
            min: 0,
            max,
        };

        let address = narrow::<u8>(LABEL_ADDRESS, settings.address, 7)?;
        let address = DacAddress::try_new(address).map_err(|_| out_of_range(LABEL_ADDRESS, settings.address, 7))?;

        let channel = narrow::<u8>(LABEL_CHANNEL, settings.channel, 3)?;
        let channel = DacChannel::try_new(channel).map_err(|_| out_of_range(LABEL_CHANNEL, settings.channel, 3))?;

        let timeout = narrow::<u32>(LABEL_TIMEOUT, settings.timeout, i64::from(u32::MAX))?;

        let power_control = match settings.power_control {
            PowerControlMode::Dac => PowerControl::DacZeroing,
            PowerControlMode::Actor => {
                let raw = settings.power_actor.ok_or(ConfigurationError::MissingDelegate)?;
                let id = narrow::<u32>(LABEL_POWER_ACTOR, raw, i64::from(u32::MAX))?;
                PowerControl::DelegatedActor(ActorId::new(id))
            }
        };

        Ok(Self {
            channel: ChannelConfig {
                address,
                channel,
                reference: settings.voltage_ref.into(),
            },
            power_control,
            notification: NotificationDuration::from_millis(timeout),
        })
    }
}

impl TryFrom<PluginSettings> for ActorConfig {
    type Error = ConfigurationError;

    fn try_from(settings: PluginSettings) -> Result<Self, Self::Error> {
        Self::try_from(&settings)
    }
}

// ---------------------------------------------------------------------------
// Lenient number parsing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    fn into_number<E: serde::de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            Self::Number(n) => Ok(Some(n)),
            // The host's number inputs submit floats.
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(Some(f as i64)),
            Self::Float(f) => Err(E::custom(format_args!("expected an integer, got {f}"))),
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse()
                    .map(Some)
                    .map_err(|_| E::custom(format_args!("expected an integer, got '{text}'")))
            }
        }
    }
}

fn number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    NumberOrText::deserialize(deserializer)?
        .into_number()?
        .ok_or_else(|| serde::de::Error::custom("expected an integer, got an empty string"))
}

fn optional_number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(value) => value.into_number(),
        None => Ok(None),
    }
}
