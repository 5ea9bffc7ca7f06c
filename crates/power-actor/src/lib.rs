//! Power actor for an MCP4728 DAC channel
//!
//! Maps a 0–100 % power level onto a 12-bit DAC code and tracks the on/off
//! state of the output. "Off" is realised either by driving the channel to
//! zero or by switching another host actor (for example a relay in front of
//! an SSR), selected per actor at construction.
//!
//! # Example
//!
//! ```
//! use platform::mocks::{MockDac, MockRegistry};
//! use platform::{DacAddress, DacChannel, DacCode, PowerPercent, ReferenceMode, SilentNotifier};
//! use power_actor::{ActorConfig, PowerActor};
//!
//! let config = ActorConfig::dac_zeroing(DacAddress::DEFAULT, DacChannel::A, ReferenceMode::Vdd);
//! let mut actor = PowerActor::init(config, MockDac::new(), MockRegistry::new(), SilentNotifier).unwrap();
//!
//! actor.on(Some(PowerPercent::new(50))).unwrap();
//! assert_eq!(actor.read_back().unwrap(), DacCode::try_new(2047).unwrap());
//!
//! actor.off().unwrap();
//! assert_eq!(actor.read_back().unwrap(), DacCode::ZERO);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod actor;
pub mod config;
pub mod error;
pub mod settings;

pub use actor::PowerActor;
pub use config::{ActorConfig, ChannelConfig, PowerControl};
pub use error::{ActorError, ConfigurationError, Result, SettingsError};
pub use settings::PluginSettings;
