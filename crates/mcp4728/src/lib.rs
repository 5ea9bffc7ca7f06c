//! Microchip MCP4728 quad 12-bit DAC driver
//!
//! Implements [`platform::DacDriver`] on top of any blocking
//! `embedded_hal::i2c::I2c` bus.
//!
//! # Example
//!
//! ```no_run
//! use mcp4728::Mcp4728;
//! use platform::{DacAddress, DacChannel, DacCode, DacDriver, PowerPercent, ReferenceMode};
//!
//! fn drive<I: embedded_hal::i2c::I2c>(i2c: I) -> Result<(), I::Error> {
//!     let mut dac = Mcp4728::new(i2c, DacAddress::DEFAULT);
//!     let mode = ReferenceMode::Internal4V096;
//!     dac.set_vref(DacChannel::A, mode.vref())?;
//!     dac.set_gain(DacChannel::A, mode.gain())?;
//!     dac.write_value(DacChannel::A, DacCode::from_power(PowerPercent::new(40)))
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod driver;
pub mod registers;

pub use driver::Mcp4728;
