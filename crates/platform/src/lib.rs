//! Hardware abstraction seams for the MCP4728 power actor
//!
//! This crate provides the trait-based collaborators the power actor is
//! written against, so the control logic can be developed and tested without
//! a DAC on the bus or a host runtime around it.
//!
//! # Architecture Layers
//!
//! ```text
//! Host plugin runtime (brewing controller)
//!         ↓
//! power-actor (on/off/power state machine)
//!         ↓
//! Platform seams (this crate - trait abstractions)
//!         ↓
//! mcp4728 driver → embedded-hal I2C bus
//! ```
//!
//! # Seams
//!
//! - [`DacDriver`] - register-level DAC operations
//! - [`ActorRegistry`] - lookup and switching of other host actors
//! - [`Notifier`] - diagnostic banners in the host UI
//!
//! # Features
//!
//! - `std`: Link the standard library (error impls, mocks outside tests)
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```
//! use platform::{DacCode, DacChannel, DacDriver, PowerPercent};
//!
//! fn full_power<D: DacDriver>(dac: &mut D) -> Result<(), D::Error> {
//!     dac.write_value(DacChannel::A, DacCode::from_power(PowerPercent::FULL))
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this HAL crate:
#![allow(clippy::doc_markdown)] // register and part names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod actor;
pub mod config;
pub mod dac;
pub mod dac_types;
pub mod mocks;
pub mod notify;

// Re-export main traits
pub use actor::{ActorId, ActorRegistry, ActorState, NoRegistry, RegistryError};
pub use dac::{DacDriver, Gain, ReferenceMode, VrefSource};
pub use notify::{Notification, NotificationDuration, NotificationKind, Notifier, SilentNotifier};

// Re-export newtypes
pub use dac_types::{DacAddress, DacChannel, DacCode, OutOfRangeError, PowerPercent};

// Bus error classification shared by every DacDriver implementation.
pub use embedded_hal::i2c::{Error as BusError, ErrorKind as BusErrorKind};
