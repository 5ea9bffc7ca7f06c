//! Plugin identity and compile-time defaults
//!
//! Naming and default values shown by the host should reference these
//! constants rather than hardcoding them.

/// Plugin name as registered with the host.
pub const PLUGIN_NAME: &str = "MCP4728Actor";

/// One-line description shown in the host's actor list.
pub const PLUGIN_DESCRIPTION: &str =
    "Power control through one channel of a four channel MCP4728 12-bit I2C DAC";

/// Plugin version (synchronized with Cargo.toml)
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default banner duration in milliseconds.
pub const DEFAULT_NOTIFICATION_MS: u32 = 5000;

/// Power stored at startup, in percent. The actor also starts switched off.
pub const DEFAULT_POWER_PERCENT: u8 = 0;
