//! Multi-channel DAC abstraction
//!
//! The power actor talks to the converter only through [`DacDriver`]. The
//! concrete MCP4728 driver lives in its own crate; tests and the simulator
//! supply in-memory implementations.

use crate::dac_types::{DacAddress, DacChannel, DacCode};

/// Register-level operations of a 4-channel 12-bit I2C DAC.
///
/// All operations are blocking: each call performs at most one bus
/// transaction and returns once it has completed or failed.
pub trait DacDriver {
    /// Bus error type. Classified through [`embedded_hal::i2c::Error::kind`].
    type Error: embedded_hal::i2c::Error;

    /// Minor bus address of the chip this driver talks to.
    fn address(&self) -> DacAddress;

    /// Select the voltage reference of one channel.
    fn set_vref(&mut self, channel: DacChannel, vref: VrefSource) -> Result<(), Self::Error>;

    /// Select the output gain of one channel (only meaningful with [`VrefSource::Internal`]).
    fn set_gain(&mut self, channel: DacChannel, gain: Gain) -> Result<(), Self::Error>;

    /// Write an output code to one channel; the output updates immediately.
    fn write_value(&mut self, channel: DacChannel, code: DacCode) -> Result<(), Self::Error>;

    /// Read back the code currently latched on one channel.
    fn get_value(&mut self, channel: DacChannel) -> Result<DacCode, Self::Error>;
}

impl<D: DacDriver + ?Sized> DacDriver for &mut D {
    type Error = D::Error;

    fn address(&self) -> DacAddress {
        (**self).address()
    }

    fn set_vref(&mut self, channel: DacChannel, vref: VrefSource) -> Result<(), Self::Error> {
        (**self).set_vref(channel, vref)
    }

    fn set_gain(&mut self, channel: DacChannel, gain: Gain) -> Result<(), Self::Error> {
        (**self).set_gain(channel, gain)
    }

    fn write_value(&mut self, channel: DacChannel, code: DacCode) -> Result<(), Self::Error> {
        (**self).write_value(channel, code)
    }

    fn get_value(&mut self, channel: DacChannel) -> Result<DacCode, Self::Error> {
        (**self).get_value(channel)
    }
}

/// Voltage reference bit of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VrefSource {
    /// Supply rail (VDD) as reference; gain has no effect.
    #[default]
    Vdd,
    /// Internal 2.048 V bandgap reference.
    Internal,
}

/// Output amplifier gain of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// ×1
    #[default]
    X1,
    /// ×2
    X2,
}

/// User-facing reference selection.
///
/// Each mode fixes both register bits: the reference source and the gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReferenceMode {
    /// Full scale = VDD.
    #[default]
    Vdd,
    /// Full scale = 2.048 V (internal reference, gain ×1).
    Internal2V048,
    /// Full scale = 4.096 V (internal reference, gain ×2).
    Internal4V096,
}

impl ReferenceMode {
    /// Reference source bit for this mode.
    #[must_use]
    pub fn vref(self) -> VrefSource {
        match self {
            Self::Vdd => VrefSource::Vdd,
            Self::Internal2V048 | Self::Internal4V096 => VrefSource::Internal,
        }
    }

    /// Gain bit for this mode.
    #[must_use]
    pub fn gain(self) -> Gain {
        match self {
            Self::Internal4V096 => Gain::X2,
            Self::Vdd | Self::Internal2V048 => Gain::X1,
        }
    }

    /// Full-scale output in millivolts, `None` when it tracks the supply.
    #[must_use]
    pub fn full_scale_mv(self) -> Option<u16> {
        match self {
            Self::Vdd => None,
            Self::Internal2V048 => Some(2048),
            Self::Internal4V096 => Some(4096),
        }
    }

    /// Label shown by the host's configuration surface.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Vdd => "Vdd",
            Self::Internal2V048 => "Internal 2.048V",
            Self::Internal4V096 => "Internal 4.096V",
        }
    }
}

impl core::fmt::Display for ReferenceMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_is_derived_from_reference_mode() {
        assert_eq!(ReferenceMode::Vdd.gain(), Gain::X1);
        assert_eq!(ReferenceMode::Internal2V048.gain(), Gain::X1);
        assert_eq!(ReferenceMode::Internal4V096.gain(), Gain::X2);
    }

    #[test]
    fn only_vdd_mode_uses_the_supply_reference() {
        assert_eq!(ReferenceMode::Vdd.vref(), VrefSource::Vdd);
        assert_eq!(ReferenceMode::Internal2V048.vref(), VrefSource::Internal);
        assert_eq!(ReferenceMode::Internal4V096.vref(), VrefSource::Internal);
    }

    #[test]
    fn full_scale_is_unknown_for_supply_reference() {
        assert_eq!(ReferenceMode::Vdd.full_scale_mv(), None);
        assert_eq!(ReferenceMode::Internal4V096.full_scale_mv(), Some(4096));
    }
}
