//! DAC domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `PowerPercent`: clamps 0–100, the only input to the code mapping
//! - `DacCode`: 12-bit output code, derived from `PowerPercent` or validated
//! - `DacChannel`: one of the four MCP4728 outputs (A–D)
//! - `DacAddress`: the 3-bit minor address programmed into the part

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "value {} is outside the range {}..={}",
            self.value, self.min, self.max
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRangeError {}

// ── PowerPercent ─────────────────────────────────────────────────────────────

/// Output power as a percentage, clamped to 0–100.
///
/// Wraps a `u8` with the invariant `0 <= value <= 100`.
/// Construct with [`PowerPercent::new`] (clamping) or
/// [`PowerPercent::try_new`] (fallible, strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PowerPercent(u8);

impl PowerPercent {
    /// No output.
    pub const ZERO: Self = Self(0);

    /// Full scale output.
    pub const FULL: Self = Self(100);

    /// Create a `PowerPercent`, clamping values above 100 to 100.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Create a `PowerPercent`, returning an error if `value > 100`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 100`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > 100 {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: 100,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the inner power value (0–100).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// `true` for 0 %.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

// ── DacCode ──────────────────────────────────────────────────────────────────

/// 12-bit DAC output code (0 = 0 V, 4095 = full scale of the selected reference).
///
/// Built from a [`PowerPercent`] with [`DacCode::from_power`], which applies
/// the truncating mapping `code = 4095 * power / 100`:
///
/// | power | code |
/// |-------|------|
/// | 0 %   | 0    |
/// | 50 %  | 2047 |
/// | 100 % | 4095 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DacCode(u16);

impl DacCode {
    /// Output disabled.
    pub const ZERO: Self = Self(0);

    /// Largest 12-bit code.
    pub const MAX: Self = Self(4095);

    /// Map a power percentage to a DAC code using integer floor division.
    #[must_use]
    pub fn from_power(power: PowerPercent) -> Self {
        // 4095 * 100 = 409_500 fits comfortably in u32; the quotient is <= 4095.
        #[allow(clippy::arithmetic_side_effects)]
        let code = u32::from(Self::MAX.0) * u32::from(power.get()) / 100;
        Self(u16::try_from(code).unwrap_or(Self::MAX.0))
    }

    /// Create a `DacCode`, returning an error if `value > 4095`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value` does not fit in 12 bits.
    pub fn try_new(value: u16) -> Result<Self, OutOfRangeError> {
        if value > Self::MAX.0 {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: u32::from(Self::MAX.0),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Build a code from raw register bits, discarding everything above bit 11.
    #[must_use]
    pub fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & Self::MAX.0)
    }

    /// Return the raw 12-bit code.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

impl From<PowerPercent> for DacCode {
    fn from(power: PowerPercent) -> Self {
        Self::from_power(power)
    }
}

// ── DacChannel ───────────────────────────────────────────────────────────────

/// One of the four DAC output channels (0 = A … 3 = D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DacChannel(u8);

impl DacChannel {
    /// Channel A.
    pub const A: Self = Self(0);
    /// Channel B.
    pub const B: Self = Self(1);
    /// Channel C.
    pub const C: Self = Self(2);
    /// Channel D.
    pub const D: Self = Self(3);

    /// All channels in register order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Create a channel index, rejecting anything above 3.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `index > 3`.
    pub fn try_new(index: u8) -> Result<Self, OutOfRangeError> {
        if index > 3 {
            Err(OutOfRangeError {
                value: u32::from(index),
                min: 0,
                max: 3,
            })
        } else {
            Ok(Self(index))
        }
    }

    /// Return the channel index (0–3).
    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Channel letter as printed on the part (`'A'`–`'D'`).
    #[must_use]
    pub fn letter(self) -> char {
        match self.0 {
            0 => 'A',
            1 => 'B',
            2 => 'C',
            _ => 'D',
        }
    }
}

impl core::fmt::Display for DacChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── DacAddress ───────────────────────────────────────────────────────────────

/// Minor I2C address of the DAC (the three low address bits, 0–7).
///
/// The MCP4728 leaves the factory at minor address 0; the 7-bit bus address
/// is formed by the driver from its fixed device code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DacAddress(u8);

impl DacAddress {
    /// Factory default minor address.
    pub const DEFAULT: Self = Self(0);

    /// Create a minor address, rejecting anything above 7.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `minor > 7`.
    pub fn try_new(minor: u8) -> Result<Self, OutOfRangeError> {
        if minor > 7 {
            Err(OutOfRangeError {
                value: u32::from(minor),
                min: 0,
                max: 7,
            })
        } else {
            Ok(Self(minor))
        }
    }

    /// Return the minor address (0–7).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for DacAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
