//! Property-based tests for the power → DAC code mapping.
//! Verifies invariants hold for ALL valid inputs, not just fixed examples.
#![allow(clippy::arithmetic_side_effects)]

use platform::{DacCode, PowerPercent};

proptest::proptest! {
    /// PowerPercent::new never panics for any u8 input (clamps to 100).
    #[test]
    fn power_percent_new_never_panics(pct in 0u8..=255u8) {
        let p = PowerPercent::new(pct);
        assert!(p.get() <= 100);
    }

    /// The mapping is exactly floor(4095 * power / 100).
    #[test]
    fn code_is_floor_of_scaled_power(pct in 0u8..=100u8) {
        let code = DacCode::from_power(PowerPercent::new(pct));
        let expected = 4095u32 * u32::from(pct) / 100;
        assert_eq!(u32::from(code.get()), expected);
    }

    /// Every mapped code fits in 12 bits.
    #[test]
    fn code_stays_within_12_bits(pct in 0u8..=255u8) {
        let code = DacCode::from_power(PowerPercent::new(pct));
        assert!(code.get() <= 4095);
    }

    /// Higher power → higher or equal code (monotone).
    #[test]
    fn code_is_monotone_in_power(a in 0u8..=100u8, b in 0u8..=100u8) {
        let ca = DacCode::from_power(PowerPercent::new(a));
        let cb = DacCode::from_power(PowerPercent::new(b));
        if a > b {
            assert!(ca >= cb, "power {} → {} should be >= power {} → {}", a, ca.get(), b, cb.get());
        }
    }

    /// DacCode::try_new accepts exactly the 12-bit range.
    #[test]
    fn code_try_new_matches_12_bit_range(raw in 0u16..=u16::MAX) {
        assert_eq!(DacCode::try_new(raw).is_ok(), raw <= 4095);
    }
}
