//! Type system enforcement tests for the DAC domain newtypes.
//! These newtypes keep out-of-range settings from ever reaching a register.
#![allow(clippy::unwrap_used)]

// ── PowerPercent ─────────────────────────────────────────────────────────────

#[test]
fn power_percent_new_clamps_over_100() {
    use platform::PowerPercent;
    let p = PowerPercent::new(150);
    assert_eq!(p.get(), 100, "PowerPercent::new(150) should clamp to 100");
}

#[test]
fn power_percent_try_new_rejects_over_100() {
    use platform::PowerPercent;
    assert!(PowerPercent::try_new(101).is_err());
    assert!(PowerPercent::try_new(255).is_err());
    assert!(PowerPercent::try_new(0).is_ok());
    assert!(PowerPercent::try_new(100).is_ok());
}

#[test]
fn power_percent_is_one_byte() {
    use platform::PowerPercent;
    assert_eq!(core::mem::size_of::<PowerPercent>(), 1);
}

#[test]
fn power_percent_default_is_zero() {
    use platform::PowerPercent;
    assert!(PowerPercent::default().is_zero());
    assert_eq!(PowerPercent::default(), PowerPercent::ZERO);
}

// ── DacCode ──────────────────────────────────────────────────────────────────

#[test]
fn dac_code_from_full_power_is_full_scale() {
    use platform::{DacCode, PowerPercent};
    assert_eq!(DacCode::from_power(PowerPercent::FULL), DacCode::MAX);
    assert_eq!(DacCode::MAX.get(), 4095);
}

#[test]
fn dac_code_from_half_power_truncates() {
    use platform::{DacCode, PowerPercent};
    // 4095 * 50 / 100 = 2047.5 → 2047 (floor, not round)
    assert_eq!(DacCode::from_power(PowerPercent::new(50)).get(), 2047);
}

#[test]
fn dac_code_from_zero_power_is_zero() {
    use platform::{DacCode, PowerPercent};
    assert_eq!(DacCode::from(PowerPercent::ZERO), DacCode::ZERO);
}

#[test]
fn dac_code_is_two_bytes() {
    use platform::DacCode;
    assert_eq!(core::mem::size_of::<DacCode>(), 2);
}

// ── DacChannel / DacAddress ──────────────────────────────────────────────────

#[test]
fn dac_channel_accepts_0_to_3() {
    use platform::DacChannel;
    for i in 0..=3u8 {
        assert_eq!(DacChannel::try_new(i).unwrap().index(), i);
    }
    assert!(DacChannel::try_new(4).is_err());
}

#[test]
fn dac_channel_error_reports_bounds() {
    use platform::{DacChannel, OutOfRangeError};
    assert_eq!(
        DacChannel::try_new(200),
        Err(OutOfRangeError {
            value: 200,
            min: 0,
            max: 3
        })
    );
}

#[test]
fn dac_address_accepts_0_to_7() {
    use platform::DacAddress;
    for i in 0..=7u8 {
        assert_eq!(DacAddress::try_new(i).unwrap().get(), i);
    }
    assert!(DacAddress::try_new(8).is_err());
}
