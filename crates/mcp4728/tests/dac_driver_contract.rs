//! MCP4728 driver integration tests — verify the bus traffic produced through
//! the generic `platform::DacDriver` interface.
//!
//! Run with: cargo test -p mcp4728 --test dac_driver_contract

// Integration test file: unwrap is an intentional test mechanism.
#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use mcp4728::Mcp4728;
use platform::{DacAddress, DacChannel, DacCode, DacDriver, PowerPercent, ReferenceMode};

/// Program a channel the way a power actor does at startup, through the trait only.
fn program<D: DacDriver>(
    dac: &mut D,
    channel: DacChannel,
    mode: ReferenceMode,
) -> Result<(), D::Error> {
    dac.set_vref(channel, mode.vref())?;
    dac.set_gain(channel, mode.gain())?;
    dac.write_value(channel, DacCode::ZERO)
}

fn blank_frame() -> Vec<u8> {
    vec![0u8; 24]
}

#[test]
fn internal_4v096_channel_b_at_half_power() {
    let addr = 0x63;
    let mut b_internal = blank_frame();
    b_internal[7] = 0x80;
    let mut i2c = I2cMock::new(&[
        // VREF select: read current bits, then B internal
        I2cTransaction::read(addr, blank_frame()),
        I2cTransaction::write(addr, vec![0b1000_0100]),
        // Gain select: read current bits, then B ×2
        I2cTransaction::read(addr, b_internal),
        I2cTransaction::write(addr, vec![0b1100_0100]),
        // Multi-write B = 0
        I2cTransaction::write(addr, vec![0x42, 0x90, 0x00]),
        // Multi-write B = 2047 (0x7FF)
        I2cTransaction::write(addr, vec![0x42, 0x97, 0xFF]),
    ]);
    let mut dac = Mcp4728::new(i2c.clone(), DacAddress::try_new(3).unwrap());
    assert_eq!(dac.address().get(), 3);

    program(&mut dac, DacChannel::B, ReferenceMode::Internal4V096).unwrap();
    dac.write_value(DacChannel::B, DacCode::from_power(PowerPercent::new(50)))
        .unwrap();

    i2c.done();
}

#[test]
fn vdd_reference_leaves_select_bits_clear() {
    let mut i2c = I2cMock::new(&[
        I2cTransaction::read(0x60, blank_frame()),
        I2cTransaction::write(0x60, vec![0b1000_0000]),
        I2cTransaction::read(0x60, blank_frame()),
        I2cTransaction::write(0x60, vec![0b1100_0000]),
        I2cTransaction::write(0x60, vec![0x40, 0x00, 0x00]),
    ]);
    let mut dac = Mcp4728::new(i2c.clone(), DacAddress::DEFAULT);

    program(&mut dac, DacChannel::A, ReferenceMode::Vdd).unwrap();

    i2c.done();
}

#[test]
fn second_channel_keeps_first_channels_reference() {
    // Channel A already runs from the internal reference at ×2.
    let mut a_configured = blank_frame();
    a_configured[1] = 0x90;
    let mut a_configured_b_internal = a_configured.clone();
    a_configured_b_internal[7] = 0x80;
    let mut i2c = I2cMock::new(&[
        I2cTransaction::read(0x60, a_configured),
        I2cTransaction::write(0x60, vec![0b1000_1100]),
        I2cTransaction::read(0x60, a_configured_b_internal),
        I2cTransaction::write(0x60, vec![0b1100_1000]),
        I2cTransaction::write(0x60, vec![0x42, 0x80, 0x00]),
    ]);
    let mut dac = Mcp4728::new(i2c.clone(), DacAddress::DEFAULT);

    program(&mut dac, DacChannel::B, ReferenceMode::Internal2V048).unwrap();

    i2c.done();
}

#[test]
fn unreachable_device_surfaces_bus_error() {
    let mut i2c = I2cMock::new(&[I2cTransaction::read(0x60, blank_frame())
        .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))]);
    let mut dac = Mcp4728::new(i2c.clone(), DacAddress::DEFAULT);

    assert!(program(&mut dac, DacChannel::D, ReferenceMode::Internal2V048).is_err());

    i2c.done();
}

#[test]
fn read_back_returns_latched_code() {
    let mut frame = blank_frame();
    // Channel D register half: VREF set, code 0x123.
    frame[19] = 0x81;
    frame[20] = 0x23;
    // Channel D EEPROM half holds a different value that must be ignored.
    frame[22] = 0x0F;
    frame[23] = 0xFF;
    let mut i2c = I2cMock::new(&[I2cTransaction::read(0x60, frame)]);
    let mut dac = Mcp4728::new(i2c.clone(), DacAddress::DEFAULT);

    assert_eq!(dac.get_value(DacChannel::D).unwrap().get(), 0x123);

    i2c.done();
}
