//! MCP4728 blocking driver
//!
//! Communicates with the chip via I²C using the `embedded_hal::i2c::I2c`
//! trait, so it runs on any HAL (Linux `i2cdev`, RP2040, STM32, …).
//!
//! # I²C Address
//!
//! | A2 A1 A0 | Address |
//! |----------|---------|
//! | 000      | `0x60`  |
//! | …        | …       |
//! | 111      | `0x67`  |
//!
//! VREF and gain are written with the all-channel select-bit commands. Every
//! change first reads the chip's current bits and resends them with only the
//! requested channel altered, so actors sharing one chip on different
//! channels never clobber each other's reference or gain. The bits are also
//! kept locally for the multi-write data frames of this driver's channels.

use embedded_hal::i2c::I2c;
use platform::{DacAddress, DacChannel, DacCode, DacDriver, Gain, VrefSource};

use crate::registers::{
    channel_select_bit, decode_channel, i2c_address, multi_write_frame, ChannelReadback,
    CMD_WRITE_GAIN, CMD_WRITE_VREF, READ_FRAME_LEN,
};

/// MCP4728 quad DAC driver.
pub struct Mcp4728<I> {
    i2c: I,
    minor: DacAddress,
    address: u8,
    /// VREF select bits, channel A in bit 3.
    vref_bits: u8,
    /// Gain select bits, channel A in bit 3.
    gain_bits: u8,
}

impl<I: I2c> Mcp4728<I> {
    /// Create a new MCP4728 driver.
    ///
    /// No bus traffic happens here; the first command surfaces an
    /// unreachable device. The local VREF/gain bits start at the power-on
    /// defaults (VDD reference, gain ×1) until the first select-bit change
    /// or [`sync_from_device`](Self::sync_from_device) reads the chip.
    pub fn new(i2c: I, address: DacAddress) -> Self {
        Self {
            i2c,
            minor: address,
            address: i2c_address(address.get()),
            vref_bits: 0,
            gain_bits: 0,
        }
    }

    /// 7-bit I²C address the driver talks to.
    pub fn bus_address(&self) -> u8 {
        self.address
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.i2c
    }

    /// Read the full 24-byte register/EEPROM frame.
    pub fn read_frame(&mut self) -> Result<[u8; READ_FRAME_LEN], I::Error> {
        let mut frame = [0u8; READ_FRAME_LEN];
        self.i2c.read(self.address, &mut frame)?;
        Ok(frame)
    }

    /// Decoded register state of one channel.
    pub fn read_channel(&mut self, channel: DacChannel) -> Result<ChannelReadback, I::Error> {
        let frame = self.read_frame()?;
        // decode_channel only fails for an index outside the frame, which a
        // DacChannel cannot produce.
        Ok(decode_channel(&frame, channel.index()).unwrap_or(ChannelReadback {
            code: 0,
            vref_internal: false,
            gain_x2: false,
            power_down: 0,
        }))
    }

    /// Reload the local VREF/gain bits from the chip's current registers.
    pub fn sync_from_device(&mut self) -> Result<(), I::Error> {
        let frame = self.read_frame()?;
        let mut vref_bits = 0;
        let mut gain_bits = 0;
        for channel in DacChannel::ALL {
            if let Some(ch) = decode_channel(&frame, channel.index()) {
                if ch.vref_internal {
                    vref_bits |= channel_select_bit(channel.index());
                }
                if ch.gain_x2 {
                    gain_bits |= channel_select_bit(channel.index());
                }
            }
        }
        self.vref_bits = vref_bits;
        self.gain_bits = gain_bits;
        Ok(())
    }

    fn channel_vref_internal(&self, channel: DacChannel) -> bool {
        self.vref_bits & channel_select_bit(channel.index()) != 0
    }

    fn channel_gain_x2(&self, channel: DacChannel) -> bool {
        self.gain_bits & channel_select_bit(channel.index()) != 0
    }

    fn with_bit(bits: u8, channel: DacChannel, set: bool) -> u8 {
        let mask = channel_select_bit(channel.index());
        if set {
            bits | mask
        } else {
            bits & !mask
        }
    }
}

impl<I: I2c> DacDriver for Mcp4728<I> {
    type Error = I::Error;

    fn address(&self) -> DacAddress {
        self.minor
    }

    fn set_vref(&mut self, channel: DacChannel, vref: VrefSource) -> Result<(), Self::Error> {
        self.sync_from_device()?;
        let bits = Self::with_bit(self.vref_bits, channel, vref == VrefSource::Internal);
        self.i2c.write(self.address, &[CMD_WRITE_VREF | bits])?;
        self.vref_bits = bits;
        #[cfg(feature = "defmt")]
        defmt::info!("MCP4728 channel {} vref {}", channel.letter(), vref);
        Ok(())
    }

    fn set_gain(&mut self, channel: DacChannel, gain: Gain) -> Result<(), Self::Error> {
        self.sync_from_device()?;
        let bits = Self::with_bit(self.gain_bits, channel, gain == Gain::X2);
        self.i2c.write(self.address, &[CMD_WRITE_GAIN | bits])?;
        self.gain_bits = bits;
        #[cfg(feature = "defmt")]
        defmt::info!("MCP4728 channel {} gain {}", channel.letter(), gain);
        Ok(())
    }

    fn write_value(&mut self, channel: DacChannel, code: DacCode) -> Result<(), Self::Error> {
        let frame = multi_write_frame(
            channel.index(),
            self.channel_vref_internal(channel),
            self.channel_gain_x2(channel),
            code.get(),
        );
        #[cfg(feature = "defmt")]
        defmt::debug!("MCP4728 channel {} <- {=u16}", channel.letter(), code.get());
        self.i2c.write(self.address, &frame)
    }

    fn get_value(&mut self, channel: DacChannel) -> Result<DacCode, Self::Error> {
        let readback = self.read_channel(channel)?;
        Ok(DacCode::from_bits_truncate(readback.code))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
