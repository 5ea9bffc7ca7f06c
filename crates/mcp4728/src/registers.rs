//! MCP4728 command and frame layout
//!
//! Source: Microchip MCP4728 datasheet DS22187E, §5.6 (write commands) and
//! §5.7 (read command).
//!
//! # Addressing
//!
//! The 7-bit address is the fixed device code `0b1100` followed by the three
//! address bits stored in EEPROM (`A2 A1 A0`, factory default `000`).
//!
//! # Select-bit commands
//!
//! "Write VREF select bits" and "Write Gain select bits" are one-byte
//! commands that always set all four channels at once, channel A in bit 3
//! down to channel D in bit 0. A driver that changes one channel must resend
//! the other three channels' current bits.
//!
//! # Read frame
//!
//! A read returns 24 bytes: for each channel A–D, three bytes of the DAC
//! input register followed by three bytes of its EEPROM copy:
//!
//! ```text
//! [RDY POR DAC1 DAC0 0 A2 A1 A0] [VREF PD1 PD0 G D11 D10 D9 D8] [D7 .. D0]
//! ```

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Fixed device code occupying address bits 6..3.
pub const DEVICE_CODE: u8 = 0b110_0000;

/// Mask of the programmable address bits.
pub const ADDRESS_BITS_MASK: u8 = 0b111;

/// 7-bit I2C address for a minor address (only the low three bits are used).
#[inline]
#[must_use]
pub const fn i2c_address(minor: u8) -> u8 {
    DEVICE_CODE | (minor & ADDRESS_BITS_MASK)
}

// ---------------------------------------------------------------------------
// Command bytes
// ---------------------------------------------------------------------------

/// Multi-write: one channel's input register per 3-byte group (§5.6.2).
pub const CMD_MULTI_WRITE: u8 = 0b0100_0000;

/// Write VREF select bits for all channels (§5.6.6).
pub const CMD_WRITE_VREF: u8 = 0b1000_0000;

/// Write gain select bits for all channels (§5.6.7).
pub const CMD_WRITE_GAIN: u8 = 0b1100_0000;

// ---------------------------------------------------------------------------
// Data byte fields
// ---------------------------------------------------------------------------

/// Upper data byte: VREF bit (1 = internal 2.048 V).
pub const DATA_VREF: u8 = 1 << 7;

/// Upper data byte: shift of the two power-down bits (00 = normal operation).
pub const DATA_PD_SHIFT: u8 = 5;

/// Upper data byte: gain bit (1 = ×2).
pub const DATA_GAIN: u8 = 1 << 4;

/// Upper data byte: mask of code bits D11..D8.
pub const DATA_CODE_HIGH_MASK: u8 = 0x0F;

/// Mask of a 12-bit DAC code.
pub const CODE_MASK: u16 = 0x0FFF;

// ---------------------------------------------------------------------------
// Read frame
// ---------------------------------------------------------------------------

/// Length of a full read frame (4 channels × 6 bytes).
pub const READ_FRAME_LEN: usize = 24;

/// Bytes per channel in the read frame (3 register + 3 EEPROM).
pub const READ_CHANNEL_STRIDE: usize = 6;

/// Select bit of `channel` (0 = A … 3 = D) in the VREF/gain select byte.
#[inline]
#[must_use]
pub const fn channel_select_bit(channel: u8) -> u8 {
    0b1000 >> (channel & 0b11)
}

/// Build the 3-byte multi-write group for one channel with UDAC clear.
#[inline]
#[must_use]
pub const fn multi_write_frame(channel: u8, vref_internal: bool, gain_x2: bool, code: u16) -> [u8; 3] {
    let code = code & CODE_MASK;
    let mut upper = ((code >> 8) as u8) & DATA_CODE_HIGH_MASK;
    if vref_internal {
        upper |= DATA_VREF;
    }
    if gain_x2 {
        upper |= DATA_GAIN;
    }
    [
        CMD_MULTI_WRITE | ((channel & 0b11) << 1),
        upper,
        (code & 0xFF) as u8,
    ]
}

/// Register-half of one channel's block in a read frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelReadback {
    /// Latched 12-bit code.
    pub code: u16,
    /// VREF bit (internal reference selected).
    pub vref_internal: bool,
    /// Gain bit (×2 selected).
    pub gain_x2: bool,
    /// Power-down bits (0 = normal operation).
    pub power_down: u8,
}

/// Decode the input-register half of `channel`'s block from a read frame.
#[must_use]
pub fn decode_channel(frame: &[u8; READ_FRAME_LEN], channel: u8) -> Option<ChannelReadback> {
    let start = usize::from(channel & 0b11).checked_mul(READ_CHANNEL_STRIDE)?;
    let upper = *frame.get(start.checked_add(1)?)?;
    let lower = *frame.get(start.checked_add(2)?)?;
    Some(ChannelReadback {
        code: (u16::from(upper & DATA_CODE_HIGH_MASK) << 8) | u16::from(lower),
        vref_internal: upper & DATA_VREF != 0,
        gain_x2: upper & DATA_GAIN != 0,
        power_down: (upper >> DATA_PD_SHIFT) & 0b11,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn default_address_is_0x60() {
        assert_eq!(i2c_address(0), 0x60);
        assert_eq!(i2c_address(7), 0x67);
        // Only three address bits exist.
        assert_eq!(i2c_address(0xFF), 0x67);
    }

    #[test]
    fn select_bits_run_from_a_high_to_d_low() {
        assert_eq!(channel_select_bit(0), 0b1000);
        assert_eq!(channel_select_bit(1), 0b0100);
        assert_eq!(channel_select_bit(2), 0b0010);
        assert_eq!(channel_select_bit(3), 0b0001);
    }

    #[test]
    fn multi_write_frame_layout() {
        // Channel C, internal reference, gain ×2, code 0xABC.
        assert_eq!(
            multi_write_frame(2, true, true, 0x0ABC),
            [0b0100_0100, 0b1001_1010, 0xBC]
        );
        // Channel A, VDD reference, full scale.
        assert_eq!(multi_write_frame(0, false, false, 4095), [0x40, 0x0F, 0xFF]);
    }

    #[test]
    fn multi_write_frame_masks_code_to_12_bits() {
        assert_eq!(multi_write_frame(1, false, false, 0xF123), [0x42, 0x01, 0x23]);
    }

    #[test]
    fn command_codes_occupy_the_top_three_bits() {
        assert_eq!(CMD_MULTI_WRITE >> 5, 0b010);
        assert_eq!(CMD_WRITE_VREF >> 5, 0b100);
        assert_eq!(CMD_WRITE_GAIN >> 5, 0b110);
    }

    #[test]
    fn decode_channel_reads_register_half() {
        let mut frame = [0u8; READ_FRAME_LEN];
        // Channel B block starts at byte 6.
        // Status byte: RDY set, DAC1..DAC0 = 01.
        frame[6] = 0b1001_0000;
        frame[7] = DATA_VREF | DATA_GAIN | 0x07;
        frame[8] = 0xFF;
        // EEPROM half must be ignored.
        frame[10] = 0x00;
        frame[11] = 0x00;
        let ch = decode_channel(&frame, 1).unwrap();
        assert_eq!(ch.code, 0x7FF);
        assert!(ch.vref_internal);
        assert!(ch.gain_x2);
        assert_eq!(ch.power_down, 0);
    }

    #[test]
    fn decode_channel_d_uses_last_block() {
        let mut frame = [0u8; READ_FRAME_LEN];
        frame[19] = 0x0A;
        frame[20] = 0x5A;
        assert_eq!(decode_channel(&frame, 3).unwrap().code, 0xA5A);
    }
}
