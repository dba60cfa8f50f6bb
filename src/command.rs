//! Command words understood by the AD5611 and the bus settings used to send them.
//!
//! The AD5611 has a single 16-bit input shift register. Every write is one
//! command word, clocked in most-significant bit first:
//!
//! | Bits    | Contents                        |
//! |---------|---------------------------------|
//! | 15..=14 | Power mode ([`PowerMode`])      |
//! | 13..=4  | 10-bit output code              |
//! | 3..=0   | Don't care, always sent as zero |
//!
//! The word is sent as two bytes, high byte first, while SYNC (chip select) is
//! held low.

use bit_field::BitField;
use embedded_hal::spi::{MODE_1, Mode};

use crate::error::OutOfRange;

/// Resolution of the DAC in bits.
pub const RESOLUTION_BITS: u8 = 10;

/// Largest output code the DAC accepts (`(1 << 10) - 1`).
pub const MAX_VALUE: u16 = (1 << RESOLUTION_BITS) - 1;

/// SPI mode 1 (CPOL = 0, CPHA = 1).
///
/// The clock idles low and the AD5611 samples data on the falling edge.
pub const SPI_MODE: Mode = MODE_1;

/// Bus settings the SPI peripheral must be configured with before it is handed
/// to the driver.
pub const BUS_CONFIG: BusConfig = BusConfig {
    frequency_hz: 10_000_000,
    bit_order: BitOrder::MsbFirst,
    mode: SPI_MODE,
};

/// Bit range of the data field within the command word.
const DATA_BITS: core::ops::Range<usize> = 4..14;
/// Bit range of the power mode field within the command word.
const MODE_BITS: core::ops::Range<usize> = 14..16;

/// Order in which the bits of each byte are shifted onto the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most-significant bit first.
    MsbFirst,
    /// Least-significant bit first.
    LsbFirst,
}

/// Fixed SPI bus parameters for the AD5611.
///
/// `embedded-hal` bus types carry their configuration with them, so the driver
/// cannot set these itself. Use them when creating the bus with your platform's
/// HAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// SCLK frequency in hertz.
    pub frequency_hz: u32,
    /// Bit order of each transferred byte.
    pub bit_order: BitOrder,
    /// Clock polarity and phase.
    pub mode: Mode,
}

/// Operating mode, selected by bits 15 and 14 of each command word.
///
/// # Datasheet
///
/// See the "Power-Down Modes" section and the table of operating modes in the
/// AD5601/AD5611/AD5621 datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Normal operation, the output follows the written code.
    #[default]
    Normal,
    /// The output is powered down and connected to GND through the given load.
    PowerDown(PowerDown),
}

/// Output load applied while the DAC is powered down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerDown {
    /// 1 kΩ to GND.
    Resistor1k,
    /// 100 kΩ to GND.
    Resistor100k,
    /// Output left floating (three-state).
    ThreeState,
}

impl From<PowerMode> for u16 {
    /// Two-bit mode code, not yet shifted into place.
    fn from(value: PowerMode) -> Self {
        match value {
            PowerMode::Normal => 0b00,
            PowerMode::PowerDown(PowerDown::Resistor1k) => 0b01,
            PowerMode::PowerDown(PowerDown::Resistor100k) => 0b10,
            PowerMode::PowerDown(PowerDown::ThreeState) => 0b11,
        }
    }
}

impl From<PowerDown> for PowerMode {
    fn from(value: PowerDown) -> Self {
        PowerMode::PowerDown(value)
    }
}

/// A validated command word.
///
/// Construction checks the output code against [`MAX_VALUE`], so every
/// `Command` can be sent as-is.
///
/// ```rust
/// # use ad5611_hal::{Command, PowerDown, PowerMode};
/// let command = Command::new(PowerMode::Normal, 1023).unwrap();
/// assert_eq!(command.word(), 0x3FF0);
/// assert_eq!(command.to_bytes(), [0x3F, 0xF0]);
///
/// let command = Command::power_down(PowerDown::ThreeState);
/// assert_eq!(command.to_bytes(), [0xC0, 0x00]);
///
/// assert!(Command::new(PowerMode::Normal, 1024).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    mode: PowerMode,
    value: u16,
}

impl Command {
    /// Create a command setting the given mode and output code.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `value` is above [`MAX_VALUE`].
    pub fn new(mode: PowerMode, value: u16) -> Result<Self, OutOfRange> {
        if value > MAX_VALUE {
            return Err(OutOfRange(value));
        }
        Ok(Self { mode, value })
    }

    /// Normal-mode command for the given output code.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `value` is above [`MAX_VALUE`].
    pub fn normal(value: u16) -> Result<Self, OutOfRange> {
        Self::new(PowerMode::Normal, value)
    }

    /// Power-down command. The data field is sent as zero.
    pub fn power_down(load: PowerDown) -> Self {
        Self {
            mode: load.into(),
            value: 0,
        }
    }

    /// Mode set by this command.
    pub fn mode(&self) -> PowerMode {
        self.mode
    }

    /// Output code carried by this command.
    pub fn value(&self) -> u16 {
        self.value
    }

    /// The 16-bit word clocked into the input shift register.
    pub fn word(&self) -> u16 {
        let mut word = 0u16;
        word.set_bits(MODE_BITS, u16::from(self.mode));
        word.set_bits(DATA_BITS, self.value);
        word
    }

    /// The command word split into bytes in transmission order.
    pub fn to_bytes(&self) -> [u8; 2] {
        let word = self.word();
        [(word >> 8) as u8, (word & 0xFF) as u8]
    }
}

impl TryFrom<u16> for Command {
    type Error = OutOfRange;

    /// Normal-mode command for the given output code.
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::normal(value)
    }
}

impl From<Command> for u16 {
    fn from(value: Command) -> Self {
        value.word()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_lands_in_bits_13_to_4() {
        for value in 0..=MAX_VALUE {
            let word = Command::normal(value).unwrap().word();
            assert_eq!(word, value << 4);
            assert_eq!(word.get_bits(MODE_BITS), 0, "mode bits set for {value}");
            assert_eq!(word & 0x000F, 0, "don't-care bits set for {value}");
        }
    }

    #[test]
    fn bytes_are_high_byte_first() {
        assert_eq!(Command::normal(0).unwrap().to_bytes(), [0x00, 0x00]);
        assert_eq!(Command::normal(1).unwrap().to_bytes(), [0x00, 0x10]);
        assert_eq!(Command::normal(0x155).unwrap().to_bytes(), [0x15, 0x50]);
        assert_eq!(Command::normal(MAX_VALUE).unwrap().to_bytes(), [0x3F, 0xF0]);
    }

    #[test]
    fn codes_above_ten_bits_are_rejected() {
        assert_eq!(Command::normal(1024), Err(OutOfRange(1024)));
        assert_eq!(Command::normal(u16::MAX), Err(OutOfRange(u16::MAX)));
        assert_eq!(Command::try_from(2048), Err(OutOfRange(2048)));
    }

    #[test]
    fn power_down_modes_set_top_bits() {
        let words = [
            (PowerDown::Resistor1k, 0x4000),
            (PowerDown::Resistor100k, 0x8000),
            (PowerDown::ThreeState, 0xC000),
        ];
        for (load, word) in words {
            assert_eq!(Command::power_down(load).word(), word);
        }
    }

    #[test]
    fn mode_and_data_fields_do_not_overlap() {
        let command = Command::new(PowerDown::Resistor1k.into(), MAX_VALUE).unwrap();
        assert_eq!(command.word(), 0x7FF0);
    }

    #[cfg(feature = "defmt")]
    #[test]
    fn public_types_implement_defmt_format() {
        fn assert_format<T: defmt::Format>() {}
        assert_format::<BusConfig>();
        assert_format::<BitOrder>();
        assert_format::<PowerMode>();
        assert_format::<Command>();
        assert_format::<OutOfRange>();
    }

    #[test]
    fn bus_config_matches_datasheet_timing() {
        assert_eq!(BUS_CONFIG.frequency_hz, 10_000_000);
        assert_eq!(BUS_CONFIG.bit_order, BitOrder::MsbFirst);
        assert_eq!(BUS_CONFIG.mode, MODE_1);
    }
}
