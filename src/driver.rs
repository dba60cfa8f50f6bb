use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::command::{Command, PowerDown};
use crate::error::Error;

/// Error returned by [`Ad5611`] for a given bus and chip-select pin.
type DriverError<SPI, CS> =
    Error<<SPI as spi::ErrorType>::Error, <CS as digital::ErrorType>::Error>;

/// Driver for the AD5611 10-bit DAC.
///
/// # Quick start
///
/// Configure an SPI bus with [`BUS_CONFIG`] (10 MHz, MSB first, SPI mode 1) and
/// a push-pull output pin for the SYNC (chip select) line using your platform's
/// HAL, then hand both to [`Ad5611::new`]. Call [`Ad5611::init`] once to idle the
/// chip select line high, then write output codes with [`Ad5611::write_value`].
///
/// [`BUS_CONFIG`]: crate::BUS_CONFIG
///
/// The driver takes ownership of an [`SpiBus`] and toggles chip select itself.
/// If the bus is shared with other devices, wrap it in an [`SpiDevice`]
/// implementation such as those in `embedded-hal-bus` and use
/// [`Ad5611Device`] instead.
///
/// [`SpiDevice`]: embedded_hal::spi::SpiDevice
/// [`Ad5611Device`]: crate::Ad5611Device
///
/// # Framing
///
/// Every write follows the same sequence: chip select low, two bytes (high byte
/// first), bus flush, chip select high. Out-of-range values are rejected before
/// chip select is touched. If the bus reports an error, chip select is still
/// released before the error is returned.
#[derive(Debug)]
pub struct Ad5611<SPI, CS> {
    spi: SPI,
    /// Active-low SYNC line.
    cs: CS,
}

impl<SPI, CS> Ad5611<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create the driver. No pin or bus activity takes place.
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Drive chip select to its inactive (high) level.
    ///
    /// Call this once before the first write. Calling it again is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChipSelect`] if the pin cannot be driven.
    pub fn init(&mut self) -> Result<(), DriverError<SPI, CS>> {
        self.cs.set_high().map_err(Error::ChipSelect)
    }

    /// Set the DAC output to the given 10-bit code in normal operating mode.
    ///
    /// This also brings the DAC out of any power-down mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] without any bus activity if `value` is
    /// above 1023. Bus and pin failures are returned as [`Error::Spi`] and
    /// [`Error::ChipSelect`].
    pub fn write_value(&mut self, value: u16) -> Result<(), DriverError<SPI, CS>> {
        let command = Command::normal(value)?;
        self.write_command(command)
    }

    /// Power down the DAC output with the given output load.
    ///
    /// # Datasheet
    ///
    /// See the "Power-Down Modes" section. The DAC register keeps its contents
    /// but the next [`Ad5611::write_value`] replaces them anyway.
    pub fn power_down(&mut self, load: PowerDown) -> Result<(), DriverError<SPI, CS>> {
        self.write_command(Command::power_down(load))
    }

    /// Send a single command word, framed by chip select.
    pub fn write_command(&mut self, command: Command) -> Result<(), DriverError<SPI, CS>> {
        let bytes = command.to_bytes();
        #[cfg(feature = "defmt")]
        defmt::trace!("AD5611 write {=u16:#x}", command.word());

        self.cs.set_low().map_err(Error::ChipSelect)?;
        // Bytes must be fully clocked out before SYNC rises.
        let sent = self.spi.write(&bytes).and_then(|()| self.spi.flush());
        let released = self.cs.set_high();

        sent.map_err(Error::Spi)?;
        released.map_err(Error::ChipSelect)
    }

    /// Take the driver apart, returning the bus and chip-select pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}
