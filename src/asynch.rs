//! Async version of the driver, over `embedded-hal-async` SPI buses.
use embedded_hal::digital::{self, OutputPin};
use embedded_hal_async::spi::{self, SpiBus};

use crate::command::{Command, PowerDown};
use crate::error::Error;

type DriverError<SPI, CS> =
    Error<<SPI as spi::ErrorType>::Error, <CS as digital::ErrorType>::Error>;

/// Async driver for the AD5611 10-bit DAC.
///
/// Behaves exactly as [`Ad5611`](crate::Ad5611), but awaits the bus transfer.
/// Chip select is a blocking [`OutputPin`] since toggling a GPIO does not wait.
#[derive(Debug)]
pub struct Ad5611Async<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> Ad5611Async<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create the driver. No pin or bus activity takes place.
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Drive chip select to its inactive (high) level.
    pub fn init(&mut self) -> Result<(), DriverError<SPI, CS>> {
        self.cs.set_high().map_err(Error::ChipSelect)
    }

    /// Set the DAC output to the given 10-bit code in normal operating mode.
    ///
    /// # Errors
    ///
    /// See [`Ad5611::write_value`](crate::Ad5611::write_value).
    pub async fn write_value(&mut self, value: u16) -> Result<(), DriverError<SPI, CS>> {
        let command = Command::normal(value)?;
        self.write_command(command).await
    }

    /// Power down the DAC output with the given output load.
    pub async fn power_down(&mut self, load: PowerDown) -> Result<(), DriverError<SPI, CS>> {
        self.write_command(Command::power_down(load)).await
    }

    /// Send a single command word, framed by chip select.
    pub async fn write_command(&mut self, command: Command) -> Result<(), DriverError<SPI, CS>> {
        let bytes = command.to_bytes();
        #[cfg(feature = "defmt")]
        defmt::trace!("AD5611 write {=u16:#x}", command.word());

        self.cs.set_low().map_err(Error::ChipSelect)?;
        let sent = match self.spi.write(&bytes).await {
            Ok(()) => self.spi.flush().await,
            Err(e) => Err(e),
        };
        let released = self.cs.set_high();

        sent.map_err(Error::Spi)?;
        released.map_err(Error::ChipSelect)
    }

    /// Take the driver apart, returning the bus and chip-select pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}
