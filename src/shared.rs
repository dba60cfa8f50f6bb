use core::convert::Infallible;

use embedded_hal::spi::{self, Operation, SpiDevice};

use crate::command::{Command, PowerDown};
use crate::error::Error;

type DeviceError<SPI> = Error<<SPI as spi::ErrorType>::Error, Infallible>;

/// Driver for an AD5611 on a shared SPI bus.
///
/// The [`SpiDevice`] owns the chip-select line and serializes access to the
/// bus, so each write is a single [`SpiDevice::transaction`]. This is the type
/// to use with the shared-bus wrappers in `embedded-hal-bus`.
///
/// ```rust
/// # use core::cell::RefCell;
/// # use embedded_hal_bus::spi::{NoDelay, RefCellDevice};
/// # use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
/// # use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
/// use ad5611_hal::Ad5611Device;
///
/// # let mut spi = SpiMock::new(&[SpiTransaction::write_vec(vec![0x20, 0x00]), SpiTransaction::flush()]);
/// # let mut cs = PinMock::new(&[
/// #     PinTransaction::set(State::High),
/// #     PinTransaction::set(State::Low),
/// #     PinTransaction::set(State::High),
/// # ]);
/// let bus = RefCell::new(&mut spi);
/// let device = RefCellDevice::new(&bus, &mut cs, NoDelay).unwrap();
///
/// let mut dac = Ad5611Device::new(device);
/// dac.write_value(512).unwrap();
/// # drop(dac);
/// # drop(bus);
/// # cs.done();
/// # spi.done();
/// ```
#[derive(Debug)]
pub struct Ad5611Device<SPI> {
    spi: SPI,
}

impl<SPI> Ad5611Device<SPI>
where
    SPI: SpiDevice<u8>,
{
    /// Create the driver. No bus activity takes place.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Nothing to do: the [`SpiDevice`] keeps chip select inactive between
    /// transactions. Present so both drivers share one lifecycle.
    pub fn init(&mut self) -> Result<(), DeviceError<SPI>> {
        Ok(())
    }

    /// Set the DAC output to the given 10-bit code in normal operating mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] without starting a transaction if `value`
    /// is above 1023, or [`Error::Spi`] if the transaction fails.
    pub fn write_value(&mut self, value: u16) -> Result<(), DeviceError<SPI>> {
        let command = Command::normal(value)?;
        self.write_command(command)
    }

    /// Power down the DAC output with the given output load.
    pub fn power_down(&mut self, load: PowerDown) -> Result<(), DeviceError<SPI>> {
        self.write_command(Command::power_down(load))
    }

    /// Send a single command word in one bus transaction.
    pub fn write_command(&mut self, command: Command) -> Result<(), DeviceError<SPI>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("AD5611 write {=u16:#x}", command.word());
        self.spi
            .transaction(&mut [Operation::Write(&command.to_bytes())])
            .map_err(Error::Spi)
    }

    /// Take the driver apart, returning the SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}
