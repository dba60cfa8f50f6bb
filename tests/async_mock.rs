//! The async driver must produce exactly the same pin and bus activity as the
//! blocking one.
#![cfg(feature = "async")]

use ad5611_hal::{Ad5611Async, Error, PowerDown};
use embassy_futures::block_on;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal_async::spi::{self, ErrorKind, SpiBus};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

#[test]
fn async_writes_are_framed_by_chip_select() {
    let spi = SpiMock::new(&[
        SpiTransaction::write_vec(vec![0x3F, 0xF0]),
        SpiTransaction::flush(),
        SpiTransaction::write_vec(vec![0x40, 0x00]),
        SpiTransaction::flush(),
    ]);
    let cs = PinMock::new(&[
        PinTransaction::set(State::High),
        PinTransaction::set(State::Low),
        PinTransaction::set(State::High),
        PinTransaction::set(State::Low),
        PinTransaction::set(State::High),
    ]);

    let mut dac = Ad5611Async::new(spi, cs);
    dac.init().unwrap();
    block_on(dac.write_value(1023)).unwrap();
    block_on(dac.power_down(PowerDown::Resistor1k)).unwrap();

    let (mut spi, mut cs) = dac.release();
    spi.done();
    cs.done();
}

#[test]
fn async_out_of_range_touches_nothing() {
    let spi = SpiMock::new(&[]);
    let cs = PinMock::new(&[]);

    let mut dac = Ad5611Async::new(spi, cs);
    let result = block_on(dac.write_value(1024));
    assert!(matches!(result, Err(Error::OutOfRange(1024))));

    let (mut spi, mut cs) = dac.release();
    spi.done();
    cs.done();
}

/// Async bus whose writes always fail.
#[derive(Default)]
struct FailingBus {
    writes: usize,
}

impl spi::ErrorType for FailingBus {
    type Error = ErrorKind;
}

impl SpiBus<u8> for FailingBus {
    async fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    async fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        self.writes += 1;
        Err(ErrorKind::Overrun)
    }

    async fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    async fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Output pin that records every level it is driven to.
#[derive(Default)]
struct RecordingPin {
    levels: Vec<bool>,
    /// Fail only when released (driven high).
    fail_high: bool,
}

impl digital::ErrorType for RecordingPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail_high {
            return Err(digital::ErrorKind::Other);
        }
        self.levels.push(true);
        Ok(())
    }
}

#[test]
fn async_bus_error_still_releases_chip_select() {
    let mut dac = Ad5611Async::new(FailingBus::default(), RecordingPin::default());
    dac.init().unwrap();

    let result = block_on(dac.write_value(100));
    assert_eq!(result, Err(Error::Spi(ErrorKind::Overrun)));

    let (spi, cs) = dac.release();
    assert_eq!(spi.writes, 1);
    assert_eq!(cs.levels, [true, false, true]);
}

#[test]
fn async_release_failure_is_reported_after_the_transfer() {
    let spi = SpiMock::new(&[
        SpiTransaction::write_vec(vec![0x00, 0x10]),
        SpiTransaction::flush(),
    ]);
    let cs = RecordingPin {
        fail_high: true,
        ..Default::default()
    };

    let mut dac = Ad5611Async::new(spi, cs);
    let result = block_on(dac.write_value(1));
    assert_eq!(result, Err(Error::ChipSelect(digital::ErrorKind::Other)));

    let (mut spi, cs) = dac.release();
    spi.done();
    assert_eq!(cs.levels, [false]);
}

#[test]
fn async_bus_error_takes_precedence_over_release_failure() {
    let cs = RecordingPin {
        fail_high: true,
        ..Default::default()
    };
    let mut dac = Ad5611Async::new(FailingBus::default(), cs);

    let result = block_on(dac.write_value(1));
    assert_eq!(result, Err(Error::Spi(ErrorKind::Overrun)));

    let (spi, cs) = dac.release();
    assert_eq!(spi.writes, 1);
    assert_eq!(cs.levels, [false]);
}
