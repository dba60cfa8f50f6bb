use core::fmt;

use crate::command::MAX_VALUE;

/// An output code that does not fit the DAC's 10-bit resolution.
///
/// The enclosed `u16` is the rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange(pub u16);

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DAC value {} is not in the range 0..={}",
            self.0, MAX_VALUE
        )
    }
}

impl core::error::Error for OutOfRange {}

/// Wrapper for problems when writing to the AD5611.
///
/// `SpiE` is the error type of the SPI bus and `PinE` that of the chip-select
/// pin. Drivers that do not control chip select themselves use
/// [`Infallible`](core::convert::Infallible) for `PinE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiE, PinE> {
    /// Attempt to write a DAC value not in the range 0..=1023.
    ///
    /// This is checked before any pin or bus activity, so the DAC output is
    /// unchanged.
    OutOfRange(u16),
    /// The SPI bus reported an error during a transfer.
    ///
    /// Chip select has been released again (if that succeeded), but the DAC may
    /// have latched a partial or corrupted command word.
    Spi(SpiE),
    /// The chip-select (SYNC) pin could not be driven.
    ChipSelect(PinE),
}

#[doc(hidden)]
impl<SpiE, PinE> From<OutOfRange> for Error<SpiE, PinE> {
    fn from(value: OutOfRange) -> Self {
        Self::OutOfRange(value.0)
    }
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for Error<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange(value) => fmt::Display::fmt(&OutOfRange(*value), f),
            Error::Spi(e) => write!(f, "SPI transfer failed: {e:?}"),
            Error::ChipSelect(e) => write!(f, "failed to drive chip select: {e:?}"),
        }
    }
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> core::error::Error for Error<SpiE, PinE> {}
