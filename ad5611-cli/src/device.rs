//! Linux bus and pin set-up for the DAC.
use std::path::Path;

use ad5611_hal::{BUS_CONFIG, BitOrder};
use anyhow::Context;
use embedded_hal::spi::{Mode, Phase, Polarity};
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, SpidevBus};

/// Consumer label shown for the chip-select line in `gpioinfo`.
const CONSUMER: &str = "ad5611-cli";

/// Open the spidev bus and apply the AD5611 bus settings.
pub(crate) fn open_bus(path: &Path) -> anyhow::Result<SpidevBus> {
    let mut bus = SpidevBus::open(path)
        .with_context(|| format!("failed to open SPI bus {}", path.display()))?;
    bus.configure(&spidev_options())
        .with_context(|| format!("failed to configure SPI bus {}", path.display()))?;
    log::debug!("opened {} with {BUS_CONFIG:?}", path.display());
    Ok(bus)
}

/// Request the chip-select line as an output, idling high.
pub(crate) fn open_chip_select(chip: &Path, line: u32) -> anyhow::Result<CdevPin> {
    let mut chip = Chip::new(chip)
        .with_context(|| format!("failed to open GPIO chip {}", chip.display()))?;
    let handle = chip
        .get_line(line)
        .with_context(|| format!("no line {line} on GPIO chip"))?
        .request(LineRequestFlags::OUTPUT, 1, CONSUMER)
        .with_context(|| format!("failed to request GPIO line {line} as an output"))?;
    log::debug!("requested GPIO line {line} for chip select");
    CdevPin::new(handle).context("failed to set up chip-select pin")
}

fn spidev_options() -> SpidevOptions {
    SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(BUS_CONFIG.frequency_hz)
        .lsb_first(BUS_CONFIG.bit_order == BitOrder::LsbFirst)
        .mode(mode_flags(BUS_CONFIG.mode))
        .build()
}

fn mode_flags(mode: Mode) -> SpiModeFlags {
    match (mode.polarity, mode.phase) {
        (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => SpiModeFlags::SPI_MODE_0,
        (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => SpiModeFlags::SPI_MODE_1,
        (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => SpiModeFlags::SPI_MODE_2,
        (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => SpiModeFlags::SPI_MODE_3,
    }
}
