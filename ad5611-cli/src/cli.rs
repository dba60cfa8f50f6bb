use std::path::PathBuf;

use crate::dac::DacCommand;

use clap::Parser;

/// CLI for the AD5611 10-bit SPI DAC
///
/// Drives an AD5611 connected to a Linux spidev bus, with its SYNC (chip
/// select) input wired to a GPIO line rather than the controller's own chip
/// select. The bus is configured for 10 MHz, MSB first, SPI mode 1.
///
/// Set RUST_LOG to control logging, or pass -v for debug output.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// spidev character device the DAC is connected to.
    #[arg(long, default_value = "/dev/spidev0.0")]
    pub(crate) spidev: PathBuf,
    /// GPIO character device providing the chip-select line.
    #[arg(long, default_value = "/dev/gpiochip0")]
    pub(crate) gpiochip: PathBuf,
    /// Line offset of the chip-select (SYNC) GPIO on the GPIO chip.
    #[arg(short, long)]
    pub(crate) cs_line: u32,
    /// Log more detail (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
    #[command(subcommand)]
    pub(crate) command: DacCommand,
}
