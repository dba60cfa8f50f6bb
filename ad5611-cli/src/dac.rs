use ad5611_hal::{Ad5611, PowerDown};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::util;

#[derive(Debug, Parser)]
#[command(flatten_help = true)]
pub(crate) enum DacCommand {
    /// Change the DAC output value.
    Write {
        /// New output code, in the range 0..=1023 (decimal or 0x-prefixed hex).
        #[arg(value_parser = util::dac_value)]
        value: u16,
    },
    /// Power down the DAC output.
    ///
    /// Writing a new value brings the DAC back to normal operation.
    PowerDown {
        /// Load connected to the output while powered down.
        load: Load,
    },
}

/// Output load during power-down.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Load {
    /// 1 kΩ to GND.
    #[value(name = "1k")]
    _1k,
    /// 100 kΩ to GND.
    #[value(name = "100k")]
    _100k,
    /// Output left floating.
    ThreeState,
}

impl From<Load> for PowerDown {
    fn from(value: Load) -> Self {
        match value {
            Load::_1k => PowerDown::Resistor1k,
            Load::_100k => PowerDown::Resistor100k,
            Load::ThreeState => PowerDown::ThreeState,
        }
    }
}

pub(crate) fn action<SPI, CS>(dac: &mut Ad5611<SPI, CS>, command: DacCommand) -> anyhow::Result<()>
where
    SPI: SpiBus<u8>,
    SPI::Error: Send + Sync + 'static,
    CS: OutputPin,
    CS::Error: Send + Sync + 'static,
{
    match command {
        DacCommand::Write { value } => {
            log::debug!("writing output code {value}");
            dac.write_value(value)
                .with_context(|| format!("failed to write DAC value {value}"))?;
            log::info!("DAC output set to {value}/1023");
        }
        DacCommand::PowerDown { load } => {
            log::debug!("powering down with {load:?} load");
            dac.power_down(load.into())
                .context("failed to power down DAC")?;
            log::info!("DAC powered down");
        }
    }
    Ok(())
}
