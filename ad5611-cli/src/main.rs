use ad5611_hal::Ad5611;
use anyhow::Context;
use clap::Parser;

mod cli;
mod dac;
mod device;
mod util;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let bus = device::open_bus(&cli.spidev)?;
    let cs = device::open_chip_select(&cli.gpiochip, cli.cs_line)?;
    let mut dac = Ad5611::new(bus, cs);
    dac.init().context("failed to initialise DAC")?;

    dac::action(&mut dac, cli.command)
}
