#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(feature = "async")]
mod asynch;
pub mod command;
mod driver;
mod error;
mod shared;

#[cfg(feature = "async")]
pub use asynch::Ad5611Async;
pub use command::{BUS_CONFIG, BitOrder, BusConfig, Command, MAX_VALUE, PowerDown, PowerMode};
pub use command::{RESOLUTION_BITS, SPI_MODE};
pub use driver::Ad5611;
pub use error::{Error, OutOfRange};
pub use shared::Ad5611Device;
