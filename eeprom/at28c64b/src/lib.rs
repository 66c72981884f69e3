#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

mod config;
mod driver;
mod error;
pub mod gpio;
mod status;
pub mod traits;

#[cfg(test)]
mod sim;

/// Capacity of the chip in bytes, i.e. the size of the 13 bit address space.
pub const CHIP_SIZE: u16 = 0x2000;

/// Number of address lines.
pub const ADDRESS_LINES: usize = 13;

/// Number of data (I/O) lines.
pub const DATA_LINES: usize = 8;

/// Address used by [`Driver::self_test`].
pub const PROBE_ADDRESS: u16 = 0x100;

/// Device tree compatible string of the chip.
pub const COMPATIBLE: &str = "atmel,at28c64b";

pub use self::{
    config::{Config, PollMethod},
    driver::Driver,
    error::Error,
    gpio::GpioBus,
    traits::{BusLines, ControlLine, Direction, IoPin},
};
