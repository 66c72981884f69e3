use embedded_hal::digital::{InputPin, OutputPin};

use crate::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// The active low control inputs of the chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLine {
    ChipEnable,
    OutputEnable,
    WriteEnable,
}

/// Line level access to the chip, without any knowledge of the protocol.
///
/// Every call has an immediate electrical effect.
#[cfg_attr(test, automock)]
pub trait BusLines {
    /// Drive the address lines, bit 0 on the first line.
    fn set_address(&mut self, address: u16) -> Result<(), Error>;

    /// Drive the data lines. The data bus must be configured as output.
    fn set_data(&mut self, value: u8) -> Result<(), Error>;

    /// Sample the data lines. The data bus must be configured as input.
    fn read_data(&mut self) -> Result<u8, Error>;

    /// Switch all data lines to `direction`.
    fn set_data_direction(&mut self, direction: Direction) -> Result<(), Error>;

    /// Drive a control line to its active (low) level.
    fn enable(&mut self, line: ControlLine) -> Result<(), Error>;

    /// Drive a control line to its inactive (high) level.
    fn disable(&mut self, line: ControlLine) -> Result<(), Error>;
}

/// A bidirectional pin whose direction can be changed at runtime.
pub trait IoPin: InputPin + OutputPin {
    fn set_as_input(&mut self) -> Result<(), Self::Error>;
    fn set_as_output(&mut self) -> Result<(), Self::Error>;
}
