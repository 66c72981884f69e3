use embedded_hal::digital::{OutputPin, PinState};

use crate::{
    traits::{BusLines, ControlLine, Direction, IoPin},
    Error, ADDRESS_LINES, CHIP_SIZE, DATA_LINES,
};

/// [`BusLines`] over discrete GPIO pins.
///
/// The control pins are ordered chip-enable, output-enable, write-enable.
/// Address and data pins are ordered from the least significant bit.
pub struct GpioBus<Ctrl, Addr, Io>
where
    Ctrl: OutputPin,
    Addr: OutputPin,
    Io: IoPin,
{
    control: [Ctrl; 3],
    address: [Addr; ADDRESS_LINES],
    io: [Io; DATA_LINES],
    /// `None` while a direction change is incomplete.
    direction: Option<Direction>,
}

impl<Ctrl, Addr, Io> GpioBus<Ctrl, Addr, Io>
where
    Ctrl: OutputPin,
    Addr: OutputPin,
    Io: IoPin,
{
    /// Take the pins and drive every line high, which is inactive for the control lines.
    pub fn new(
        control: [Ctrl; 3],
        address: [Addr; ADDRESS_LINES],
        io: [Io; DATA_LINES],
    ) -> Result<Self, Error> {
        let mut bus = Self {
            control,
            address,
            io,
            direction: None,
        };

        if let Err(line) = bus.drive_inactive() {
            warn!("Could not get {} line", line);
            return Err(Error::ResourceUnavailable);
        }

        Ok(bus)
    }

    /// Drive every line back high and hand the pins back.
    pub fn release(mut self) -> ([Ctrl; 3], [Addr; ADDRESS_LINES], [Io; DATA_LINES]) {
        if let Err(line) = self.drive_inactive() {
            warn!("Could not release {} line", line);
        }
        (self.control, self.address, self.io)
    }

    /// Returns the name of the first line that failed.
    fn drive_inactive(&mut self) -> Result<(), &'static str> {
        const CONTROL_NAMES: [&str; 3] = ["CE", "OE", "WE"];

        for (pin, name) in self.control.iter_mut().zip(CONTROL_NAMES) {
            pin.set_high().map_err(|_| name)?;
        }
        for pin in self.address.iter_mut() {
            pin.set_high().map_err(|_| "address")?;
        }

        self.direction = None;
        for pin in self.io.iter_mut() {
            pin.set_as_output().map_err(|_| "io")?;
            pin.set_high().map_err(|_| "io")?;
        }
        self.direction = Some(Direction::Output);

        Ok(())
    }

    fn control_pin(&mut self, line: ControlLine) -> &mut Ctrl {
        match line {
            ControlLine::ChipEnable => &mut self.control[0],
            ControlLine::OutputEnable => &mut self.control[1],
            ControlLine::WriteEnable => &mut self.control[2],
        }
    }
}

impl<Ctrl, Addr, Io> BusLines for GpioBus<Ctrl, Addr, Io>
where
    Ctrl: OutputPin,
    Addr: OutputPin,
    Io: IoPin,
{
    fn set_address(&mut self, address: u16) -> Result<(), Error> {
        if address >= CHIP_SIZE {
            return Err(Error::InvalidAddress);
        }

        for (bit, pin) in self.address.iter_mut().enumerate() {
            let state = PinState::from(address & (1 << bit) != 0);
            pin.set_state(state).map_err(|_| Error::Pin)?;
        }

        Ok(())
    }

    fn set_data(&mut self, value: u8) -> Result<(), Error> {
        if self.direction != Some(Direction::Output) {
            return Err(Error::BusDirection);
        }

        for (bit, pin) in self.io.iter_mut().enumerate() {
            let state = PinState::from(value & (1 << bit) != 0);
            pin.set_state(state).map_err(|_| Error::Pin)?;
        }

        Ok(())
    }

    fn read_data(&mut self) -> Result<u8, Error> {
        if self.direction != Some(Direction::Input) {
            return Err(Error::BusDirection);
        }

        let mut value = 0;
        for (bit, pin) in self.io.iter_mut().enumerate() {
            if pin.is_high().map_err(|_| Error::Pin)? {
                value |= 1 << bit;
            }
        }

        Ok(value)
    }

    fn set_data_direction(&mut self, direction: Direction) -> Result<(), Error> {
        if self.direction == Some(direction) {
            return Ok(());
        }

        // Stays unknown if any pin fails, so that the next call reconfigures all pins.
        self.direction = None;
        for pin in self.io.iter_mut() {
            match direction {
                Direction::Input => pin.set_as_input(),
                Direction::Output => pin.set_as_output(),
            }
            .map_err(|_| Error::Pin)?;
        }
        self.direction = Some(direction);

        Ok(())
    }

    fn enable(&mut self, line: ControlLine) -> Result<(), Error> {
        self.control_pin(line).set_low().map_err(|_| Error::Pin)
    }

    fn disable(&mut self, line: ControlLine) -> Result<(), Error> {
        self.control_pin(line).set_high().map_err(|_| Error::Pin)
    }
}
