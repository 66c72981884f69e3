use embedded_hal::delay::DelayNs;

use crate::{
    config::{Config, PollMethod},
    status::PollStatus,
    traits::{BusLines, ControlLine, Direction},
    Error, CHIP_SIZE, PROBE_ADDRESS,
};

/// AT28C64B driver.
///
/// Chip-enable stays asserted from [`Driver::attach`] until [`Driver::detach`].
/// Every write is confirmed by the chip before the call returns.
pub struct Driver<Bus, Delay>
where
    Bus: BusLines,
    Delay: DelayNs,
{
    bus: Bus,
    delay: Delay,
    config: Config,
}

impl<Bus, Delay> Driver<Bus, Delay>
where
    Bus: BusLines,
    Delay: DelayNs,
{
    /// Take ownership of the bus and select the chip.
    ///
    /// If a control line fails, the chip is deselected again as far as possible.
    pub fn attach(mut bus: Bus, delay: Delay, config: Config) -> Result<Self, Error> {
        if let Err(error) = select(&mut bus) {
            warn!("Could not attach EEPROM: {:?}", error);
            deselect(&mut bus);
            return Err(error);
        }

        info!("EEPROM attached");

        Ok(Self { bus, delay, config })
    }

    /// Deselect the chip and hand back the bus and delay.
    ///
    /// Every control line is released, also when an earlier one fails.
    pub fn detach(mut self) -> (Bus, Delay) {
        deselect(&mut self.bus);

        info!("EEPROM detached");

        (self.bus, self.delay)
    }

    /// Get the EEPROM capacity in bytes
    pub const fn capacity(&self) -> u16 {
        CHIP_SIZE
    }

    /// Read a single byte.
    pub fn read_byte(&mut self, address: u16) -> Result<u8, Error> {
        if address >= CHIP_SIZE {
            return Err(Error::InvalidAddress);
        }

        let value = self.read_cycle(address)?;
        trace!("Read 0x{:02x} from 0x{:04x}", value, address);
        Ok(value)
    }

    /// Write a single byte and wait for the chip to complete the write cycle.
    pub fn write_byte(&mut self, address: u16, value: u8) -> Result<(), Error> {
        if address >= CHIP_SIZE {
            return Err(Error::InvalidAddress);
        }

        self.write_confirmed(address, value)
    }

    /// Read a sequence of bytes, one read cycle per byte.
    pub fn read_range(&mut self, origin: u16, buffer: &mut [u8]) -> Result<(), Error> {
        check_range(origin, buffer.len())?;

        for (address, byte) in (origin..).zip(buffer.iter_mut()) {
            *byte = self.read_cycle(address)?;
        }

        debug!("Read {} bytes from 0x{:04x}", buffer.len(), origin);
        Ok(())
    }

    /// Write a sequence of bytes, each confirmed before the next is written.
    ///
    /// Stops at the first byte that fails. Bytes before it stay written.
    pub fn write_range(&mut self, origin: u16, buffer: &[u8]) -> Result<(), Error> {
        check_range(origin, buffer.len())?;

        for (address, &value) in (origin..).zip(buffer) {
            self.write_confirmed(address, value)?;
        }

        debug!("Wrote {} bytes to 0x{:04x}", buffer.len(), origin);
        Ok(())
    }

    /// Compare the chip contents against `expected` without writing.
    pub fn verify_range(&mut self, origin: u16, expected: &[u8]) -> Result<(), Error> {
        check_range(origin, expected.len())?;

        for (address, &value) in (origin..).zip(expected) {
            let actual = self.read_cycle(address)?;
            if actual != value {
                debug!(
                    "Expected 0x{:02x} at 0x{:04x}, read 0x{:02x}",
                    value,
                    address,
                    actual
                );
                return Err(Error::VerifyMismatch { address });
            }
        }

        Ok(())
    }

    /// Write `value` to [`PROBE_ADDRESS`] and read it back.
    /// This overwrites whatever was stored at that address.
    pub fn self_test(&mut self, value: u8) -> Result<(), Error> {
        self.write_byte(PROBE_ADDRESS, value)?;
        let read_back = self.read_byte(PROBE_ADDRESS)?;
        info!("Self-test wrote 0x{:02x}, read back 0x{:02x}", value, read_back);

        if read_back != value {
            return Err(Error::VerifyMismatch {
                address: PROBE_ADDRESS,
            });
        }

        Ok(())
    }

    fn read_cycle(&mut self, address: u16) -> Result<u8, Error> {
        self.bus.set_data_direction(Direction::Input)?;
        self.bus.disable(ControlLine::WriteEnable)?;
        self.bus.set_address(address)?;
        self.bus.enable(ControlLine::OutputEnable)?;
        let value = self.bus.read_data();

        // Take the chip off the data bus, also when sampling failed.
        self.bus.disable(ControlLine::OutputEnable)?;
        value
    }

    fn write_cycle(&mut self, address: u16, value: u8) -> Result<(), Error> {
        self.bus.set_data_direction(Direction::Output)?;
        self.bus.disable(ControlLine::OutputEnable)?;
        self.bus.set_address(address)?;
        self.bus.set_data(value)?;

        self.bus.enable(ControlLine::WriteEnable)?;
        self.delay.delay_us(self.config.write_pulse_us);
        self.bus.disable(ControlLine::WriteEnable)
    }

    fn write_confirmed(&mut self, address: u16, value: u8) -> Result<(), Error> {
        self.write_cycle(address, value)?;

        let polls = match self.config.poll_method {
            PollMethod::DataPolling => self.wait_data_polling(address, value)?,
            PollMethod::ToggleBit => self.wait_toggle_bit(address)?,
        };

        let Some(polls) = polls else {
            warn!("Timeout while writing 0x{:04x}", address);
            return Err(Error::WriteTimeout);
        };

        trace!(
            "Wrote 0x{:02x} to 0x{:04x} after {} polls",
            value,
            address,
            polls
        );
        Ok(())
    }

    /// Returns the number of reads until bit 7 matched the written value,
    /// or `None` if it never did.
    fn wait_data_polling(&mut self, address: u16, value: u8) -> Result<Option<u32>, Error> {
        let expected = PollStatus::from(value).dq7();

        for attempt in 1..=self.config.max_poll_attempts {
            let status = PollStatus::from(self.read_cycle(address)?);
            if status.dq7() == expected {
                return Ok(Some(attempt));
            }
            if attempt < self.config.max_poll_attempts {
                self.delay.delay_ms(self.config.poll_interval_ms);
            }
        }

        Ok(None)
    }

    /// Returns the number of reads until bit 6 stopped toggling,
    /// or `None` if it never did.
    fn wait_toggle_bit(&mut self, address: u16) -> Result<Option<u32>, Error> {
        let mut previous = PollStatus::from(self.read_cycle(address)?);

        for attempt in 1..=self.config.max_poll_attempts {
            let current = PollStatus::from(self.read_cycle(address)?);
            if current.dq6() == previous.dq6() {
                return Ok(Some(attempt));
            }
            previous = current;
            if attempt < self.config.max_poll_attempts {
                self.delay.delay_ms(self.config.poll_interval_ms);
            }
        }

        Ok(None)
    }
}

fn select<Bus: BusLines>(bus: &mut Bus) -> Result<(), Error> {
    bus.disable(ControlLine::WriteEnable)?;
    bus.disable(ControlLine::OutputEnable)?;
    bus.enable(ControlLine::ChipEnable)
}

/// Drive all control lines inactive, write-enable first.
fn deselect<Bus: BusLines>(bus: &mut Bus) {
    for line in [
        ControlLine::WriteEnable,
        ControlLine::OutputEnable,
        ControlLine::ChipEnable,
    ] {
        if let Err(error) = bus.disable(line) {
            warn!("Could not release {:?}: {:?}", line, error);
        }
    }
}

fn check_range(origin: u16, len: usize) -> Result<(), Error> {
    if origin >= CHIP_SIZE || origin as usize + len > CHIP_SIZE as usize {
        return Err(Error::OutOfRange);
    }
    Ok(())
}
