//! A software AT28C64B behind [`BusLines`], used by the driver tests.

use crate::{
    traits::{BusLines, ControlLine, Direction},
    Error, CHIP_SIZE,
};

pub struct SimulatedChip {
    pub memory: [u8; CHIP_SIZE as usize],
    /// Number of reads that report a running write cycle after each write.
    pub busy_reads: u32,
    /// Writes to this address never complete.
    pub stuck_at: Option<u16>,
    /// Number of data bus samples taken.
    pub reads: u32,
    /// Number of write cycles latched.
    pub writes: u32,
    /// Number of times output-enable and write-enable were asserted together.
    pub contention: u32,
    address: u16,
    driven: u8,
    direction: Direction,
    chip_enabled: bool,
    output_enabled: bool,
    write_enabled: bool,
    cycle: Option<WriteCycle>,
}

struct WriteCycle {
    value: u8,
    remaining: Option<u32>,
    toggle: bool,
}

impl SimulatedChip {
    pub fn new() -> Self {
        Self {
            memory: [0xFF; CHIP_SIZE as usize],
            busy_reads: 0,
            stuck_at: None,
            reads: 0,
            writes: 0,
            contention: 0,
            address: 0,
            driven: 0,
            direction: Direction::Output,
            chip_enabled: false,
            output_enabled: false,
            write_enabled: false,
            cycle: None,
        }
    }

    pub fn with_busy_reads(mut self, busy_reads: u32) -> Self {
        self.busy_reads = busy_reads;
        self
    }

    pub fn is_idle(&self) -> bool {
        !self.chip_enabled && !self.output_enabled && !self.write_enabled
    }

    pub fn write_enabled(&self) -> bool {
        self.write_enabled
    }

    /// The rising edge of write-enable latches address and data.
    fn latch(&mut self) {
        self.memory[self.address as usize] = self.driven;
        self.writes += 1;
        let remaining = match self.stuck_at {
            Some(address) if address == self.address => None,
            _ => Some(self.busy_reads),
        };
        self.cycle = Some(WriteCycle {
            value: self.driven,
            remaining,
            toggle: false,
        });
    }

    fn control(&mut self, line: ControlLine) -> &mut bool {
        match line {
            ControlLine::ChipEnable => &mut self.chip_enabled,
            ControlLine::OutputEnable => &mut self.output_enabled,
            ControlLine::WriteEnable => &mut self.write_enabled,
        }
    }
}

impl BusLines for SimulatedChip {
    fn set_address(&mut self, address: u16) -> Result<(), Error> {
        if address >= CHIP_SIZE {
            return Err(Error::InvalidAddress);
        }
        self.address = address;
        Ok(())
    }

    fn set_data(&mut self, value: u8) -> Result<(), Error> {
        if self.direction != Direction::Output {
            return Err(Error::BusDirection);
        }
        self.driven = value;
        Ok(())
    }

    fn read_data(&mut self) -> Result<u8, Error> {
        if self.direction != Direction::Input
            || !self.chip_enabled
            || !self.output_enabled
            || self.write_enabled
        {
            return Err(Error::BusDirection);
        }
        self.reads += 1;

        let Some(cycle) = self.cycle.as_mut() else {
            return Ok(self.memory[self.address as usize]);
        };

        if cycle.remaining == Some(0) {
            self.cycle = None;
            return Ok(self.memory[self.address as usize]);
        }

        cycle.remaining = cycle.remaining.map(|n| n - 1);
        cycle.toggle = !cycle.toggle;
        let dq6 = if cycle.toggle { 0x40 } else { 0x00 };
        Ok((!cycle.value & 0x80) | dq6 | (cycle.value & 0x3F))
    }

    fn set_data_direction(&mut self, direction: Direction) -> Result<(), Error> {
        self.direction = direction;
        Ok(())
    }

    fn enable(&mut self, line: ControlLine) -> Result<(), Error> {
        *self.control(line) = true;
        if self.output_enabled && self.write_enabled {
            self.contention += 1;
        }
        Ok(())
    }

    fn disable(&mut self, line: ControlLine) -> Result<(), Error> {
        let was_enabled = core::mem::replace(self.control(line), false);
        if line == ControlLine::WriteEnable
            && was_enabled
            && self.chip_enabled
            && !self.output_enabled
        {
            self.latch();
        }
        Ok(())
    }
}
