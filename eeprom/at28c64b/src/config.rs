/// How the driver detects the end of an internal write cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollMethod {
    /// Wait until bit 7 reads back as written.
    DataPolling,
    /// Wait until bit 6 stops toggling between consecutive reads.
    ToggleBit,
}

/// Write timing.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub(crate) write_pulse_us: u32,
    pub(crate) poll_interval_ms: u32,
    pub(crate) max_poll_attempts: u32,
    pub(crate) poll_method: PollMethod,
}

impl Config {
    pub const MAX_POLL_ATTEMPTS: u32 = 100;

    pub const fn new() -> Self {
        Self {
            write_pulse_us: 1,
            poll_interval_ms: 1,
            max_poll_attempts: Self::MAX_POLL_ATTEMPTS,
            poll_method: PollMethod::DataPolling,
        }
    }

    /// Width of the write-enable pulse that latches address and data.
    pub const fn write_pulse_us(mut self, us: u32) -> Self {
        self.write_pulse_us = us;
        self
    }

    /// Wait between two reads while polling for write completion.
    pub const fn poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Number of reads before a write is reported as timed out.
    ///
    /// # Panics
    ///
    /// Panics if `attempts` is zero.
    pub const fn max_poll_attempts(mut self, attempts: u32) -> Self {
        assert!(attempts > 0);
        self.max_poll_attempts = attempts;
        self
    }

    pub const fn poll_method(mut self, method: PollMethod) -> Self {
        self.poll_method = method;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
