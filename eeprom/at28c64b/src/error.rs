use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The address is outside of the chip.
    InvalidAddress,
    /// The value does not fit the data bus.
    /// Data is passed as `u8` so the driver itself never reports this.
    InvalidValue,
    /// A range operation would extend past the end of the chip.
    OutOfRange,
    /// The chip did not report completion of a write cycle in time.
    WriteTimeout,
    /// A line could not be acquired.
    ResourceUnavailable,
    /// A line failed while it was being driven or sampled.
    Pin,
    /// The data bus was used against its configured direction.
    BusDirection,
    /// Read-back differs from the expected value.
    VerifyMismatch { address: u16 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress => write!(f, "invalid address"),
            Self::InvalidValue => write!(f, "invalid value"),
            Self::OutOfRange => write!(f, "range exceeds chip capacity"),
            Self::WriteTimeout => write!(f, "write cycle timed out"),
            Self::ResourceUnavailable => write!(f, "line unavailable"),
            Self::Pin => write!(f, "line failure"),
            Self::BusDirection => write!(f, "data bus used against its direction"),
            Self::VerifyMismatch { address } => write!(f, "verify mismatch at 0x{:04x}", address),
        }
    }
}
