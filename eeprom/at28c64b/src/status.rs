use bitfield::bitfield;

bitfield! {
    /// A byte read back from the chip while an internal write cycle may still be running.
    #[derive(Clone, Copy)]
    pub struct PollStatus(u8);
    /// Reads as the complement of the written bit 7 until the write cycle completes.
    pub dq7, _: 7;
    /// Toggles on every read until the write cycle completes.
    pub dq6, _: 6;
}

impl From<u8> for PollStatus {
    fn from(value: u8) -> Self {
        Self(value)
    }
}
