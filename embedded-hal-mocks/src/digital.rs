use embedded_hal::digital;
use mockall::mock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinError;

impl digital::Error for PinError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

mock! {
    pub OutputPin {}

    impl digital::ErrorType for OutputPin {
        type Error = PinError;
    }

    impl digital::OutputPin for OutputPin {
        fn set_low(&mut self) -> Result<(), PinError>;
        fn set_high(&mut self) -> Result<(), PinError>;
    }
}

impl MockOutputPin {
    /// A pin that expects to be driven to `high` exactly once.
    pub fn expect_level(&mut self, high: bool) {
        if high {
            self.expect_set_high().times(1).return_const(Ok(()));
        } else {
            self.expect_set_low().times(1).return_const(Ok(()));
        }
    }
}

