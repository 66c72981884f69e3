use embedded_hal::delay;
use mockall::mock;

mock! {
    pub Delay {}

    impl delay::DelayNs for Delay {
        fn delay_ns(&mut self, ns: u32);
        fn delay_us(&mut self, us: u32);
        fn delay_ms(&mut self, ms: u32);
    }
}

impl MockDelay {
    /// Accept any number of waits of any length.
    pub fn expect_any(&mut self) {
        self.expect_delay_ns().return_const(());
        self.expect_delay_us().return_const(());
        self.expect_delay_ms().return_const(());
    }
}
