//! GPIO output abstraction
//!
//! The remote only drives outputs from application code (the status LED);
//! the IR emitter and sensor bus have their own traits.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Check whether the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Invert the current level
    fn toggle(&mut self) {
        let high = self.is_set_high();
        self.set_state(!high);
    }
}
