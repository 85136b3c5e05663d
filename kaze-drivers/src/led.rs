//! GPIO status LED
//!
//! Lights while a command is being sent to the air conditioner.

use kaze_core::traits::Indicator;
use kaze_hal::OutputPin;

/// Status LED on a GPIO pin
///
/// The pin can be configured as active-high (default) or active-low.
pub struct StatusLed<P> {
    pin: P,
    /// If true, LED on = pin LOW
    inverted: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Create a new status LED, initially off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the LED lights when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self { pin, inverted };
        led.off();
        led
    }

    /// Create a new status LED with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new status LED with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Check if the LED is currently lit
    pub fn is_lit(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}

impl<P: OutputPin> Indicator for StatusLed<P> {
    fn on(&mut self) {
        // Normal: high, inverted: low
        self.pin.set_state(!self.inverted);
    }

    fn off(&mut self) {
        self.pin.set_state(self.inverted);
    }
}
