//! PWM-modulated IR emitter
//!
//! The carrier comes from a PWM slice running at the protocol frequency
//! with a one-third duty cycle. Marks and spaces are produced by switching
//! the compare value between that duty and zero, with busy-wait timing.
//! A full air-conditioner frame takes well under 200 ms.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::{block_for, Duration};
use fixed::FixedU16;

use kaze_hal::ir::{IrError, IrOutput};

/// Carrier range the emitter accepts (Hz)
pub const MIN_CARRIER_HZ: u32 = 30_000;
pub const MAX_CARRIER_HZ: u32 = 60_000;

/// IR LED driven by one PWM channel
pub struct PwmIrOutput<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> PwmIrOutput<'d> {
    /// Wrap a PWM output whose channel B drives the IR LED transistor
    pub fn new(pwm: Pwm<'d>) -> Self {
        let mut output = Self {
            pwm,
            config: Config::default(),
        };
        output.carrier_off();
        output
    }

    fn configure_carrier(&mut self, carrier_hz: u32) -> Result<u16, IrError> {
        if !(MIN_CARRIER_HZ..=MAX_CARRIER_HZ).contains(&carrier_hz) {
            return Err(IrError::UnsupportedCarrier);
        }

        let top = clk_sys_freq() / carrier_hz - 1;
        let top = u16::try_from(top).map_err(|_| IrError::UnsupportedCarrier)?;

        self.config.top = top;
        self.config.divider = FixedU16::from_num(1);
        self.config.compare_b = 0;
        self.config.enable = true;
        self.pwm.set_config(&self.config);
        Ok(top)
    }

    fn carrier_off(&mut self) {
        self.config.compare_b = 0;
        self.config.enable = false;
        self.pwm.set_config(&self.config);
    }
}

impl<'d> IrOutput for PwmIrOutput<'d> {
    fn send(&mut self, carrier_hz: u32, timings_us: &[u16]) -> Result<(), IrError> {
        if timings_us.is_empty() {
            return Err(IrError::InvalidTimings);
        }

        let top = self.configure_carrier(carrier_hz)?;
        let duty = top / 3;

        for (i, &us) in timings_us.iter().enumerate() {
            // Even entries are marks
            self.config.compare_b = if i % 2 == 0 { duty } else { 0 };
            self.pwm.set_config(&self.config);
            block_for(Duration::from_micros(us as u64));
        }

        self.carrier_off();
        Ok(())
    }
}
