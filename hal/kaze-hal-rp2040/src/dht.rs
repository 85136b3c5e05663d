//! Bit-banged DHT sensor bus
//!
//! ```text
//! host start      response        bit 0         bit 1
//! ▔▔╲____╱▔▔▔▔╲____╱▔▔▔▔╲____╱▔▔╲____╱▔▔▔▔▔▔╲__
//!    ≥1ms     80µs  80µs  50µs 27µs 50µs 70µs
//! ```
//!
//! A bit's value is the length of its high phase. The 40 bits are timed
//! with interrupts masked so a wakeup cannot stretch a pulse.

use embassy_rp::gpio::{Flex, Level, Pull};
use embassy_time::{block_for, Duration, Instant};

use kaze_hal::dht::{BusError, DhtBus};

/// Start pulse for DHT22/AM2302 sensors (µs)
pub const DHT22_START_US: u32 = 1_100;
/// Start pulse for DHT11 sensors (µs)
pub const DHT11_START_US: u32 = 20_000;

/// High phase longer than this is a 1 bit (µs)
const ONE_THRESHOLD_US: u64 = 40;

/// DHT data line on a bidirectional GPIO with pull-up
pub struct FlexDhtBus<'d> {
    pin: Flex<'d>,
    start_low_us: u32,
}

impl<'d> FlexDhtBus<'d> {
    pub fn new(mut pin: Flex<'d>, start_low_us: u32) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self { pin, start_low_us }
    }

    /// Busy-wait while the line stays at `level`, returning the time spent
    fn wait_while(&self, level: Level, timeout_us: u64) -> Result<u64, BusError> {
        let start = Instant::now();
        while self.pin.get_level() == level {
            if start.elapsed().as_micros() > timeout_us {
                return Err(BusError::Timeout);
            }
        }
        Ok(start.elapsed().as_micros())
    }

    fn read_bits(&self) -> Result<[u8; 5], BusError> {
        // Sensor answers 20-40 µs after release, then 80 µs low, 80 µs high
        self.wait_while(Level::High, 100)
            .map_err(|_| BusError::NoResponse)?;
        self.wait_while(Level::Low, 100)
            .map_err(|_| BusError::NoResponse)?;
        self.wait_while(Level::High, 100)
            .map_err(|_| BusError::NoResponse)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.wait_while(Level::Low, 80)?;
            let high_us = self.wait_while(Level::High, 100)?;
            if high_us > ONE_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }

        Ok(frame)
    }
}

impl<'d> DhtBus for FlexDhtBus<'d> {
    fn read_frame(&mut self) -> Result<[u8; 5], BusError> {
        self.pin.set_low();
        self.pin.set_as_output();
        block_for(Duration::from_micros(self.start_low_us as u64));
        self.pin.set_as_input();

        cortex_m::interrupt::free(|_| self.read_bits())
    }
}
