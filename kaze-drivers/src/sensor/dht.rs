//! DHT11 / DHT22 temperature and humidity sensors
//!
//! # Frame Format
//!
//! Both parts answer with the same 5-byte frame; only the scaling differs:
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬──────────┐
//! │ RH high  │ RH low   │ T high   │ T low    │ checksum │
//! └──────────┴──────────┴──────────┴──────────┴──────────┘
//! ```
//!
//! - DHT22: 16-bit values in tenths; bit 7 of `T high` is the sign.
//! - DHT11: integer part in the high byte, tenths in the low byte; bit 7
//!   of `T low` is the sign.
//!
//! The checksum is the low byte of the sum of the first four bytes.
//!
//! The sensor needs about two seconds between transactions, so one frame
//! serves a temperature read and a humidity read.

use kaze_core::config::SensorKind;
use kaze_core::traits::{ClimateSensor, SensorError};
use kaze_hal::DhtBus;

/// Decoded sensor values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Degrees Celsius
    pub temperature: f32,
    /// Relative humidity in percent
    pub humidity: f32,
}

/// Validate and scale a raw frame
pub fn decode(kind: SensorKind, frame: &[u8; 5]) -> Result<Reading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let reading = match kind {
        SensorKind::Dht22 => {
            let humidity = u16::from_be_bytes([frame[0], frame[1]]) as f32 / 10.0;
            let magnitude = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]) as f32 / 10.0;
            let temperature = if frame[2] & 0x80 != 0 {
                -magnitude
            } else {
                magnitude
            };
            Reading {
                temperature,
                humidity,
            }
        }
        SensorKind::Dht11 => {
            let humidity = frame[0] as f32 + frame[1] as f32 / 10.0;
            let magnitude = frame[2] as f32 + (frame[3] & 0x0F) as f32 / 10.0;
            let temperature = if frame[3] & 0x80 != 0 {
                -magnitude
            } else {
                magnitude
            };
            Reading {
                temperature,
                humidity,
            }
        }
    };

    if !(0.0..=100.0).contains(&reading.humidity)
        || !(-40.0..=80.0).contains(&reading.temperature)
    {
        return Err(SensorError::OutOfRange);
    }

    Ok(reading)
}

/// DHT sensor on a single-wire bus
pub struct Dht<B> {
    bus: B,
    kind: SensorKind,
    reading: Option<Reading>,
    /// Which halves of `reading` were already handed out
    temperature_taken: bool,
    humidity_taken: bool,
}

impl<B: DhtBus> Dht<B> {
    pub fn new(bus: B, kind: SensorKind) -> Self {
        Self {
            bus,
            kind,
            reading: None,
            temperature_taken: false,
            humidity_taken: false,
        }
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Run one bus transaction
    pub fn measure(&mut self) -> Result<Reading, SensorError> {
        self.reading = None;
        let frame = self.bus.read_frame()?;
        let reading = decode(self.kind, &frame)?;
        self.reading = Some(reading);
        self.temperature_taken = false;
        self.humidity_taken = false;
        Ok(reading)
    }

    /// Reuse the cached frame unless this quantity was already read from it
    fn fresh(&mut self, taken: fn(&mut Self) -> &mut bool) -> Result<Reading, SensorError> {
        let cached = if *taken(self) { None } else { self.reading };
        let reading = match cached {
            Some(reading) => reading,
            None => self.measure()?,
        };
        *taken(self) = true;
        Ok(reading)
    }

    #[cfg(test)]
    fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B: DhtBus> ClimateSensor for Dht<B> {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.fresh(|dht| &mut dht.temperature_taken)
            .map(|r| r.temperature)
    }

    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        self.fresh(|dht| &mut dht.humidity_taken).map(|r| r.humidity)
    }
}
