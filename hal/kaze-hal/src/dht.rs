//! Single-wire bus for DHT-family sensors
//!
//! The bus implementation owns the timing-critical part: the start pulse
//! and measuring the 40 data bit widths. Interpreting the frame (checksum,
//! scaling per sensor model) is the driver's job.

/// Errors on the sensor data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Sensor never pulled the line low after the start pulse
    NoResponse,
    /// A bit did not complete within its time window
    Timeout,
}

/// Raw frame source for DHT11/DHT22 style sensors
pub trait DhtBus {
    /// Run one transaction and return the five raw bytes
    ///
    /// Bytes are in wire order: humidity high/low, temperature high/low,
    /// checksum. Implementations block for roughly 5 ms.
    fn read_frame(&mut self) -> Result<[u8; 5], BusError>;
}
