//! Ambient climate sensor trait

use kaze_hal::BusError;

/// Errors that can occur with climate sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer the start signal
    NoResponse,
    /// A bit timed out mid-frame
    Timeout,
    /// Frame checksum mismatch
    Checksum,
    /// Decoded value outside the sensor's physical range
    OutOfRange,
}

impl From<BusError> for SensorError {
    fn from(e: BusError) -> Self {
        match e {
            BusError::NoResponse => SensorError::NoResponse,
            BusError::Timeout => SensorError::Timeout,
        }
    }
}

/// Trait for combined temperature and humidity sensors
pub trait ClimateSensor {
    /// Read the ambient temperature in degrees Celsius
    fn read_temperature(&mut self) -> Result<f32, SensorError>;

    /// Read the relative humidity in percent
    fn read_humidity(&mut self) -> Result<f32, SensorError>;
}
