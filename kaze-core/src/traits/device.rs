//! Target device trait

use kaze_hal::IrError;

use crate::climate::{FanSpeed, Mode};

/// Errors that can occur when sending state to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitError {
    /// State could not be encoded into a waveform
    Encoding,
    /// Output hardware refused the waveform
    Output(IrError),
}

impl From<IrError> for TransmitError {
    fn from(e: IrError) -> Self {
        TransmitError::Output(e)
    }
}

/// An air conditioner that can be told its complete desired state
///
/// Setters only stage values in the adapter's protocol state; nothing
/// leaves the board until [`transmit`](TargetDevice::transmit). Each
/// adapter clamps temperature and maps swing flags to its own protocol.
pub trait TargetDevice {
    fn power_on(&mut self);

    fn power_off(&mut self);

    /// Select the operating mode
    ///
    /// Never called with [`Mode::Off`]; power state goes through
    /// `power_on`/`power_off`.
    fn set_mode(&mut self, mode: Mode);

    fn set_fan_speed(&mut self, speed: FanSpeed);

    /// Set the target temperature in degrees Celsius
    fn set_temperature(&mut self, celsius: i32);

    /// `true` for automatic vertical swing, `false` for a fixed position
    fn set_swing_vertical(&mut self, on: bool);

    /// `true` for automatic horizontal swing, `false` for a fixed position
    fn set_swing_horizontal(&mut self, on: bool);

    fn set_quiet(&mut self, on: bool);

    fn set_powerful(&mut self, on: bool);

    /// Send the staged state to the device
    fn transmit(&mut self) -> Result<(), TransmitError>;
}
