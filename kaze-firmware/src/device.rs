//! Device family selection
//!
//! The air-conditioner family is fixed at build time. `panasonic` wins
//! when both family features are enabled.

use kaze_core::config::DeviceFamily;
use kaze_hal_rp2040::PwmIrOutput;

#[cfg(feature = "panasonic")]
pub type Device = kaze_drivers::PanasonicAc<PwmIrOutput<'static>>;

#[cfg(feature = "panasonic")]
pub const FAMILY: DeviceFamily = DeviceFamily::Panasonic;

#[cfg(not(feature = "panasonic"))]
pub type Device = kaze_drivers::DaikinAc<PwmIrOutput<'static>>;

#[cfg(not(feature = "panasonic"))]
pub const FAMILY: DeviceFamily = DeviceFamily::Daikin;

/// Build the selected adapter on top of the IR emitter
pub fn new_device(output: PwmIrOutput<'static>) -> Device {
    Device::new(output)
}
