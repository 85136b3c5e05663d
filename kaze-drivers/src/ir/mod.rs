//! Infrared air-conditioner protocols
//!
//! Each adapter keeps the complete protocol state in RAM. Setters patch
//! bits in place; `transmit()` fills in checksums, renders a
//! [`Waveform`] and hands it to the board's IR emitter.

pub mod daikin;
pub mod panasonic;
pub mod waveform;

pub use daikin::DaikinAc;
pub use panasonic::PanasonicAc;
pub use waveform::{CapacityError, PulseTiming, Waveform};
