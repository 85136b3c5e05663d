//! Collaborator traits
//!
//! These traits define the interface between the climate logic and the
//! hardware-specific implementations it drives.

pub mod device;
pub mod indicator;
pub mod publisher;
pub mod sensor;

pub use device::{TargetDevice, TransmitError};
pub use indicator::Indicator;
pub use publisher::{PublishError, StatePublisher};
pub use sensor::{ClimateSensor, SensorError};
