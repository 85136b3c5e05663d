//! RP2040-specific HAL for the air-conditioner remote
//!
//! This crate provides RP2040 implementations of the shared `kaze-hal`
//! traits:
//!
//! - GPIO output wrapper (status LED)
//! - GPIO allocation by pin number
//! - PWM-modulated IR emitter
//! - Bit-banged DHT sensor bus
//! - Flash partition for the settings map

#![no_std]

pub mod dht;
pub mod flash;
pub mod gpio;
pub mod ir;
pub mod pins;

pub use dht::FlexDhtBus;
pub use flash::{settings_flash, SettingsFlash, SETTINGS_RANGE};
pub use gpio::Rp2040Output;
pub use ir::PwmIrOutput;
pub use pins::{PinBank, PinError};

// Re-export shared traits from kaze-hal for convenience
pub use kaze_hal::{DhtBus, IrOutput, OutputPin, PersistentStorage};
