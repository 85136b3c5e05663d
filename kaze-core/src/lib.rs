//! Board-agnostic core logic for the air-conditioner remote
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Climate types (mode, fan speed, canonical state)
//! - Non-volatile setting store over a key-value backend
//! - Collaborator traits (target device, climate sensor, state publisher)
//! - Climate state machine (the controller)
//! - Periodic refresher
//! - Compile-time board configuration

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
mod fmt;

pub mod climate;
pub mod config;
pub mod controller;
pub mod refresh;
pub mod settings;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use climate::{ClimateState, FanSpeed, Mode};
pub use controller::ClimateController;
pub use refresh::Refresher;
pub use settings::{SettingKey, SettingsStore};
