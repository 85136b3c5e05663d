//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kaze-core, written against the kaze-hal traits:
//!
//! - Air-conditioner IR protocols (Daikin, Panasonic)
//! - Temperature/humidity sensors (DHT11, DHT22)
//! - Status LED
//! - Wear-leveled settings storage on NOR flash

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod ir;
pub mod led;
pub mod sensor;
pub mod storage;

#[cfg(test)]
pub(crate) mod mock;

pub use ir::{DaikinAc, PanasonicAc, Waveform};
pub use led::StatusLed;
pub use sensor::Dht;
pub use storage::MapStorage;
