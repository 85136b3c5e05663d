//! Board configuration
//!
//! Configuration is compile-time only. The firmware builds its
//! peripherals from [`BoardConfig::DEFAULT`] and selects the device
//! family with a cargo feature.

pub mod board;

pub use board::*;
