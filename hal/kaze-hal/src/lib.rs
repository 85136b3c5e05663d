//! Kaze Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the air-conditioner remote needs
//! from a board: an indicator output, a persistent key-value store, an
//! infrared emitter and the sensor data line. Chip-specific crates
//! (currently RP2040) implement them so the core logic and device drivers
//! stay board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (kaze-firmware)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kaze-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ kaze-hal-     │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (status LED)
//! - [`flash::PersistentStorage`] - Non-volatile key-value storage
//! - [`ir::IrOutput`] - Modulated infrared emitter
//! - [`dht::DhtBus`] - Single-wire temperature/humidity sensor line

#![no_std]
#![deny(unsafe_code)]

pub mod dht;
pub mod flash;
pub mod gpio;
pub mod ir;

// Re-export key traits at crate root for convenience
pub use dht::{BusError, DhtBus};
pub use flash::{FlashError, PersistentStorage, StorageKey};
pub use gpio::OutputPin;
pub use ir::{IrError, IrOutput};
