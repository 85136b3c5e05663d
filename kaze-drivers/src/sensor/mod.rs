//! Ambient sensor implementations

pub mod dht;

pub use dht::{decode, Dht, Reading};
