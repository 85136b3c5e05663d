//! Network Bridge Link Protocol
//!
//! The RP2040 controller has no radio of its own. A Wi-Fi bridge
//! (an ESP module running a WebSocket server) sits on a UART and relays
//! traffic between network clients and the controller. This crate defines
//! everything that crosses that UART.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! State reports and change requests travel as flat JSON objects inside
//! the payload, in the same shape network clients see, so the bridge can
//! forward them without parsing.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod frame;
pub mod messages;
pub mod record;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{BridgeMessage, ControllerMessage, ProtocolError};
pub use record::{ChangeRequest, StateReport};
