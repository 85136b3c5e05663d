//! Inter-task communication channels
//!
//! Static embassy-sync channels connecting the link tasks with the
//! controller task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use kaze_protocol::Frame;

/// Channel capacity for validated inbound link events
const LINK_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outbound state frames
const STATE_CHANNEL_SIZE: usize = 4;

/// Inbound event for the controller
///
/// Requests travel as the raw frame; the controller re-borrows the JSON
/// record from it.
#[derive(Debug)]
pub enum LinkEvent {
    /// Change request frame, already validated by the RX task
    Request(Frame),
    /// A client subscribed and needs a broadcast
    ClientConnected(u8),
}

/// Events from the bridge (link RX → controller)
pub static LINK_EVENTS: Channel<CriticalSectionRawMutex, LinkEvent, LINK_CHANNEL_SIZE> =
    Channel::new();

/// Encoded state broadcasts (controller → link TX)
pub static STATE_FRAMES: Channel<CriticalSectionRawMutex, Frame, STATE_CHANNEL_SIZE> =
    Channel::new();

/// Signal that a heartbeat (PING) was received from the bridge
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();
