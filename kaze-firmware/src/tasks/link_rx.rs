//! Link UART receive task
//!
//! Receives frames from the network bridge, validates them and forwards
//! the accepted ones to the controller. Malformed input is logged and
//! dropped here.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use kaze_protocol::{BridgeMessage, Frame, FrameParser};

use crate::channels::{LinkEvent, HEARTBEAT_RECEIVED, LINK_EVENTS};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the bridge
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => handle_frame(frame),
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Dispatch one complete frame
fn handle_frame(frame: Frame) {
    let event = match BridgeMessage::from_frame(&frame) {
        Ok(BridgeMessage::Ping) => {
            trace!("PING received");
            HEARTBEAT_RECEIVED.signal(());
            return;
        }
        Ok(BridgeMessage::ClientConnected { client }) => {
            debug!("Client {} connected", client);
            LinkEvent::ClientConnected(client)
        }
        // The controller parses the record again from the frame
        Ok(BridgeMessage::Request(_)) => LinkEvent::Request(frame.clone()),
        Err(e) => {
            warn!("Dropping bridge message: {:?}", e);
            return;
        }
    };

    if LINK_EVENTS.try_send(event).is_err() {
        warn!("Link channel full, dropping event");
    }
}
