//! Link UART transmit task
//!
//! Writes state broadcasts and heartbeat responses to the bridge.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use kaze_protocol::frame::MAX_FRAME_SIZE;
use kaze_protocol::{ControllerMessage, Frame};

use crate::channels::{HEARTBEAT_RECEIVED, STATE_FRAMES};

/// Link TX task - sends frames to the bridge
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        match select(HEARTBEAT_RECEIVED.wait(), STATE_FRAMES.receive()).await {
            Either::First(()) => send_pong(&mut tx).await,
            Either::Second(frame) => {
                send_frame(&mut tx, &frame).await;
                trace!("State sent");
            }
        }
    }
}

/// Send PONG response to the bridge
async fn send_pong(tx: &mut BufferedUartTx) {
    match ControllerMessage::Pong.to_frame() {
        Ok(frame) => {
            send_frame(tx, &frame).await;
            trace!("PONG sent");
        }
        Err(e) => warn!("Failed to build PONG: {:?}", e),
    }
}

async fn send_frame(tx: &mut BufferedUartTx, frame: &Frame) {
    let mut buf = [0u8; MAX_FRAME_SIZE];
    match frame.encode(&mut buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("UART write error: {:?}", e);
            }
        }
        Err(e) => warn!("Failed to encode frame: {:?}", e),
    }
}
