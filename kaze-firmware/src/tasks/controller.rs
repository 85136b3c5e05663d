//! Controller task
//!
//! Owns the climate controller and the ambient sensor. Link events and
//! refresh ticks are serviced one at a time, each to completion.

use defmt::*;
use embassy_futures::select::{select, Either};

use kaze_core::{ClimateController, Refresher};
use kaze_drivers::{Dht, MapStorage, StatusLed};
use kaze_hal_rp2040::{FlexDhtBus, Rp2040Output, SettingsFlash};
use kaze_protocol::BridgeMessage;

use crate::channels::{LinkEvent, LINK_EVENTS};
use crate::device::Device;
use crate::publisher::LinkPublisher;
use crate::tasks::tick::TICK_SIGNAL;

/// Controller wired to the board peripherals
pub type Controller = ClimateController<
    Device,
    MapStorage<SettingsFlash<'static>>,
    LinkPublisher,
    StatusLed<Rp2040Output<'static>>,
>;

/// Ambient sensor on the board
pub type Sensor = Dht<FlexDhtBus<'static>>;

#[embassy_executor::task]
pub async fn controller_task(mut controller: Controller, mut sensor: Sensor, mut refresher: Refresher) {
    info!("Controller task started");

    controller.begin();
    Refresher::sample(&mut sensor, &mut controller);
    controller.broadcast();

    loop {
        match select(LINK_EVENTS.receive(), TICK_SIGNAL.wait()).await {
            Either::First(LinkEvent::Request(frame)) => match BridgeMessage::from_frame(&frame) {
                Ok(BridgeMessage::Request(request)) => {
                    if request.is_empty() {
                        debug!("Empty change request, re-sending current state");
                    }
                    controller.apply_request(&request);
                }
                Ok(_) => {}
                Err(e) => warn!("Invalid request frame: {:?}", e),
            },
            Either::First(LinkEvent::ClientConnected(client)) => {
                debug!("Sending state to client {}", client);
                controller.broadcast();
            }
            Either::Second(now_ms) => {
                if refresher.poll(now_ms, &mut sensor, &mut controller) {
                    trace!("Refresh at {} ms", now_ms);
                }
            }
        }
    }
}
