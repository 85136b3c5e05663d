//! Kaze - Air-Conditioner Remote Firmware
//!
//! Main firmware binary for RP2040 boards driving an air conditioner over
//! infrared. A network bridge on UART0 relays change requests from clients
//! and fans state broadcasts back out.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kaze_core::config::{BoardConfig, PwmChannel, SensorKind};
use kaze_core::{ClimateController, Refresher, SettingsStore};
use kaze_drivers::{Dht, MapStorage, StatusLed};
use kaze_hal_rp2040::dht::{DHT11_START_US, DHT22_START_US};
use kaze_hal_rp2040::{
    pin_bank, settings_flash, FlexDhtBus, PwmIrOutput, Rp2040Output, SETTINGS_RANGE,
};

use crate::publisher::LinkPublisher;

mod channels;
mod device;
mod publisher;
mod tasks;

/// Board wiring: IR on GPIO15, DHT on GPIO2, LED on GPIO25, bridge on UART0
const BOARD: BoardConfig = BoardConfig::DEFAULT.with_family(device::FAMILY);

// The IR emitter is driven by PWM slice 7 channel B, which only GPIO15 reaches
const _: () = assert!(
    BOARD.ir.pwm_slice() == 7 && matches!(BOARD.ir.pwm_channel(), PwmChannel::B),
    "IR pin must be routed to PWM slice 7 channel B"
);
const _: () = assert!(BOARD.pins_distinct(), "GPIO assigned to two roles");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kaze firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Bridge link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BOARD.link_baud;

    let tx_buf = TX_BUF.init([0u8; 512]);
    let rx_buf = RX_BUF.init([0u8; 512]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", BOARD.link_baud);

    // Plain GPIOs, handed out by number; 0/1 (UART0) and 15 (PWM) stay out
    let mut pins = pin_bank!(
        p,
        [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29]
    );

    // IR emitter on PWM slice 7, channel B
    let pwm = Pwm::new_output_b(p.PWM_SLICE7, p.PIN_15, PwmConfig::default());
    let device = device::new_device(PwmIrOutput::new(pwm));
    info!("IR emitter on GPIO{} for {}", BOARD.ir.pin, BOARD.device_family.name());

    // Ambient sensor
    let start_us = match BOARD.sensor_kind {
        SensorKind::Dht11 => DHT11_START_US,
        SensorKind::Dht22 => DHT22_START_US,
    };
    let sensor_pin = unwrap!(pins.take(BOARD.sensor.pin));
    let sensor = Dht::new(FlexDhtBus::new(Flex::new(sensor_pin), start_us), BOARD.sensor_kind);
    info!("{} sensor on GPIO{}", BOARD.sensor_kind, BOARD.sensor.pin);

    // Transmit indicator
    let led_pin = unwrap!(pins.take(BOARD.led.pin));
    let led = StatusLed::new(
        Rp2040Output::new(Output::new(led_pin, Level::Low)),
        BOARD.led.inverted,
    );

    // Persisted flags
    let storage = MapStorage::new(settings_flash(p.FLASH, p.DMA_CH0), SETTINGS_RANGE);
    let settings = SettingsStore::load(storage);

    let controller = ClimateController::new(device, settings, LinkPublisher, led);
    let refresher = Refresher::new(BOARD.refresh_interval_ms);

    unwrap!(spawner.spawn(tasks::tick_task()));
    unwrap!(spawner.spawn(tasks::link_rx_task(rx)));
    unwrap!(spawner.spawn(tasks::link_tx_task(tx)));
    unwrap!(spawner.spawn(tasks::controller_task(controller, sensor, refresher)));

    info!("All tasks spawned, firmware running");
}
