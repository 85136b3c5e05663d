//! Flash partition for persisted settings
//!
//! The last 16KB of flash (four erase sectors) hold a wear-leveled
//! key-value map. The async flash driver implements the
//! `embedded-storage-async` NOR flash traits, so any map-backed storage
//! can sit directly on top of it.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const SETTINGS_PARTITION_SIZE: usize = 4 * ERASE_SIZE;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

/// Flash range for the settings partition
pub const SETTINGS_RANGE: core::ops::Range<u32> =
    (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// On-board flash in DMA-driven async mode
pub type SettingsFlash<'d> = Flash<'d, FLASH, Async, FLASH_SIZE>;

/// Open the on-board flash for the settings partition
pub fn settings_flash<'d>(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> SettingsFlash<'d> {
    Flash::new(flash, dma)
}
