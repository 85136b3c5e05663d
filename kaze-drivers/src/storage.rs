//! Wear-leveled key-value storage on NOR flash
//!
//! Values are appended to a sequential-storage map spread over a few
//! erase pages. A new value is written next to the old one and only
//! becomes visible once it is complete, so losing power mid-write leaves
//! the previous value readable.
//!
//! The sequential-storage API is async; commits happen from synchronous
//! controller code, so each call is driven to completion with
//! `embassy_futures::block_on`.

use core::ops::Range;

use embassy_futures::block_on;
use embedded_storage_async::nor_flash::NorFlash;
use kaze_hal::{FlashError, PersistentStorage, StorageKey};
use sequential_storage::cache::NoCache;
use sequential_storage::map;

/// Scratch space for one serialized item (key, value and padding)
const DATA_BUFFER_SIZE: usize = 1024;

/// Key-value storage over a flash range
///
/// `range` must be aligned to `F::ERASE_SIZE` and span at least two
/// pages.
pub struct MapStorage<F> {
    flash: F,
    range: Range<u32>,
}

impl<F: NorFlash> MapStorage<F> {
    /// Create storage over `range` of `flash`
    pub fn new(flash: F, range: Range<u32>) -> Self {
        Self { flash, range }
    }

    /// Get the underlying flash for low-level access
    pub fn flash(&mut self) -> &mut F {
        &mut self.flash
    }
}

fn map_error<E>(error: sequential_storage::Error<E>) -> FlashError {
    match error {
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        sequential_storage::Error::FullStorage { .. } => FlashError::Full,
        _ => FlashError::Flash,
    }
}

impl<F: NorFlash> PersistentStorage for MapStorage<F> {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut data_buffer = [0u8; DATA_BUFFER_SIZE];

        let result = block_on(map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        ));

        match result {
            Ok(Some(data)) => {
                let dest = buffer
                    .get_mut(..data.len())
                    .ok_or(FlashError::BufferTooSmall)?;
                dest.copy_from_slice(data);
                Ok(data.len())
            }
            Ok(None) => Err(FlashError::NotFound),
            Err(e) => Err(map_error(e)),
        }
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        let mut data_buffer = [0u8; DATA_BUFFER_SIZE];

        block_on(map::store_item(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        ))
        .map_err(map_error)
    }

    fn erase_all(&mut self) -> Result<(), FlashError> {
        block_on(self.flash.erase(self.range.start, self.range.end))
            .map_err(|_| FlashError::Flash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFlash;
    use kaze_core::{SettingKey, SettingsStore};

    const PAGES: usize = 4;

    fn storage() -> MapStorage<MockFlash> {
        let flash = MockFlash::new(PAGES);
        let range = flash.range();
        MapStorage::new(flash, range)
    }

    #[test]
    fn test_blank_flash_is_not_found() {
        let mut storage = storage();
        let mut buf = [0u8; 8];
        assert_eq!(
            storage.read(StorageKey::Settings, &mut buf),
            Err(FlashError::NotFound)
        );
    }

    #[test]
    fn test_latest_value_wins() {
        let mut storage = storage();
        storage.write(StorageKey::Settings, &[1, 2, 3]).unwrap();
        storage.write(StorageKey::Settings, &[4, 5, 6, 7]).unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(storage.read(StorageKey::Settings, &mut buf), Ok(4));
        assert_eq!(&buf[..4], &[4, 5, 6, 7]);
    }

    #[test]
    fn test_small_buffer_rejected() {
        let mut storage = storage();
        storage.write(StorageKey::Settings, &[9; 16]).unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(
            storage.read(StorageKey::Settings, &mut buf),
            Err(FlashError::BufferTooSmall)
        );
    }

    #[test]
    fn test_erase_all_blanks_range() {
        let mut storage = storage();
        storage.write(StorageKey::Settings, &[1]).unwrap();
        storage.erase_all().unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(
            storage.read(StorageKey::Settings, &mut buf),
            Err(FlashError::NotFound)
        );
        assert!(storage.flash().bytes.iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_many_commits_wrap_around_pages() {
        let mut store = SettingsStore::load(storage());
        for i in 0..64 {
            store.set_flag(SettingKey::QuietMode, i % 2 == 0);
            store.commit().unwrap();
        }

        let mut backend = store.into_backend();
        assert!(backend.flash().erases > 0);

        let reloaded = SettingsStore::load(backend);
        assert!(!reloaded.flag(SettingKey::QuietMode));
    }

    #[test]
    fn test_power_cut_during_commit_keeps_previous_flags() {
        let mut store = SettingsStore::load(storage());
        store.set_flag(SettingKey::VerticalSwing, true);
        store.set_flag(SettingKey::QuietMode, true);
        store.commit().unwrap();

        let mut backend = store.into_backend();
        backend.flash().writes_left = Some(0);
        let mut store = SettingsStore::load(backend);
        store.set_flag(SettingKey::HorizontalSwing, true);
        assert_eq!(store.commit(), Err(FlashError::Flash));
        assert!(store.is_dirty());

        let mut backend = store.into_backend();
        backend.flash().writes_left = None;
        let reloaded = SettingsStore::load(backend);
        assert!(reloaded.flag(SettingKey::VerticalSwing));
        assert!(reloaded.flag(SettingKey::QuietMode));
        assert!(!reloaded.flag(SettingKey::HorizontalSwing));
    }

    #[test]
    fn test_commit_after_power_returns() {
        let mut backend = storage();
        backend.flash().writes_left = Some(0);
        let mut store = SettingsStore::load(backend);
        store.set_flag(SettingKey::PowerfulMode, true);
        assert!(store.commit().is_err());

        let mut backend = store.into_backend();
        backend.flash().writes_left = None;
        let mut store = SettingsStore::load(backend);
        store.set_flag(SettingKey::PowerfulMode, true);
        assert_eq!(store.commit(), Ok(true));

        let reloaded = SettingsStore::load(store.into_backend());
        assert!(reloaded.flag(SettingKey::PowerfulMode));
    }
}
