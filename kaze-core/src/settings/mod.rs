//! Non-volatile setting store
//!
//! A 512-byte write-back image addressed by byte offset, the same
//! shape as the EEPROM emulation the remote's settings were designed
//! around. Writes only touch RAM; `commit()` stores the whole image as
//! one value under [`StorageKey::Settings`] when something changed.

use kaze_hal::{FlashError, PersistentStorage, StorageKey};

/// Size of the addressable byte image
pub const IMAGE_SIZE: usize = 512;

/// Fixed addresses of the persisted settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    /// Reserved. Fan speed is not persisted; the slot is kept so the
    /// layout stays compatible with existing images.
    FanSpeed,
    VerticalSwing,
    HorizontalSwing,
    QuietMode,
    PowerfulMode,
}

impl SettingKey {
    /// Flags applied by the restore sequence
    pub const PERSISTED: [SettingKey; 4] = [
        SettingKey::VerticalSwing,
        SettingKey::HorizontalSwing,
        SettingKey::QuietMode,
        SettingKey::PowerfulMode,
    ];

    /// Byte offset inside the image
    pub const fn address(self) -> usize {
        match self {
            SettingKey::FanSpeed => 210,
            SettingKey::VerticalSwing => 230,
            SettingKey::HorizontalSwing => 231,
            SettingKey::QuietMode => 232,
            SettingKey::PowerfulMode => 233,
        }
    }
}

/// Write-back setting store over a key-value backend
pub struct SettingsStore<B: PersistentStorage> {
    backend: B,
    image: [u8; IMAGE_SIZE],
    dirty: bool,
}

impl<B: PersistentStorage> SettingsStore<B> {
    /// Create a store with an all-zero image, without touching the backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            image: [0; IMAGE_SIZE],
            dirty: false,
        }
    }

    /// Create a store from whatever image the backend holds
    ///
    /// A missing, unreadable or mis-sized image leaves the image all
    /// zeros, so every flag reads false. Storage the backend cannot parse
    /// is erased so later commits can succeed.
    pub fn load(backend: B) -> Self {
        let mut store = Self::new(backend);
        let mut image = [0u8; IMAGE_SIZE];

        match store.backend.read(StorageKey::Settings, &mut image) {
            Ok(IMAGE_SIZE) => {
                store.image = image;
                info!("Settings loaded");
            }
            Ok(len) => warn!("Stored settings have {} bytes, using blank image", len),
            Err(FlashError::NotFound) => info!("No stored settings, using blank image"),
            Err(FlashError::Corrupted) => {
                warn!("Settings storage corrupted, erasing");
                if let Err(e) = store.backend.erase_all() {
                    warn!("Settings erase failed: {}", e);
                }
            }
            Err(e) => warn!("Settings read failed: {}", e),
        }

        store
    }

    /// Read a byte from the image
    ///
    /// Addresses outside the image read as zero.
    pub fn read(&self, address: usize) -> u8 {
        self.image.get(address).copied().unwrap_or(0)
    }

    /// Write a byte into the image
    ///
    /// Marks the store dirty only when the stored byte changes.
    pub fn write(&mut self, address: usize, value: u8) {
        match self.image.get_mut(address) {
            Some(slot) if *slot != value => {
                *slot = value;
                self.dirty = true;
                debug!("Setting {} = {}", address, value);
            }
            Some(_) => {}
            None => warn!("Setting address {} out of range", address),
        }
    }

    /// Read a boolean setting (true only when the byte is exactly 1)
    pub fn flag(&self, key: SettingKey) -> bool {
        self.read(key.address()) == 1
    }

    /// Write a boolean setting
    pub fn set_flag(&mut self, key: SettingKey, value: bool) {
        self.write(key.address(), value as u8);
    }

    /// Check if the image has changes not yet committed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flush the image to the backend if it changed
    ///
    /// Returns `Ok(true)` when a write happened and `Ok(false)` when there
    /// was nothing to do. On failure the store stays dirty.
    pub fn commit(&mut self) -> Result<bool, FlashError> {
        if !self.dirty {
            return Ok(false);
        }

        self.backend.write(StorageKey::Settings, &self.image)?;
        self.dirty = false;
        Ok(true)
    }

    /// Get a reference to the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the store, returning the backend
    pub fn into_backend(self) -> B {
        self.backend
    }
}
