//! Persistent storage abstractions
//!
//! Values live under a small set of keys. A backend replaces the value
//! of a key as a whole: after a failed or interrupted `write` the
//! previous value must still be readable.

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash read, erase or program operation failed
    Flash,
    /// Stored data is not in a format the backend understands
    Corrupted,
    /// No space left, even after reclaiming stale entries
    Full,
    /// Key not found
    NotFound,
    /// Caller buffer is smaller than the stored value
    BufferTooSmall,
}

/// Storage keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Setting store image, layout version 1
    Settings = 1,
}

impl StorageKey {
    /// Convert to u8 for storage
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert from u8
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(StorageKey::Settings),
            _ => None,
        }
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let slot = buffer
            .first_mut()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        *slot = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let byte = buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        StorageKey::from_u8(*byte)
            .map(|key| (key, 1))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}

/// Non-volatile key-value storage
pub trait PersistentStorage {
    /// Read the value stored under `key` into `buffer`
    ///
    /// Returns the number of bytes read, or `FlashError::NotFound` if the
    /// key was never written.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError>;

    /// Durably replace the value stored under `key`
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError>;

    /// Erase everything, leaving the storage blank
    fn erase_all(&mut self) -> Result<(), FlashError>;
}
