//! Persistent key/value configuration store.
//!
//! The store is a flat map from a small fixed set of keys to opaque byte
//! blobs.  Nothing here interprets the bytes; decoding lives in
//! [`crate::bootstrap`].
//!
//! Access is split in two traits to mark the two access windows.  The
//! startup gate is handed the store as a `&mut dyn ConfigRead`, so it has
//! no write methods to call.  Writes go through [`crate::action::ActionContext`],
//! and only the factory-reset action uses them.

#[cfg(feature = "embedded")]
pub mod flash;

use crate::config::MAX_VALUE_LEN;
use crate::error::StoreError;
use heapless::{LinearMap, Vec};

/// Keys understood by the config store.
///
/// The discriminant doubles as the on-flash map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ConfigKey {
    /// Number of attached radios (1 byte).
    RadioCount = 0x01,
    /// Packed radio descriptors, `RADIO_CONFIG_SIZE` bytes each.
    RadioConfig = 0x02,
    /// Transmit mode shared by all radios (1 byte).
    JamMode = 0x03,
}

impl ConfigKey {
    /// Keys that must be present for the device to leave the boot gate.
    pub const MANDATORY: [ConfigKey; 2] = [ConfigKey::RadioCount, ConfigKey::JamMode];

    /// Stable human-readable name, used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            ConfigKey::RadioCount => "radio_count",
            ConfigKey::RadioConfig => "radio_cfg",
            ConfigKey::JamMode => "radio_jam_mode",
        }
    }

    /// Raw map key.
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// Read access to the config store.
pub trait ConfigRead {
    /// Whether `key` currently holds a value.
    fn has(&mut self, key: ConfigKey) -> Result<bool, StoreError>;

    /// Stored length of `key` in bytes, `0` when absent.
    fn value_len(&mut self, key: ConfigKey) -> Result<usize, StoreError>;

    /// Copy at most `buf.len()` bytes of `key` into `buf`.
    ///
    /// Returns the number of bytes copied; `0` when the key is absent.
    /// A result shorter than [`ConfigRead::value_len`] is a short read.
    fn get(&mut self, key: ConfigKey, buf: &mut [u8]) -> Result<usize, StoreError>;
}

/// Read-write access to the config store.
pub trait ConfigStore: ConfigRead {
    /// Replace the value of `key`. Returns the number of bytes written.
    fn put(&mut self, key: ConfigKey, value: &[u8]) -> Result<usize, StoreError>;

    /// Remove every key.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// RAM-only store, used on the host and as a scratch store in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: LinearMap<ConfigKey, Vec<u8, MAX_VALUE_LEN>, 4>,
}

impl MemoryStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            entries: LinearMap::new(),
        }
    }

    /// Builder-style insert, handy for seeding fixtures.
    pub fn with(mut self, key: ConfigKey, value: &[u8]) -> Result<Self, StoreError> {
        self.put(key, value)?;
        Ok(self)
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigRead for MemoryStore {
    fn has(&mut self, key: ConfigKey) -> Result<bool, StoreError> {
        Ok(self.entries.contains_key(&key))
    }

    fn value_len(&mut self, key: ConfigKey) -> Result<usize, StoreError> {
        Ok(self.entries.get(&key).map_or(0, |v| v.len()))
    }

    fn get(&mut self, key: ConfigKey, buf: &mut [u8]) -> Result<usize, StoreError> {
        let Some(value) = self.entries.get(&key) else {
            return Ok(0);
        };
        let n = value.len().min(buf.len());
        buf[..n].copy_from_slice(&value[..n]);
        Ok(n)
    }
}

impl ConfigStore for MemoryStore {
    fn put(&mut self, key: ConfigKey, value: &[u8]) -> Result<usize, StoreError> {
        let value = Vec::from_slice(value).map_err(|_| StoreError::ValueTooLarge)?;
        let len = value.len();
        self.entries
            .insert(key, value)
            .map_err(|_| StoreError::Full)?;
        Ok(len)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}
