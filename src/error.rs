//! Unified error type for otg-jammer.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

use crate::storage::ConfigKey;

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Mandatory configuration is missing or malformed.
    Bootstrap(BootstrapError),

    /// The config store itself failed.
    Storage(StoreError),

    /// A menu path did not resolve against the tree.
    Menu(TreeError),
}

/// Config store failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Flash read/write/erase failed.
    Flash,
    /// No room left for another key.
    Full,
    /// Value exceeds `MAX_VALUE_LEN`.
    ValueTooLarge,
    /// Caller buffer cannot hold the stored value.
    BufferTooSmall,
}

/// Reasons the startup config gate refuses to proceed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootstrapError {
    /// A mandatory key is absent.
    MissingKey(ConfigKey),
    /// Bytes read differ from the stored or expected length.
    LengthMismatch {
        key: ConfigKey,
        expected: usize,
        found: usize,
    },
    /// Stored bytes do not decode to a known value.
    InvalidValue(ConfigKey),
    /// `radio_count` exceeds `MAX_RADIOS`.
    TooManyRadios(u8),
}

/// Menu tree resolution and construction failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TreeError {
    /// `index` is not below the size of the level at `depth`.
    OutOfRange {
        depth: usize,
        index: usize,
        size: usize,
    },
    /// Path descends through an item that has no submenu.
    NotASubmenu { depth: usize },
    /// Path is empty or longer than `MAX_DEPTH`.
    BadPath,
    /// A level has no items.
    EmptyLevel,
    /// A submenu would live deeper than `MAX_DEPTH` levels.
    TooDeep,
    /// A level holds more than `MAX_LEVEL_ITEMS` items.
    TooManyItems,
    /// A non-root level ends with an item that opens a submenu or an action.
    MissingReturnSlot,
}

// Convenience conversions

impl From<BootstrapError> for Error {
    fn from(e: BootstrapError) -> Self {
        Error::Bootstrap(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Storage(e)
    }
}

impl From<TreeError> for Error {
    fn from(e: TreeError) -> Self {
        Error::Menu(e)
    }
}
