//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and storage layout
//! constants live here so they can be tuned in one place.

// Control loop

/// Period of one control-loop frame (ms). Every frame samples input,
/// dispatches to either the active action or the navigator, then renders
/// if anything changed.
pub const FRAME_PERIOD_MS: u64 = 20;

// Action timing

/// How long the built-in "not implemented" notice stays up (ms).
pub const NOTICE_DURATION_MS: u64 = 2000;

/// How long the About screen stays up (ms).
pub const ABOUT_DURATION_MS: u64 = 3000;

/// How long a factory-reset result screen stays up before the action ends (ms).
pub const RESULT_DURATION_MS: u64 = 2000;

/// Boot splash duration shown after a successful config load (ms).
pub const BOOT_SPLASH_MS: u64 = 2000;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button PREVIOUS → P0.11
//   Button NEXT     → P0.12
//   Button CONFIRM  → P0.24
//   I²C SDA         → P0.26
//   I²C SCL         → P0.27
//   VBAT sense      → P0.02 (AIN0)

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

// Battery

/// Cell voltage reported as 0 % (mV).
pub const VBAT_EMPTY_MV: u16 = 2800;

/// Cell voltage reported as 100 % (mV).
pub const VBAT_FULL_MV: u16 = 3300;

/// Interval between battery samples (seconds).
pub const VBAT_SAMPLE_INTERVAL_SECS: u64 = 5;

// Radios

/// Maximum number of nRF24 radios described in the config store.
pub const MAX_RADIOS: usize = 4;

/// Encoded size of one radio descriptor: CE pin, CSN pin, PA level.
pub const RADIO_CONFIG_SIZE: usize = 3;

// Config storage

/// Largest value the config store accepts (bytes).
pub const MAX_VALUE_LEN: usize = MAX_RADIOS * RADIO_CONFIG_SIZE;

/// Flash page index where the config store starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for the config store.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
