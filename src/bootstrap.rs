//! Startup configuration gate.
//!
//! Before the first menu frame the firmware reads the mandatory keys from
//! the config store and decodes them.  Startup either fully succeeds and
//! yields a [`DeviceConfig`], or fails with an [`Error`] that the app turns
//! into a terminal error screen.  There is no degraded mode.
//!
//! The gate only needs [`ConfigRead`]; writing is reserved for the
//! factory-reset action via [`write_defaults`].

use heapless::Vec;

use crate::config::{MAX_RADIOS, MAX_VALUE_LEN, RADIO_CONFIG_SIZE};
use crate::error::{BootstrapError, Error, StoreError};
use crate::storage::{ConfigKey, ConfigRead, ConfigStore};

/// How multiple radios share the work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum JamTxMode {
    /// All radios transmit on the same channel together.
    Simultaneous = 0,
    /// Each radio takes its own channel, rotating when channels outnumber radios.
    Standalone = 1,
}

impl JamTxMode {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(JamTxMode::Simultaneous),
            1 => Some(JamTxMode::Standalone),
            _ => None,
        }
    }
}

/// nRF24 power amplifier setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PaLevel {
    Min = 0,
    Low = 1,
    High = 2,
    Max = 3,
}

impl PaLevel {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(PaLevel::Min),
            1 => Some(PaLevel::Low),
            2 => Some(PaLevel::High),
            3 => Some(PaLevel::Max),
            _ => None,
        }
    }
}

/// Wiring and power of one radio.
///
/// Layout (3 bytes):
/// ```text
/// Byte 0: CE pin
/// Byte 1: CSN pin
/// Byte 2: PA level (0..=3)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    pub ce_pin: u8,
    pub csn_pin: u8,
    pub pa_level: PaLevel,
}

impl RadioConfig {
    /// Parse one packed descriptor.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != RADIO_CONFIG_SIZE {
            return None;
        }
        Some(Self {
            ce_pin: bytes[0],
            csn_pin: bytes[1],
            pa_level: PaLevel::from_byte(bytes[2])?,
        })
    }

    pub fn encode(&self) -> [u8; RADIO_CONFIG_SIZE] {
        [self.ce_pin, self.csn_pin, self.pa_level as u8]
    }
}

/// Everything the gate loads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub radios: Vec<RadioConfig, MAX_RADIOS>,
    pub jam_mode: JamTxMode,
}

/// Read and decode the mandatory configuration.
pub fn load<S: ConfigRead + ?Sized>(store: &mut S) -> Result<DeviceConfig, Error> {
    for key in ConfigKey::MANDATORY {
        if !store.has(key)? {
            warn!("bootstrap: missing mandatory key {}", key.name());
            return Err(BootstrapError::MissingKey(key).into());
        }
    }

    let mut count = [0u8; 1];
    read_exact(store, ConfigKey::RadioCount, &mut count)?;
    let count = count[0];
    if usize::from(count) > MAX_RADIOS {
        return Err(BootstrapError::TooManyRadios(count).into());
    }

    let mut radios = Vec::new();
    if count > 0 {
        let mut buf = [0u8; MAX_VALUE_LEN];
        let packed = &mut buf[..usize::from(count) * RADIO_CONFIG_SIZE];
        read_exact(store, ConfigKey::RadioConfig, packed)?;

        for chunk in packed.chunks_exact(RADIO_CONFIG_SIZE) {
            let radio = RadioConfig::decode(chunk)
                .ok_or(BootstrapError::InvalidValue(ConfigKey::RadioConfig))?;
            radios
                .push(radio)
                .map_err(|_| BootstrapError::TooManyRadios(count))?;
        }
    }

    let mut mode = [0u8; 1];
    read_exact(store, ConfigKey::JamMode, &mut mode)?;
    let jam_mode =
        JamTxMode::from_byte(mode[0]).ok_or(BootstrapError::InvalidValue(ConfigKey::JamMode))?;

    info!("bootstrap: {} radio(s), mode {:?}", radios.len(), jam_mode);
    Ok(DeviceConfig { radios, jam_mode })
}

/// Read `key` into `buf`, insisting the stored value is exactly `buf.len()`
/// bytes long and that all of it was read.
fn read_exact<S: ConfigRead + ?Sized>(
    store: &mut S,
    key: ConfigKey,
    buf: &mut [u8],
) -> Result<(), Error> {
    let stored = store.value_len(key)?;
    let read = store.get(key, buf)?;
    if stored != buf.len() || read != stored {
        warn!(
            "bootstrap: {} holds {} bytes, read {}, expected {}",
            key.name(),
            stored,
            read,
            buf.len()
        );
        return Err(BootstrapError::LengthMismatch {
            key,
            expected: buf.len(),
            found: stored,
        }
        .into());
    }
    Ok(())
}

/// Wipe the store and write the factory defaults: no radios, simultaneous
/// transmit mode.
pub fn write_defaults<S: ConfigStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.clear()?;
    put_exact(store, ConfigKey::RadioCount, &[0])?;
    put_exact(store, ConfigKey::JamMode, &[JamTxMode::Simultaneous as u8])?;
    Ok(())
}

fn put_exact<S: ConfigStore + ?Sized>(
    store: &mut S,
    key: ConfigKey,
    value: &[u8],
) -> Result<(), StoreError> {
    if store.put(key, value)? != value.len() {
        return Err(StoreError::Flash);
    }
    Ok(())
}
