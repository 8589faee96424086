//! Config store on the nRF52840's internal flash.
//!
//! Uses the `sequential-storage` map over a dedicated page range.  The
//! crate is async, while the menu core is a synchronous tick loop, so each
//! operation is driven to completion with `embassy_futures::block_on`.  The
//! NVMC stalls the CPU during erase/write anyway, so nothing is lost by not
//! yielding.
//!
//! Storage layout:
//!   - One map item per [`ConfigKey`], keyed by `ConfigKey::id()`.
//!   - Values are opaque byte blobs of at most `MAX_VALUE_LEN` bytes.

use core::ops::Range;

use crate::config::{MAX_VALUE_LEN, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use crate::error::StoreError;
use crate::storage::{ConfigKey, ConfigRead, ConfigStore};
use embassy_futures::block_on;
use embedded_storage::nor_flash as blocking;
use embedded_storage_async::nor_flash::{MultiwriteNorFlash, NorFlash, ReadNorFlash};
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Scratch buffer for one serialized map item (key + value + header).
const ITEM_BUF_SIZE: usize = 64;

const _: () = assert!(MAX_VALUE_LEN + 8 <= ITEM_BUF_SIZE);

// Workaround for alignment requirements.
#[repr(C, align(4))]
struct AlignedBuf<const N: usize>([u8; N]);

/// Presents a blocking NOR flash (e.g. `embassy_nrf::nvmc::Nvmc`) through
/// the async traits `sequential-storage` expects.
pub struct BlockingFlash<T> {
    flash: T,
}

impl<T> BlockingFlash<T> {
    pub fn new(flash: T) -> Self {
        Self { flash }
    }
}

impl<T: blocking::ErrorType> blocking::ErrorType for BlockingFlash<T> {
    type Error = T::Error;
}

impl<T: blocking::ReadNorFlash> ReadNorFlash for BlockingFlash<T> {
    const READ_SIZE: usize = T::READ_SIZE;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.flash.read(offset, bytes)
    }

    fn capacity(&self) -> usize {
        self.flash.capacity()
    }
}

impl<T: blocking::NorFlash> NorFlash for BlockingFlash<T> {
    const WRITE_SIZE: usize = T::WRITE_SIZE;
    const ERASE_SIZE: usize = T::ERASE_SIZE;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        self.flash.erase(from, to)
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        self.flash.write(offset, bytes)
    }
}

impl<T: blocking::MultiwriteNorFlash> MultiwriteNorFlash for BlockingFlash<T> {}

/// Flash-backed [`ConfigStore`].
pub struct FlashStore<F> {
    flash: F,
    range: Range<u32>,
    buf: AlignedBuf<ITEM_BUF_SIZE>,
}

impl<F: NorFlash> FlashStore<F> {
    /// Use the default config page range.
    pub fn new(flash: F) -> Self {
        Self {
            flash,
            range: STORAGE_START..STORAGE_END,
            buf: AlignedBuf([0; ITEM_BUF_SIZE]),
        }
    }

    /// Fetch `key` into the scratch buffer, returning the value length.
    fn fetch(&mut self, key: ConfigKey, out: Option<&mut [u8]>) -> Result<usize, StoreError> {
        let fetched = block_on(fetch_item::<u8, &[u8], _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut self.buf.0,
            &key.id(),
        ));

        match fetched {
            Ok(Some(value)) => {
                if let Some(out) = out {
                    let n = value.len().min(out.len());
                    out[..n].copy_from_slice(&value[..n]);
                    return Ok(n);
                }
                Ok(value.len())
            }
            Ok(None) => Ok(0),
            Err(e) => {
                error!("Flash read error on {}: {:?}", key.name(), defmt::Debug2Format(&e));
                Err(map_error(&e))
            }
        }
    }
}

impl<F: NorFlash> ConfigRead for FlashStore<F> {
    fn has(&mut self, key: ConfigKey) -> Result<bool, StoreError> {
        let present = block_on(fetch_item::<u8, &[u8], _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut self.buf.0,
            &key.id(),
        ))
        .map_err(|e| map_error(&e))?
        .is_some();
        Ok(present)
    }

    fn value_len(&mut self, key: ConfigKey) -> Result<usize, StoreError> {
        self.fetch(key, None)
    }

    fn get(&mut self, key: ConfigKey, buf: &mut [u8]) -> Result<usize, StoreError> {
        self.fetch(key, Some(buf))
    }
}

impl<F: NorFlash> ConfigStore for FlashStore<F> {
    fn put(&mut self, key: ConfigKey, value: &[u8]) -> Result<usize, StoreError> {
        if value.len() > MAX_VALUE_LEN {
            return Err(StoreError::ValueTooLarge);
        }

        let stored = block_on(store_item::<u8, &[u8], _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut self.buf.0,
            &key.id(),
            &value,
        ));

        match stored {
            Ok(()) => {
                debug!("Stored {} ({} bytes)", key.name(), value.len());
                Ok(value.len())
            }
            Err(e) => {
                error!("Flash write error on {}: {:?}", key.name(), defmt::Debug2Format(&e));
                Err(map_error(&e))
            }
        }
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match block_on(sequential_storage::erase_all(&mut self.flash, self.range.clone())) {
            Ok(()) => {
                info!("Config store erased");
                Ok(())
            }
            Err(e) => {
                error!("Flash erase error: {:?}", defmt::Debug2Format(&e));
                Err(map_error(&e))
            }
        }
    }
}

fn map_error<E>(e: &sequential_storage::Error<E>) -> StoreError {
    match e {
        sequential_storage::Error::FullStorage => StoreError::Full,
        sequential_storage::Error::BufferTooSmall { .. } => StoreError::BufferTooSmall,
        sequential_storage::Error::ItemTooBig => StoreError::ValueTooLarge,
        _ => StoreError::Flash,
    }
}
