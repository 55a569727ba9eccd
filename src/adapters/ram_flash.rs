//! In-memory flash adapter.
//!
//! Backs [`FlashPort`] with a single heap blob. Used by the host simulation
//! console and by tests; the fail-injection hook lets persistence tests
//! exercise the write-failure path without a real flash driver.

use crate::ports::{FlashPort, StorageError};

pub struct RamFlash {
    blob: Option<Vec<u8>>,
    /// When set, the next write fails with `IoError` and clears the hook.
    pub fail_next_write: bool,
    /// Completed writes, for asserting on debounce behaviour.
    pub writes: usize,
}

impl RamFlash {
    /// Empty flash: reads report [`StorageError::NotFound`] until the first
    /// write.
    pub fn new() -> Self {
        Self {
            blob: None,
            fail_next_write: false,
            writes: 0,
        }
    }

    /// Flash preloaded with an image, as if a previous boot had saved it.
    pub fn with_blob(blob: Vec<u8>) -> Self {
        Self {
            blob: Some(blob),
            fail_next_write: false,
            writes: 0,
        }
    }

    /// The stored image, if any.
    pub fn blob(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }
}

impl FlashPort for RamFlash {
    fn read(&self, buf: &mut [u8]) -> Result<usize, StorageError> {
        match &self.blob {
            Some(blob) => {
                let len = blob.len().min(buf.len());
                buf[..len].copy_from_slice(&blob[..len]);
                Ok(len)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, image: &[u8]) -> Result<(), StorageError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(StorageError::IoError);
        }
        self.blob = Some(image.to_vec());
        self.writes += 1;
        Ok(())
    }
}

impl Default for RamFlash {
    fn default() -> Self {
        Self::new()
    }
}
