//! Configuration store — ownership and change tracking.
//!
//! `ConfigStore` is the one owner and the one writer of the live
//! [`ConfigRecord`]. Command handlers borrow it mutably for the duration of
//! a single invocation; every other subsystem reads it. The store also owns
//! the dirty flag: set by any validated mutation, cleared only by a
//! successful persistence write (see [`persist`](crate::persist)).

use log::{info, warn};

use crate::codec::{self, CodecError, RECORD_LEN};
use crate::config::ConfigRecord;
use crate::ports::{FlashPort, StorageError};

pub struct ConfigStore {
    record: ConfigRecord,
    dirty: bool,
}

impl ConfigStore {
    /// A store holding the factory image, with nothing to persist yet.
    pub fn new() -> Self {
        Self {
            record: ConfigRecord::default(),
            dirty: false,
        }
    }

    /// Boot-time construction: load the persisted image, falling back to
    /// factory defaults when the blob is missing or corrupt. The fallback
    /// marks the store dirty so the recovered defaults get persisted.
    pub fn boot(flash: &dyn FlashPort) -> Self {
        // One spare byte so an oversized blob shows up as a bad length
        // instead of silently truncating to RECORD_LEN.
        let mut buf = [0u8; RECORD_LEN + 1];
        let mut store = Self::new();
        match flash.read(&mut buf) {
            Ok(n) => match store.load(&buf[..n]) {
                Ok(()) => info!("config loaded ({n} bytes)"),
                Err(e) => {
                    warn!("stored config corrupt ({e}), restoring factory defaults");
                    store.factory_reset();
                }
            },
            Err(StorageError::NotFound) => {
                info!("no stored config, using factory defaults");
                store.factory_reset();
            }
            Err(e) => {
                warn!("config read failed ({e}), using factory defaults");
                store.factory_reset();
            }
        }
        store
    }

    /// Read access for handlers and every other subsystem.
    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    /// Mutable access for command handlers. Callers validate the new value
    /// against its field domain first and call [`mark_changed`] after; a
    /// rejected value must leave the record byte-identical.
    ///
    /// [`mark_changed`]: Self::mark_changed
    pub fn record_mut(&mut self) -> &mut ConfigRecord {
        &mut self.record
    }

    /// Flag the in-memory record as diverged from the persisted image.
    /// Idempotent.
    pub fn mark_changed(&mut self) {
        self.dirty = true;
    }

    /// Cleared by the persistence layer after a successful write; nothing
    /// else may call this.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Overwrite the whole record with the compiled-in factory image,
    /// reserved bytes included, then mark it changed. All-or-nothing: no
    /// partial reset state is ever observable.
    pub fn factory_reset(&mut self) {
        self.record = ConfigRecord::default();
        self.mark_changed();
        info!("factory defaults restored");
    }

    /// Replace the record from a persisted blob. On success the record
    /// equals the stored image, so the dirty flag clears. A structural
    /// failure leaves the store untouched; the caller falls back to
    /// [`factory_reset`](Self::factory_reset).
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.record = codec::decode(bytes)?;
        self.dirty = false;
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
