//! Persistence manager — the save-request state machine.
//!
//! ```text
//!          note_mutation            flush ok
//!   Clean ──────────────▶ Dirty ──────────────▶ Clean
//!                           ▲   ╲ Saving ╱
//!                           └──────────┘
//!                             flush failed
//! ```
//!
//! Mutations queue a deferred save that flushes once the record has been
//! quiet for [`DEBOUNCE_TICKS`] polls, so a burst of console edits costs one
//! flash write. An immediate request (the `save` command) writes
//! synchronously. A writer failure always lands back in `Dirty`, never
//! silently in `Clean`, with the error surfaced to the caller; retry policy
//! belongs to the caller, not this state machine.
//!
//! Writes serialise the record through the codec and never mutate it. The
//! dispatch path is cooperative and synchronous, so two writes can never
//! overlap.

use log::{info, warn};

use crate::codec;
use crate::ports::{FlashPort, StorageError};
use crate::store::ConfigStore;

/// Quiet polls required before a deferred save flushes. Five seconds at the
/// usual 1 Hz poll; collaborators pick the poll cadence.
pub const DEBOUNCE_TICKS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// In-memory record matches the persisted image.
    Clean,
    /// The record has unsaved changes.
    Dirty,
    /// A write is in flight (transient on the synchronous path).
    Saving,
}

pub struct PersistenceManager {
    state: SaveState,
    /// A save request is queued (deferred, or left over from a mutation).
    queued: bool,
    tick: u64,
    last_change_tick: u64,
}

impl PersistenceManager {
    pub fn new() -> Self {
        Self {
            state: SaveState::Clean,
            queued: false,
            tick: 0,
            last_change_tick: 0,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    /// Record a config mutation: Clean→Dirty (or stays Dirty) and queue a
    /// deferred save. The quiet period restarts on every mutation, so a
    /// burst of edits coalesces into one write.
    pub fn note_mutation(&mut self) {
        self.state = SaveState::Dirty;
        self.queued = true;
        self.last_change_tick = self.tick;
    }

    /// Request a save. `immediate` writes synchronously; otherwise the
    /// request is queued for the debounced flush in [`poll`](Self::poll).
    ///
    /// Idempotent: requesting while already Clean (and the store agrees)
    /// does nothing and reports `Ok(false)`; requesting while Dirty merely
    /// (re-)queues. Returns `Ok(true)` when an immediate write happened.
    pub fn request_save(
        &mut self,
        immediate: bool,
        store: &mut ConfigStore,
        flash: &mut dyn FlashPort,
    ) -> Result<bool, StorageError> {
        if !store.is_dirty() {
            return Ok(false);
        }
        self.state = SaveState::Dirty;
        self.queued = true;
        if immediate {
            self.flush(store, flash)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// One cooperative tick: advance the debounce clock and flush a queued
    /// request once the record has been quiet long enough. Returns
    /// `Ok(true)` when a write happened this tick.
    pub fn poll(
        &mut self,
        store: &mut ConfigStore,
        flash: &mut dyn FlashPort,
    ) -> Result<bool, StorageError> {
        self.tick += 1;
        if self.state != SaveState::Dirty || !self.queued {
            return Ok(false);
        }
        if self.tick.saturating_sub(self.last_change_tick) < DEBOUNCE_TICKS {
            return Ok(false);
        }
        self.flush(store, flash)?;
        Ok(true)
    }

    /// Serialise and write the record. Success clears the store's dirty
    /// flag; failure drops the queued request and returns to Dirty so the
    /// caller sees the error and decides whether to retry.
    fn flush(
        &mut self,
        store: &mut ConfigStore,
        flash: &mut dyn FlashPort,
    ) -> Result<(), StorageError> {
        self.state = SaveState::Saving;
        let image = codec::encode(store.record());
        match flash.write(&image) {
            Ok(()) => {
                store.clear_dirty();
                self.state = SaveState::Clean;
                self.queued = false;
                info!("config saved ({} bytes)", image.len());
                Ok(())
            }
            Err(e) => {
                self.state = SaveState::Dirty;
                self.queued = false;
                warn!("config save failed: {e}");
                Err(e)
            }
        }
    }
}

impl Default for PersistenceManager {
    fn default() -> Self {
        Self::new()
    }
}
