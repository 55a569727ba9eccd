//! Integration tests for the dirty-flag / save-request protocol.
//!
//! Covers the PersistenceManager state machine end-to-end: deferred
//! (debounced) saves, immediate saves from the console, write-failure
//! recovery, and the boot-time factory fallback.

use spincon::adapters::ram_flash::RamFlash;
use spincon::codec::{encode, RECORD_LEN};
use spincon::config::ConfigRecord;
use spincon::console::registry::CommandRegistry;
use spincon::console::{self, handlers, CommandContext};
use spincon::persist::{PersistenceManager, SaveState, DEBOUNCE_TICKS};
use spincon::ports::StorageError;
use spincon::store::ConfigStore;

fn run_line(
    store: &mut ConfigStore,
    persist: &mut PersistenceManager,
    flash: &mut RamFlash,
    registry: &CommandRegistry,
    line: &str,
) -> String {
    let mut out = String::new();
    let mut ctx = CommandContext {
        store,
        persist,
        flash,
    };
    let _ = console::process_line(&mut ctx, registry, line, &mut out);
    out
}

fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    handlers::register_all(&mut registry);
    registry
}

// ── Dirty flag lifecycle ──────────────────────────────────────

#[test]
fn mutation_sets_dirty_and_save_clears_it() {
    let registry = registry();
    let mut store = ConfigStore::new();
    let mut persist = PersistenceManager::new();
    let mut flash = RamFlash::new();

    assert_eq!(persist.state(), SaveState::Clean);
    run_line(&mut store, &mut persist, &mut flash, &registry, "level 10");
    assert!(store.is_dirty());
    assert_eq!(persist.state(), SaveState::Dirty);

    let out = run_line(&mut store, &mut persist, &mut flash, &registry, "save");
    assert!(out.contains("Saved."));
    assert!(!store.is_dirty());
    assert_eq!(persist.state(), SaveState::Clean);
    assert_eq!(flash.blob(), Some(&encode(store.record())[..]));
}

#[test]
fn failed_write_leaves_dirty_and_a_later_save_retries() {
    let registry = registry();
    let mut store = ConfigStore::new();
    let mut persist = PersistenceManager::new();
    let mut flash = RamFlash::new();

    run_line(&mut store, &mut persist, &mut flash, &registry, "spin 99");
    flash.fail_next_write = true;

    let out = run_line(&mut store, &mut persist, &mut flash, &registry, "save");
    assert!(out.contains("Save failed"));
    assert!(store.is_dirty(), "failure must never clear the dirty flag");
    assert_eq!(persist.state(), SaveState::Dirty);
    assert!(flash.blob().is_none());

    let out = run_line(&mut store, &mut persist, &mut flash, &registry, "save");
    assert!(out.contains("Saved."));
    assert!(!store.is_dirty());
    assert_eq!(flash.writes, 1);
}

#[test]
fn save_while_clean_is_idempotent() {
    let mut store = ConfigStore::new();
    let mut persist = PersistenceManager::new();
    let mut flash = RamFlash::new();

    let wrote = persist
        .request_save(true, &mut store, &mut flash)
        .unwrap();
    assert!(!wrote, "nothing dirty, nothing written");
    assert_eq!(flash.writes, 0);
    assert_eq!(persist.state(), SaveState::Clean);
}

// ── Debounced deferred saves ──────────────────────────────────

#[test]
fn deferred_save_flushes_only_after_the_quiet_period() {
    let registry = registry();
    let mut store = ConfigStore::new();
    let mut persist = PersistenceManager::new();
    let mut flash = RamFlash::new();

    run_line(&mut store, &mut persist, &mut flash, &registry, "level 1");
    for _ in 0..DEBOUNCE_TICKS - 1 {
        let wrote = persist.poll(&mut store, &mut flash).unwrap();
        assert!(!wrote, "quiet period not over yet");
    }
    assert_eq!(flash.writes, 0);

    let wrote = persist.poll(&mut store, &mut flash).unwrap();
    assert!(wrote);
    assert_eq!(flash.writes, 1);
    assert!(!store.is_dirty());
    assert_eq!(persist.state(), SaveState::Clean);
}

#[test]
fn an_edit_burst_coalesces_into_one_write() {
    let registry = registry();
    let mut store = ConfigStore::new();
    let mut persist = PersistenceManager::new();
    let mut flash = RamFlash::new();

    run_line(&mut store, &mut persist, &mut flash, &registry, "level 5");
    run_line(&mut store, &mut persist, &mut flash, &registry, "spin 60");
    run_line(&mut store, &mut persist, &mut flash, &registry, "hid both");

    for _ in 0..DEBOUNCE_TICKS * 2 {
        let _ = persist.poll(&mut store, &mut flash).unwrap();
    }
    assert_eq!(flash.writes, 1, "one write for the whole burst");
    let record = *store.record();
    assert_eq!(flash.blob(), Some(&encode(&record)[..]));
    assert_eq!(record.light.level, 5);
    assert_eq!(record.spin.units_per_turn, 60);
    assert!(record.hid.joy && record.hid.nkro);
}

#[test]
fn a_new_mutation_restarts_the_quiet_period() {
    let registry = registry();
    let mut store = ConfigStore::new();
    let mut persist = PersistenceManager::new();
    let mut flash = RamFlash::new();

    run_line(&mut store, &mut persist, &mut flash, &registry, "level 1");
    for _ in 0..DEBOUNCE_TICKS - 1 {
        let _ = persist.poll(&mut store, &mut flash).unwrap();
    }
    run_line(&mut store, &mut persist, &mut flash, &registry, "level 2");

    for _ in 0..DEBOUNCE_TICKS - 1 {
        let wrote = persist.poll(&mut store, &mut flash).unwrap();
        assert!(!wrote, "fresh mutation must push the flush out");
    }
    assert!(persist.poll(&mut store, &mut flash).unwrap());
    assert_eq!(flash.writes, 1);
}

#[test]
fn a_failed_deferred_write_is_not_retried_by_the_core() {
    let registry = registry();
    let mut store = ConfigStore::new();
    let mut persist = PersistenceManager::new();
    let mut flash = RamFlash::new();

    run_line(&mut store, &mut persist, &mut flash, &registry, "level 1");
    flash.fail_next_write = true;

    let mut failures = 0;
    for _ in 0..DEBOUNCE_TICKS * 3 {
        if persist.poll(&mut store, &mut flash) == Err(StorageError::IoError) {
            failures += 1;
        }
    }
    assert_eq!(failures, 1, "the error surfaces once; retry is caller policy");
    assert_eq!(flash.writes, 0);
    assert!(store.is_dirty());
    assert_eq!(persist.state(), SaveState::Dirty);

    // An explicit request retries and succeeds.
    assert!(persist.request_save(true, &mut store, &mut flash).unwrap());
    assert!(!store.is_dirty());
}

// ── Boot: load and factory fallback ───────────────────────────

#[test]
fn boot_round_trips_a_previously_saved_record() {
    let mut flash = RamFlash::new();
    {
        let mut store = ConfigStore::new();
        let mut persist = PersistenceManager::new();
        store.record_mut().sound.volume = 42;
        store.record_mut().tof.roi = 3;
        store.mark_changed();
        persist.note_mutation();
        assert!(persist.request_save(true, &mut store, &mut flash).unwrap());
    }

    let store = ConfigStore::boot(&flash);
    assert!(!store.is_dirty());
    assert_eq!(store.record().sound.volume, 42);
    assert_eq!(store.record().tof.roi, 3);
}

#[test]
fn boot_with_empty_flash_falls_back_to_factory_defaults() {
    let flash = RamFlash::new();
    let store = ConfigStore::boot(&flash);
    assert_eq!(encode(store.record()), encode(&ConfigRecord::default()));
    assert!(store.is_dirty(), "recovered defaults are queued for saving");
}

#[test]
fn boot_with_wrong_sized_blob_falls_back_to_factory_defaults() {
    let flash = RamFlash::with_blob(vec![0xFF; 10]);
    let store = ConfigStore::boot(&flash);
    assert_eq!(encode(store.record()), encode(&ConfigRecord::default()));
    assert!(store.is_dirty());
}

#[test]
fn boot_with_oversized_blob_falls_back_to_factory_defaults() {
    let flash = RamFlash::with_blob(vec![0x00; RECORD_LEN + 4]);
    let store = ConfigStore::boot(&flash);
    assert_eq!(encode(store.record()), encode(&ConfigRecord::default()));
    assert!(store.is_dirty());
}

#[test]
fn boot_with_bad_color_discriminant_falls_back_to_factory_defaults() {
    let mut image = encode(&ConfigRecord::default()).to_vec();
    image[5] = 9; // first color slot's mode byte
    let flash = RamFlash::with_blob(image);
    let store = ConfigStore::boot(&flash);
    assert_eq!(encode(store.record()), encode(&ConfigRecord::default()));
    assert!(store.is_dirty());
}
