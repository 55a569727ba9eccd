//! Fuzz target: console line processing
//!
//! Drives arbitrary byte sequences through tokenize → dispatch → handler
//! against a scratch store and asserts the chain never panics and that an
//! unresolved or rejected line leaves the record byte-identical.
//!
//! cargo fuzz run fuzz_console_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use spincon::adapters::ram_flash::RamFlash;
use spincon::codec::encode;
use spincon::console::registry::CommandRegistry;
use spincon::console::{self, handlers, CommandContext};
use spincon::persist::PersistenceManager;
use spincon::store::ConfigStore;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    let mut registry = CommandRegistry::new();
    handlers::register_all(&mut registry);

    let mut store = ConfigStore::new();
    let mut persist = PersistenceManager::new();
    let mut flash = RamFlash::new();
    let before = encode(store.record());

    let mut out = String::new();
    let mut ctx = CommandContext {
        store: &mut store,
        persist: &mut persist,
        flash: &mut flash,
    };
    let result = console::process_line(&mut ctx, &registry, line, &mut out);

    if result.is_err() {
        // Unresolved commands must have no side effects.
        assert_eq!(encode(store.record()), before);
        assert!(!store.is_dirty());
    }
});
