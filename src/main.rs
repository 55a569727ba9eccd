//! Spincon firmware — console entry point.
//!
//! ```text
//! input line ─▶ tokenizer ─▶ registry (prefix match) ─▶ handler
//!                                                          │
//!                      flash ◀── PersistenceManager ◀── ConfigStore
//! ```
//!
//! The same cooperative loop serves both targets: on the host it reads
//! stdin and persists into the in-memory flash adapter (the production
//! flash writer ships with the board support layer); on device the
//! `espidf` feature adds the usual ESP-IDF bootstrap and the loop reads
//! the console UART through the same std I/O.

use std::io::{self, BufRead, Write as _};

use anyhow::Result;
use log::{info, warn};

use spincon::adapters::ram_flash::RamFlash;
use spincon::console::{self, handlers, registry::CommandRegistry, CommandContext, ConsoleError};
use spincon::persist::PersistenceManager;
use spincon::store::ConfigStore;

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("Spincon v{} console ready", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config (factory fallback on corrupt/missing) ──
    let mut flash = RamFlash::new();
    let mut store = ConfigStore::boot(&flash);
    let mut persist = PersistenceManager::new();
    if store.is_dirty() {
        // Boot fell back to factory defaults; queue them for saving.
        persist.note_mutation();
    }

    // ── 3. Command registration ───────────────────────────────
    let mut registry = CommandRegistry::new();
    handlers::register_all(&mut registry);

    // ── 4. Dispatch loop: one line, one command, one poll ─────
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = String::new();

    loop {
        {
            let mut handle = stdout.lock();
            let _ = write!(handle, "> ");
            let _ = handle.flush();
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        output.clear();
        let mut ctx = CommandContext {
            store: &mut store,
            persist: &mut persist,
            flash: &mut flash,
        };
        if let Err(ConsoleError::Unresolved) =
            console::process_line(&mut ctx, &registry, &line, &mut output)
        {
            output.push_str("Commands:\n");
            registry.print_help(&mut output);
        }
        print!("{output}");

        if let Err(e) = persist.poll(&mut store, &mut flash) {
            warn!("deferred save failed: {e}");
        }
    }

    // Flush any pending change before exit.
    if store.is_dirty() {
        if let Err(e) = persist.request_save(true, &mut store, &mut flash) {
            warn!("final save failed: {e}");
        }
    }

    Ok(())
}
