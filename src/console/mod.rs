//! Interactive configuration console.
//!
//! One line = one command. The surrounding loop (an external collaborator;
//! UART/USB byte I/O and line editing live there) hands complete lines to
//! [`process_line`], which tokenizes, resolves the command by unambiguous
//! prefix and runs the handler against the shared [`ConfigStore`]. All
//! outcomes are printed text; no handler blocks or suspends.
//!
//! ```text
//! raw line ─▶ tokenizer ─▶ registry (prefix match) ─▶ handler ─▶ ConfigStore
//!                                                        │
//!                                                        └─▶ PersistenceManager
//! ```

pub mod handlers;
pub mod matcher;
pub mod registry;
pub mod tokenizer;

use core::fmt::{self, Write};

use crate::persist::PersistenceManager;
use crate::ports::FlashPort;
use crate::store::ConfigStore;

use registry::CommandRegistry;

/// Dispatch-level console errors. Handler-level argument problems are not
/// errors at this layer: the handler prints its usage line and returns
/// normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// The command name matched zero registered names, or abbreviated more
    /// than one. Both read the same to the user: nothing ran.
    Unresolved,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => write!(f, "unresolved command"),
        }
    }
}

/// Everything a handler may touch, borrowed for one invocation.
pub struct CommandContext<'a> {
    pub store: &'a mut ConfigStore,
    pub persist: &'a mut PersistenceManager,
    pub flash: &'a mut dyn FlashPort,
}

impl CommandContext<'_> {
    /// Bookkeeping after every successful mutation: set the dirty flag and
    /// queue a deferred save.
    pub fn config_changed(&mut self) {
        self.store.mark_changed();
        self.persist.note_mutation();
    }
}

/// Tokenize and dispatch one input line. An empty (or all-whitespace) line
/// is a no-op. On [`ConsoleError::Unresolved`] nothing ran; the caller
/// decides what to print (typically the registry help listing).
pub fn process_line(
    ctx: &mut CommandContext<'_>,
    registry: &CommandRegistry,
    line: &str,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let tokens = tokenizer::tokenize(line);
    let Some(name) = tokens.name else {
        return Ok(());
    };
    registry.dispatch(ctx, name, &tokens.args, out)
}
