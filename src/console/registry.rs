//! Command registry and dispatch.
//!
//! Commands are registered once at startup and never removed; the registry
//! is append-only for the process lifetime. Dispatch resolves the typed
//! name against the registered names through the prefix matcher, so any
//! unambiguous abbreviation works.

use core::fmt::Write;

use super::matcher::{match_prefix, Match};
use super::{CommandContext, ConsoleError};

/// Fixed registry capacity. Registration past this is a startup bug.
pub const MAX_COMMANDS: usize = 16;

/// Handler signature: borrowed context, argument tokens, output sink.
/// Handlers print their own usage text on argument errors and return
/// normally; nothing at this layer is fatal.
pub type HandlerFn = fn(&mut CommandContext<'_>, &[&str], &mut dyn Write);

/// One registered command.
pub struct Command {
    pub name: &'static str,
    pub handler: HandlerFn,
    pub help: &'static str,
}

pub struct CommandRegistry {
    commands: heapless::Vec<Command, MAX_COMMANDS>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: heapless::Vec::new(),
        }
    }

    /// Register a command. Duplicate names and registry overflow are
    /// programming errors in the startup sequence and fail fast.
    pub fn register(&mut self, name: &'static str, handler: HandlerFn, help: &'static str) {
        assert!(
            self.commands.iter().all(|c| c.name != name),
            "duplicate command registration: {name}"
        );
        assert!(
            self.commands.push(Command { name, handler, help }).is_ok(),
            "command registry full"
        );
    }

    /// Resolve `name` (exact, else unambiguous prefix) and run the handler.
    /// On [`ConsoleError::Unresolved`] no handler ran and nothing was
    /// mutated; the caller prints whatever guidance it wants.
    pub fn dispatch(
        &self,
        ctx: &mut CommandContext<'_>,
        name: &str,
        args: &[&str],
        out: &mut dyn Write,
    ) -> Result<(), ConsoleError> {
        match match_prefix(self.commands.iter().map(|c| c.name), name) {
            Match::Matched(i) => {
                (self.commands[i].handler)(ctx, args, out);
                Ok(())
            }
            Match::Ambiguous | Match::NoMatch => Err(ConsoleError::Unresolved),
        }
    }

    /// Render one help line per command, in registration order.
    pub fn print_help(&self, out: &mut dyn Write) {
        for c in &self.commands {
            let _ = writeln!(out, "  {:<10} {}", c.name, c.help);
        }
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut CommandContext<'_>, _: &[&str], _: &mut dyn Write) {}

    #[test]
    #[should_panic(expected = "duplicate command registration")]
    fn duplicate_registration_fails_fast() {
        let mut registry = CommandRegistry::new();
        registry.register("save", noop, "Save.");
        registry.register("save", noop, "Save again.");
    }

    #[test]
    fn names_keep_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register("display", noop, "d");
        registry.register("level", noop, "l");
        let names: std::vec::Vec<_> = registry.names().collect();
        assert_eq!(names, ["display", "level"]);
    }
}
