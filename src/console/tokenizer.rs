//! Console line tokenizer.
//!
//! Splits on runs of whitespace; leading and trailing whitespace is
//! ignored; no quoting. Pure function over the borrowed line.

/// Maximum argument tokens kept per line. Longer tails are truncated, which
/// still trips every handler's argument-count check: no registered command
/// takes more than one argument.
pub const MAX_ARGS: usize = 8;

/// A tokenized input line: command name plus its arguments.
#[derive(Debug, Clone)]
pub struct TokenizedLine<'a> {
    /// First token, `None` for an empty or all-whitespace line.
    pub name: Option<&'a str>,
    pub args: heapless::Vec<&'a str, MAX_ARGS>,
}

/// Split a raw line into command name and argument tokens.
pub fn tokenize(line: &str) -> TokenizedLine<'_> {
    let mut parts = line.split_whitespace();
    let name = parts.next();
    let mut args = heapless::Vec::new();
    for token in parts {
        if args.push(token).is_err() {
            break;
        }
    }
    TokenizedLine { name, args }
}
