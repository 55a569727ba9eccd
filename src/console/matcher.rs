//! Unambiguous-prefix matching.
//!
//! Lets the user abbreviate any command or sub-token to its shortest
//! unambiguous prefix (`fa` for `factory`, `b` for `both`). Matching is
//! case-insensitive. An exact hit always wins, so a name that happens to
//! prefix a longer sibling (`joy` vs `joyful`) stays reachable.

/// Result of resolving a user token against an ordered candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Exactly one candidate matched; carries its index.
    Matched(usize),
    /// The token is a prefix of more than one candidate.
    Ambiguous,
    /// No candidate matched. Empty input always lands here.
    NoMatch,
}

/// Resolve `input` against `choices` (distinct strings, order significant
/// only for the returned index).
pub fn match_prefix<'a, I>(choices: I, input: &str) -> Match
where
    I: IntoIterator<Item = &'a str>,
{
    if input.is_empty() {
        return Match::NoMatch;
    }

    let mut prefix_hit: Option<usize> = None;
    let mut ambiguous = false;

    for (i, choice) in choices.into_iter().enumerate() {
        if choice.eq_ignore_ascii_case(input) {
            // Exact match wins immediately, even when the input also
            // prefixes a longer choice.
            return Match::Matched(i);
        }
        let is_prefix = choice.len() >= input.len()
            && choice.as_bytes()[..input.len()].eq_ignore_ascii_case(input.as_bytes());
        if is_prefix {
            if prefix_hit.is_some() {
                ambiguous = true;
            } else {
                prefix_hit = Some(i);
            }
        }
    }

    if ambiguous {
        Match::Ambiguous
    } else {
        prefix_hit.map_or(Match::NoMatch, Match::Matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_prefix_resolves() {
        assert_eq!(match_prefix(["light", "spin", "hid"], "sp"), Match::Matched(1));
        assert_eq!(match_prefix(["joy", "nkro", "both"], "b"), Match::Matched(2));
    }

    #[test]
    fn exact_match_beats_longer_choice() {
        assert_eq!(match_prefix(["joy", "joyful"], "joy"), Match::Matched(0));
        // Order must not matter for the exact-wins rule.
        assert_eq!(match_prefix(["joyful", "joy"], "joy"), Match::Matched(1));
    }

    #[test]
    fn shared_prefix_is_ambiguous() {
        assert_eq!(match_prefix(["joy", "jot"], "jo"), Match::Ambiguous);
    }

    #[test]
    fn empty_input_never_matches() {
        assert_eq!(match_prefix(["a", "b"], ""), Match::NoMatch);
    }

    #[test]
    fn unknown_token_is_no_match() {
        assert_eq!(match_prefix(["light", "spin", "hid"], "volume"), Match::NoMatch);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(match_prefix(["light", "spin", "hid"], "SP"), Match::Matched(1));
        assert_eq!(match_prefix(["light", "spin", "hid"], "HID"), Match::Matched(2));
    }

    #[test]
    fn prefix_free_sets_are_order_independent() {
        let forward = ["display", "level", "spin"];
        let backward = ["spin", "level", "display"];
        for input in ["d", "le", "s", "spin"] {
            let a = match_prefix(forward, input);
            let b = match_prefix(backward, input);
            match (a, b) {
                (Match::Matched(i), Match::Matched(j)) => {
                    assert_eq!(forward[i], backward[j]);
                }
                _ => assert_eq!(a, b),
            }
        }
    }
}
