use crate::lexicon::{entry_text, RELEVANCE};

/// Gate for the whole pipeline: an entry is kept only if its title or body
/// mentions at least one lexicon term.
///
/// Matching is substring-based on case-folded text, so a term embedded in a
/// longer word still counts. That favours recall over precision.
pub fn is_relevant(title: &str, body: &str) -> bool {
    RELEVANCE.matches_any(&entry_text(title, body))
}
