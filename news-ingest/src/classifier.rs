use crate::lexicon::CATEGORIES;
use crate::types::Category;
use tracing::debug;

/// Pick a category for `text` (title and body joined).
///
/// Groups are tried in priority order and the first with any hit wins, so an
/// entry mentioning both pay and hiring is always filed under the market
/// group regardless of how many terms of each it contains.
pub fn classify(text: &str, default: Category) -> Category {
    for (category, lexicon) in CATEGORIES.iter() {
        if lexicon.matches_any(text) {
            return *category;
        }
    }
    debug!("No keyword group matched, using feed default {}", default.class());
    default
}
