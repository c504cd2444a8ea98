use crate::types::NormalizedItem;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Ranked {
    pub items: Vec<NormalizedItem>,
    pub duplicates_removed: usize,
}

/// Dedup, order newest first, then cap. The cap is applied last so it keeps
/// the most recent items rather than whichever feeds came first.
pub fn dedup_and_rank(items: Vec<NormalizedItem>, max_items: usize) -> Ranked {
    let (mut unique, duplicates_removed) = deduplicate(items);
    rank(&mut unique);
    unique.truncate(max_items);
    Ranked {
        items: unique,
        duplicates_removed,
    }
}

/// Keep the first item seen for each dedup key; later ones are dropped as-is.
pub fn deduplicate(items: Vec<NormalizedItem>) -> (Vec<NormalizedItem>, usize) {
    let total = items.len();
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(total);

    for item in items {
        if seen.insert(item.dedup_key().to_string()) {
            unique.push(item);
        } else {
            debug!("Removing duplicate entry: {} ({})", item.title, item.source_url);
        }
    }

    let removed = total - unique.len();
    if removed > 0 {
        info!("Removed {} duplicate entries", removed);
    }
    (unique, removed)
}

/// Newest first by publish time, undated items last, then id and link
/// descending. The sort is stable, so equal keys keep their input order.
pub fn rank(items: &mut [NormalizedItem]) {
    items.sort_by(compare_recency);
}

fn compare_recency(a: &NormalizedItem, b: &NormalizedItem) -> Ordering {
    let by_time = match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_time
        .then_with(|| b.id.cmp(&a.id))
        .then_with(|| b.source_url.cmp(&a.source_url))
}
