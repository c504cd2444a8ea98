use crate::registry::FeedSource;
use crate::types::{RawEntry, Result};
use async_trait::async_trait;

/// Trait for pulling raw entries for one feed (HTTP, fixtures, etc.)
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Entries for `feed`, newest first as the publisher orders them.
    /// An error means the feed contributes nothing to this run.
    async fn fetch_entries(&self, feed: &FeedSource) -> Result<Vec<RawEntry>>;
}
