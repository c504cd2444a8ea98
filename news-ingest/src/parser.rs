use crate::rss_utils::feed::extract_text_from_html;
use crate::types::{IngestError, RawEntry, Result};
use feed_rs::parser;
use tracing::debug;

/// Turns RSS 1.0 (RDF), RSS 2.0 and Atom documents into [`RawEntry`] values.
pub struct FeedParser;

impl FeedParser {
    /// Parse a whole document, keeping the order the publisher listed entries in.
    pub fn parse_feed(content: &str) -> Result<Vec<RawEntry>> {
        Self::parse_bytes(content.as_bytes())
    }

    pub fn parse_bytes(content: &[u8]) -> Result<Vec<RawEntry>> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| IngestError::Parse(format!("Failed to parse feed: {}", e)))?;

        let entries: Vec<RawEntry> = feed.entries.into_iter().map(Self::parse_entry).collect();

        debug!("Parsed feed with {} entries", entries.len());
        Ok(entries)
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> RawEntry {
        let title = entry
            .title
            .map(|t| extract_text_from_html(&t.content))
            .filter(|t| !t.is_empty());

        let link = entry
            .links
            .first()
            .map(|l| l.href.trim().to_string())
            .filter(|href| !href.is_empty());

        // Summary is the short form; fall back to the full body when a feed only ships content.
        let body_snippet = entry
            .summary
            .map(|s| s.content)
            .filter(|s| !s.trim().is_empty())
            .or_else(|| entry.content.and_then(|c| c.body))
            .map(|html| extract_text_from_html(&html))
            .unwrap_or_default();

        // Atom entries often carry only <updated>.
        let published_at = entry.published.or(entry.updated);

        RawEntry {
            title,
            body_snippet,
            link,
            published_at,
        }
    }
}
