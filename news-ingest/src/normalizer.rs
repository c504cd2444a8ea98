use crate::classifier::classify;
use crate::layoff;
use crate::lexicon::{entry_text, RELEVANCE};
use crate::registry::FeedSource;
use crate::rss_utils::feed::truncate_escaped;
use crate::types::{NormalizedItem, RawEntry};
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const UNTITLED: &str = "無題";
pub const MAX_TAGS: usize = 5;
pub const BODY_CHAR_BUDGET: usize = 300;
pub const ID_SLUG_LEN: usize = 60;
/// Marks items produced by this job, as opposed to hand-authored articles.
pub const DYNAMIC_ID_PREFIX: &str = "dyn";

const JST_OFFSET_SECS: i32 = 9 * 3600;

static SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").expect("scheme pattern compiles"));
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("slug pattern compiles"));

/// Build the output item for a relevant entry of `feed`.
pub fn normalize(entry: &RawEntry, feed: &FeedSource) -> NormalizedItem {
    let title = entry.title.clone().unwrap_or_default();
    let text = entry_text(&title, &entry.body_snippet);
    let link = entry.link.clone().unwrap_or_else(|| feed.url.clone());

    let layoff = layoff::detect(&title, &entry.body_snippet, &link);

    NormalizedItem {
        id: stable_id(&link, entry.published_at),
        title: if title.is_empty() { UNTITLED.to_string() } else { title },
        category: classify(&text, feed.default_category),
        date: entry.published_at.and_then(localized_date),
        attribution: feed.organization.clone(),
        tags: extract_tags(&text),
        body_html: render_body(&entry.body_snippet),
        source_url: link,
        published_at: entry.published_at,
        layoff,
    }
}

/// Deterministic id from the link and publish time.
///
/// Shape is `dyn-{YYYYMMDD}-{slug}`; the date segment is empty for undated
/// entries. The same inputs always give the same id, across runs and restarts.
pub fn stable_id(link: &str, published_at: Option<DateTime<Utc>>) -> String {
    let without_scheme = SCHEME.replace(link, "");
    let slug: String = NON_ALNUM
        .replace_all(&without_scheme, "-")
        .chars()
        .take(ID_SLUG_LEN)
        .collect();
    let slug = if slug.is_empty() { "item".to_string() } else { slug };

    let date: String = published_at
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    format!("{}-{}-{}", DYNAMIC_ID_PREFIX, date, slug)
}

/// Calendar date in Japan time, e.g. `2025年3月5日`.
pub fn localized_date(ts: DateTime<Utc>) -> Option<String> {
    let jst = FixedOffset::east_opt(JST_OFFSET_SECS)?;
    let local = ts.with_timezone(&jst);
    Some(format!("{}年{}月{}日", local.year(), local.month(), local.day()))
}

/// Lexicon terms present in `text`, lexicon order, capped at [`MAX_TAGS`].
pub fn extract_tags(text: &str) -> Vec<String> {
    RELEVANCE
        .matched_terms(text)
        .take(MAX_TAGS)
        .map(str::to_string)
        .collect()
}

/// Escape, then truncate, then wrap. Escaping first keeps the budget honest
/// and the truncation step never cuts inside an entity.
pub fn render_body(snippet: &str) -> String {
    let escaped = html_escape::encode_quoted_attribute(snippet);
    format!("<p>{}...</p>", truncate_escaped(&escaped, BODY_CHAR_BUDGET))
}
