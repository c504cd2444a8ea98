// Shared fixtures for the integration tests
#![allow(dead_code)]

use news_ingest::{Category, FetchConfig, FeedSource, NormalizedItem};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Fast retries and short timeouts so failing feeds don't slow the suite down.
pub fn test_fetch_config() -> FetchConfig {
    FetchConfig {
        user_agent: "News-Ingest-Test/1.0".to_string(),
        timeout_seconds: 2,
        max_retries: 1,
        retry_delay_ms: 10,
        max_feed_size_mb: 1,
        max_redirects: 2,
        max_entries_per_feed: 20,
    }
}

/// (title, link, RFC 2822 pubDate, description)
pub type FixtureItem<'a> = (&'a str, &'a str, &'a str, &'a str);

pub fn rss_document(items: &[FixtureItem]) -> String {
    let body: String = items
        .iter()
        .map(|(title, link, pub_date, description)| {
            format!(
                "<item><title>{}</title><link>{}</link><pubDate>{}</pubDate><description><![CDATA[{}]]></description></item>",
                title, link, pub_date, description
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Fixture</title><link>https://news.example.com/</link><description>fixture feed</description>{}</channel></rss>"#,
        body
    )
}

pub fn feed(url: &str, organization: &str, default_category: Category) -> FeedSource {
    FeedSource::new(url, organization, default_category)
}

pub fn item(id: &str, source_url: &str, published: Option<&str>) -> NormalizedItem {
    NormalizedItem {
        id: id.to_string(),
        title: format!("title {}", id),
        category: Category::Market,
        date: None,
        attribution: "Fixture".to_string(),
        tags: Vec::new(),
        body_html: "<p>...</p>".to_string(),
        source_url: source_url.to_string(),
        published_at: published.map(|ts| {
            chrono::DateTime::parse_from_rfc3339(ts)
                .unwrap()
                .with_timezone(&chrono::Utc)
        }),
        layoff: None,
    }
}
