use crate::parser::FeedParser;
use crate::registry::FeedSource;
use crate::traits::EntrySource;
use crate::types::{FetchConfig, IngestError, RawEntry, Result};
use async_trait::async_trait;
use backoff::backoff::Backoff;
use backoff::ExponentialBackoffBuilder;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// HTTP fetcher for syndication feeds with bounded retries.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch and parse `url`, retrying with growing delays.
    ///
    /// Transport errors, non-success statuses, oversized bodies and documents
    /// that fail to parse all count as a failed attempt. After the last
    /// attempt the most recent error is returned.
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<RawEntry>> {
        let start_time = Instant::now();
        debug!("Fetching feed: {}", url);

        let mut backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(self.config.retry_delay_ms))
            .with_multiplier(2.0)
            .with_randomization_factor(0.0)
            .with_max_interval(Duration::from_millis(self.config.retry_delay_ms.saturating_mul(32)))
            .with_max_elapsed_time(None)
            .build();

        let attempts = self.config.max_retries + 1;
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.fetch_once(url).await {
                Ok(entries) => {
                    info!(
                        "Fetched feed: {} ({} entries, {} ms)",
                        url,
                        entries.len(),
                        start_time.elapsed().as_millis()
                    );
                    return Ok(entries);
                }
                Err(e) => {
                    if attempt < attempts {
                        if let Some(delay) = backoff.next_backoff() {
                            warn!("Attempt {} failed for {}: {}; retrying in {:?}", attempt, url, e, delay);
                            last_error = Some(e);
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }
                    last_error = Some(e);
                }
            }
        }

        error!("Failed to fetch feed after {} attempts: {}", attempts, url);
        Err(last_error.unwrap_or_else(|| IngestError::General(format!("No attempt made for {}", url))))
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<RawEntry>> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(IngestError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let limit = self.config.max_feed_size_mb * 1024 * 1024;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > limit {
                return Err(IngestError::FeedTooLarge {
                    size_mb: content_length as usize / (1024 * 1024),
                });
            }
        }

        // Chunked responses carry no length, so enforce the limit while reading.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() > limit {
                return Err(IngestError::FeedTooLarge {
                    size_mb: body.len() / (1024 * 1024),
                });
            }
        }

        // Hand raw bytes to the parser so the XML prolog decides the encoding.
        FeedParser::parse_bytes(&body)
    }
}

#[async_trait]
impl EntrySource for Fetcher {
    async fn fetch_entries(&self, feed: &FeedSource) -> Result<Vec<RawEntry>> {
        let mut entries = self.fetch_feed(&feed.url).await?;
        entries.truncate(self.config.max_entries_per_feed);
        Ok(entries)
    }
}
