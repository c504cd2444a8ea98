use crate::normalizer::normalize;
use crate::ranker::dedup_and_rank;
use crate::registry::FeedSource;
use crate::relevance::is_relevant;
use crate::sink::write_document;
use crate::traits::EntrySource;
use crate::types::{IngestError, NormalizedItem, OutputDocument, PipelineConfig, RawEntry, Result};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::fmt;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Stages of one run. Feed failures never leave `FetchingFeeds` early;
/// only a sink failure stops the run short of `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    FetchingFeeds,
    Deduplicating,
    Writing,
    Done,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::FetchingFeeds => "fetching_feeds",
            RunState::Deduplicating => "deduplicating",
            RunState::Writing => "writing",
            RunState::Done => "done",
        };
        f.write_str(name)
    }
}

/// How a single feed ended up in this run.
#[derive(Debug)]
pub enum FeedOutcome {
    Accumulated {
        entries_seen: usize,
        items: Vec<NormalizedItem>,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub feeds_ok: usize,
    pub feeds_skipped: usize,
    pub entries_seen: usize,
    pub entries_relevant: usize,
    pub duplicates_removed: usize,
    pub items_written: usize,
}

/// Runs every registered feed through fetch, filter, classify and normalize,
/// then ranks the pooled items and writes the artifact.
pub struct Pipeline {
    source: Arc<dyn EntrySource>,
    feeds: Vec<FeedSource>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(source: Arc<dyn EntrySource>, feeds: Vec<FeedSource>, config: PipelineConfig) -> Self {
        Self { source, feeds, config }
    }

    /// Execute one run. Only a failure to write the artifact is an error.
    pub async fn run(&self) -> Result<RunReport> {
        let (document, report) = self.build_document().await;

        self.transition(RunState::Writing);
        write_document(&self.config.output_path, &document)?;
        self.transition(RunState::Done);

        info!(
            feeds_ok = report.feeds_ok,
            feeds_skipped = report.feeds_skipped,
            entries_seen = report.entries_seen,
            relevant = report.entries_relevant,
            duplicates = report.duplicates_removed,
            written = report.items_written,
            "run finished"
        );
        Ok(report)
    }

    /// Everything up to (not including) the write step.
    pub async fn build_document(&self) -> (OutputDocument, RunReport) {
        self.transition(RunState::Idle);
        let outcomes = self.fetch_all().await;

        let mut report = RunReport::default();
        let mut pooled = Vec::new();
        for (feed, outcome) in self.feeds.iter().zip(outcomes) {
            match outcome {
                FeedOutcome::Accumulated { entries_seen, items } => {
                    report.feeds_ok += 1;
                    report.entries_seen += entries_seen;
                    report.entries_relevant += items.len();
                    pooled.extend(items);
                }
                FeedOutcome::Skipped { .. } => {
                    report.feeds_skipped += 1;
                    debug!("Feed {} contributes nothing this run", feed.organization);
                }
            }
        }

        self.transition(RunState::Deduplicating);
        let ranked = dedup_and_rank(pooled, self.config.max_items);
        report.duplicates_removed = ranked.duplicates_removed;
        report.items_written = ranked.items.len();

        let document = OutputDocument {
            generated_at: Utc::now(),
            items: ranked.items,
        };
        (document, report)
    }

    /// One outcome per feed, in registry order regardless of completion order.
    pub async fn fetch_all(&self) -> Vec<FeedOutcome> {
        self.transition(RunState::FetchingFeeds);
        info!("Fetching {} feeds", self.feeds.len());

        let deadline = self.config.run_deadline.map(|d| Instant::now() + d);
        let concurrency = self.config.concurrency.max(1);

        let mut indexed: Vec<(usize, FeedOutcome)> = stream::iter(self.feeds.iter().enumerate())
            .map(|(idx, feed)| {
                let source = Arc::clone(&self.source);
                async move {
                    let fetched = match deadline {
                        Some(at) => tokio::time::timeout_at(at, source.fetch_entries(feed))
                            .await
                            .unwrap_or(Err(IngestError::DeadlineExceeded)),
                        None => source.fetch_entries(feed).await,
                    };
                    (idx, settle(feed, fetched))
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, outcome)| outcome).collect()
    }

    fn transition(&self, state: RunState) {
        debug!(%state, "pipeline state");
    }
}

fn settle(feed: &FeedSource, fetched: Result<Vec<RawEntry>>) -> FeedOutcome {
    match fetched {
        Ok(entries) => {
            let entries_seen = entries.len();
            let items = process_entries(feed, &entries);
            info!(
                "Feed {}: {} entries, {} relevant",
                feed.organization,
                entries_seen,
                items.len()
            );
            FeedOutcome::Accumulated { entries_seen, items }
        }
        Err(e) => {
            warn!("Skipping feed {} ({}): {}", feed.organization, feed.url, e);
            FeedOutcome::Skipped { reason: e.to_string() }
        }
    }
}

/// Filter, classify and normalize one feed's entries, keeping fetch order.
pub fn process_entries(feed: &FeedSource, entries: &[RawEntry]) -> Vec<NormalizedItem> {
    entries
        .iter()
        .filter(|entry| {
            let relevant = is_relevant(entry.title.as_deref().unwrap_or(""), &entry.body_snippet);
            if !relevant {
                debug!("Dropping irrelevant entry: {:?}", entry.title);
            }
            relevant
        })
        .map(|entry| normalize(entry, feed))
        .collect()
}
