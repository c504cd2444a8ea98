use anyhow::Context;
use clap::Parser;
use news_ingest::{default_feeds, registry, FetchConfig, Fetcher, Pipeline, PipelineConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fetch the career news feeds once and write the news JSON document.
#[derive(Debug, Parser)]
#[command(name = "news-ingest", version)]
struct Args {
    /// Where to write the output document
    #[arg(long, default_value = "data/news.json")]
    output: PathBuf,

    /// Feeds fetched at the same time
    #[arg(long, default_value_t = 8)]
    concurrency: usize,

    /// Maximum number of items kept in the document
    #[arg(long, default_value_t = 40)]
    max_items: usize,

    /// Abandon feeds still pending after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 20)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = PipelineConfig {
        output_path: args.output,
        concurrency: args.concurrency,
        max_items: args.max_items,
        run_deadline: args.deadline_secs.map(Duration::from_secs),
        fetch: FetchConfig {
            timeout_seconds: args.timeout_secs,
            ..FetchConfig::default()
        },
    };

    let feeds = default_feeds();
    registry::validate(&feeds).context("feed registry is invalid")?;

    info!("Starting news ingest ({} feeds)", feeds.len());

    let fetcher = Fetcher::new(config.fetch.clone()).context("failed to build HTTP client")?;
    let output = config.output_path.clone();
    let pipeline = Pipeline::new(Arc::new(fetcher), feeds, config);

    let report = pipeline
        .run()
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "Wrote {} with {} items ({} feeds ok, {} skipped)",
        output.display(),
        report.items_written,
        report.feeds_ok,
        report.feeds_skipped
    );
    Ok(())
}
