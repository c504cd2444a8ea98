use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Topical bucket an item is filed under. Each variant carries the label the
/// site displays and the CSS class the presentation layer styles it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Market,
    Industry,
    Expert,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Market => "市場動向",
            Category::Industry => "業界トレンド",
            Category::Expert => "専門家コラム",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Category::Market => "market",
            Category::Industry => "industry",
            Category::Expert => "expert",
        }
    }
}

/// Kind of workforce-reduction event a layoff story reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    VoluntaryRetirement,
    Layoff,
    Restructure,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::VoluntaryRetirement => "voluntary_retirement",
            EventType::Layoff => "layoff",
            EventType::Restructure => "restructure",
        }
    }
}

/// Structured details pulled from a layoff or early-retirement story.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoffSignal {
    pub event_type: EventType,
    /// People affected, when the text states a count.
    pub headcount: Option<u32>,
    pub headcount_confidence: f32,
    pub company: String,
    /// Link points at investor-relations or disclosure pages.
    pub listed: bool,
}

/// One syndication item as it came off the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    /// Plain text, markup already stripped.
    pub body_snippet: String,
    pub link: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Canonical item written to the output document.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Localized calendar date; `None` when the entry carried no usable timestamp.
    pub date: Option<String>,
    pub attribution: String,
    pub tags: Vec<String>,
    pub body_html: String,
    pub source_url: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Present only for workforce-reduction stories.
    pub layoff: Option<LayoffSignal>,
}

impl NormalizedItem {
    /// Key used to recognise the same article surfaced by several feeds.
    pub fn dedup_key(&self) -> &str {
        if self.source_url.is_empty() {
            &self.id
        } else {
            &self.source_url
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub generated_at: DateTime<Utc>,
    pub items: Vec<NormalizedItem>,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
    pub max_entries_per_feed: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; CareerInfoBot/1.0)".to_string(),
            timeout_seconds: 20,
            max_retries: 1,
            retry_delay_ms: 500,
            max_feed_size_mb: 10,
            max_redirects: 5,
            max_entries_per_feed: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_path: PathBuf,
    pub concurrency: usize,
    pub max_items: usize,
    /// Feeds still pending when this elapses are abandoned.
    pub run_deadline: Option<Duration>,
    pub fetch: FetchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("data/news.json"),
            concurrency: 8,
            max_items: 40,
            run_deadline: None,
            fetch: FetchConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("Run deadline reached before the feed finished")]
    DeadlineExceeded,

    #[error("Keyword pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

impl IngestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
