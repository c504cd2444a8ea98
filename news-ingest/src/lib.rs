pub mod types;
pub mod registry;
pub mod traits;
pub mod fetcher;
pub mod parser;
pub mod lexicon;
pub mod relevance;
pub mod classifier;
pub mod layoff;
pub mod normalizer;
pub mod ranker;
pub mod sink;
pub mod pipeline;
pub mod rss_utils;

pub use types::*;
pub use registry::{default_feeds, FeedSource};
pub use traits::EntrySource;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use pipeline::{Pipeline, RunReport, RunState};
