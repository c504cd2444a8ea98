use crate::rss_utils::url::is_valid_rss_url;
use crate::types::{Category, IngestError, Result};

/// A publisher feed polled on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub url: String,
    pub organization: String,
    /// Used when no keyword group claims an entry.
    pub default_category: Category,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, organization: impl Into<String>, default_category: Category) -> Self {
        Self {
            url: url.into(),
            organization: organization.into(),
            default_category,
        }
    }
}

// Public agencies, general business news, HR/career media, aggregators, press releases.
const FEEDS: &[(&str, &str, Category)] = &[
    ("https://www.mhlw.go.jp/stf/news.rdf", "厚生労働省", Category::Market),
    ("https://www.mhlw.go.jp/stf/kinkyu.rdf", "厚生労働省（緊急）", Category::Market),
    ("https://www3.nhk.or.jp/rss/news/cat5.xml", "NHK 経済", Category::Market),
    ("https://www3.nhk.or.jp/rss/news/cat0.xml", "NHK 主要", Category::Market),
    ("https://www.asahi.com/rss/asahi/business.rdf", "朝日新聞 経済", Category::Market),
    ("https://rss.asahi.com/rss/asahi/newsheadlines.rdf", "朝日新聞 速報", Category::Market),
    ("https://toyokeizai.net/list/feed/rss", "東洋経済", Category::Industry),
    ("https://news.yahoo.co.jp/rss/topics/top-picks.xml", "Yahoo!ニュース ピックアップ", Category::Market),
    ("https://news.yahoo.co.jp/rss/topics/business.xml", "Yahoo!ニュース 経済", Category::Market),
    ("https://news.yahoo.co.jp/rss/topics/domestic.xml", "Yahoo!ニュース 国内", Category::Market),
    ("https://news.yahoo.co.jp/rss/topics/world.xml", "Yahoo!ニュース 国際", Category::Market),
    ("https://news.yahoo.co.jp/rss/topics/science.xml", "Yahoo!ニュース 科学", Category::Market),
    ("https://news.livedoor.com/topics/rss/eco.xml", "livedoor 経済", Category::Market),
    ("https://news.livedoor.com/topics/rss/top.xml", "livedoor トップ", Category::Market),
    ("https://www.fsa.go.jp/fsaNewsListAll_rss2.xml", "金融庁 新着", Category::Market),
    ("https://www.fsa.go.jp/fsaProcurementList_rss2.xml", "金融庁 調達", Category::Market),
    ("https://hrnote.jp/feed/", "HR NOTE", Category::Expert),
    ("https://news.careerconnection.jp/feed/", "キャリコネニュース", Category::Industry),
    ("https://goworkship.com/magazine/feed/", "Workship MAGAZINE", Category::Expert),
    ("https://jinjibu.jp/rss/?mode=news&type=1", "日本の人事部（企業人事）", Category::Industry),
    ("https://jinjibu.jp/rss/?mode=news&type=2", "日本の人事部（人事サービス）", Category::Industry),
    ("https://thebridge.jp/feed", "BRIDGE（スタートアップ）", Category::Industry),
    ("https://b.hatena.ne.jp/hotentry/economics.rss", "はてな 経済ホット", Category::Market),
    ("https://www.jiji.com/rss/ranking.rdf", "時事通信（ランキング）", Category::Market),
    ("https://prtimes.jp/index.rdf", "PR TIMES", Category::Industry),
];

/// The built-in feed list, in the order items are accumulated.
pub fn default_feeds() -> Vec<FeedSource> {
    FEEDS
        .iter()
        .map(|(url, org, category)| FeedSource::new(*url, *org, *category))
        .collect()
}

/// Reject feeds that could never be fetched (bad scheme, unparsable URL, blank label).
pub fn validate(feeds: &[FeedSource]) -> Result<()> {
    for feed in feeds {
        if !is_valid_rss_url(&feed.url) {
            return Err(IngestError::General(format!("Unsupported feed URL: {}", feed.url)));
        }
        if feed.organization.trim().is_empty() {
            return Err(IngestError::General(format!("Feed {} has no organization label", feed.url)));
        }
    }
    Ok(())
}
