use crate::types::{Category, EventType, Result};
use once_cell::sync::Lazy;
use regex::RegexSet;

/// Employment, career, compensation and labor-market vocabulary.
/// Order matters: tags are reported in this order.
pub const RELEVANCE_TERMS: &[&str] = &[
    "転職", "就職", "採用", "求人", "雇用", "キャリア", "働き方", "副業",
    "年収", "賃金", "給料", "昇給", "失業", "雇用統計", "労働市場", "人材",
    "育成", "学び直し", "リスキリング", "内定", "新卒", "中途", "雇い止め",
    "早期退職", "希望退職", "人員削減", "人員整理", "レイオフ", "解雇",
    "hiring", "recruit", "job market", "employment", "unemployment", "salary",
    "salaries", "wage", "layoff", "career", "reskilling", "remote work",
];

/// Keyword groups in priority order; the first group with any hit decides.
pub const CATEGORY_GROUPS: &[(Category, &[&str])] = &[
    (
        Category::Market,
        &["年収", "賃金", "給料", "雇用統計", "失業", "労働市場", "salary", "wage", "unemployment", "job market"],
    ),
    (
        Category::Industry,
        &["採用", "求人", "新卒", "中途", "人材", "hiring", "recruit"],
    ),
    (
        Category::Expert,
        &["働き方", "副業", "キャリア", "リスキリング", "学び直し", "career", "remote work", "reskilling"],
    ),
];

/// Workforce-reduction vocabulary; an item matching any of these gets a layoff signal.
pub const LAYOFF_TERMS: &[&str] = &[
    "リストラ", "レイオフ", "人員削減", "人員整理", "人員減", "希望退職", "早期希望退職",
    "早期退職", "早期優遇退職", "layoff", "job cut", "job reduction", "reduce workforce",
    "restructuring", "restructure", "redundancies",
];

/// Event groups in priority order, same first-hit rule as the category groups.
pub const EVENT_GROUPS: &[(EventType, &[&str])] = &[
    (EventType::VoluntaryRetirement, &["希望退職", "早期退職", "早期優遇退職"]),
    (
        EventType::Layoff,
        &["リストラ", "レイオフ", "人員削減", "人員整理", "layoff", "job cut", "redundancies"],
    ),
    (EventType::Restructure, &["restructure", "restructuring"]),
];

/// A fixed term list compiled into one case-insensitive substring matcher.
#[derive(Debug)]
pub struct Lexicon {
    terms: Vec<&'static str>,
    set: RegexSet,
}

impl Lexicon {
    pub fn new(terms: &[&'static str]) -> Result<Self> {
        let set = RegexSet::new(terms.iter().map(|t| format!("(?i){}", regex::escape(t))))?;
        Ok(Self {
            terms: terms.to_vec(),
            set,
        })
    }

    pub fn matches_any(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    /// Terms found in `text`, in lexicon order rather than text order.
    pub fn matched_terms<'a>(&'a self, text: &str) -> impl Iterator<Item = &'static str> + 'a {
        self.set.matches(text).into_iter().map(move |idx| self.terms[idx])
    }
}

// Term lists are literals escaped above, so compilation cannot fail.
pub static RELEVANCE: Lazy<Lexicon> =
    Lazy::new(|| Lexicon::new(RELEVANCE_TERMS).expect("relevance lexicon compiles"));

pub static CATEGORIES: Lazy<Vec<(Category, Lexicon)>> = Lazy::new(|| {
    CATEGORY_GROUPS
        .iter()
        .map(|(category, terms)| (*category, Lexicon::new(terms).expect("category lexicon compiles")))
        .collect()
});

pub static LAYOFF: Lazy<Lexicon> =
    Lazy::new(|| Lexicon::new(LAYOFF_TERMS).expect("layoff lexicon compiles"));

pub static EVENTS: Lazy<Vec<(EventType, Lexicon)>> = Lazy::new(|| {
    EVENT_GROUPS
        .iter()
        .map(|(event, terms)| (*event, Lexicon::new(terms).expect("event lexicon compiles")))
        .collect()
});

/// Text the lexicon is run against for one entry.
pub fn entry_text(title: &str, body: &str) -> String {
    format!("{title}\n{body}")
}
