use crate::lexicon::{entry_text, EVENTS, LAYOFF};
use crate::types::{EventType, LayoffSignal};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

pub const STATED_CONFIDENCE: f32 = 0.9;
pub const UNSTATED_CONFIDENCE: f32 = 0.5;

const COMPANY_MIN_CHARS: usize = 2;
const COMPANY_MAX_CHARS: usize = 30;
const LISTED_MARKERS: &[&str] = &["/ir/", "/investor", "tdnet", "irbank"];

// A run of kanji, latin, digits, ・ or ー directly before a corporate suffix,
// an opening bracket or whitespace.
static COMPANY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\x{4e00}-\x{9faf}A-Za-z0-9・ー]+)(?:株式会社|（株）|\(|（|\s)")
        .expect("company pattern compiles")
});
static HEADCOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,3}(?:,[0-9]{3})+|[0-9]{2,6})\s*人").expect("headcount pattern compiles")
});

/// Layoff details for an entry, or `None` when it is not a workforce-reduction story.
pub fn detect(title: &str, body: &str, link: &str) -> Option<LayoffSignal> {
    let text = entry_text(title, body);
    if !LAYOFF.matches_any(&text) {
        return None;
    }

    let (headcount, headcount_confidence) = detect_headcount(&text);
    let signal = LayoffSignal {
        event_type: detect_event_type(&text),
        headcount,
        headcount_confidence,
        company: extract_company(title, link),
        listed: is_listed_link(link),
    };
    debug!(
        "Layoff signal for {}: {} ({:?} people)",
        link,
        signal.event_type.as_str(),
        signal.headcount
    );
    Some(signal)
}

/// Voluntary retirement outranks layoffs, which outrank restructuring.
/// Text with no group hit is treated as restructuring.
pub fn detect_event_type(text: &str) -> EventType {
    EVENTS
        .iter()
        .find(|(_, lexicon)| lexicon.matches_any(text))
        .map(|(event, _)| *event)
        .unwrap_or(EventType::Restructure)
}

/// First `N人` count in the text, full-width digits and thousands separators
/// included, with the confidence the count was actually stated.
pub fn detect_headcount(text: &str) -> (Option<u32>, f32) {
    let normalized: String = text.chars().map(to_ascii_digit).collect();
    let count = HEADCOUNT
        .captures(&normalized)
        .and_then(|caps| caps[1].replace(',', "").parse::<u32>().ok());

    match count {
        Some(n) => (Some(n), STATED_CONFIDENCE),
        None => (None, UNSTATED_CONFIDENCE),
    }
}

fn to_ascii_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
        '，' => ',',
        _ => c,
    }
}

/// Company named in the headline, falling back to the link's host.
pub fn extract_company(title: &str, link: &str) -> String {
    if let Some(caps) = COMPANY.captures(title) {
        let candidate = &caps[1];
        let len = candidate.chars().count();
        if (COMPANY_MIN_CHARS..=COMPANY_MAX_CHARS).contains(&len) {
            return candidate.to_string();
        }
    }

    Url::parse(link)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.trim_start_matches("www.").to_string()))
        .unwrap_or_default()
}

pub fn is_listed_link(link: &str) -> bool {
    let lower = link.to_lowercase();
    LISTED_MARKERS.iter().any(|marker| lower.contains(marker))
}
