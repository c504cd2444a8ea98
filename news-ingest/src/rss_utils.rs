/// RSS-specific utility functions for the ingester

/// URL utilities for RSS feeds
pub mod url {
    use url::Url;

    /// Validate RSS feed URL format
    pub fn is_valid_rss_url(url_str: &str) -> bool {
        if let Ok(url) = Url::parse(url_str) {
            url.scheme() == "http" || url.scheme() == "https"
        } else {
            false
        }
    }
}

/// Feed text helpers
pub mod feed {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<[^>]*>").expect("tag pattern compiles"));
    static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

    /// Extract clean text content from HTML
    pub fn extract_text_from_html(html: &str) -> String {
        // Strip first so encoded angle brackets in the text survive as text.
        let stripped = TAGS.replace_all(html, " ");
        let decoded = html_escape::decode_html_entities(&stripped);
        WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
    }

    /// Cut an HTML-escaped string to at most `max_chars` characters without
    /// leaving a dangling partial entity such as `&am`.
    pub fn truncate_escaped(escaped: &str, max_chars: usize) -> &str {
        let end = escaped
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(escaped.len());
        let head = &escaped[..end];
        match head.rfind('&') {
            Some(amp) if !head[amp..].contains(';') => &head[..amp],
            _ => head,
        }
    }
}
