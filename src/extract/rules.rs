//! Heuristic rule tables shared by the link and article extractors.
//!
//! Every rule the extractors apply lives here as a named table so it can be
//! read, tested, and extended without touching the traversal code.

use once_cell::sync::Lazy;
use regex::RegexSet;

/// Maximum number of link candidates kept from a single source page.
pub const MAX_LINKS_PER_SOURCE: usize = 5;

/// Anchor titles must be strictly longer than this many characters.
pub const MIN_TITLE_CHARS: usize = 5;

/// Anchor titles must be strictly shorter than this many characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Substrings marking navigational or boilerplate anchors
/// (login, registration, complaints, ads, partnerships, about-us).
pub const TITLE_DENYLIST: &[&str] = &["登录", "注册", "投诉", "广告", "合作", "关于我们"];

/// Patterns an absolute URL must match at least one of to look like an article.
pub const ARTICLE_URL_PATTERNS: &[&str] = &[
    "news",
    "article",
    "story",
    r"\d{4}/\d{2}/\d{2}",
    "content",
    "[a-f0-9]{8}",
];

/// Subtrees that never carry narrative text.
pub const NOISE_SELECTORS: &[&str] = &[
    "script", "style", "iframe", "header", "footer", "nav", "aside",
];

/// Primary content containers. Matched as one selector group, so the first
/// matching element in document order is used.
pub const CONTAINER_SELECTORS: &[&str] = &[
    "article",
    ".article",
    ".content",
    ".article-content",
    "#article",
    "#content",
];

/// Paragraph length floor used when no content container was found.
pub const MIN_FALLBACK_PARAGRAPH_CHARS: usize = 40;

/// Extracted text shorter than this is treated as a stub page.
pub const MIN_ARTICLE_CHARS: usize = 100;

static ARTICLE_URL_SET: Lazy<Option<RegexSet>> = Lazy::new(|| match RegexSet::new(ARTICLE_URL_PATTERNS) {
    Ok(set) => Some(set),
    Err(e) => {
        tracing::error!(error = %e, "Invalid article URL pattern table");
        None
    }
});

/// True when `title` contains any entry of [`TITLE_DENYLIST`].
pub fn is_noise_title(title: &str) -> bool {
    TITLE_DENYLIST.iter().any(|needle| title.contains(needle))
}

/// True when `title` falls inside the accepted length window.
pub fn title_length_ok(title: &str) -> bool {
    let len = title.chars().count();
    len > MIN_TITLE_CHARS && len < MAX_TITLE_CHARS
}

/// True when `url` matches any entry of [`ARTICLE_URL_PATTERNS`].
pub fn looks_like_article_url(url: &str) -> bool {
    match &*ARTICLE_URL_SET {
        Some(set) => set.is_match(url),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_table_compiles() {
        assert!(ARTICLE_URL_SET.is_some());
    }

    #[test]
    fn test_title_length_window_is_exclusive() {
        assert!(!title_length_ok("12345"));
        assert!(title_length_ok("123456"));
        assert!(title_length_ok(&"a".repeat(99)));
        assert!(!title_length_ok(&"a".repeat(100)));
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        // six CJK characters, eighteen bytes
        assert!(title_length_ok("中国经济新闻"));
        assert!(!title_length_ok("中国新闻"));
    }

    #[test]
    fn test_noise_titles() {
        assert!(is_noise_title("用户登录入口"));
        assert!(is_noise_title("关于我们 - 新浪"));
        assert!(!is_noise_title("国务院召开常务会议"));
    }

    #[test]
    fn test_article_url_shapes() {
        assert!(looks_like_article_url("https://news.sina.com.cn/c/x.shtml"));
        assert!(looks_like_article_url("https://example.com/2024/05/06/slug"));
        assert!(looks_like_article_url("https://36kr.com/p/deadbeef01"));
        assert!(looks_like_article_url("https://example.com/story/slug"));
        assert!(!looks_like_article_url("https://example.com/about"));
        assert!(!looks_like_article_url("https://example.com/DEADBEEF"));
    }
}
