//! Link candidate discovery.
//!
//! Scans every anchor on a source page and keeps the ones whose text and
//! destination both look like a news article. No site-specific selectors are
//! used; the rules in [`super::rules`] are combined conjunctively.

use super::rules::{MAX_LINKS_PER_SOURCE, is_noise_title, looks_like_article_url, title_length_ok};
use crate::models::LinkCandidate;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

static ANCHOR_SELECTOR: Lazy<Option<Selector>> = Lazy::new(|| match Selector::parse("a[href]") {
    Ok(sel) => Some(sel),
    Err(e) => {
        warn!(error = %e, "Anchor selector failed to parse");
        None
    }
});

/// Extract up to [`MAX_LINKS_PER_SOURCE`] news-looking links from `markup`.
///
/// Candidates are deduplicated by title, first seen wins. Never fails:
/// anything unusable yields an empty list.
///
/// # Arguments
///
/// * `markup` - Raw HTML of a front page.
/// * `source_url` - URL the markup was fetched from. Root-relative hrefs are
///   resolved against its scheme and authority.
///
/// # Returns
///
/// * The kept candidates in document order.
///
/// # Examples
///
/// ```ignore
/// let links = extract_links(r#"<a href="/news/1">Markets rally again</a>"#, "https://example.com/");
/// assert_eq!(links[0].url, "https://example.com/news/1");
/// ```
#[instrument(level = "debug", skip(markup), fields(bytes = markup.len()))]
pub fn extract_links(markup: &str, source_url: &str) -> Vec<LinkCandidate> {
    if markup.trim().is_empty() {
        return Vec::new();
    }
    let Some(anchor_selector) = &*ANCHOR_SELECTOR else {
        return Vec::new();
    };

    let document = Html::parse_document(markup);
    let origin = origin_of(source_url);

    let candidates: Vec<LinkCandidate> = document
        .select(anchor_selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if href.is_empty() {
                return None;
            }

            let text = anchor.text().collect::<String>();
            let title = text.trim();
            if !title_length_ok(title) || is_noise_title(title) {
                return None;
            }

            let url = resolve_root_relative(href, origin.as_deref());
            if !looks_like_article_url(&url) {
                return None;
            }

            Some(LinkCandidate::new(title, url))
        })
        .unique_by(|candidate| candidate.title.clone())
        .take(MAX_LINKS_PER_SOURCE)
        .collect();

    debug!(count = candidates.len(), %source_url, "Extracted link candidates");
    candidates
}

/// `scheme://authority` of `source_url`, if it parses as a URL with a host.
///
/// The authority is sliced from the input as written, so IDN hosts stay in
/// Unicode and an explicit port survives even when it is the default one.
fn origin_of(source_url: &str) -> Option<String> {
    let parsed = Url::parse(source_url).ok()?;
    parsed.host_str()?;
    let (_, rest) = source_url.trim().split_once("://")?;
    let authority = rest
        .find(['/', '?', '#'])
        .map_or(rest, |end| &rest[..end]);
    Some(format!("{}://{authority}", parsed.scheme()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(anchors: &[(&str, &str)]) -> String {
        let body = anchors
            .iter()
            .map(|(href, text)| format!(r#"<li><a href="{href}">{text}</a></li>"#))
            .collect::<String>();
        format!("<html><body><ul>{body}</ul></body></html>")
    }

    #[test]
    fn test_empty_markup_yields_nothing() {
        assert!(extract_links("", "https://example.com/").is_empty());
        assert!(extract_links("   \n", "https://example.com/").is_empty());
    }

    #[test]
    fn test_malformed_markup_yields_nothing() {
        let markup = "<<< not >> really </a></div> <html";
        assert!(extract_links(markup, "https://example.com/").is_empty());
    }

    #[test]
    fn test_root_relative_link_is_resolved() {
        let markup = page(&[("/a/b/news-item", "A proper headline")]);
        let links = extract_links(&markup, "https://example.com/x");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/a/b/news-item");
        assert_eq!(links[0].title, "A proper headline");
    }

    #[test]
    fn test_resolve_root_relative_keeps_port() {
        let origin = origin_of("http://localhost:8080/front");
        assert_eq!(
            resolve_root_relative("/a/b", origin.as_deref()),
            "http://localhost:8080/a/b"
        );
        assert_eq!(
            resolve_root_relative("https://other.com/a", origin.as_deref()),
            "https://other.com/a"
        );
    }

    #[test]
    fn test_root_relative_keeps_authority_as_written() {
        let markup = page(&[("/news/1", "国务院召开常务会议")]);
        let links = extract_links(&markup, "https://新闻.cn/x");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://新闻.cn/news/1");

        let origin = origin_of("https://example.com:443/front?page=2");
        assert_eq!(origin.as_deref(), Some("https://example.com:443"));
        assert_eq!(origin_of("not a url"), None);
    }

    #[test]
    fn test_denylisted_titles_are_dropped() {
        let markup = page(&[
            ("https://example.com/news/1", "点击这里登录查看新闻"),
            ("https://example.com/news/2", "商务合作联系方式说明"),
            ("https://example.com/news/3", "国务院召开常务会议部署工作"),
        ]);
        let links = extract_links(&markup, "https://example.com/");

        assert_eq!(links.len(), 1);
        assert!(links.iter().all(|l| !l.title.contains("登录")));
    }

    #[test]
    fn test_length_and_shape_filters() {
        let markup = page(&[
            ("https://example.com/news/short", "Short"),
            ("https://example.com/about-us", "About this website"),
            ("https://example.com/2024/05/06/slug", "Dated story headline"),
            ("", "Empty destination news"),
        ]);
        let links = extract_links(&markup, "https://example.com/");

        assert_eq!(links, vec![LinkCandidate::new(
            "Dated story headline",
            "https://example.com/2024/05/06/slug"
        )]);
    }

    #[test]
    fn test_nested_anchor_text_is_trimmed_and_joined() {
        let markup = r#"<a href="/article/9">
            <span>Breaking:</span> <b>markets rally</b>
        </a>"#;
        let links = extract_links(markup, "https://example.com/");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Breaking: markets rally");
    }

    #[test]
    fn test_dedup_by_title_and_cap() {
        let mut anchors = vec![
            ("https://example.com/news/1", "Repeated headline"),
            ("https://example.com/news/2", "Repeated headline"),
        ];
        let titles: Vec<String> = (0..10).map(|i| format!("Headline number {i}")).collect();
        let urls: Vec<String> = (0..10).map(|i| format!("https://example.com/news/{i}")).collect();
        for (url, title) in urls.iter().zip(titles.iter()) {
            anchors.push((url.as_str(), title.as_str()));
        }
        let links = extract_links(&page(&anchors), "https://example.com/");

        assert_eq!(links.len(), MAX_LINKS_PER_SOURCE);
        assert_eq!(links[0].url, "https://example.com/news/1");
        let unique: std::collections::HashSet<_> = links.iter().map(|l| &l.title).collect();
        assert_eq!(unique.len(), links.len());
        assert!(links.iter().all(|l| !l.title.is_empty() && !l.url.is_empty()));
    }
}
