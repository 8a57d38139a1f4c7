//! Main-content extraction from a single article page.
//!
//! Two tiers: look for a semantic content container first, and if none is
//! present fall back to a length-filtered scan of every paragraph on the page.

use super::rules::{
    CONTAINER_SELECTORS, MIN_ARTICLE_CHARS, MIN_FALLBACK_PARAGRAPH_CHARS, NOISE_SELECTORS,
};
use crate::models::ArticleBody;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

/// Extract the narrative text of an article page.
///
/// # Arguments
///
/// * `markup` - Raw page HTML, or `None` when the upstream fetch failed.
///
/// # Returns
///
/// * [`ArticleBody::Text`] with the kept paragraphs joined by newlines.
/// * [`ArticleBody::Unavailable`] for `None` or empty markup.
/// * [`ArticleBody::NoValidContent`] when fewer than [`MIN_ARTICLE_CHARS`]
///   characters survive the filters.
/// * [`ArticleBody::ExtractionError`] when the selector tables do not compile.
#[instrument(level = "debug", skip_all, fields(bytes = markup.map_or(0, str::len)))]
pub fn extract_article(markup: Option<&str>) -> ArticleBody {
    let Some(markup) = markup.filter(|m| !m.is_empty()) else {
        return ArticleBody::Unavailable;
    };

    let Some(selectors) = &*ARTICLE_SELECTORS else {
        return ArticleBody::ExtractionError;
    };

    let mut document = Html::parse_document(markup);
    strip_noise(&mut document, &selectors.noise);

    // Detached nodes stay in the tree's storage, so every lookup below walks
    // from the root element rather than through `Html::select`.
    let root = document.root_element();
    let text = match root.select(&selectors.container).next() {
        Some(container) => {
            debug!(container = container.value().name(), "Using content container");
            join_paragraphs(container.select(&selectors.paragraph), 0)
        }
        None => {
            debug!("No content container; scanning all paragraphs");
            join_paragraphs(root.select(&selectors.paragraph), MIN_FALLBACK_PARAGRAPH_CHARS)
        }
    };

    if text.chars().count() < MIN_ARTICLE_CHARS {
        debug!(chars = text.chars().count(), "Extracted text below threshold");
        return ArticleBody::NoValidContent;
    }
    ArticleBody::Text(text)
}

struct ArticleSelectors {
    noise: Selector,
    /// All of [`CONTAINER_SELECTORS`] as one group; the first match in
    /// document order wins.
    container: Selector,
    paragraph: Selector,
}

impl ArticleSelectors {
    fn compile() -> Result<Self, String> {
        Ok(Self {
            noise: parse_selector(&NOISE_SELECTORS.join(", "))?,
            container: parse_selector(&CONTAINER_SELECTORS.join(", "))?,
            paragraph: parse_selector("p")?,
        })
    }
}

static ARTICLE_SELECTORS: Lazy<Option<ArticleSelectors>> =
    Lazy::new(|| match ArticleSelectors::compile() {
        Ok(selectors) => Some(selectors),
        Err(e) => {
            warn!(error = %e, "Content selector table failed to parse");
            None
        }
    });

fn parse_selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector {css:?}: {e}"))
}

/// Detach every element matching `noise` (with its descendants) from the tree.
fn strip_noise(document: &mut Html, noise: &Selector) {
    let ids: Vec<_> = document.root_element().select(noise).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Trimmed paragraph texts longer than `min_chars`, joined by newlines.
/// Empty paragraphs are always dropped.
fn join_paragraphs<'a>(paragraphs: impl Iterator<Item = ElementRef<'a>>, min_chars: usize) -> String {
    paragraphs
        .map(|p| p.text().collect::<String>())
        .filter_map(|text| {
            let trimmed = text.trim();
            let len = trimmed.chars().count();
            (len > 0 && len > min_chars).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
