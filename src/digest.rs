//! News query orchestration.
//!
//! [`NewsService`] answers the two query operations:
//!
//! 1. **Titles**: fetch every seed page of a category, extract link candidates,
//!    merge them in seed order and truncate to the requested count.
//! 2. **Articles**: as above, then fetch each surviving link and extract its
//!    narrative text.
//!
//! Fetches inside a batch run `concurrency` at a time (one by default) and the
//! merged output always keeps seed order, then discovery order. Titles are
//! deduplicated per seed only; the same title found on two seeds appears twice.

use crate::catalog::{Category, SourceCatalog, UnknownCategory};
use crate::extract::{extract_article, extract_links};
use crate::fetch::{Fetcher, fetch_markup};
use crate::models::{ArticleRecord, Digest, LinkCandidate};
use crate::outputs::markdown::{articles_to_markdown, titles_to_markdown};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Ceiling for the titles-only listing.
pub const MAX_TITLES: usize = 20;
/// Ceiling for the full-content digest.
pub const MAX_ARTICLES: usize = 10;

pub const DEFAULT_TITLES: usize = 10;
pub const DEFAULT_ARTICLES: usize = 5;
pub const DEFAULT_CATEGORY: Category = Category::China;

/// Why a query produced no digest. Both variants render as reader-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error("No news found for category {0}")]
    NoNews(Category),
}

/// Query pipeline over a [`Fetcher`] and the installed source catalog.
#[derive(Debug)]
pub struct NewsService<F> {
    fetcher: F,
    catalog: &'static SourceCatalog,
    concurrency: usize,
}

impl<F: Fetcher> NewsService<F> {
    /// Build a sequential service.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Page source used for both front pages and articles.
    /// * `catalog` - Seed URLs per category, usually [`crate::catalog::global`].
    pub fn new(fetcher: F, catalog: &'static SourceCatalog) -> Self {
        Self {
            fetcher,
            catalog,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` fetches in flight per batch. Output order
    /// is unaffected.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Titles-only listing rendered as Markdown, or an explanatory message.
    ///
    /// # Arguments
    ///
    /// * `category` - Category label, e.g. `中国`.
    /// * `count` - Requested number of titles, clamped to [`MAX_TITLES`].
    ///
    /// # Returns
    ///
    /// * The numbered Markdown list, the unsupported-category message, or the
    ///   no-news message. Never an error.
    pub async fn list_titles(&self, category: &str, count: usize) -> String {
        match self.titles_digest(category, count).await {
            Ok(digest) => titles_to_markdown(&digest),
            Err(e) => e.to_string(),
        }
    }

    /// Full-content digest rendered as Markdown, or an explanatory message.
    ///
    /// # Arguments
    ///
    /// * `category` - Category label, e.g. `科技`.
    /// * `count` - Requested number of articles, clamped to [`MAX_ARTICLES`].
    ///
    /// # Returns
    ///
    /// * One Markdown section per article. Pages that could not be fetched or
    ///   extracted carry a sentinel body instead of being dropped.
    pub async fn list_articles(&self, category: &str, count: usize) -> String {
        match self.articles_digest(category, count).await {
            Ok(digest) => articles_to_markdown(&digest),
            Err(e) => e.to_string(),
        }
    }

    /// Structured form of [`Self::list_titles`].
    #[instrument(level = "info", skip(self))]
    pub async fn titles_digest(
        &self,
        category: &str,
        count: usize,
    ) -> Result<Digest<LinkCandidate>, QueryError> {
        let category: Category = category.parse()?;
        let count = count.min(MAX_TITLES);

        let candidates = self.collect_candidates(category, count).await?;
        Ok(Digest::new(category.label(), candidates))
    }

    /// Structured form of [`Self::list_articles`]. Articles are fetched in
    /// candidate order.
    ///
    /// # Errors
    ///
    /// * [`QueryError::UnknownCategory`] before any request is made.
    /// * [`QueryError::NoNews`] when no seed yields a candidate.
    #[instrument(level = "info", skip(self))]
    pub async fn articles_digest(
        &self,
        category: &str,
        count: usize,
    ) -> Result<Digest<ArticleRecord>, QueryError> {
        let category: Category = category.parse()?;
        let count = count.min(MAX_ARTICLES);

        let candidates = self.collect_candidates(category, count).await?;
        let t0 = Instant::now();
        let records: Vec<ArticleRecord> = stream::iter(candidates)
            .map(|candidate| async move {
                let markup = fetch_markup(&self.fetcher, &candidate.url).await;
                let body = extract_article(markup.as_deref());
                debug!(url = %candidate.url, extracted = body.is_text(), "Processed article");
                ArticleRecord::new(candidate, body)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let extracted = records.iter().filter(|r| r.body.is_text()).count();
        info!(
            %category,
            total = records.len(),
            extracted,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Extracted article bodies"
        );
        Ok(Digest::new(category.label(), records))
    }

    /// Scan every seed of `category`, merge candidates in seed order, and keep
    /// the first `count`.
    async fn collect_candidates(
        &self,
        category: Category,
        count: usize,
    ) -> Result<Vec<LinkCandidate>, QueryError> {
        let seeds = self.catalog.seeds(category);
        let per_seed: Vec<Vec<LinkCandidate>> = stream::iter(seeds.iter().cloned())
            .map(|seed: String| async move {
                let markup = fetch_markup(&self.fetcher, &seed).await;
                let links = extract_links(markup.as_deref().unwrap_or_default(), &seed);
                info!(%seed, count = links.len(), "Scanned seed page");
                links
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut merged: Vec<LinkCandidate> = per_seed.into_iter().flatten().collect();
        if merged.is_empty() {
            info!(%category, seeds = seeds.len(), "No candidates from any seed");
            return Err(QueryError::NoNews(category));
        }
        merged.truncate(count);
        Ok(merged)
    }
}
