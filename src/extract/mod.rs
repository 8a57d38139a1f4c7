//! Heuristic extraction over arbitrary news markup.
//!
//! # Submodules
//!
//! | Module | Role |
//! |--------|------|
//! | [`links`] | Pick news-looking `(title, url)` pairs out of a front page |
//! | [`article`] | Pull narrative paragraphs out of an article page |
//! | [`rules`] | Named rule tables (denylists, URL shapes, selectors, thresholds) |
//!
//! Neither extractor returns an error. Unusable markup degrades to an empty
//! candidate list or to a named [`crate::models::ArticleBody`] failure variant.

pub mod article;
pub mod links;
pub mod rules;

pub use article::extract_article;
pub use links::extract_links;
