//! News categories and the seed pages scanned for each of them.
//!
//! The process-wide [`SourceCatalog`] is installed once at startup (built-in
//! defaults, optionally overridden from the configuration file) and is
//! read-only afterwards.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Topical label grouping a set of seed URLs.
///
/// Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "中国")]
    China,
    #[serde(rename = "全球")]
    World,
    #[serde(rename = "科技")]
    Tech,
    #[serde(rename = "财经")]
    Finance,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::China,
        Category::World,
        Category::Tech,
        Category::Finance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::China => "中国",
            Category::World => "全球",
            Category::Tech => "科技",
            Category::Finance => "财经",
        }
    }

    /// All labels joined for display, e.g. `中国, 全球, 科技, 财经`.
    pub fn labels() -> String {
        Self::ALL.iter().map(|c| c.label()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A category label that is not part of the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported news category: {0}. Available categories: {labels}", labels = Category::labels())]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Immutable mapping from category to its ordered seed URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCatalog {
    sources: BTreeMap<Category, Vec<String>>,
}

impl SourceCatalog {
    /// The default news sources.
    pub fn builtin() -> Self {
        let table: [(Category, &[&str]); 4] = [
            (
                Category::China,
                &["https://news.sina.com.cn/", "https://news.163.com/"],
            ),
            (
                Category::World,
                &["https://news.google.com/", "https://www.bbc.com/news"],
            ),
            (
                Category::Tech,
                &["https://tech.sina.com.cn/", "https://36kr.com/"],
            ),
            (
                Category::Finance,
                &["https://finance.sina.com.cn/", "https://www.cnbc.com/world/"],
            ),
        ];

        Self {
            sources: table
                .into_iter()
                .map(|(category, seeds)| (category, seeds.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }

    /// Replace the seeds of every category present in `overrides`.
    pub fn with_overrides(mut self, overrides: BTreeMap<Category, Vec<String>>) -> Self {
        self.sources.extend(overrides);
        self
    }

    /// Seeds for `category`, in scan order. Empty when none are configured.
    pub fn seeds(&self, category: Category) -> &[String] {
        self.sources.get(&category).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

static CATALOG: OnceCell<SourceCatalog> = OnceCell::new();

/// Install the process-wide catalog. Fails (returning it back) if one is
/// already installed.
pub fn install(catalog: SourceCatalog) -> Result<&'static SourceCatalog, SourceCatalog> {
    CATALOG.set(catalog)?;
    Ok(global())
}

/// The process-wide catalog, falling back to [`SourceCatalog::builtin`].
pub fn global() -> &'static SourceCatalog {
    CATALOG.get_or_init(SourceCatalog::builtin)
}
