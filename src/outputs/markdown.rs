//! Markdown rendering of digests.
//!
//! Both renderings open with `# <category> (as of <local date+time>)`.

use crate::models::{ArticleRecord, Digest, LinkCandidate};
use chrono::{DateTime, Local};
use std::fmt::Write;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn header(category: &str, generated_at: &DateTime<Local>) -> String {
    format!(
        "# {} (as of {})\n\n",
        category,
        generated_at.format(TIMESTAMP_FORMAT)
    )
}

/// Numbered `[title](url)` list.
pub fn titles_to_markdown(digest: &Digest<LinkCandidate>) -> String {
    let mut md = header(&digest.category, &digest.generated_at);
    for (i, link) in digest.entries.iter().enumerate() {
        let _ = writeln!(md, "{}. [{}]({})", i + 1, link.title, link.url);
    }
    md
}

/// Numbered sections of title, body (or failure sentinel), and source URL,
/// each closed by a horizontal rule.
pub fn articles_to_markdown(digest: &Digest<ArticleRecord>) -> String {
    let mut md = header(&digest.category, &digest.generated_at);
    for (i, record) in digest.entries.iter().enumerate() {
        let _ = write!(
            md,
            "## {}. {}\n\n{}\n\nSource: {}\n\n---\n\n",
            i + 1,
            record.title,
            record.body,
            record.url
        );
    }
    md
}
