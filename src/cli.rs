//! Command-line interface definitions for News Digest.
//!
//! The two query operations are exposed as the `titles` and `articles`
//! subcommands. `serve` and `stdio` expose the same operations to other
//! programs over HTTP or a JSON-RPC pipe.

use crate::digest::DEFAULT_CATEGORY;
use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line arguments for the News Digest application.
///
/// # Examples
///
/// ```sh
/// # Latest headlines for the tech category
/// news_digest titles --category 科技 -n 15
///
/// # Full-text digest as JSON, with a custom config
/// news_digest --config ./news_digest.yaml articles --category 财经 --json
///
/// # Run as an HTTP service
/// news_digest serve --host 0.0.0.0 --port 8000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "NEWS_DIGEST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the latest news titles and links of a category
    Titles(QueryArgs),
    /// Fetch the latest news of a category with full article text
    Articles(QueryArgs),
    /// Serve both operations over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Serve both operations as JSON-RPC tools on stdin/stdout
    Stdio,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// News category: 中国, 全球, 科技, 财经
    #[arg(long, default_value = DEFAULT_CATEGORY.label())]
    pub category: String,

    /// Number of results (clamped to the operation's maximum)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Print the digest as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,
}
