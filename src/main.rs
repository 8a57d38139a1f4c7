//! # News Digest
//!
//! Fetches the front pages of a fixed set of news sites, picks out the links
//! that look like articles, and extracts readable article text from them.
//!
//! ## Features
//!
//! - Four categories (中国, 全球, 科技, 财经), each backed by a list of seed pages
//! - Heuristic link discovery with no site-specific selectors
//! - Two-tier article text extraction (content container, then paragraph scan)
//! - Markdown or JSON digests, on the command line, over HTTP, or as JSON-RPC tools
//!
//! ## Usage
//!
//! ```sh
//! news_digest titles --category 科技
//! news_digest articles --category 中国 -n 3
//! news_digest serve --port 8000
//! news_digest stdio
//! ```
//!
//! ## Architecture
//!
//! 1. **Discovery**: fetch every seed page of the category and extract link candidates
//! 2. **Merge**: concatenate candidates in seed order and truncate to the requested count
//! 3. **Extraction** (articles only): fetch each link and extract its narrative text
//! 4. **Output**: render a digest headed by the category and generation time
//!
//! Every failure inside the pipeline degrades to an empty page or a named
//! sentinel, so each query always answers with a readable document.

use clap::Parser;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info};

mod catalog;
mod cli;
mod config;
mod digest;
mod extract;
mod fetch;
mod models;
mod outputs;
mod server;
mod utils;

use cli::{Cli, Command, QueryArgs};
use config::Config;
use digest::{DEFAULT_ARTICLES, DEFAULT_TITLES, NewsService};
use fetch::{Fetcher, HttpFetcher};
use outputs::json::{digest_to_json, query_error_to_json};
use utils::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    init_tracing(args.verbose);
    debug!(?args, "Parsed CLI arguments");

    let config = Config::load(args.config.as_deref()).inspect_err(|e| {
        error!(error = %e, "Failed to load configuration");
    })?;
    let catalog = catalog::install(config.catalog())
        .map_err(|_| "source catalog was already installed")?;
    let fetcher = HttpFetcher::new(config.timeout(), &config.user_agent)?;
    let service = NewsService::new(fetcher, catalog).with_concurrency(config.concurrency);
    info!(
        timeout_secs = config.timeout_secs,
        concurrency = config.concurrency,
        "news_digest starting up"
    );

    match args.command {
        Command::Titles(query) => print_titles(&service, &query).await?,
        Command::Articles(query) => print_articles(&service, &query).await?,
        Command::Serve { host, port } => {
            server::http::serve(Arc::new(service), SocketAddr::new(host, port)).await?
        }
        Command::Stdio => server::stdio::run(&service).await?,
    }

    Ok(())
}

async fn print_titles<F: Fetcher>(
    service: &NewsService<F>,
    query: &QueryArgs,
) -> Result<(), Box<dyn Error>> {
    let count = query.count.unwrap_or(DEFAULT_TITLES);
    if !query.json {
        println!("{}", service.list_titles(&query.category, count).await);
        return Ok(());
    }
    match service.titles_digest(&query.category, count).await {
        Ok(digest) => println!("{}", digest_to_json(&digest)?),
        Err(e) => println!("{}", query_error_to_json(&e)),
    }
    Ok(())
}

async fn print_articles<F: Fetcher>(
    service: &NewsService<F>,
    query: &QueryArgs,
) -> Result<(), Box<dyn Error>> {
    let count = query.count.unwrap_or(DEFAULT_ARTICLES);
    if !query.json {
        println!("{}", service.list_articles(&query.category, count).await);
        return Ok(());
    }
    match service.articles_digest(&query.category, count).await {
        Ok(digest) => println!("{}", digest_to_json(&digest)?),
        Err(e) => println!("{}", query_error_to_json(&e)),
    }
    Ok(())
}
