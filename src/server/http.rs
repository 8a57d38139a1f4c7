//! HTTP transport.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /titles?category=&count=` | Markdown titles digest |
//! | `GET /articles?category=&count=` | Markdown full-content digest |
//! | `GET /categories` | JSON array of category labels |
//! | `GET /health` | `ok` |
//!
//! Query failures (unknown category, no news) are ordinary `200` text
//! responses, same as every other transport.

use crate::catalog::Category;
use crate::digest::{DEFAULT_ARTICLES, DEFAULT_CATEGORY, DEFAULT_TITLES, NewsService};
use crate::fetch::Fetcher;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

#[derive(Debug, Default, Deserialize)]
pub struct DigestParams {
    pub category: Option<String>,
    pub count: Option<usize>,
}

impl DigestParams {
    fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY.label())
    }
}

pub fn router<F: Fetcher + 'static>(service: Arc<NewsService<F>>) -> Router {
    Router::new()
        .route("/titles", get(titles::<F>))
        .route("/articles", get(articles::<F>))
        .route("/categories", get(categories))
        .route("/health", get(|| async { "ok" }))
        .with_state(service)
}

async fn titles<F: Fetcher + 'static>(
    State(service): State<Arc<NewsService<F>>>,
    Query(params): Query<DigestParams>,
) -> String {
    let count = params.count.unwrap_or(DEFAULT_TITLES);
    service.list_titles(params.category(), count).await
}

async fn articles<F: Fetcher + 'static>(
    State(service): State<Arc<NewsService<F>>>,
    Query(params): Query<DigestParams>,
) -> String {
    let count = params.count.unwrap_or(DEFAULT_ARTICLES);
    service.list_articles(params.category(), count).await
}

async fn categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(|c| c.label()).collect())
}

/// Serve until Ctrl-C.
#[instrument(level = "info", skip(service))]
pub async fn serve<F: Fetcher + 'static>(
    service: Arc<NewsService<F>>,
    addr: SocketAddr,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SourceCatalog;
    use crate::fetch::testing::StaticFetcher;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn app() -> Router {
        let markup = r#"<a href="/news/1">First headline here</a><a href="/news/2">Second headline here</a>"#;
        let fetcher = StaticFetcher::new().with_page("https://a.example/", markup);
        let catalog = SourceCatalog::builtin().with_overrides(BTreeMap::from([(
            Category::China,
            vec!["https://a.example/".to_string()],
        )]));
        let service = NewsService::new(fetcher, Box::leak(Box::new(catalog)));
        router(Arc::new(service))
    }

    async fn get_text(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_titles_route_defaults_to_china() {
        let (status, body) = get_text("/titles").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("# 中国 (as of "));
        assert!(body.contains("2. [Second headline here](https://a.example/news/2)"));
    }

    #[tokio::test]
    async fn test_titles_route_honours_count() {
        let (_, body) = get_text("/titles?category=%E4%B8%AD%E5%9B%BD&count=1").await;
        assert!(body.contains("1. [First headline here]"));
        assert!(!body.contains("Second headline here"));
    }

    #[tokio::test]
    async fn test_articles_route_reports_unknown_category() {
        let (status, body) = get_text("/articles?category=sports").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("Unsupported news category: sports."));
    }

    #[tokio::test]
    async fn test_categories_route() {
        let (_, body) = get_text("/categories").await;
        let labels: Vec<String> = serde_json::from_str(&body).unwrap();
        assert_eq!(labels, ["中国", "全球", "科技", "财经"]);
    }
}
