//! Line-delimited JSON-RPC 2.0 tool server over stdin/stdout.
//!
//! Speaks the subset of the Model Context Protocol an assistant needs to call
//! the two query operations as tools: `initialize`, `tools/list` and
//! `tools/call`. One JSON message per line in each direction; notifications
//! (messages without an `id`) are never answered.

use crate::catalog::Category;
use crate::digest::{DEFAULT_ARTICLES, DEFAULT_CATEGORY, DEFAULT_TITLES, MAX_ARTICLES, MAX_TITLES, NewsService};
use crate::fetch::Fetcher;
use crate::utils::truncate_for_log;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const TOOL_TITLES: &str = "get_news_titles";
pub const TOOL_ARTICLES: &str = "get_latest_news";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    name: String,
    #[serde(default)]
    arguments: ToolArguments,
}

#[derive(Debug, Default, Deserialize)]
struct ToolArguments {
    category: Option<String>,
    count: Option<i64>,
}

impl ToolArguments {
    fn count_or(&self, default: usize) -> usize {
        self.count.map_or(default, |n| n.max(0) as usize)
    }
}

/// Read requests from stdin until EOF, answering each on stdout.
pub async fn run<F: Fetcher>(service: &NewsService<F>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    info!("stdio tool server ready");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = handle_line(service, &line).await {
            let mut out = response.to_string();
            out.push('\n');
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    info!("stdin closed; stdio tool server exiting");
    Ok(())
}

/// Handle one raw line. Returns the response to write, if any.
pub async fn handle_line<F: Fetcher>(service: &NewsService<F>, line: &str) -> Option<Value> {
    let raw: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, line = %truncate_for_log(line, 200), "Unparseable request line");
            return Some(error_response(Value::Null, PARSE_ERROR, &e.to_string()));
        }
    };
    let request: Request = match serde_json::from_value(raw.clone()) {
        Ok(r) => r,
        Err(e) => {
            let id = raw.get("id").cloned().unwrap_or(Value::Null);
            return Some(error_response(id, INVALID_REQUEST, &e.to_string()));
        }
    };

    debug!(method = %request.method, "Received request");
    let id = request.id?;
    let response = match dispatch(service, &request.method, request.params).await {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => error_response(id, code, &message),
    };
    Some(response)
}

async fn dispatch<F: Fetcher>(
    service: &NewsService<F>,
    method: &str,
    params: Value,
) -> Result<Value, (i64, String)> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
        })),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": tool_definitions() })),
        "tools/call" => {
            let call: ToolCall = serde_json::from_value(params)
                .map_err(|e| (INVALID_PARAMS, format!("invalid tool call: {e}")))?;
            let category = call
                .arguments
                .category
                .as_deref()
                .unwrap_or(DEFAULT_CATEGORY.label());

            let text = match call.name.as_str() {
                TOOL_TITLES => {
                    service
                        .list_titles(category, call.arguments.count_or(DEFAULT_TITLES))
                        .await
                }
                TOOL_ARTICLES => {
                    service
                        .list_articles(category, call.arguments.count_or(DEFAULT_ARTICLES))
                        .await
                }
                other => return Err((INVALID_PARAMS, format!("unknown tool: {other}"))),
            };
            Ok(json!({ "content": [{ "type": "text", "text": text }] }))
        }
        other => Err((METHOD_NOT_FOUND, format!("method not found: {other}"))),
    }
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    })
}

fn tool_definitions() -> Value {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    let schema = |default_count: usize, max_count: usize| {
        json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "enum": categories,
                    "default": DEFAULT_CATEGORY.label(),
                },
                "count": {
                    "type": "integer",
                    "default": default_count,
                    "maximum": max_count,
                },
            },
        })
    };

    json!([
        {
            "name": TOOL_ARTICLES,
            "description": format!(
                "Fetch the latest news of a category with full article text. Categories: {}",
                Category::labels()
            ),
            "inputSchema": schema(DEFAULT_ARTICLES, MAX_ARTICLES),
        },
        {
            "name": TOOL_TITLES,
            "description": format!(
                "List the latest news titles and links of a category. Categories: {}",
                Category::labels()
            ),
            "inputSchema": schema(DEFAULT_TITLES, MAX_TITLES),
        },
    ])
}
