//! JSON rendering of digests, for transports that want structure instead of
//! Markdown.

use crate::digest::QueryError;
use crate::models::Digest;
use serde::Serialize;
use serde_json::json;

/// Pretty-printed digest.
pub fn digest_to_json<T: Serialize>(digest: &Digest<T>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(digest)
}

/// `{"error": "<message>"}` for a query that produced no digest.
pub fn query_error_to_json(err: &QueryError) -> String {
    json!({ "error": err.to_string() }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::models::LinkCandidate;

    #[test]
    fn test_digest_to_json_has_entries() {
        let digest = Digest::new(
            "全球",
            vec![LinkCandidate::new("World headline", "https://www.bbc.com/news/1")],
        );
        let value: serde_json::Value = serde_json::from_str(&digest_to_json(&digest).unwrap()).unwrap();

        assert_eq!(value["category"], "全球");
        assert_eq!(value["entries"][0]["url"], "https://www.bbc.com/news/1");
    }

    #[test]
    fn test_query_error_to_json() {
        let out = query_error_to_json(&QueryError::NoNews(Category::Tech));
        assert_eq!(out, r#"{"error":"No news found for category 科技"}"#);
    }
}
