//! Canned wiki API payloads for HTTP-mocked tests.
//!
//! Builders for the two response shapes the fetcher consumes, so tests can
//! describe payloads by content instead of repeating raw JSON.

use serde_json::{Value, json};

/// Body of a full-text search response carrying the given titles.
pub fn search_body(titles: &[&str]) -> String {
    let hits: Vec<Value> = titles.iter().map(|title| json!({ "title": title })).collect();
    json!({ "query": { "search": hits } }).to_string()
}

/// Body of a batch extract response.
///
/// Pages are keyed by synthetic page ids, the way the real API keys them;
/// a `None` extract produces a page object without an `extract` field.
pub fn pages_body(pages: &[(&str, Option<&str>)]) -> String {
    let mut by_id = serde_json::Map::new();
    for (i, (title, extract)) in pages.iter().enumerate() {
        let mut page = serde_json::Map::new();
        page.insert("title".to_string(), json!(title));
        if let Some(extract) = extract {
            page.insert("extract".to_string(), json!(extract));
        }
        by_id.insert((1000 + i).to_string(), Value::Object(page));
    }
    json!({ "query": { "pages": by_id } }).to_string()
}
