//! MediaWiki search API client.
//!
//! Implements the two-step fetch the spotlight pipeline is built on: a
//! full-text search for a term, then a batch intro-extract lookup for the
//! titles that came back. Calls are sequential (the second depends on the
//! first) and there are no retries; a failed call surfaces immediately as
//! a [`FetchError`].

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use scratchlight_config::ApiConfig;

/// Errors from remote wiki calls.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP client setup failed: {0}")]
    Setup(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("response decode error: {0}")]
    Decode(String),
}

/// One hit from the full-text search. Only the title is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

/// One page from the batch extract lookup.
///
/// Either field may be absent; pages without an extract are dropped by the
/// caller before snippets are built.
#[derive(Debug, Clone, Deserialize)]
pub struct PageExtract {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
}

/// Client for a MediaWiki-compatible `api.php` endpoint.
pub struct WikiClient {
    http: Client,
    endpoint: String,
}

impl WikiClient {
    /// Create a new client from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| FetchError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Full-text search for `term`, truncated to `limit` results server-side.
    pub async fn search(&self, term: &str, limit: u32) -> Result<Vec<SearchHit>, FetchError> {
        debug!(%term, limit, "wiki search request");
        let limit = limit.to_string();

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", term),
                ("srlimit", limit.as_str()),
                ("format", "json"),
                ("origin", "*"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(body.query.search)
    }

    /// Batch intro-extract lookup for `titles`, pipe-joined per the API's
    /// multi-title convention. Pages come back keyed by page id; the key
    /// order carries no meaning and is not relied upon.
    pub async fn extracts(&self, titles: &[String]) -> Result<Vec<PageExtract>, FetchError> {
        debug!(count = titles.len(), "wiki extract request");
        let titles = titles.join("|");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", ""),
                ("explaintext", ""),
                ("titles", titles.as_str()),
                ("format", "json"),
                ("origin", "*"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(body.query.pages.into_values().collect())
    }
}

// ── Wire types (private) ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: ExtractQuery,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, PageExtract>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use scratchlight_test_utils::config::TestConfigBuilder;
    use scratchlight_test_utils::fixtures;

    fn client_for(server: &mockito::ServerGuard) -> WikiClient {
        let config = TestConfigBuilder::new().endpoint(&server.url()).build();
        WikiClient::new(&config.api).unwrap()
    }

    // ── search ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_search_parses_titles() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("list".into(), "search".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(fixtures::search_body(&["Rust", "Rust (fungus)"]))
            .create_async()
            .await;

        let client = client_for(&server);
        let hits = client.search("rust", 5).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Rust");
        assert_eq!(hits[1].title, "Rust (fungus)");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_sends_documented_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "query".into()),
                Matcher::UrlEncoded("list".into(), "search".into()),
                Matcher::UrlEncoded("srsearch".into(), "spotted owl".into()),
                Matcher::UrlEncoded("srlimit".into(), "7".into()),
                Matcher::UrlEncoded("format".into(), "json".into()),
                Matcher::UrlEncoded("origin".into(), "*".into()),
            ]))
            .with_status(200)
            .with_body(fixtures::search_body(&[]))
            .create_async()
            .await;

        let client = client_for(&server);
        let hits = client.search("spotted owl", 7).await.unwrap();

        assert!(hits.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.search("rust", 5).await.unwrap_err();

        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_search_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.search("rust", 5).await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_unreachable_endpoint_is_network_error() {
        let config = TestConfigBuilder::new()
            .endpoint("http://127.0.0.1:9/")
            .build();
        let client = WikiClient::new(&config.api).unwrap();

        let err = client.search("rust", 5).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    // ── extracts ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_extracts_joins_titles_with_pipe() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "query".into()),
                Matcher::UrlEncoded("prop".into(), "extracts".into()),
                Matcher::UrlEncoded("exintro".into(), "".into()),
                Matcher::UrlEncoded("explaintext".into(), "".into()),
                Matcher::UrlEncoded("titles".into(), "Rust|Iron oxide".into()),
                Matcher::UrlEncoded("format".into(), "json".into()),
            ]))
            .with_status(200)
            .with_body(fixtures::pages_body(&[
                ("Rust", Some("Rust is an oxide.")),
                ("Iron oxide", Some("Iron oxide is a compound.")),
            ]))
            .create_async()
            .await;

        let client = client_for(&server);
        let titles = vec!["Rust".to_string(), "Iron oxide".to_string()];
        let pages = client.extracts(&titles).await.unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.extract.is_some()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_extracts_tolerates_missing_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"query":{"pages":{"-1":{},"42":{"title":"Rust","extract":"Rust is an oxide."}}}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let pages = client.extracts(&["Rust".to_string()]).await.unwrap();

        assert_eq!(pages.len(), 2);
        let with_extract = pages.iter().filter(|p| p.extract.is_some()).count();
        assert_eq!(with_extract, 1);
    }

    #[tokio::test]
    async fn test_extracts_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.extracts(&["Rust".to_string()]).await.unwrap_err();

        assert!(matches!(err, FetchError::Status(500)));
    }
}
