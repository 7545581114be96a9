//! Bing Web Search API client.

use super::service::{SearchError, SearchProvider, SearchResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const RESULTS_PER_QUERY: u32 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingResponse {
    #[serde(default)]
    web_pages: Option<WebPages>,
}

#[derive(Debug, Default, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

#[derive(Debug, Deserialize)]
struct WebPage {
    name: String,
    url: String,
    #[serde(default)]
    snippet: String,
}

impl BingResponse {
    fn into_results(self) -> Vec<SearchResult> {
        self.web_pages
            .map(|pages| pages.value)
            .unwrap_or_default()
            .into_iter()
            .map(|p| SearchResult {
                title: p.name,
                link: p.url,
                summary: p.snippet,
            })
            .collect()
    }
}

/// Search provider backed by the Bing Web Search v7 API.
pub struct BingSearch {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl BingSearch {
    /// Builds a client with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Request`] if the HTTP client cannot be constructed.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rango/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl SearchProvider for BingSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let count = RESULTS_PER_QUERY.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .query(&[
                ("q", query),
                ("count", count.as_str()),
                ("responseFilter", "Webpages"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Bing search returned an error status");
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: BingResponse = response.json().await?;
        let results = body.into_results();
        debug!(query, hits = results.len(), "Bing search completed");

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_pages() {
        let body = r#"{
            "_type": "SearchResponse",
            "webPages": {
                "totalEstimatedMatches": 2,
                "value": [
                    {"name": "Python.org", "url": "https://www.python.org/", "snippet": "The official home"},
                    {"name": "Learn Python", "url": "https://learnpython.org/"}
                ]
            }
        }"#;

        let parsed: BingResponse = serde_json::from_str(body).unwrap();
        let results = parsed.into_results();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Python.org");
        assert_eq!(results[0].link, "https://www.python.org/");
        assert_eq!(results[0].summary, "The official home");
        assert_eq!(results[1].summary, "");
    }

    #[test]
    fn test_parse_without_web_pages() {
        let parsed: BingResponse = serde_json::from_str(r#"{"_type": "SearchResponse"}"#).unwrap();
        assert!(parsed.into_results().is_empty());
    }

    #[test]
    fn test_client_builds() {
        let search = BingSearch::new(
            "https://api.bing.microsoft.com/v7.0/search",
            "key",
            Duration::from_secs(5),
        );
        assert!(search.is_ok());
        assert!(search.unwrap().is_enabled());
    }
}
