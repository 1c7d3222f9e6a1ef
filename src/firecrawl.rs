use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Thin client for the Firecrawl search and scrape endpoints. One HTTP call per
/// operation; no retries.
pub struct FirecrawlClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchRecord {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub markdown: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchRecord>,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Error, Debug)]
pub enum FirecrawlError {
    #[error("Firecrawl request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Firecrawl returned status {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Firecrawl response is missing scrape data")]
    MissingData,
}

/// Request body for the scrape endpoint. The format list is always narrowed to
/// markdown, whatever the caller asked for.
pub fn scrape_request_body(url: &str) -> Value {
    json!({
        "url": url,
        "formats": ["markdown"],
    })
}

impl FirecrawlClient {
    pub fn new(api_key: String) -> Result<Self, FirecrawlError> {
        Self::with_base_url(api_key, FIRECRAWL_API_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, FirecrawlError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(FirecrawlError::RequestError)?;
        Ok(Self {
            api_key,
            base_url,
            http,
        })
    }

    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchRecord>, FirecrawlError> {
        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({ "query": query, "limit": limit }))
            .send()
            .await
            .map_err(FirecrawlError::RequestError)?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FirecrawlError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        let search_response = response
            .json::<SearchResponse>()
            .await
            .map_err(FirecrawlError::RequestError)?;
        info!(query, results = search_response.data.len(), "firecrawl search done");
        Ok(search_response.data)
    }

    pub async fn scrape(&self, url: &str) -> Result<Value, FirecrawlError> {
        let response = self
            .http
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&scrape_request_body(url))
            .send()
            .await
            .map_err(FirecrawlError::RequestError)?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FirecrawlError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        let scrape_response = response
            .json::<ScrapeResponse>()
            .await
            .map_err(FirecrawlError::RequestError)?;
        match scrape_response.data {
            Some(data) => {
                info!(url, "firecrawl scrape done");
                Ok(data)
            }
            None => Err(FirecrawlError::MissingData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_body_requests_markdown_only() {
        let body = scrape_request_body("https://example.com/ad");
        assert_eq!(body["url"], "https://example.com/ad");
        assert_eq!(body["formats"], json!(["markdown"]));
    }

    #[test]
    fn search_response_without_data_is_empty() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn search_record_tolerates_missing_fields() {
        let parsed: SearchRecord =
            serde_json::from_str(r#"{"url": "https://ad.joongang.co.kr"}"#).unwrap();
        assert_eq!(parsed.url, "https://ad.joongang.co.kr");
        assert!(parsed.title.is_empty());
        assert!(parsed.markdown.is_none());
    }
}
