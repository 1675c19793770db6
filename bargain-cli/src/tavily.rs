//! Live web search via the Tavily REST API.
//!
//! Returns titles, urls and snippets only; no raw page content.

use std::time::Duration;

use bargain_core::{RawRecord, SearchError, SearchProvider};
use serde::{Deserialize, Serialize};

pub const API_KEY_VAR: &str = "TAVILY_API_KEY";

#[derive(Debug, Clone)]
pub struct TavilyClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct Req<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    include_answer: bool,
    include_raw_content: bool,
    include_images: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct Resp {
    #[serde(default)]
    results: Vec<Hit>,
}

#[derive(Debug, Default, Deserialize)]
struct Hit {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    published_date: Option<String>,
}

fn trimmed(s: &Option<String>) -> String {
    s.as_deref().unwrap_or("").trim().to_string()
}

/// Map a Tavily response onto records. Hits without a url are dropped;
/// source ids keep the hit's 1-based position in the response.
pub fn to_records(resp: Resp, max_results: usize) -> Vec<RawRecord> {
    resp.results
        .iter()
        .take(max_results)
        .enumerate()
        .filter_map(|(i, hit)| {
            let url = trimmed(&hit.url);
            if url.is_empty() {
                return None;
            }
            let title = Some(trimmed(&hit.title)).filter(|t| !t.is_empty()).unwrap_or_else(|| url.clone());
            let snippet = Some(trimmed(&hit.content))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| trimmed(&hit.snippet));
            let record = RawRecord::new(format!("web:tavily:{}", i + 1), title, url, snippet);
            let published = trimmed(&hit.published_date);
            Some(if published.is_empty() { record } else { record.with_published(published) })
        })
        .collect()
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout,
        }
    }

    async fn search_async(&self, query: &str, max_results: usize) -> Result<Vec<RawRecord>, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let body = Req {
            api_key: &self.api_key,
            query,
            max_results,
            include_answer: false,
            include_raw_content: false,
            include_images: false,
        };

        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let resp = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            return Err(SearchError::Status { status: status.as_u16(), body: txt });
        }

        let out: Resp = resp.json().await.map_err(|e| SearchError::Decode(e.to_string()))?;
        Ok(to_records(out, max_results))
    }
}

impl SearchProvider for TavilyClient {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawRecord>, SearchError> {
        // Called from sync code that may already sit inside the CLI's runtime;
        // a nested block_on would panic there.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.search_async(query, max_results)))
        } else {
            let rt = tokio::runtime::Runtime::new().map_err(|e| SearchError::Request(e.to_string()))?;
            rt.block_on(self.search_async(query, max_results))
        }
    }
}
