//! The search collaborator seam.
//!
//! The engine never fetches anything itself. Whatever retrieves records (a live
//! web API, a local index, a test script) implements [`SearchProvider`].

use crate::model::RawRecord;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("missing API key: {0} is not set")]
    MissingApiKey(&'static str),

    #[error("search request failed: {0}")]
    Request(String),

    #[error("search provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode search response: {0}")]
    Decode(String),

    #[error("local index {path}: {reason}")]
    Index { path: String, reason: String },
}

/// Synchronous record retrieval. Blocking, if any, happens inside the provider.
pub trait SearchProvider {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawRecord>, SearchError>;
}

impl<F> SearchProvider for F
where
    F: Fn(&str, usize) -> Result<Vec<RawRecord>, SearchError>,
{
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawRecord>, SearchError> {
        self(query, max_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_provider() {
        let provider = |q: &str, n: usize| -> Result<Vec<RawRecord>, SearchError> {
            Ok((0..n).map(|i| RawRecord::new(format!("web:{i}"), q, "", "")).collect())
        };
        let out = provider.search("mac studio", 2).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].source_id, "web:1");
        assert_eq!(out[0].title, "mac studio");
    }

    #[test]
    fn test_error_messages() {
        let e = SearchError::MissingApiKey("TAVILY_API_KEY");
        assert_eq!(e.to_string(), "missing API key: TAVILY_API_KEY is not set");
        let e = SearchError::Status { status: 401, body: "unauthorized".to_string() };
        assert!(e.to_string().contains("401"));
    }
}
