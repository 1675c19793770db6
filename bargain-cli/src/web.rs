//! Composite search: live Tavily when configured, local index otherwise.

use bargain_core::{RawRecord, SearchError, SearchProvider};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::local_index::LocalIndex;
use crate::tavily::TavilyClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// Live when an API key is present, local index on failure or without a key.
    #[default]
    Auto,
    /// Live only; errors propagate.
    Tavily,
    /// Local index only.
    Mock,
}

pub struct WebSearch {
    live: Option<TavilyClient>,
    local: LocalIndex,
    fall_back: bool,
}

impl WebSearch {
    /// `live` is the client built from the environment, if an API key exists.
    pub fn new(mode: ProviderMode, live: Option<TavilyClient>, local: LocalIndex) -> Result<Self, SearchError> {
        match mode {
            ProviderMode::Mock => Ok(Self { live: None, local, fall_back: true }),
            ProviderMode::Auto => Ok(Self { live, local, fall_back: true }),
            ProviderMode::Tavily => {
                let live = live.ok_or(SearchError::MissingApiKey(crate::tavily::API_KEY_VAR))?;
                Ok(Self { live: Some(live), local, fall_back: false })
            }
        }
    }

    pub fn mode_label(&self) -> &'static str {
        if self.live.is_some() { "live" } else { "mock" }
    }

    pub fn local(&self) -> &LocalIndex {
        &self.local
    }
}

impl SearchProvider for WebSearch {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawRecord>, SearchError> {
        let Some(live) = &self.live else {
            return self.local.search(query, max_results);
        };

        match live.search(query, max_results) {
            Ok(records) => Ok(records),
            Err(e) if self.fall_back => {
                warn!(error = %e, query, "live search failed, using local index");
                self.local.search(query, max_results)
            }
            Err(e) => Err(e),
        }
    }
}
