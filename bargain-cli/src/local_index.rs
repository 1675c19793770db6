//! Deterministic offline search over an in-memory index.
//!
//! Scoring is plain token overlap between the query and an entry's keywords,
//! title and snippet. With no overlap at all the newest entries are returned
//! so a demo run still has something to chew on.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use bargain_core::{RawRecord, SearchError, SearchProvider};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const BUILTIN_INDEX: &str = include_str!("../data/local_index.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub source_id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl IndexEntry {
    fn to_record(&self) -> RawRecord {
        let record = RawRecord::new(&self.source_id, &self.title, &self.url, &self.snippet);
        if self.published.is_empty() {
            record
        } else {
            record.with_published(&self.published)
        }
    }

    fn published_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.published.trim(), "%Y-%m-%d").ok()
    }
}

fn tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .replace('-', " ")
        .split_whitespace()
        .map(|t| t.to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct LocalIndex {
    entries: Vec<IndexEntry>,
}

impl LocalIndex {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    /// The index compiled into the binary.
    pub fn builtin() -> Result<Self, SearchError> {
        Self::from_json("<builtin>", BUILTIN_INDEX)
    }

    /// Load a JSON array of entries from disk.
    pub fn from_path(path: &Path) -> Result<Self, SearchError> {
        let s = fs::read_to_string(path).map_err(|e| SearchError::Index {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&path.display().to_string(), &s)
    }

    fn from_json(origin: &str, json: &str) -> Result<Self, SearchError> {
        let entries: Vec<IndexEntry> = serde_json::from_str(json).map_err(|e| SearchError::Index {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn query(&self, query: &str, max_results: usize) -> Vec<RawRecord> {
        let q = tokens(query);

        let mut scored: Vec<(usize, &IndexEntry)> = self
            .entries
            .iter()
            .filter_map(|e| {
                let mut hay: HashSet<String> = e.keywords.iter().map(|k| k.to_lowercase()).collect();
                hay.extend(tokens(&e.title));
                hay.extend(tokens(&e.snippet));
                let score = q.intersection(&hay).count();
                (score > 0).then_some((score, e))
            })
            .collect();

        if scored.is_empty() {
            let mut newest: Vec<&IndexEntry> = self.entries.iter().collect();
            // None sorts first, so undated entries end up last after the reverse.
            newest.sort_by_key(|e| std::cmp::Reverse(e.published_date()));
            return newest.into_iter().take(max_results).map(|e| e.to_record()).collect();
        }

        // stable: equal scores keep index order
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(max_results)
            .map(|(_, e)| e.to_record())
            .collect()
    }
}

impl SearchProvider for LocalIndex {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawRecord>, SearchError> {
        Ok(self.query(query, max_results))
    }
}
