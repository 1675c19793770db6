//! Structured values produced and consumed by a challenge run.
//!
//! Everything here is built once and never mutated afterwards. Optional fields
//! serialize as `null` so "not extracted" never reads as zero.

use serde::{Deserialize, Serialize};

/// One raw search hit, as handed over by a search collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
    /// Publication date as reported by the provider (free-form, often YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

impl RawRecord {
    pub fn new(
        source_id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            published: None,
        }
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }
}

/// Hard requirements an offer must meet before it is ranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub chip: String,
    pub min_memory_gb: u32,
    pub min_storage_gb: u32,
    pub currency: String,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            chip: "M2 Ultra".to_string(),
            min_memory_gb: 64,
            min_storage_gb: 1024,
            currency: "USD".to_string(),
        }
    }
}

impl Constraints {
    pub fn new(chip: impl Into<String>, min_memory_gb: u32, min_storage_gb: u32) -> Self {
        Self {
            chip: chip.into(),
            min_memory_gb,
            min_storage_gb,
            ..Self::default()
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Minimum storage in whole terabytes (truncated), as used in query text.
    pub fn min_storage_tb(&self) -> u32 {
        self.min_storage_gb / 1024
    }
}

/// Listing condition recognized in offer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "used")]
    Used,
    #[serde(rename = "refurbished")]
    Refurbished,
    #[serde(rename = "open-box")]
    OpenBox,
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Used => "used",
            Condition::Refurbished => "refurbished",
            Condition::OpenBox => "open-box",
            Condition::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate listing extracted from search text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub source_id: String,
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// In constraint currency; never below the extraction floor
    pub price: Option<f64>,
    pub condition: Option<Condition>,
    pub chip: Option<String>,
    pub memory_gb: Option<u32>,
    pub storage_gb: Option<u32>,
}

/// A reference list-price the offers are measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub source_id: String,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub price: Option<f64>,
    /// Left unset by normalization: vendor pages mention several chips at once.
    pub chip: Option<String>,
    pub memory_gb: Option<u32>,
    pub storage_gb: Option<u32>,
}

/// An offer paired with its chosen baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub discount_pct: Option<f64>,
    pub offer: Offer,
    pub baseline: Baseline,
}

/// Output of one challenge run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResult {
    pub constraints: Constraints,
    pub offers_query: String,
    pub baseline_query: String,
    pub offer_sources: Vec<String>,
    pub baseline_sources: Vec<String>,
    pub ranked: Vec<ScoredResult>,
    pub winner: Option<ScoredResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer() -> Offer {
        Offer {
            source_id: "web:1".to_string(),
            title: "Mac Studio".to_string(),
            url: "https://example.com/a".to_string(),
            snippet: String::new(),
            price: None,
            condition: Some(Condition::OpenBox),
            chip: None,
            memory_gb: Some(64),
            storage_gb: None,
        }
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let v = serde_json::to_value(offer()).unwrap();
        assert!(v["price"].is_null());
        assert!(v["chip"].is_null());
        assert!(v["storage_gb"].is_null());
        assert_eq!(v["memory_gb"], 64);
        assert_eq!(v["condition"], "open-box");
    }

    #[test]
    fn test_unknown_condition_string() {
        let c: Condition = serde_json::from_str("\"like new-ish\"").unwrap();
        assert_eq!(c, Condition::Unknown);
        let c: Condition = serde_json::from_str("\"refurbished\"").unwrap();
        assert_eq!(c, Condition::Refurbished);
    }

    #[test]
    fn test_raw_record_tolerates_missing_fields() {
        let r: RawRecord = serde_json::from_str(r#"{"title": "Mac Studio M2 Ultra"}"#).unwrap();
        assert_eq!(r.title, "Mac Studio M2 Ultra");
        assert!(r.source_id.is_empty());
        assert!(r.url.is_empty());
        assert_eq!(r.published, None);
    }

    #[test]
    fn test_default_constraints() {
        let c = Constraints::default();
        assert_eq!(c.chip, "M2 Ultra");
        assert_eq!(c.min_memory_gb, 64);
        assert_eq!(c.min_storage_gb, 1024);
        assert_eq!(c.min_storage_tb(), 1);
        assert_eq!(Constraints::new("M1 Ultra", 128, 2048).currency, "USD");
    }
}
