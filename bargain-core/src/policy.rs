//! Tunable constants for extraction and matching.
//!
//! The defaults reproduce the reference behavior. Every field has a serde
//! default so a config file can override any subset of them.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::Condition;

/// Synonyms that map listing text onto one [`Condition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRule {
    pub condition: Condition,
    pub synonyms: Vec<String>,
}

impl ConditionRule {
    pub fn new(condition: Condition, synonyms: &[&str]) -> Self {
        Self {
            condition,
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Plausibility bounds and lookup tables used by the field extractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionPolicy {
    /// Amounts below this are treated as text fragments ("$21" cut from "$2,199").
    pub price_floor: f64,
    /// Inclusive lower bound of the typical product price band.
    pub typical_band_min: f64,
    /// Inclusive upper bound of the typical product price band.
    pub typical_band_max: f64,
    /// Known chip labels, most specific first.
    pub chips: Vec<String>,
    /// Condition synonym table, checked in order.
    pub conditions: Vec<ConditionRule>,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            price_floor: 500.0,
            typical_band_min: 1500.0,
            typical_band_max: 6000.0,
            chips: ["M2 Ultra", "M1 Ultra", "M3 Ultra", "M2 Max", "Ultra"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            conditions: vec![
                ConditionRule::new(Condition::Refurbished, &["refurb", "refurbished"]),
                ConditionRule::new(Condition::Used, &["used", "pre-owned", "preowned"]),
                ConditionRule::new(Condition::OpenBox, &["open box", "open-box"]),
                ConditionRule::new(Condition::New, &["new"]),
            ],
        }
    }
}

impl ExtractionPolicy {
    pub fn in_typical_band(&self, price: f64) -> bool {
        price >= self.typical_band_min && price <= self.typical_band_max
    }
}

/// Reference-vendor identity and ranking penalties for baseline matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Canonical vendor domain whose refurbished store is the reference.
    pub vendor_domain: String,
    /// Lower-case keyword marking a refurbished listing.
    pub refurb_keyword: String,
    /// Distance charged when the offer knows a size and the baseline does not.
    pub missing_spec_penalty: u64,
    /// Charged to a baseline with no price.
    pub missing_price_penalty: u64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            vendor_domain: "apple.com".to_string(),
            refurb_keyword: "refurb".to_string(),
            missing_spec_penalty: 10_000,
            missing_price_penalty: 10_000,
        }
    }
}

impl MatchPolicy {
    /// True when the host of `url` is the vendor domain or one of its subdomains.
    /// Unparseable urls are never vendor urls.
    pub fn is_vendor_url(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url.trim()) else {
            return false;
        };
        let Some(host) = parsed.host_str().map(|h| h.to_ascii_lowercase()) else {
            return false;
        };
        let domain = self.vendor_domain.trim().trim_start_matches('.').to_ascii_lowercase();
        if domain.is_empty() {
            return false;
        }
        host == domain || host.strip_suffix(domain.as_str()).is_some_and(|rest| rest.ends_with('.'))
    }

    /// True when `text` carries the refurbished keyword.
    pub fn mentions_refurb(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.refurb_keyword.to_lowercase())
    }
}
