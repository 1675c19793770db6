//! Field extractors. Each takes arbitrary text and returns an optional value;
//! malformed or ambiguous input yields `None`, never an error.

pub mod labels;
pub mod price;
pub mod sizes;

use anyhow::Result;
use bargain_core::{Condition, ExtractionPolicy};

use labels::LabelMatcher;
use price::PriceParser;
use sizes::SizeParser;

/// Collapse all whitespace runs to single spaces and trim the ends.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All fields pulled from one text blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub price: Option<f64>,
    pub condition: Option<Condition>,
    pub chip: Option<String>,
    pub memory_gb: Option<u32>,
    pub storage_gb: Option<u32>,
}

/// Compiled extractors for one [`ExtractionPolicy`]. Build once, reuse.
pub struct FieldExtractor {
    price: PriceParser,
    sizes: SizeParser,
    labels: LabelMatcher,
}

impl FieldExtractor {
    pub fn new(policy: &ExtractionPolicy) -> Result<Self> {
        Ok(Self {
            price: PriceParser::new(policy)?,
            sizes: SizeParser::new()?,
            labels: LabelMatcher::new(policy),
        })
    }

    pub fn price(&self, text: &str) -> Option<f64> {
        self.price.extract(&normalize_text(text))
    }

    pub fn url_price(&self, url: &str) -> Option<f64> {
        self.price.extract_from_url(&normalize_text(url))
    }

    pub fn memory_gb(&self, text: &str) -> Option<u32> {
        self.sizes.memory_gb(&normalize_text(text))
    }

    pub fn storage_gb(&self, text: &str) -> Option<u32> {
        self.sizes.storage_gb(&normalize_text(text))
    }

    pub fn chip(&self, text: &str) -> Option<String> {
        self.labels.chip(&normalize_text(text))
    }

    pub fn condition(&self, text: &str) -> Option<Condition> {
        self.labels.condition(&normalize_text(text))
    }

    /// Run every extractor over the same text.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let text = normalize_text(text);
        ExtractedFields {
            price: self.price.extract(&text),
            condition: self.labels.condition(&text),
            chip: self.labels.chip(&text),
            memory_gb: self.sizes.memory_gb(&text),
            storage_gb: self.sizes.storage_gb(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Mac\tStudio \n\n M2   Ultra  "), "Mac Studio M2 Ultra");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_whitespace_does_not_change_matches() {
        let x = FieldExtractor::new(&ExtractionPolicy::default()).unwrap();
        assert_eq!(x.chip("Mac Studio M2\n   Ultra").as_deref(), Some("M2 Ultra"));
        assert_eq!(x.condition("open\t\tbox"), Some(Condition::OpenBox));
    }

    #[test]
    fn test_extract_listing() {
        let x = FieldExtractor::new(&ExtractionPolicy::default()).unwrap();
        let fields = x.extract(
            "Apple Mac Studio (2023) M2 Ultra 24-core CPU, 64GB unified memory, 1TB SSD - Open Box $2,899.99 (was $3,999)",
        );
        assert_eq!(fields.price, Some(2899.99));
        assert_eq!(fields.condition, Some(Condition::OpenBox));
        assert_eq!(fields.chip.as_deref(), Some("M2 Ultra"));
        assert_eq!(fields.memory_gb, Some(64));
        assert_eq!(fields.storage_gb, Some(1024));
    }

    #[test]
    fn test_extract_nothing() {
        let x = FieldExtractor::new(&ExtractionPolicy::default()).unwrap();
        assert_eq!(x.extract("   "), ExtractedFields::default());
    }
}
