//! Turn raw search records into offers and baselines.
//!
//! Offers read title + snippet. Baselines also read the url, since vendor pages
//! sometimes carry the price only in a query parameter. Baseline chip is never
//! inferred: reference pages list several chip options side by side.

use anyhow::Result;
use bargain_core::{Baseline, ExtractionPolicy, MatchPolicy, Offer, RawRecord};

use crate::parsers::{normalize_text, FieldExtractor};

const DEFAULT_OFFER_SOURCE: &str = "web:unknown";
const DEFAULT_BASELINE_SOURCE: &str = "web:baseline";

fn source_or(source_id: &str, fallback: &str) -> String {
    let s = source_id.trim();
    if s.is_empty() { fallback.to_string() } else { s.to_string() }
}

pub struct RecordNormalizer {
    extractor: FieldExtractor,
    matching: MatchPolicy,
}

impl RecordNormalizer {
    pub fn new(extraction: &ExtractionPolicy, matching: &MatchPolicy) -> Result<Self> {
        Ok(Self {
            extractor: FieldExtractor::new(extraction)?,
            matching: matching.clone(),
        })
    }

    pub fn offer(&self, record: &RawRecord) -> Offer {
        let title = normalize_text(&record.title);
        let snippet = normalize_text(&record.snippet);
        let fields = self.extractor.extract(&format!("{title} {snippet}"));

        Offer {
            source_id: source_or(&record.source_id, DEFAULT_OFFER_SOURCE),
            title,
            url: normalize_text(&record.url),
            snippet,
            price: fields.price,
            condition: fields.condition,
            chip: fields.chip,
            memory_gb: fields.memory_gb,
            storage_gb: fields.storage_gb,
        }
    }

    pub fn baseline(&self, record: &RawRecord) -> Baseline {
        let title = normalize_text(&record.title);
        let snippet = normalize_text(&record.snippet);
        let url = normalize_text(&record.url);
        let fields = self.extractor.extract(&format!("{title} {snippet} {url}"));

        let price = fields.price.or_else(|| {
            if self.matching.is_vendor_url(&url) {
                self.extractor.url_price(&url)
            } else {
                None
            }
        });

        Baseline {
            source_id: source_or(&record.source_id, DEFAULT_BASELINE_SOURCE),
            title,
            url,
            snippet,
            price,
            chip: None,
            memory_gb: fields.memory_gb,
            storage_gb: fields.storage_gb,
        }
    }

    pub fn offers(&self, records: &[RawRecord]) -> Vec<Offer> {
        records.iter().map(|r| self.offer(r)).collect()
    }

    pub fn baselines(&self, records: &[RawRecord]) -> Vec<Baseline> {
        records.iter().map(|r| self.baseline(r)).collect()
    }
}
