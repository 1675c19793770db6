//! Chip and condition labels by literal keyword lookup.
//!
//! Both tables are ordered: first hit wins, no hit means absent. Nothing is guessed.

use bargain_core::{Condition, ExtractionPolicy};

pub struct LabelMatcher {
    /// (lower-case needle, canonical label)
    chips: Vec<(String, String)>,
    conditions: Vec<(Condition, Vec<String>)>,
}

impl LabelMatcher {
    pub fn new(policy: &ExtractionPolicy) -> Self {
        let chips = policy
            .chips
            .iter()
            .map(|c| (c.to_lowercase(), c.clone()))
            .collect();

        let conditions = policy
            .conditions
            .iter()
            .map(|rule| {
                let synonyms = rule.synonyms.iter().map(|s| s.to_lowercase()).collect();
                (rule.condition, synonyms)
            })
            .collect();

        Self { chips, conditions }
    }

    pub fn chip(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        self.chips
            .iter()
            .find(|(needle, _)| lower.contains(needle.as_str()))
            .map(|(_, label)| label.clone())
    }

    pub fn condition(&self, text: &str) -> Option<Condition> {
        let lower = text.to_lowercase();
        self.conditions
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|s| lower.contains(s.as_str())))
            .map(|(condition, _)| *condition)
    }
}
