//! End-to-end challenge run: offers query, baseline widen/accept loop,
//! filtering, matching, discount scoring and ranking.
//!
//! Everything is sequential. A baseline variant is judged only on its full
//! batch before the next variant is issued.

use anyhow::{Context, Result};
use bargain_core::{
    best_baseline, discount_pct, filter_offers, rank, Baseline, ChallengeResult, Constraints,
    ExtractionPolicy, MatchPolicy, Offer, ScoredResult, SearchProvider,
};
use bargain_ingest::RecordNormalizer;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::queries::QueryPlan;

/// Policies for one orchestrator. Each section falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeConfig {
    pub extraction: ExtractionPolicy,
    pub matching: MatchPolicy,
    pub queries: QueryPlan,
}

/// True when a batch holds a vendor refurb url and at least one priced baseline.
pub fn batch_is_acceptable(baselines: &[Baseline], policy: &MatchPolicy) -> bool {
    let has_vendor_refurb = baselines
        .iter()
        .any(|b| policy.is_vendor_url(&b.url) && policy.mentions_refurb(&b.url));
    let has_price = baselines.iter().any(|b| b.price.is_some());
    has_vendor_refurb && has_price
}

/// The baseline batch kept after the widen/accept loop.
#[derive(Debug, Clone)]
struct BaselineBatch {
    query: String,
    baselines: Vec<Baseline>,
    attempts: usize,
    accepted: bool,
}

pub struct Challenge {
    normalizer: RecordNormalizer,
    matching: MatchPolicy,
    plan: QueryPlan,
}

impl Challenge {
    pub fn new(config: &ChallengeConfig) -> Result<Self> {
        Ok(Self {
            normalizer: RecordNormalizer::new(&config.extraction, &config.matching)
                .context("compile field extractors")?,
            matching: config.matching.clone(),
            plan: config.queries.clone(),
        })
    }

    pub fn run<P>(&self, provider: &P, constraints: &Constraints, max_results: usize) -> Result<ChallengeResult>
    where
        P: SearchProvider + ?Sized,
    {
        let domain = &self.matching.vendor_domain;

        let offers_query = self.plan.offers_query(constraints, domain);
        let records = provider
            .search(&offers_query, max_results)
            .with_context(|| format!("offers query: {offers_query}"))?;
        let normalized = self.normalizer.offers(&records);
        let seen = normalized.len();
        let offers = filter_offers(normalized, constraints);
        debug!(query = %offers_query, results = seen, kept = offers.len(), "offers collected");

        let batch = self.collect_baselines(provider, constraints, max_results)?;

        let mut ranked = self.score(&offers, &batch.baselines);
        rank(&mut ranked);
        let winner = ranked.first().cloned();

        info!(
            offers = offers.len(),
            baselines = batch.baselines.len(),
            baseline_attempts = batch.attempts,
            baseline_accepted = batch.accepted,
            ranked = ranked.len(),
            best_discount = ?winner.as_ref().and_then(|w| w.discount_pct),
            "challenge complete"
        );

        Ok(ChallengeResult {
            constraints: constraints.clone(),
            offers_query,
            baseline_query: batch.query,
            offer_sources: offers.iter().map(|o| o.source_id.clone()).collect(),
            baseline_sources: batch.baselines.iter().map(|b| b.source_id.clone()).collect(),
            ranked,
            winner,
        })
    }

    /// Issue baseline variants in order, stopping at the first acceptable batch.
    /// With no acceptable batch the last one tried is kept.
    fn collect_baselines<P>(&self, provider: &P, constraints: &Constraints, max_results: usize) -> Result<BaselineBatch>
    where
        P: SearchProvider + ?Sized,
    {
        let queries = self.plan.baseline_queries(constraints, &self.matching.vendor_domain);
        let mut batch = BaselineBatch {
            query: queries.first().cloned().unwrap_or_default(),
            baselines: Vec::new(),
            attempts: 0,
            accepted: false,
        };

        for (attempt, query) in queries.iter().enumerate() {
            let records = provider
                .search(query, max_results)
                .with_context(|| format!("baseline query: {query}"))?;
            let baselines = self.normalizer.baselines(&records);
            let accepted = batch_is_acceptable(&baselines, &self.matching);

            debug!(
                attempt = attempt + 1,
                query = %query,
                results = baselines.len(),
                accepted,
                "baseline batch"
            );

            batch = BaselineBatch {
                query: query.clone(),
                baselines,
                attempts: attempt + 1,
                accepted,
            };
            if accepted {
                return Ok(batch);
            }
        }

        debug!(query = %batch.query, "no baseline batch accepted, keeping last");
        Ok(batch)
    }

    /// Pair each offer with its best baseline. Offers without a candidate are dropped.
    pub fn score(&self, offers: &[Offer], baselines: &[Baseline]) -> Vec<ScoredResult> {
        offers
            .iter()
            .filter_map(|o| {
                let b = best_baseline(o, baselines, &self.matching)?;
                Some(ScoredResult {
                    discount_pct: discount_pct(o.price, b.price),
                    offer: o.clone(),
                    baseline: b.clone(),
                })
            })
            .collect()
    }
}

/// Run a challenge with default policies.
pub fn run_challenge<P>(provider: &P, constraints: &Constraints, max_results: usize) -> Result<ChallengeResult>
where
    P: SearchProvider + ?Sized,
{
    Challenge::new(&ChallengeConfig::default())?.run(provider, constraints, max_results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline(url: &str, price: Option<f64>) -> Baseline {
        Baseline {
            source_id: "b".to_string(),
            title: String::new(),
            url: url.to_string(),
            snippet: String::new(),
            price,
            chip: None,
            memory_gb: None,
            storage_gb: None,
        }
    }

    #[test]
    fn test_acceptance_needs_both_clauses() {
        let p = MatchPolicy::default();
        let refurb_url = "https://www.apple.com/shop/refurbished/mac/mac-studio";

        assert!(batch_is_acceptable(&[baseline(refurb_url, Some(3399.0))], &p));
        // price may come from a different record in the batch
        assert!(batch_is_acceptable(
            &[baseline(refurb_url, None), baseline("https://example.com", Some(1.0))],
            &p
        ));
        assert!(!batch_is_acceptable(&[baseline(refurb_url, None)], &p));
        assert!(!batch_is_acceptable(&[baseline("https://www.apple.com/mac-studio/", Some(3999.0))], &p));
        assert!(!batch_is_acceptable(&[baseline("https://example.com/refurbished", Some(3999.0))], &p));
        assert!(!batch_is_acceptable(&[], &p));
    }

    #[test]
    fn test_score_skips_when_no_baselines() {
        let challenge = Challenge::new(&ChallengeConfig::default()).unwrap();
        let offer = Offer {
            source_id: "o".to_string(),
            title: String::new(),
            url: String::new(),
            snippet: String::new(),
            price: Some(1999.0),
            condition: None,
            chip: Some("M2 Ultra".to_string()),
            memory_gb: Some(64),
            storage_gb: Some(1024),
        };
        assert!(challenge.score(&[offer.clone()], &[]).is_empty());

        let scored = challenge.score(&[offer], &[baseline("https://example.com", None)]);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].discount_pct, None);
    }

    #[test]
    fn test_config_from_partial_json() {
        let cfg: ChallengeConfig =
            serde_json::from_str(r#"{"matching": {"vendor_domain": "example.com"}, "queries": {"product": "Mac Pro"}}"#)
                .unwrap();
        assert_eq!(cfg.matching.vendor_domain, "example.com");
        assert_eq!(cfg.queries.product, "Mac Pro");
        assert_eq!(cfg.queries.baseline_templates.len(), 4);
        assert_eq!(cfg.extraction.price_floor, 500.0);
    }
}
