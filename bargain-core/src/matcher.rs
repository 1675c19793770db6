//! Baseline matching: pick the single best reference listing for an offer.
//!
//! Candidates are ranked by a lexicographic key, lower is better:
//! 1) authority tier (vendor refurb listing = 0)
//! 2) combined memory + storage distance
//! 3) memory distance alone
//! 4) missing price penalty
//!
//! Ties fall back to input order.

use crate::model::{Baseline, Offer};
use crate::policy::MatchPolicy;

/// Ordered comparison key for one candidate baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchKey {
    pub authority_tier: u8,
    pub spec_distance: u64,
    pub memory_distance: u64,
    pub price_penalty: u64,
}

/// True for a recognizable reference-vendor refurbished listing.
///
/// Either the url is on the vendor domain and some field mentions the refurb
/// keyword, or the title/snippet mention it on their own.
pub fn is_authoritative(baseline: &Baseline, policy: &MatchPolicy) -> bool {
    let text_refurb = policy.mentions_refurb(&baseline.title) || policy.mentions_refurb(&baseline.snippet);
    if text_refurb {
        return true;
    }
    policy.is_vendor_url(&baseline.url) && policy.mentions_refurb(&baseline.url)
}

fn size_distance(offer: Option<u32>, baseline: Option<u32>, penalty: u64) -> u64 {
    match (offer, baseline) {
        (Some(o), Some(b)) => u64::from(o.abs_diff(b)),
        (Some(_), None) => penalty,
        (None, _) => 0,
    }
}

/// Compute the ranking key of `baseline` relative to `offer`.
pub fn match_key(offer: &Offer, baseline: &Baseline, policy: &MatchPolicy) -> MatchKey {
    let memory_distance = size_distance(offer.memory_gb, baseline.memory_gb, policy.missing_spec_penalty);
    let storage_distance = size_distance(offer.storage_gb, baseline.storage_gb, policy.missing_spec_penalty);

    MatchKey {
        authority_tier: if is_authoritative(baseline, policy) { 0 } else { 1 },
        spec_distance: memory_distance + storage_distance,
        memory_distance,
        price_penalty: if baseline.price.is_some() { 0 } else { policy.missing_price_penalty },
    }
}

/// Select the best baseline for `offer`, or `None` when there are no candidates.
pub fn best_baseline<'a>(offer: &Offer, baselines: &'a [Baseline], policy: &MatchPolicy) -> Option<&'a Baseline> {
    // min_by_key keeps the first of equal minima, which gives input-order ties.
    baselines.iter().min_by_key(|b| match_key(offer, b, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(mem: Option<u32>, ssd: Option<u32>) -> Offer {
        Offer {
            source_id: "web:offer".to_string(),
            title: "Mac Studio M2 Ultra".to_string(),
            url: "https://www.ebay.com/itm/1".to_string(),
            snippet: String::new(),
            price: Some(1999.0),
            condition: None,
            chip: Some("M2 Ultra".to_string()),
            memory_gb: mem,
            storage_gb: ssd,
        }
    }

    fn baseline(id: &str, url: &str, title: &str, mem: Option<u32>, ssd: Option<u32>, price: Option<f64>) -> Baseline {
        Baseline {
            source_id: id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            snippet: String::new(),
            price,
            chip: None,
            memory_gb: mem,
            storage_gb: ssd,
        }
    }

    #[test]
    fn test_authority_tier_dominates_spec_distance() {
        let policy = MatchPolicy::default();
        let o = offer(Some(64), Some(1024));
        let b1 = baseline("b1", "https://www.bhphotovideo.com/mac-studio", "Mac Studio", Some(64), Some(1024), Some(3999.0));
        let b2 = baseline(
            "b2",
            "https://www.apple.com/shop/product/refurbished-mac-studio",
            "Mac Studio",
            Some(128),
            Some(2048),
            Some(4599.0),
        );
        let candidates = vec![b1, b2];
        let best = best_baseline(&o, &candidates, &policy).unwrap();
        assert_eq!(best.source_id, "b2");
    }

    #[test]
    fn test_title_keyword_alone_is_authoritative() {
        let policy = MatchPolicy::default();
        let b = baseline("b", "https://example.com/x", "Refurbished Mac Studio", None, None, None);
        assert!(is_authoritative(&b, &policy));

        let plain_vendor = baseline("v", "https://www.apple.com/mac-studio/", "Mac Studio", None, None, None);
        assert!(!is_authoritative(&plain_vendor, &policy));

        let refurb_url_elsewhere = baseline("e", "https://example.com/refurb/x", "Mac Studio", None, None, None);
        assert!(!is_authoritative(&refurb_url_elsewhere, &policy));
    }

    #[test]
    fn test_unknown_spec_worse_than_different_spec() {
        let policy = MatchPolicy::default();
        let o = offer(Some(64), Some(1024));
        let unknown = baseline("unknown", "", "Refurbished Mac Studio", None, None, Some(3999.0));
        let bigger = baseline("bigger", "", "Refurbished Mac Studio", Some(192), Some(8192), Some(7999.0));
        let candidates = vec![unknown, bigger];
        assert_eq!(best_baseline(&o, &candidates, &policy).unwrap().source_id, "bigger");
    }

    #[test]
    fn test_memory_distance_breaks_combined_tie() {
        let policy = MatchPolicy::default();
        let o = offer(Some(64), Some(1024));
        // both at combined distance 64: first off by memory, second off by storage
        let mem_off = baseline("mem_off", "", "Refurbished", Some(128), Some(1024), Some(1.0));
        let ssd_off = baseline("ssd_off", "", "Refurbished", Some(64), Some(1088), Some(1.0));
        let candidates = vec![mem_off, ssd_off];
        assert_eq!(best_baseline(&o, &candidates, &policy).unwrap().source_id, "ssd_off");
    }

    #[test]
    fn test_price_breaks_remaining_tie_then_input_order() {
        let policy = MatchPolicy::default();
        let o = offer(Some(64), Some(1024));
        let unpriced = baseline("unpriced", "", "Refurbished", Some(64), Some(1024), None);
        let priced = baseline("priced", "", "Refurbished", Some(64), Some(1024), Some(3999.0));
        let priced_again = baseline("priced_again", "", "Refurbished", Some(64), Some(1024), Some(2999.0));
        let candidates = vec![unpriced, priced, priced_again];
        assert_eq!(best_baseline(&o, &candidates, &policy).unwrap().source_id, "priced");
    }

    #[test]
    fn test_offer_without_sizes_has_zero_distance() {
        let policy = MatchPolicy::default();
        let o = offer(None, None);
        let b = baseline("b", "", "", None, None, Some(1.0));
        let key = match_key(&o, &b, &policy);
        assert_eq!(key.spec_distance, 0);
        assert_eq!(key.memory_distance, 0);
        assert_eq!(key.authority_tier, 1);
    }

    #[test]
    fn test_no_candidates() {
        let policy = MatchPolicy::default();
        assert!(best_baseline(&offer(Some(64), Some(1024)), &[], &policy).is_none());
    }
}
