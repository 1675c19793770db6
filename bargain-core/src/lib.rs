//! bargain-core: data model, policies, constraint filter, baseline matcher and ranking

pub mod model;
pub mod policy;
pub mod filter;
pub mod matcher;
pub mod ranking;
pub mod search;

pub use model::{Baseline, ChallengeResult, Condition, Constraints, Offer, RawRecord, ScoredResult};
pub use policy::{ConditionRule, ExtractionPolicy, MatchPolicy};
pub use filter::{filter_offers, meets_constraints};
pub use matcher::{best_baseline, is_authoritative, match_key, MatchKey};
pub use ranking::{discount_pct, rank};
pub use search::{SearchError, SearchProvider};
