//! bargain-challenge: offer/baseline query orchestration, matching and ranking of discounts

pub mod queries;
pub mod challenge;

pub use queries::QueryPlan;
pub use challenge::{batch_is_acceptable, run_challenge, Challenge, ChallengeConfig};
