//! Hard constraint filter for offers.
//!
//! Every clause is a gate; there is no partial credit. Price must be present
//! but is never compared against a bound.

use crate::model::{Constraints, Offer};

/// True when `offer` satisfies every clause of `constraints`.
pub fn meets_constraints(offer: &Offer, constraints: &Constraints) -> bool {
    if offer.chip.as_deref() != Some(constraints.chip.as_str()) {
        return false;
    }
    match offer.memory_gb {
        Some(gb) if gb >= constraints.min_memory_gb => {}
        _ => return false,
    }
    match offer.storage_gb {
        Some(gb) if gb >= constraints.min_storage_gb => {}
        _ => return false,
    }
    offer.price.is_some()
}

/// Keep only the offers that satisfy `constraints`, in input order.
pub fn filter_offers(offers: Vec<Offer>, constraints: &Constraints) -> Vec<Offer> {
    offers
        .into_iter()
        .filter(|o| meets_constraints(o, constraints))
        .collect()
}
