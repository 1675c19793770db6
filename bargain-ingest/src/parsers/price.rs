//! Dollar-amount extraction from listing text and vendor URLs.
//!
//! Snippets routinely carry several amounts ("$21 off $2,499", "was $5,999 now
//! $4,299"). Candidates below the floor are dropped as fragments; among the rest
//! the smallest one inside the typical band wins, else the smallest overall.

use anyhow::Result;
use bargain_core::ExtractionPolicy;
use regex::Regex;

/// Comma-grouped ("2,299") or plain ("2299") digits, optional cents.
const AMOUNT: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{2})?";

pub struct PriceParser {
    amount_re: Regex,
    url_param_re: Regex,
    floor: f64,
    band_min: f64,
    band_max: f64,
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', "")
        .parse()
        .ok()
        .filter(|p: &f64| p.is_finite())
}

impl PriceParser {
    pub fn new(policy: &ExtractionPolicy) -> Result<Self> {
        let amount_re = Regex::new(&format!(r"\$\s*(?P<amount>{AMOUNT})"))?;
        // e.g. ...?price=$3,399.00 or ...&price=%243399
        let url_param_re = Regex::new(&format!(r"price=(?:\$|%24)?(?P<amount>{AMOUNT})"))?;

        Ok(Self {
            amount_re,
            url_param_re,
            floor: policy.price_floor,
            band_min: policy.typical_band_min,
            band_max: policy.typical_band_max,
        })
    }

    fn plausible(&self, amount: f64) -> bool {
        amount > 0.0 && amount >= self.floor
    }

    /// Every `$`-prefixed amount that clears the floor, in text order.
    pub fn candidates(&self, text: &str) -> Vec<f64> {
        self.amount_re
            .captures_iter(text)
            .filter_map(|caps| parse_amount(&caps["amount"]))
            .filter(|&p| self.plausible(p))
            .collect()
    }

    pub fn extract(&self, text: &str) -> Option<f64> {
        let candidates = self.candidates(text);

        let in_band = candidates
            .iter()
            .copied()
            .filter(|&p| p >= self.band_min && p <= self.band_max)
            .min_by(f64::total_cmp);

        in_band.or_else(|| candidates.into_iter().min_by(f64::total_cmp))
    }

    /// Price carried in a `price=` query parameter; vendor pages sometimes
    /// expose it only there.
    pub fn extract_from_url(&self, url: &str) -> Option<f64> {
        let caps = self.url_param_re.captures(url)?;
        parse_amount(&caps["amount"]).filter(|&p| self.plausible(p))
    }
}
