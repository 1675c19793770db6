//! Search query templates for offers and baselines.
//!
//! Placeholders: `{product}`, `{vendor}`, `{domain}`, `{chip}`, `{mem}`, `{tb}`, `{currency}`.

use bargain_core::Constraints;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryPlan {
    pub product: String,
    pub vendor: String,
    pub offers_template: String,
    /// Tried in order until one batch is acceptable.
    pub baseline_templates: Vec<String>,
}

impl Default for QueryPlan {
    fn default() -> Self {
        Self {
            product: "Mac Studio".to_string(),
            vendor: "Apple".to_string(),
            offers_template: "{product} {chip} {mem}GB {tb}TB price open box used new {currency}".to_string(),
            baseline_templates: vec![
                "{vendor} refurbished {product} {chip} price site:{domain}".to_string(),
                "site:{domain} refurbished {product} {chip}".to_string(),
                "{vendor} refurbished {product} {chip} {mem}GB {tb}TB price site:{domain}".to_string(),
                "{vendor} refurbished {product} {chip} {mem}GB {tb}TB".to_string(),
            ],
        }
    }
}

impl QueryPlan {
    fn render(&self, template: &str, constraints: &Constraints, domain: &str) -> String {
        let rendered = template
            .replace("{product}", &self.product)
            .replace("{vendor}", &self.vendor)
            .replace("{domain}", domain)
            .replace("{chip}", &constraints.chip)
            .replace("{mem}", &constraints.min_memory_gb.to_string())
            .replace("{tb}", &constraints.min_storage_tb().to_string())
            .replace("{currency}", &constraints.currency);
        rendered.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn offers_query(&self, constraints: &Constraints, domain: &str) -> String {
        self.render(&self.offers_template, constraints, domain)
    }

    pub fn baseline_queries(&self, constraints: &Constraints, domain: &str) -> Vec<String> {
        self.baseline_templates
            .iter()
            .map(|t| self.render(t, constraints, domain))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offers_query() {
        let q = QueryPlan::default().offers_query(&Constraints::default(), "apple.com");
        assert_eq!(q, "Mac Studio M2 Ultra 64GB 1TB price open box used new USD");
    }

    #[test]
    fn test_storage_tb_truncates() {
        let c = Constraints::new("M1 Ultra", 128, 1536);
        let q = QueryPlan::default().offers_query(&c, "apple.com");
        assert_eq!(q, "Mac Studio M1 Ultra 128GB 1TB price open box used new USD");
    }

    #[test]
    fn test_baseline_variants_in_order() {
        let qs = QueryPlan::default().baseline_queries(&Constraints::default(), "apple.com");
        assert_eq!(
            qs,
            vec![
                "Apple refurbished Mac Studio M2 Ultra price site:apple.com",
                "site:apple.com refurbished Mac Studio M2 Ultra",
                "Apple refurbished Mac Studio M2 Ultra 64GB 1TB price site:apple.com",
                "Apple refurbished Mac Studio M2 Ultra 64GB 1TB",
            ]
        );
    }

    #[test]
    fn test_empty_placeholder_collapses() {
        let plan = QueryPlan { vendor: String::new(), ..QueryPlan::default() };
        let qs = plan.baseline_queries(&Constraints::default(), "apple.com");
        assert_eq!(qs[0], "refurbished Mac Studio M2 Ultra price site:apple.com");
    }
}
