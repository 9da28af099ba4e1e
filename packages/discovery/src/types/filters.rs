//! Search filters and budget tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price band for a restaurant, ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Upscale,
    #[serde(rename = "$$$$")]
    FineDining,
}

impl BudgetTier {
    /// Dollar-sign symbol as used in provider prompts and responses.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Budget => "$",
            Self::Moderate => "$$",
            Self::Upscale => "$$$",
            Self::FineDining => "$$$$",
        }
    }

    /// Human-readable price band rendered into prompts.
    pub fn price_band(self) -> &'static str {
        match self {
            Self::Budget => "Budget friendly (under $15 per person)",
            Self::Moderate => "Moderate pricing ($15-$30 per person)",
            Self::Upscale => "Upscale ($30-$60 per person)",
            Self::FineDining => "Fine dining ($60+ per person)",
        }
    }

    /// Parse a dollar-sign symbol.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "$" => Some(Self::Budget),
            "$$" => Some(Self::Moderate),
            "$$$" => Some(Self::Upscale),
            "$$$$" => Some(Self::FineDining),
            _ => None,
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// User-supplied preference filters for one search.
///
/// Construct with [`SearchFilters::validated`] before handing to the
/// pipeline; after that the set is treated as immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Acceptable budget tiers; empty means any budget.
    pub budget: Vec<BudgetTier>,

    /// Dietary restriction tags (e.g. "Vegetarian", "Gluten-Free").
    pub dietary: Vec<String>,

    /// Cuisine tags (e.g. "Italian").
    pub cuisines: Vec<String>,

    /// Service types needed (e.g. "Dine-in", "Takeout").
    pub service_type: Vec<String>,

    /// Accessibility requirements (e.g. "Wheelchair Accessible").
    pub accessibility: Vec<String>,

    /// Operating-time tags (e.g. "Open Late", "Breakfast").
    pub operational: Vec<String>,

    /// Minimum acceptable rating, clamped to [0, 5].
    pub min_rating: f32,
}

impl SearchFilters {
    /// Clamp out-of-range numeric values. Tag semantics are not
    /// validated here; unknown tags pass through verbatim and are
    /// rendered into prompts as-is.
    pub fn validated(mut self) -> Self {
        self.min_rating = self.min_rating.clamp(0.0, 5.0);
        self
    }

    /// Whether dietary validation should run at all.
    pub fn has_dietary(&self) -> bool {
        !self.dietary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_tier_ordering() {
        assert!(BudgetTier::Budget < BudgetTier::FineDining);
        assert_eq!(BudgetTier::parse("$$"), Some(BudgetTier::Moderate));
        assert_eq!(BudgetTier::parse("$$$$$"), None);
    }

    #[test]
    fn test_budget_tier_serde_symbols() {
        let json = serde_json::to_string(&BudgetTier::Upscale).unwrap();
        assert_eq!(json, "\"$$$\"");
        let tier: BudgetTier = serde_json::from_str("\"$\"").unwrap();
        assert_eq!(tier, BudgetTier::Budget);
    }

    #[test]
    fn test_min_rating_clamped_high() {
        let filters = SearchFilters {
            min_rating: 7.3,
            ..Default::default()
        }
        .validated();
        assert_eq!(filters.min_rating, 5.0);
    }

    #[test]
    fn test_min_rating_clamped_low() {
        let filters = SearchFilters {
            min_rating: -2.0,
            ..Default::default()
        }
        .validated();
        assert_eq!(filters.min_rating, 0.0);
    }

    #[test]
    fn test_filters_deserialize_camel_case() {
        let filters: SearchFilters = serde_json::from_str(
            r#"{"budget": ["$$", "$$$"], "serviceType": ["Dine-in"], "minRating": 4.0}"#,
        )
        .unwrap();
        assert_eq!(filters.budget.len(), 2);
        assert_eq!(filters.service_type, vec!["Dine-in"]);
        assert_eq!(filters.min_rating, 4.0);
        assert!(filters.dietary.is_empty());
    }
}
