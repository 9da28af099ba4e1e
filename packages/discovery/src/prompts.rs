//! Prompt composition for each pipeline stage.
//!
//! Pure functions: deterministic for identical inputs, no I/O. Every
//! non-empty filter category is rendered into a labeled clause, and
//! every prompt demands a fixed return schema so extraction stays
//! reliable. Semantics of individual tags are not validated here;
//! unknown tags pass through verbatim.

use serde::Serialize;

use crate::types::{EnrichedCandidate, RawCandidate, SearchFilters};

/// Per-tag acceptance rules for dietary validation. Each bar requires
/// substantive menu evidence, not a single token side dish.
const DIETARY_RULES: &[(&str, &str)] = &[
    (
        "Vegetarian",
        "must offer multiple dedicated meat-free dishes, not just salads or sides",
    ),
    (
        "Vegan",
        "must offer dishes free of all animal products, clearly identified on the menu",
    ),
    (
        "Gluten-Free",
        "must offer gluten-free preparations or a dedicated gluten-free menu section",
    ),
    (
        "Dairy-Free",
        "must offer substantial dishes prepared without dairy ingredients",
    ),
    (
        "Nut-Free",
        "must be able to prepare main dishes without nuts or nut oils",
    ),
    (
        "Halal",
        "must serve halal-certified meat or be a recognized halal establishment",
    ),
    (
        "Kosher",
        "must be kosher-certified or serve a recognizably kosher menu",
    ),
];

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join(", ")
    }
}

/// Render every filter category into labeled clauses.
fn filter_clauses(location: &str, filters: &SearchFilters) -> String {
    let budget = if filters.budget.is_empty() {
        "Any budget".to_string()
    } else {
        filters
            .budget
            .iter()
            .map(|b| b.price_band())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "- Location: {location}\n\
         - Budget Level: {budget}\n\
         - Dietary Restrictions/Preferences: {dietary}\n\
         - Cuisine Types: {cuisines}\n\
         - Service Types Needed: {service}\n\
         - Accessibility Features: {accessibility}\n\
         - When to Dine: {operational}\n\
         - Minimum Rating: {min_rating:.1}+ stars",
        location = location,
        budget = budget,
        dietary = join_or(&filters.dietary, "No specific restrictions"),
        cuisines = join_or(&filters.cuisines, "Any cuisine"),
        service = join_or(&filters.service_type, "Any service type"),
        accessibility = join_or(&filters.accessibility, "No specific requirements"),
        operational = join_or(&filters.operational, "Anytime"),
        min_rating = filters.min_rating,
    )
}

/// Stage 1: candidate discovery. Demands 5-8 real, named
/// establishments and a fixed JSON array schema.
pub fn discovery_prompt(location: &str, filters: &SearchFilters) -> String {
    format!(
        r#"You are a restaurant discovery agent. Find the BEST restaurants in {location} that match ALL of these criteria:

**Search Criteria:**
{clauses}

**Task:**
Research and list 5-8 real, named establishments matching every criterion above. Use EXACT restaurant names. Estimate ratings and coordinates when you are not certain; omit coordinates entirely if you have no estimate.

**Return format:**
Return ONLY a valid JSON array (no markdown, no code fences, no prose) in exactly this shape:
[
  {{
    "name": "Restaurant Name",
    "address": "Street Address, City, State, ZIP",
    "phone": "+1 415 555 0100",
    "website": "https://restaurant-website.com",
    "cuisines": ["Cuisine1", "Cuisine2"],
    "rating": 4.5,
    "budget": "$$",
    "hours": "Mon-Sun 11am-10pm",
    "wheelchair_accessible": true,
    "menu_items": ["Dish matching the dietary needs", "Another dish"],
    "latitude": 37.7749,
    "longitude": -122.4194,
    "image": "https://direct-photo-url.jpg"
  }}
]
Leave out any field you cannot fill except "name"."#,
        location = location,
        clauses = filter_clauses(location, filters),
    )
}

/// Stage 2: enrichment. Embeds the full raw candidate list and
/// instructs the generator to filter, score, annotate and sort.
pub fn enrichment_prompt(
    location: &str,
    filters: &SearchFilters,
    candidates: &[RawCandidate],
) -> String {
    let candidates_json =
        serde_json::to_string_pretty(candidates).unwrap_or_else(|_| "[]".to_string());
    let dietary_weight = if filters.has_dietary() {
        "Weight the score heavily toward dietary compliance: a candidate with strong dietary evidence should outscore one that merely matches cuisine and budget."
    } else {
        "Weight the score by how completely the candidate matches the requested criteria."
    };

    format!(
        r#"You are refining restaurant search results for {location}.

**Requested criteria:**
{clauses}

**Candidates:**
{candidates_json}

**Task:**
1. Keep ONLY candidates that match ALL requested criteria; drop the rest.
2. For each kept candidate compute "match_score" (integer 0-100). {dietary_weight}
3. Extract "matching_menu_items": the subset of the candidate's menu items relevant to the dietary preferences (all of them when no dietary preference was given).
4. Write one sentence "why_it_matches".
5. Fill "accessibility_features", "service_types" and "tags" from what you know about the establishment.
6. Sort the output descending by match_score.

**Return format:**
Return ONLY a valid JSON object (no markdown, no code fences) in exactly this shape:
{{
  "restaurants": [
    {{
      "name": "Exact name from the candidate list",
      "address": "...",
      "phone": "...",
      "website": "https://...",
      "menu_link": "https://...",
      "cuisines": ["..."],
      "rating": 4.5,
      "budget": "$$",
      "hours": "...",
      "latitude": 37.7749,
      "longitude": -122.4194,
      "match_score": 92,
      "matching_menu_items": ["..."],
      "why_it_matches": "...",
      "accessibility_features": ["..."],
      "service_types": ["..."],
      "tags": ["..."]
    }}
  ],
  "search_summary": "One or two sentences describing what was found"
}}"#,
        location = location,
        clauses = filter_clauses(location, filters),
        candidates_json = candidates_json,
        dietary_weight = dietary_weight,
    )
}

/// Trimmed candidate view embedded in the validation prompt. Image
/// URLs deliberately stay out of the model's sight.
#[derive(Serialize)]
struct ValidationPayload<'a> {
    name: &'a str,
    cuisines: &'a [String],
    rating: f32,
    budget: Option<&'a str>,
    matching_menu_items: &'a [String],
    why_it_matches: &'a str,
}

/// Stage 3: dietary validation. Applies named per-tag acceptance
/// rules and drops candidates that fail the evidence bar.
pub fn validation_prompt(candidates: &[EnrichedCandidate], dietary: &[String]) -> String {
    let payload: Vec<ValidationPayload<'_>> = candidates
        .iter()
        .map(|c| ValidationPayload {
            name: &c.name,
            cuisines: &c.cuisines,
            rating: c.rating,
            budget: c.budget.as_deref(),
            matching_menu_items: &c.matching_menu_items,
            why_it_matches: &c.why_it_matches,
        })
        .collect();
    let candidates_json =
        serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "[]".to_string());

    let rules = DIETARY_RULES
        .iter()
        .map(|(tag, rule)| format!("- {tag}: {rule}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are verifying dietary-accommodation claims for restaurants.

**Requested dietary restrictions:** {dietary}

**Acceptance rules (a restaurant must meet the bar for EVERY requested restriction):**
{rules}

**Restaurants to verify:**
{candidates_json}

**Task:**
Re-check each restaurant's claims against the rules above. DROP any restaurant that fails the bar for a requested restriction. For each survivor report "dietary_match_confidence" (integer 0-100) and a short "validation_notes" naming the evidence.

**Return format:**
Return ONLY a valid JSON object (no markdown, no code fences):
{{
  "restaurants": [
    {{
      "name": "Exact name from the input list",
      "dietary_match_confidence": 85,
      "validation_notes": "Dedicated vegetarian section with six entrees"
    }}
  ]
}}"#,
        dietary = dietary.join(", "),
        rules = rules,
        candidates_json = candidates_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BudgetTier;

    fn filters() -> SearchFilters {
        SearchFilters {
            budget: vec![BudgetTier::Moderate, BudgetTier::Upscale],
            dietary: vec!["Vegetarian".to_string()],
            cuisines: vec!["Italian".to_string()],
            min_rating: 4.0,
            ..Default::default()
        }
        .validated()
    }

    #[test]
    fn test_discovery_prompt_is_deterministic() {
        let f = filters();
        assert_eq!(
            discovery_prompt("San Francisco, CA", &f),
            discovery_prompt("San Francisco, CA", &f)
        );
    }

    #[test]
    fn test_discovery_prompt_renders_price_bands() {
        let prompt = discovery_prompt("San Francisco, CA", &filters());
        assert!(prompt.contains("Moderate pricing ($15-$30 per person)"));
        assert!(prompt.contains("Upscale ($30-$60 per person)"));
        assert!(prompt.contains("Vegetarian"));
        assert!(prompt.contains("4.0+ stars"));
        assert!(prompt.contains("\"name\""));
    }

    #[test]
    fn test_empty_categories_render_defaults() {
        let prompt = discovery_prompt("Austin, TX", &SearchFilters::default());
        assert!(prompt.contains("Any budget"));
        assert!(prompt.contains("No specific restrictions"));
        assert!(prompt.contains("Any cuisine"));
        assert!(prompt.contains("Anytime"));
    }

    #[test]
    fn test_unknown_tags_pass_through_verbatim() {
        let f = SearchFilters {
            dietary: vec!["Fruitarian-Plus".to_string()],
            ..Default::default()
        };
        let prompt = discovery_prompt("Austin, TX", &f);
        assert!(prompt.contains("Fruitarian-Plus"));
    }

    #[test]
    fn test_enrichment_prompt_embeds_candidates() {
        let raw: RawCandidate = serde_json::from_str(r#"{"name": "Delfina"}"#).unwrap();
        let prompt = enrichment_prompt("San Francisco, CA", &filters(), &[raw]);
        assert!(prompt.contains("Delfina"));
        assert!(prompt.contains("match_score"));
        assert!(prompt.contains("search_summary"));
    }

    #[test]
    fn test_validation_prompt_names_rules_and_hides_images() {
        let candidate = EnrichedCandidate {
            name: "Greens".to_string(),
            address: String::new(),
            phone: None,
            website: None,
            menu_link: None,
            cuisines: vec!["Vegetarian".to_string()],
            rating: 4.5,
            budget: Some("$$".to_string()),
            hours: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            match_score: 90,
            matching_menu_items: vec!["Mushroom bourguignon".to_string()],
            why_it_matches: "Fully vegetarian menu".to_string(),
            accessibility_features: Vec::new(),
            service_types: Vec::new(),
            tags: Vec::new(),
            image: crate::types::ResolvedImage::Verified(
                "https://secret-image-host.com/x.jpg".to_string(),
            ),
        };
        let prompt = validation_prompt(&[candidate], &["Vegetarian".to_string()]);
        assert!(prompt.contains("meat-free"));
        assert!(prompt.contains("dietary_match_confidence"));
        assert!(!prompt.contains("secret-image-host"));
    }
}
