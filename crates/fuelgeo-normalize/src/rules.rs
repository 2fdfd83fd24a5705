//! Rule-based variant recommendation.
//!
//! A fixed, manually authored decision list evaluated top to bottom;
//! the first matching predicate wins. The predicates overlap, so the
//! order is part of the contract and is kept visible as data rather
//! than nested conditionals.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::tokens::{has_road_prefix, place_tokens};

/// Loose kilometer-unit check used by the first rule: a digit anywhere
/// before any spelling of the unit.
static KM_ANYWHERE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+.*(?:ΧΛΜ|χλμ|Km|km|ΚΜ)").expect("km anywhere regex")
});

/// One entry of the decision list.
#[derive(Clone, Serialize)]
pub struct ClassifierRule {
    /// Human-readable predicate description.
    pub description: &'static str,
    /// Variant recommended when the predicate matches.
    pub variant: &'static str,
    /// Share of the study dataset this rule fired on.
    pub confidence: f64,
    #[serde(skip_serializing)]
    predicate: fn(&str) -> bool,
}

impl ClassifierRule {
    pub fn matches(&self, address: &str) -> bool {
        (self.predicate)(address)
    }
}

impl std::fmt::Debug for ClassifierRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierRule")
            .field("description", &self.description)
            .field("variant", &self.variant)
            .field("confidence", &self.confidence)
            .finish()
    }
}

fn prefix_and_km(address: &str) -> bool {
    has_road_prefix(address) && KM_ANYWHERE.is_match(address)
}

fn has_question_mark(address: &str) -> bool {
    address.contains('?')
}

fn very_long(address: &str) -> bool {
    address.chars().count() > 60
}

fn starts_with_digit(address: &str) -> bool {
    address
        .trim()
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit())
}

fn three_or_more_places(address: &str) -> bool {
    place_tokens(address).len() >= 3
}

fn always(_address: &str) -> bool {
    true
}

/// The ordered decision list. Confidences are the pattern-prevalence
/// shares observed in the study dataset.
pub fn rule_table() -> &'static [ClassifierRule] {
    static RULES: LazyLock<Vec<ClassifierRule>> = LazyLock::new(|| {
        vec![
            ClassifierRule {
                description: "road-prefix abbreviation and kilometer unit present",
                variant: "v8_combined_basic",
                confidence: 0.54,
                predicate: prefix_and_km,
            },
            ClassifierRule {
                description: "contains a question mark",
                variant: "v9_combined_aggressive",
                confidence: 0.04,
                predicate: has_question_mark,
            },
            ClassifierRule {
                description: "longer than 60 characters",
                variant: "v12_simplify_cities_only",
                confidence: 0.11,
                predicate: very_long,
            },
            ClassifierRule {
                description: "starts with a digit",
                variant: "v11_km_first",
                confidence: 0.17,
                predicate: starts_with_digit,
            },
            ClassifierRule {
                description: "three or more place tokens",
                variant: "v13_simplify_km_cities",
                confidence: 0.08,
                predicate: three_or_more_places,
            },
            ClassifierRule {
                description: "default",
                variant: "v3_normalize_km",
                confidence: 1.0,
                predicate: always,
            },
        ]
    });
    &RULES
}

/// Recommend a cleaning variant for a raw address.
pub fn classify(address: &str) -> &'static str {
    for rule in rule_table() {
        if rule.matches(address) {
            return rule.variant;
        }
    }
    // The final rule always matches; this is unreachable in practice.
    "v3_normalize_km"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_with_km_wins_first() {
        assert_eq!(
            classify("Π.Ε.Ο. ΑΘΗΝΩΝ - ΛΑΜΙΑΣ, 68ο ΧΛΜ"),
            "v8_combined_basic"
        );
    }

    #[test]
    fn question_mark_without_km_unit_hits_rule_two() {
        assert_eq!(classify("ΦΑΡΣΑΛΑ - ΛΑΜΙΑ ?"), "v9_combined_aggressive");
    }

    #[test]
    fn long_address_hits_rule_three() {
        // 61 characters, no question mark, no road prefix.
        let address = "Διαδρομή Τρίκαλα Καλαμπάκα μεγάλης διαδρομής χωρίς τίποτα χλμ";
        assert_eq!(address.chars().count(), 61);
        assert_eq!(classify(address), "v12_simplify_cities_only");
    }

    #[test]
    fn leading_digit_hits_rule_four() {
        assert_eq!(classify("5ο χλμ Λάρισας"), "v11_km_first");
    }

    #[test]
    fn many_places_hit_rule_five() {
        assert_eq!(
            classify("Γαλατάδες Χαλκιδικής Πολύγυρος"),
            "v13_simplify_km_cities"
        );
    }

    #[test]
    fn fallthrough_recommends_unit_normalization() {
        assert_eq!(classify("Λεωφόρος Αθηνών"), "v3_normalize_km");
    }

    #[test]
    fn rules_serialize_in_order() {
        let json = serde_json::to_value(rule_table()).expect("serialize rules");
        let rules = json.as_array().expect("array");
        assert_eq!(rules.len(), 6);
        assert_eq!(rules[0]["variant"], "v8_combined_basic");
        assert_eq!(rules[5]["description"], "default");
        assert!(rules[0].get("predicate").is_none());
    }
}
