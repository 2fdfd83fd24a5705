//! Token extraction shared by all cleaning variants.

use std::sync::LazyLock;

use regex::Regex;

/// Kilometer marker: a number, an optional ordinal letter, and any
/// recognized spelling of the unit ("68ο ΧΛΜ", "5 km", "12ΚΜ").
static KM_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)[οηόήOH]?\s*(?:ΧΛΜ|χλμ|Km|km|ΚΜ)").expect("km marker regex")
});

/// A capitalized word in Greek or Latin script: one uppercase letter
/// followed by lowercase letters (accented vowels included).
static PLACE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[Α-ΩΆΈΉΊΌΎΏA-Z][α-ωάέήίόύώΐΰϊϋa-z]+").expect("place token regex")
});

/// Unit and road-prefix words that look like place tokens but are not.
const KEYWORDS: [&str; 7] = ["ΧΛΜ", "KM", "ΠΕΟ", "ΕΟ", "ΝΕΟ", "ΟΔΟΣ", "ΕΘΝΙΚΗΣ"];

/// Any abbreviation spelling of the old/new/plain national-road prefix.
static ROAD_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Π\.?\s?Ε\.?\s?Ο\.?|Ν\.?\s?Ε\.?\s?Ο\.?|Ε\.?\s?Ο\.?|ΠΕΟ|ΝΕΟ|ΕΟ")
        .expect("road prefix regex")
});

/// True when the address carries a road-prefix abbreviation.
pub fn has_road_prefix(address: &str) -> bool {
    ROAD_PREFIX.is_match(address)
}

/// Extract the kilometer number from the first kilometer marker, if any.
pub fn km_number(address: &str) -> Option<&str> {
    KM_MARKER
        .captures(address)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// True when the address carries a kilometer marker.
pub fn has_km_marker(address: &str) -> bool {
    KM_MARKER.is_match(address)
}

/// All place-name tokens in order of appearance, keyword set excluded.
pub fn place_tokens(address: &str) -> Vec<&str> {
    PLACE_TOKEN
        .find_iter(address)
        .map(|m| m.as_str())
        .filter(|token| !KEYWORDS.contains(&token.to_uppercase().as_str()))
        .collect()
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
