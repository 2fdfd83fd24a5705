//! The cleaning-variant set.
//!
//! Each variant reinterprets a raw address into one candidate layout.
//! They share the token machinery from [`crate::tokens`] and differ
//! only in which tokens they keep, whether grammatical suffixes are
//! approximated, and whether road-prefix tokens are stripped.
//!
//! The genitive-suffix approximation in `v21`/`v22` is a deliberately
//! naive heuristic carried over from the study design; it is wrong for
//! many city names and is kept that way.

use std::sync::LazyLock;

use regex::Regex;

use crate::tokens::{collapse_whitespace, km_number, place_tokens};

/// Signature every cleaning variant conforms to.
pub type NormalizerFn = fn(&str) -> String;

/// The fixed baseline variant used for improvement deltas.
pub const BASELINE_VARIANT: &str = "v1_original";

/// Road-prefix abbreviation patterns, applied in order. Dotted forms
/// first so "Π.Ε.Ο." does not leave stray dots behind.
static PREFIX_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)Π\.?\s?Ε\.?\s?Ο\.?",
        r"(?i)Ν\.?\s?Ε\.?\s?Ο\.?",
        r"(?i)Ε\.?\s?Ο\.?",
        r"(?i)ΠΕΟ|ΕΟ|ΝΕΟ",
        r"(?i)ΠΑΛΙΑ\s+ΕΘΝΙΚΗ?\s+ΟΔΟΥ?",
        r"(?i)ΕΘΝΙΚΗΣ?\s+ΟΔΟΥ?",
        r"(?i)ΕΠΑΡΧΙΑΚΗ?\s+ΟΔΟΥ?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("prefix pattern"))
    .collect()
});

/// Any spelling of the kilometer unit, rewritten to canonical "χλμ".
static UNIT_SPELLINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ΧΛΜ|χλμ|χιλ\.?|ΚΜ").expect("unit regex"));

/// A number, optional ordinal letter, then the canonical unit; the
/// replacement re-anchors the ordinal "ο" onto the number.
static ORDINAL_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)[οηόήΟΗ]?\s+χλμ").expect("ordinal regex"));

/// Punctuation dropped by the aggressive variant.
static NOISE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?,\-]").expect("noise regex"));

/// First run of digits anywhere, unit or not. Only the highway variant
/// is this permissive; everything else demands a unit token.
static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("bare number regex"));

/// Major cities (nominative and genitive spellings) that anchor the
/// "Εθνική Οδός" layout of v25.
const BIG_CITIES: [&str; 18] = [
    "Αθήνα",
    "Αθηνών",
    "Θεσσαλονίκη",
    "Θεσσαλονίκης",
    "Πάτρα",
    "Πατρών",
    "Λάρισα",
    "Λαρίσης",
    "Ηράκλειο",
    "Ηρακλείου",
    "Βόλος",
    "Βόλου",
    "Ιωάννινα",
    "Ιωαννίνων",
    "Χανιά",
    "Χανίων",
    "Λαμία",
    "Λαμίας",
];

/// Known (city, city) pairs mapped to a highway designator.
const HIGHWAY_TABLE: [(&str, &str, &str); 6] = [
    ("Αθήνα", "Λαμία", "Α1"),
    ("Αθήνα", "Θεσσαλονίκη", "Α1"),
    ("Αθήνα", "Κόρινθος", "Α8"),
    ("Αθήνα", "Πάτρα", "Α8"),
    ("Λάρισα", "Βόλος", "ΕΟ3"),
    ("Θεσσαλονίκη", "Καβάλα", "Α2"),
];

/// v1: the untouched input; every other variant is compared against it.
pub fn v1_original(address: &str) -> String {
    address.to_string()
}

/// v3: canonicalize the kilometer unit and re-anchor the ordinal.
pub fn v3_normalize_km(address: &str) -> String {
    let unified = UNIT_SPELLINGS.replace_all(address, "χλμ");
    let anchored = ORDINAL_ANCHOR.replace_all(&unified, "${1}ο χλμ");
    collapse_whitespace(&anchored)
}

/// v8: strip every road-prefix abbreviation, then normalize the unit.
pub fn v8_combined_basic(address: &str) -> String {
    let mut stripped = address.to_string();
    for pattern in PREFIX_PATTERNS.iter() {
        stripped = pattern.replace_all(&stripped, "").into_owned();
    }
    v3_normalize_km(&stripped)
}

/// v9: v8 plus removal of question marks, commas and dashes.
pub fn v9_combined_aggressive(address: &str) -> String {
    let stripped = v8_combined_basic(address);
    collapse_whitespace(&NOISE_CHARS.replace_all(&stripped, " "))
}

/// v11: `{n}ο χλμ {city1} {city2}`.
pub fn v11_km_first(address: &str) -> String {
    let cities = place_tokens(address);
    match (km_number(address), cities.as_slice()) {
        (Some(km), [first, second, ..]) => format!("{km}ο χλμ {first} {second}"),
        _ => address.to_string(),
    }
}

/// v12: the first two place names and nothing else.
pub fn v12_simplify_cities_only(address: &str) -> String {
    let cities = place_tokens(address);
    match cities.as_slice() {
        [first, second, ..] => format!("{first} {second}"),
        _ => address.to_string(),
    }
}

/// v13: `{city1} {city2}, {n}ο χλμ`.
pub fn v13_simplify_km_cities(address: &str) -> String {
    let cities = place_tokens(address);
    match (km_number(address), cities.as_slice()) {
        (Some(km), [first, second, ..]) => format!("{first} {second}, {km}ο χλμ"),
        _ => address.to_string(),
    }
}

/// v20: `{n} Km {city1} {city2}`.
pub fn v20_km_city1_city2(address: &str) -> String {
    let cities = place_tokens(address);
    match (km_number(address), cities.as_slice()) {
        (Some(km), [first, second, ..]) => format!("{km} Km {first} {second}"),
        _ => address.to_string(),
    }
}

/// v21: v20 with a genitive-like suffix approximation.
pub fn v21_km_city1_city2_genitive(address: &str) -> String {
    let cities = place_tokens(address);
    match (km_number(address), cities.as_slice()) {
        (Some(km), [first, second, ..]) => {
            let first = genitive_first(first);
            let second = genitive_second(second);
            format!("{km} Km {first} {second}")
        }
        _ => address.to_string(),
    }
}

/// v22: `{n} Km Εθνικής Οδού {city1} {city2}` with genitive suffixes.
pub fn v22_km_eo_city1_city2(address: &str) -> String {
    let cities = place_tokens(address);
    match (km_number(address), cities.as_slice()) {
        (Some(km), [first, second, ..]) => {
            let first = genitive_first(first);
            let second = genitive_second(second);
            format!("{km} Km Εθνικής Οδού {first} {second}")
        }
        _ => address.to_string(),
    }
}

/// v23: `{city1} προς {city2}`, with the kilometer appended when known.
pub fn v23_city1_pros_city2(address: &str) -> String {
    let cities = place_tokens(address);
    match cities.as_slice() {
        [first, second, ..] => match km_number(address) {
            Some(km) => format!("{first} προς {second}, {km}ο χλμ"),
            None => format!("{first} προς {second}"),
        },
        _ => address.to_string(),
    }
}

/// v25: `Εθνική Οδός {big city} {other city}, {n}ο χιλιόμετρο` when a
/// known major city appears; otherwise fall back to prefix stripping.
pub fn v25_big_cities_pattern(address: &str) -> String {
    let big_city = BIG_CITIES.iter().find(|city| address.contains(*city));
    if let (Some(big_city), Some(km)) = (big_city, km_number(address)) {
        let other = place_tokens(address)
            .into_iter()
            .find(|token| token != big_city);
        if let Some(other) = other {
            return format!("Εθνική Οδός {big_city} {other}, {km}ο χιλιόμετρο");
        }
    }
    v8_combined_basic(address)
}

/// v26: `Επαρχιακή Οδός {city1} - {city2}, στο {n}ο χιλιόμετρο`;
/// without the required tokens, fall back to prefix stripping.
pub fn v26_small_cities_pattern(address: &str) -> String {
    let cities = place_tokens(address);
    match (km_number(address), cities.as_slice()) {
        (Some(km), [first, second, ..]) => {
            format!("Επαρχιακή Οδός {first} - {second}, στο {km}ο χιλιόμετρο")
        }
        _ => v8_combined_basic(address),
    }
}

/// v27: an English rendering, `Highway {city1}-{city2} km {n}`.
pub fn v27_english_km_pattern(address: &str) -> String {
    let cities = place_tokens(address);
    match (km_number(address), cities.as_slice()) {
        (Some(km), [first, second, ..]) => format!("Highway {first}-{second} km {km}"),
        _ => address.to_string(),
    }
}

/// v29: kilometer plus a single place, `{n}ο χλμ {city1}`.
pub fn v29_only_km_number(address: &str) -> String {
    let cities = place_tokens(address);
    match (km_number(address), cities.first()) {
        (Some(km), Some(first)) => format!("{km}ο χλμ {first}"),
        _ => address.to_string(),
    }
}

/// v30: map a known city pair to its highway designator; unknown pairs
/// fall back to the prefix-stripping variant.
pub fn v30_inferred_highway(address: &str) -> String {
    let cities = place_tokens(address);
    if cities.len() >= 2 {
        for (a, b, highway) in HIGHWAY_TABLE {
            if cities.contains(&a) && cities.contains(&b) {
                // Any bare number counts as the kilometer here, unit
                // token or not.
                let km = BARE_NUMBER
                    .captures(address)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str());
                return match km {
                    Some(km) => format!("{highway} {km} km"),
                    None => format!("{highway} {} {}", cities[0], cities[1]),
                };
            }
        }
    }
    v8_combined_basic(address)
}

fn genitive_first(city: &str) -> String {
    match city.strip_suffix('α') {
        Some(stem) => format!("{stem}ών"),
        None => format!("{city}ών"),
    }
}

fn genitive_second(city: &str) -> String {
    if city.ends_with('α') {
        format!("{city}ς")
    } else {
        format!("{city}ας")
    }
}

/// The variant registry, in the fixed iteration order every consumer
/// (evaluator, selector, report columns) uses.
pub fn registry() -> &'static [(&'static str, NormalizerFn)] {
    &[
        ("v1_original", v1_original),
        ("v3_normalize_km", v3_normalize_km),
        ("v8_combined_basic", v8_combined_basic),
        ("v9_combined_aggressive", v9_combined_aggressive),
        ("v11_km_first", v11_km_first),
        ("v12_simplify_cities_only", v12_simplify_cities_only),
        ("v13_simplify_km_cities", v13_simplify_km_cities),
        ("v20_km_city1_city2", v20_km_city1_city2),
        ("v21_km_city1_city2_genitive", v21_km_city1_city2_genitive),
        ("v22_km_eo_city1_city2", v22_km_eo_city1_city2),
        ("v23_city1_pros_city2", v23_city1_pros_city2),
        ("v25_big_cities_pattern", v25_big_cities_pattern),
        ("v26_small_cities_pattern", v26_small_cities_pattern),
        ("v27_english_km_pattern", v27_english_km_pattern),
        ("v29_only_km_number", v29_only_km_number),
        ("v30_inferred_highway", v30_inferred_highway),
    ]
}

/// Registered variant names, in registry order.
pub fn variant_names() -> Vec<&'static str> {
    registry().iter().map(|(name, _)| *name).collect()
}

/// Apply a variant by name. Returns `None` for unknown names.
pub fn normalize(variant: &str, address: &str) -> Option<String> {
    registry()
        .iter()
        .find(|(name, _)| *name == variant)
        .map(|(_, f)| f(address))
}
