//! Address-cleaning variants for Greek highway-kilometer addresses.
//!
//! Every variant is a pure `fn(&str) -> String` registered under a
//! unique name in a fixed-order [`registry`]. Variants that cannot find
//! their required tokens return the input unchanged; they never error
//! and never truncate to empty.
//!
//! The [`rules`] module holds the ordered first-match-wins classifier
//! that recommends a variant for a raw address.

pub mod rules;
pub mod tokens;
pub mod variants;

pub use rules::{ClassifierRule, classify, rule_table};
pub use variants::{BASELINE_VARIANT, NormalizerFn, normalize, registry, variant_names};
