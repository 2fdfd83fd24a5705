//! Classifier rules as a machine-readable JSON document.

use std::path::Path;

use anyhow::{Context, Result};

use fuelgeo_normalize::rule_table;

/// Write the ordered classifier rule list as pretty-printed JSON.
pub fn write_rules_json(path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&rule_table())
        .context("serializing classifier rules")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing rules file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_serialize_in_evaluation_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rules.json");
        write_rules_json(&path).expect("write rules");

        let content = std::fs::read_to_string(&path).expect("read file");
        let rules: serde_json::Value = serde_json::from_str(&content).expect("parse json");
        let rules = rules.as_array().expect("rule array");
        assert_eq!(rules.len(), 6);
        assert_eq!(rules[0]["variant"], "v8_combined_basic");
        assert_eq!(rules[5]["variant"], "v3_normalize_km");
        assert_eq!(rules[5]["confidence"], 1.0);
    }
}
