// ============================================================
// Layer 6 — JSON Store
// ============================================================
// Reads and writes the JSON artifacts of a run:
//
//   keyword_counts.json       ← year → category → {total, terms}
//   summary.json              ← per-category aggregates
//   views.*.json              ← plotting-ready derived views
//   analysis_config.json      ← the config that produced them
//
// Output is pretty-printed so the files diff cleanly between runs.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{fs, path::Path};

/// Serialise `value` as pretty JSON to `path`, replacing any old file.
pub fn write_json<T: ?Sized + Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
        .with_context(|| format!("Cannot write '{}'", path.display()))?;
    tracing::debug!("Wrote '{}'", path.display());
    Ok(())
}

/// Deserialise a JSON file written by `write_json`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("'{}' is not valid JSON for this type", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.json");
        let value = BTreeMap::from([("2020".to_string(), 3u64)]);

        write_json(&path, &value).unwrap();
        let back: BTreeMap<String, u64> = read_json(&path).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_read_missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let err = read_json::<u64>(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
