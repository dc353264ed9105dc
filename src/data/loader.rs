// ============================================================
// Layer 4 — Filing Loader
// ============================================================
// Loads annual filings (.html / .htm) from a directory and
// resolves each file's fiscal year.
//
// Year resolution, in priority order:
//   1. An explicit override for the file name
//      (--year acme-10k.html=2021 on the command line)
//   2. The first "20xx" token in the file name
//      (acme_10k_2021.html → "2021")
//
// Files with no resolvable year are still returned, with
// `year: None`; the pipeline skips them and reports
// NoYearResolved if nothing usable is left.
//
// Files are returned sorted by file name so that runs over the
// same directory are reproducible.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

/// Extensions accepted as filings (compared case-insensitively)
const ALLOWED_EXTENSIONS: [&str; 2] = ["html", "htm"];

static YEAR_IN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(20\d{2})").expect("static year pattern is valid"));

/// Take the first 20xx token of a file name as its fiscal year.
pub fn year_from_filename(name: &str) -> Option<String> {
    YEAR_IN_NAME.find(name).map(|m| m.as_str().to_string())
}

/// True for .html / .htm paths
pub fn is_allowed_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_EXTENSIONS.iter().any(|a| e.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

/// Loads every filing in a directory.
/// Implements the DocumentSource trait from Layer 3.
pub struct HtmlLoader {
    dir: PathBuf,
    /// file name → year label
    year_overrides: HashMap<String, String>,
}

impl HtmlLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir:            dir.into(),
            year_overrides: HashMap::new(),
        }
    }

    /// Attach explicit year labels for files whose names carry none
    /// (or carry the wrong one).
    pub fn with_year_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.year_overrides = overrides;
        self
    }

    fn resolve_year(&self, file_name: &str) -> Option<String> {
        self.year_overrides
            .get(file_name)
            .cloned()
            .or_else(|| year_from_filename(file_name))
    }
}

impl DocumentSource for HtmlLoader {
    fn load_all(&self) -> Result<Vec<Document>> {
        if !self.dir.is_dir() {
            anyhow::bail!("Documents directory '{}' does not exist", self.dir.display());
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read directory '{}'", self.dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && is_allowed_file(&path) {
                paths.push(path);
            } else {
                tracing::debug!("Ignoring '{}': not an .html/.htm file", path.display());
            }
        }
        paths.sort();

        let mut docs = Vec::with_capacity(paths.len());
        for path in paths {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();

            let html = fs::read(&path)
                .with_context(|| format!("Cannot read '{}'", path.display()))?;

            match self.resolve_year(&file_name) {
                Some(year) => {
                    tracing::debug!("Loaded: {} → year {} ({} bytes)", file_name, year, html.len());
                    docs.push(Document::new(file_name, year, html));
                }
                None => {
                    tracing::warn!(
                        "No year found in '{}'; name it like 'report_2021.html' or pass --year {}=<year>",
                        file_name,
                        file_name
                    );
                    docs.push(Document::without_year(file_name, html));
                }
            }
        }

        tracing::info!("Loaded {} filings from '{}'", docs.len(), self.dir.display());
        Ok(docs)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_year_from_filename() {
        assert_eq!(year_from_filename("acme_10k_2021.html").as_deref(), Some("2021"));
        assert_eq!(year_from_filename("2019-2020.htm").as_deref(), Some("2019"));
        assert_eq!(year_from_filename("annual-report.html"), None);
        assert_eq!(year_from_filename("fy1999.html"), None);
    }

    #[test]
    fn test_allowed_extensions() {
        assert!(is_allowed_file(Path::new("a.html")));
        assert!(is_allowed_file(Path::new("a.HTM")));
        assert!(!is_allowed_file(Path::new("a.pdf")));
        assert!(!is_allowed_file(Path::new("html")));
    }

    #[test]
    fn test_loads_html_files_sorted_with_years() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("acme_2021.html"), "<p>b</p>").unwrap();
        fs::write(dir.path().join("acme_2020.htm"), "<p>a</p>").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = HtmlLoader::new(dir.path()).load_all().unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].source, "acme_2020.htm");
        assert_eq!(docs[0].resolved_year(), Some("2020"));
        assert_eq!(docs[1].resolved_year(), Some("2021"));
        assert_eq!(docs[1].html, b"<p>b</p>");
    }

    #[test]
    fn test_override_beats_file_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("report.html"), "<p>x</p>").unwrap();
        fs::write(dir.path().join("filed_2023.html"), "<p>y</p>").unwrap();

        let overrides = HashMap::from([
            ("report.html".to_string(), "2022".to_string()),
            ("filed_2023.html".to_string(), "2022".to_string()),
        ]);
        let docs = HtmlLoader::new(dir.path())
            .with_year_overrides(overrides)
            .load_all()
            .unwrap();

        assert!(docs.iter().all(|d| d.resolved_year() == Some("2022")));
    }

    #[test]
    fn test_unresolved_year_is_kept_without_label() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("annual.html"), "<p>x</p>").unwrap();

        let docs = HtmlLoader::new(dir.path()).load_all().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].resolved_year(), None);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(HtmlLoader::new(missing).load_all().is_err());
    }
}
