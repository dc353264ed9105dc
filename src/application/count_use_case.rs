// ============================================================
// Layer 2 — CountUseCase
// ============================================================
// Counts one filing against a taxonomy, with no year handling
// and no exports. Useful for checking a keywords file against a
// single document before running a full analysis.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::analyze_use_case::load_taxonomy;
use crate::data::{counter::KeywordCounter, extractor::TextExtractor};
use crate::domain::counts::DocumentCounts;

pub struct CountUseCase {
    keywords_path: PathBuf,
    file:          PathBuf,
}

impl CountUseCase {
    pub fn new(keywords_path: impl Into<PathBuf>, file: impl Into<PathBuf>) -> Self {
        Self {
            keywords_path: keywords_path.into(),
            file:          file.into(),
        }
    }

    pub fn execute(&self) -> Result<DocumentCounts> {
        let taxonomy = load_taxonomy(&self.keywords_path)?;
        let counter = KeywordCounter::new(&taxonomy)?;

        let html = fs::read(&self.file)
            .with_context(|| format!("Cannot read '{}'", self.file.display()))?;
        let text = TextExtractor::new().extract(&html);
        tracing::debug!("Extracted {} chars from '{}'", text.len(), self.file.display());

        Ok(counter.count(&text))
    }
}
