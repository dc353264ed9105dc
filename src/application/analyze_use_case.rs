// ============================================================
// Layer 2 — AnalyzeUseCase
// ============================================================
// Runs one company's analysis from files on disk to files on
// disk:
//
//   Step 1: Read the keyword taxonomy JSON   (Layer 3 - domain)
//   Step 2: Load filings, resolve years      (Layer 4 - data)
//   Step 3: Run the analysis pipeline        (Layer 2 - pipeline)
//   Step 4: Write JSON / CSV exports          (Layer 6 - infra)
//
// The returned report lets the CLI print a summary without
// reading anything back from disk.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::application::pipeline::{analyze_with, AnalysisOptions, AnalysisReport};
use crate::analysis::views::DEFAULT_TOP_N;
use crate::data::loader::HtmlLoader;
use crate::domain::{
    taxonomy::Taxonomy,
    traits::{DocumentSource, ReportSink},
};
use crate::infra::{json_store::read_json, report_writer::ReportWriter};

// ─── Analysis Configuration ──────────────────────────────────────────────────
// Everything needed to reproduce a run. Saved next to the outputs
// as analysis_config.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    pub company_name:   String,
    pub keywords_path:  PathBuf,
    pub docs_dir:       PathBuf,
    pub output_dir:     PathBuf,
    pub top_n:          usize,
    /// file name → year label, for files whose names carry no year
    pub year_overrides: BTreeMap<String, String>,
    pub start_year:     Option<String>,
    pub end_year:       Option<String>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            company_name:   String::new(),
            keywords_path:  PathBuf::from("keywords.json"),
            docs_dir:       PathBuf::from("uploads"),
            output_dir:     PathBuf::from("outputs"),
            top_n:          DEFAULT_TOP_N,
            year_overrides: BTreeMap::new(),
            start_year:     None,
            end_year:       None,
        }
    }
}

impl AnalyzeConfig {
    /// Load a config saved as analysis_config.json by an earlier run
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Growth window from the start/end years. Supplying only one end
    /// is an error; supplying neither means earliest → latest.
    pub fn growth_window(&self) -> Result<Option<(String, String)>> {
        match (&self.start_year, &self.end_year) {
            (Some(s), Some(e)) => Ok(Some((s.clone(), e.clone()))),
            (None, None) => Ok(None),
            _ => anyhow::bail!("--start-year and --end-year must be given together"),
        }
    }
}

/// Read and validate a taxonomy file.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read keywords file '{}'", path.display()))?;
    Taxonomy::from_json(&json)
        .with_context(|| format!("Invalid keywords file '{}'", path.display()))
}

// ─── AnalyzeUseCase ───────────────────────────────────────────────────────────
pub struct AnalyzeUseCase {
    config: AnalyzeConfig,
}

impl AnalyzeUseCase {
    pub fn new(config: AnalyzeConfig) -> Self {
        Self { config }
    }

    /// Execute the full analysis end to end
    pub fn execute(&self) -> Result<AnalysisReport> {
        let cfg = &self.config;
        if cfg.company_name.trim().is_empty() {
            anyhow::bail!("Company name is required");
        }

        // ── Step 1: Taxonomy ──────────────────────────────────────────────────
        let taxonomy = load_taxonomy(&cfg.keywords_path)?;
        tracing::info!(
            "Tracking {} categories ({} terms) from '{}'",
            taxonomy.len(),
            taxonomy.total_terms(),
            cfg.keywords_path.display()
        );

        // ── Step 2: Filings ───────────────────────────────────────────────────
        let loader = HtmlLoader::new(&cfg.docs_dir)
            .with_year_overrides(cfg.year_overrides.clone().into_iter().collect());
        let documents = loader.load_all()?;

        // ── Step 3: Pipeline ──────────────────────────────────────────────────
        let options = AnalysisOptions {
            top_n:         cfg.top_n,
            growth_window: cfg.growth_window()?,
        };
        let report = analyze_with(&cfg.company_name, &taxonomy, documents, &options)
            .with_context(|| format!("Analysis of '{}' failed", cfg.company_name))?;

        // ── Step 4: Exports ───────────────────────────────────────────────────
        let writer = ReportWriter::new(&cfg.output_dir, &cfg.company_name);
        writer.write(&report)?;
        writer.save_config(cfg)?;

        Ok(report)
    }
}
