// ============================================================
// Layer 6 — Report Writer
// ============================================================
// Persists an AnalysisReport as flat files in a per-company
// directory:
//
//   outputs/
//     Acme_Corp/
//       keyword_counts.json
//       strategy_analysis.csv
//       keyword_counts_detailed.csv
//       summary.json
//       views.trends.json
//       views.relative_share.json
//       views.top_terms.json
//       views.growth.json          (only with ≥ 2 years)
//       analysis_config.json
//
// Charts are not rendered here; the views.*.json files carry the
// exact series a renderer needs.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::analyze_use_case::AnalyzeConfig;
use crate::application::pipeline::AnalysisReport;
use crate::domain::traits::ReportSink;
use crate::infra::{
    csv_export::{write_detailed_csv, write_matrix_csv},
    json_store::write_json,
};

pub const KEYWORD_COUNTS_JSON: &str = "keyword_counts.json";
pub const MATRIX_CSV: &str = "strategy_analysis.csv";
pub const DETAILED_CSV: &str = "keyword_counts_detailed.csv";
pub const SUMMARY_JSON: &str = "summary.json";
pub const TRENDS_JSON: &str = "views.trends.json";
pub const RELATIVE_SHARE_JSON: &str = "views.relative_share.json";
pub const TOP_TERMS_JSON: &str = "views.top_terms.json";
pub const GROWTH_JSON: &str = "views.growth.json";
pub const CONFIG_JSON: &str = "analysis_config.json";

/// File-system-safe directory name for a company.
///
/// Spaces become underscores; anything other than ASCII letters,
/// digits, '_', '-' and '.' is dropped. Leading dots are stripped so
/// the result can never be "." or "..".
pub fn company_slug(company_name: &str) -> String {
    let slug: String = company_name
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    let slug = slug.trim_start_matches('.');

    if slug.is_empty() {
        "company".to_string()
    } else {
        slug.to_string()
    }
}

pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Writer for `<output_dir>/<company slug>/`
    pub fn new(output_dir: impl AsRef<Path>, company_name: &str) -> Self {
        Self {
            dir: output_dir.as_ref().join(company_slug(company_name)),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create output directory '{}'", self.dir.display()))
    }

    /// Save the configuration that produced this directory's files.
    pub fn save_config(&self, cfg: &AnalyzeConfig) -> Result<()> {
        self.ensure_dir()?;
        write_json(&self.dir.join(CONFIG_JSON), cfg)
    }
}

impl ReportSink for ReportWriter {
    fn write(&self, report: &AnalysisReport) -> Result<()> {
        self.ensure_dir()?;

        write_json(&self.dir.join(KEYWORD_COUNTS_JSON), &report.yearly_keyword_counts)?;
        write_matrix_csv(&self.dir.join(MATRIX_CSV), &report.matrix)?;
        write_detailed_csv(&self.dir.join(DETAILED_CSV), &report.detailed_rows)?;
        write_json(&self.dir.join(SUMMARY_JSON), &report.summary)?;

        let views = &report.derived_views;
        write_json(&self.dir.join(TRENDS_JSON), &views.trends)?;
        write_json(&self.dir.join(RELATIVE_SHARE_JSON), &views.relative_share)?;
        write_json(&self.dir.join(TOP_TERMS_JSON), &views.top_terms)?;

        let growth_path = self.dir.join(GROWTH_JSON);
        match &views.growth {
            Some(growth) => write_json(&growth_path, growth)?,
            // A stale file from an earlier multi-year run would be misleading
            None if growth_path.exists() => fs::remove_file(&growth_path)
                .with_context(|| format!("Cannot remove '{}'", growth_path.display()))?,
            None => {}
        }

        tracing::info!("Wrote analysis for {} to '{}'", report.company_name, self.dir.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pipeline::analyze;
    use crate::domain::{counts::YearlyKeywordCounts, document::Document, taxonomy::Taxonomy};
    use crate::infra::json_store::read_json;
    use tempfile::TempDir;

    fn report(years: &[&str]) -> AnalysisReport {
        let taxonomy = Taxonomy::from_pairs(vec![("Tech", vec!["cloud"])]).unwrap();
        let docs = years
            .iter()
            .map(|y| Document::new(format!("{y}.html"), *y, b"<p>cloud</p>".to_vec()))
            .collect();
        analyze("Acme Corp", &taxonomy, docs).unwrap()
    }

    #[test]
    fn test_company_slug() {
        assert_eq!(company_slug("Acme Corp"), "Acme_Corp");
        assert_eq!(company_slug("AT&T Inc."), "ATT_Inc.");
        assert_eq!(company_slug("../../etc"), "etc");
        assert_eq!(company_slug("  "), "company");
    }

    #[test]
    fn test_writes_every_file() {
        let out = TempDir::new().unwrap();
        let writer = ReportWriter::new(out.path(), "Acme Corp");
        writer.write(&report(&["2020", "2021"])).unwrap();

        for name in [
            KEYWORD_COUNTS_JSON,
            MATRIX_CSV,
            DETAILED_CSV,
            SUMMARY_JSON,
            TRENDS_JSON,
            RELATIVE_SHARE_JSON,
            TOP_TERMS_JSON,
            GROWTH_JSON,
        ] {
            assert!(writer.dir().join(name).exists(), "missing {name}");
        }

        let counts: YearlyKeywordCounts = read_json(&writer.dir().join(KEYWORD_COUNTS_JSON)).unwrap();
        assert_eq!(counts["2021"]["Tech"].terms["cloud"], 1);
    }

    #[test]
    fn test_single_year_removes_stale_growth_file() {
        let out = TempDir::new().unwrap();
        let writer = ReportWriter::new(out.path(), "Acme Corp");
        writer.write(&report(&["2020", "2021"])).unwrap();
        assert!(writer.dir().join(GROWTH_JSON).exists());

        writer.write(&report(&["2022"])).unwrap();
        assert!(!writer.dir().join(GROWTH_JSON).exists());
    }

    #[test]
    fn test_config_round_trips() {
        let out = TempDir::new().unwrap();
        let writer = ReportWriter::new(out.path(), "Acme");
        let cfg = AnalyzeConfig {
            company_name: "Acme".into(),
            ..AnalyzeConfig::default()
        };
        writer.save_config(&cfg).unwrap();
        let back: AnalyzeConfig = read_json(&writer.dir().join(CONFIG_JSON)).unwrap();
        assert_eq!(back, cfg);
    }
}
