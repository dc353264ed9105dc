// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//
//   analyze — count a directory of annual filings and write the
//             JSON / CSV exports
//   rerun   — repeat an analysis from a saved analysis_config.json
//   count   — count a single filing and print the result
//
// Directory flags fall back to the UPLOAD_FOLDER / OUTPUT_FOLDER
// environment variables before their defaults.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::analysis::views::DEFAULT_TOP_N;
use crate::application::analyze_use_case::AnalyzeConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse keyword trends across a company's annual filings
    Analyze(AnalyzeArgs),

    /// Re-run an analysis from a saved analysis_config.json
    Rerun(RerunArgs),

    /// Count keywords in a single HTML filing
    Count(CountArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Company name; also names the output sub-directory
    #[arg(long)]
    pub company: String,

    /// JSON file mapping category → list of terms
    #[arg(long, default_value = "keywords.json")]
    pub keywords: PathBuf,

    /// Directory of .html / .htm filings, one per fiscal year
    #[arg(long, env = "UPLOAD_FOLDER", default_value = "uploads")]
    pub docs_dir: PathBuf,

    /// Root directory for exports
    #[arg(long, env = "OUTPUT_FOLDER", default_value = "outputs")]
    pub output_dir: PathBuf,

    /// How many terms the per-year top-terms view keeps
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Year for a file whose name has none, as FILE=YEAR (repeatable)
    #[arg(long = "year", value_name = "FILE=YEAR", value_parser = parse_year_override)]
    pub years: Vec<(String, String)>,

    /// First year of the growth comparison (default: earliest)
    #[arg(long, requires = "end_year")]
    pub start_year: Option<String>,

    /// Last year of the growth comparison (default: latest)
    #[arg(long, requires = "start_year")]
    pub end_year: Option<String>,
}

/// Split "report.html=2021" into ("report.html", "2021")
pub fn parse_year_override(s: &str) -> Result<(String, String), String> {
    let (file, year) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected FILE=YEAR, got '{s}'"))?;
    let (file, year) = (file.trim(), year.trim());
    if file.is_empty() || year.is_empty() {
        return Err(format!("expected FILE=YEAR, got '{s}'"));
    }
    Ok((file.to_string(), year.to_string()))
}

/// The application layer never sees clap types
impl From<AnalyzeArgs> for AnalyzeConfig {
    fn from(a: AnalyzeArgs) -> Self {
        AnalyzeConfig {
            company_name:   a.company,
            keywords_path:  a.keywords,
            docs_dir:       a.docs_dir,
            output_dir:     a.output_dir,
            top_n:          a.top_n,
            year_overrides: a.years.into_iter().collect(),
            start_year:     a.start_year,
            end_year:       a.end_year,
        }
    }
}

#[derive(Args, Debug)]
pub struct RerunArgs {
    /// Path to an analysis_config.json written by `analyze`
    #[arg(long)]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct CountArgs {
    /// JSON file mapping category → list of terms
    #[arg(long, default_value = "keywords.json")]
    pub keywords: PathBuf,

    /// The HTML filing to count
    #[arg(long)]
    pub file: PathBuf,
}
