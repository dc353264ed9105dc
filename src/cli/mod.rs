// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to a use case. All
// analysis work happens in Layer 2 and below; this layer only
// converts arguments and prints results.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AnalyzeArgs, Commands, CountArgs, RerunArgs};

use crate::application::analyze_use_case::{AnalyzeConfig, AnalyzeUseCase};
use crate::application::count_use_case::CountUseCase;
use crate::application::pipeline::AnalysisReport;
use crate::infra::report_writer::ReportWriter;

#[derive(Parser, Debug)]
#[command(
    name = "filing-trends",
    version,
    about = "Track how keyword categories trend across a company's annual filings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Analyze(args) => run_analyze(args),
            Commands::Rerun(args)   => run_rerun(args),
            Commands::Count(args)   => run_count(args),
        }
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    tracing::info!("Analysing filings in: {}", args.docs_dir.display());
    execute(args.into())
}

fn run_rerun(args: RerunArgs) -> Result<()> {
    tracing::info!("Re-running analysis from: {}", args.config.display());
    execute(AnalyzeConfig::load(&args.config)?)
}

fn execute(config: AnalyzeConfig) -> Result<()> {
    let out_dir = ReportWriter::new(&config.output_dir, &config.company_name)
        .dir()
        .to_path_buf();
    let report = AnalyzeUseCase::new(config).execute()?;

    print_summary(&report);
    println!("\nResults written to {}", out_dir.display());
    Ok(())
}

fn run_count(args: CountArgs) -> Result<()> {
    let counts = CountUseCase::new(args.keywords, args.file).execute()?;
    println!("{}", serde_json::to_string_pretty(&counts)?);
    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    let s = &report.summary;
    println!(
        "{}: {} years ({}), {} categories, {} keywords",
        s.company_name,
        s.years_analyzed.len(),
        s.years_analyzed.join(", "),
        s.categories_tracked,
        s.total_keywords,
    );

    let width = s.category_summary.keys().map(|k| k.len()).max().unwrap_or(0);
    for (category, c) in &s.category_summary {
        println!(
            "  {:<width$}  {:>6} mentions  {:>8.2}/year  {:?}",
            category,
            c.total_mentions,
            c.average_per_year,
            c.trend,
        );
    }

    if let Some(g) = &report.derived_views.growth {
        println!("\nChange {} → {}:", g.start_year, g.end_year);
        for e in &g.entries {
            let marker = if e.new_emergence { " (new)" } else { "" };
            println!("  {:<width$}  {:>+8.1}%{}", e.category, e.percent_change, marker);
        }
    }
}
