// ============================================================
// Layer 2 — Analysis Pipeline
// ============================================================
// The single operation the outside world calls:
//
//   analyze(company, taxonomy, documents) → AnalysisReport
//
//   Step 1: Validate the taxonomy and compile matchers
//   Step 2: Drop documents without a year label
//   Step 3: Extract text + count keywords, one document each
//   Step 4: Merge per-year counts (a later duplicate year wins)
//   Step 5: Build the category × year matrix + detailed rows
//   Step 6: Derive trends, shares, top terms, growth
//   Step 7: Summarise per category
//
// A run is a pure function of (taxonomy, documents): no state is
// shared between runs and nothing is written to disk here. The
// caller decides what to do with the report (see ReportSink).
//
// Step 3 runs on rayon's thread pool. Documents share nothing
// mutable, and results are collected in input order, so the
// report is identical to a sequential run.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{
    matrix::{build_year_matrix, CategoryYearMatrix, DetailedRow},
    summary::{summarize, Summary},
    views::{
        growth_ranking, relative_share, top_terms_by_year, trend_series, GrowthRanking,
        ShareTable, TopTerm, TrendSeries, DEFAULT_TOP_N,
    },
};
use crate::data::{counter::KeywordCounter, extractor::TextExtractor};
use crate::domain::{
    counts::{DocumentCounts, YearlyKeywordCounts},
    document::Document,
    error::InputError,
    taxonomy::Taxonomy,
};

/// Knobs for one run
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// N for the per-year top-terms view
    pub top_n: usize,

    /// (start, end) years for the growth view. `None` means earliest →
    /// latest, and no growth view at all when only one year exists.
    pub growth_window: Option<(String, String)>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_n:         DEFAULT_TOP_N,
            growth_window: None,
        }
    }
}

/// Renderable series derived from the matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViews {
    pub trends:         Vec<TrendSeries>,
    pub relative_share: ShareTable,
    /// year → top-N terms of that year
    pub top_terms:      BTreeMap<String, Vec<TopTerm>>,
    pub growth:         Option<GrowthRanking>,
}

/// Everything one analysis run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub company_name:          String,
    pub yearly_keyword_counts: YearlyKeywordCounts,
    pub matrix:                CategoryYearMatrix,
    pub detailed_rows:         Vec<DetailedRow>,
    pub summary:               Summary,
    pub derived_views:         DerivedViews,
}

/// Analyse `documents` with default options.
pub fn analyze(
    company_name: &str,
    taxonomy:     &Taxonomy,
    documents:    Vec<Document>,
) -> Result<AnalysisReport, InputError> {
    analyze_with(company_name, taxonomy, documents, &AnalysisOptions::default())
}

/// Per-document outcome of Step 3
struct CountedDocument {
    source:    String,
    year:      String,
    has_text:  bool,
    counts:    DocumentCounts,
}

pub fn analyze_with(
    company_name: &str,
    taxonomy:     &Taxonomy,
    documents:    Vec<Document>,
    options:      &AnalysisOptions,
) -> Result<AnalysisReport, InputError> {
    // ── Step 1: Taxonomy ──────────────────────────────────────────────────────
    let counter = KeywordCounter::new(taxonomy)?;

    // ── Step 2: Year labels ───────────────────────────────────────────────────
    if documents.is_empty() {
        return Err(InputError::NoDocuments);
    }
    let labelled: Vec<(String, Document)> = documents
        .into_iter()
        .filter_map(|doc| match doc.resolved_year() {
            Some(year) => Some((year.to_string(), doc)),
            None => {
                tracing::warn!("Skipping '{}': no year label", doc.source);
                None
            }
        })
        .collect();
    if labelled.is_empty() {
        return Err(InputError::NoYearResolved);
    }

    // ── Step 3: Extract + count ───────────────────────────────────────────────
    let extractor = TextExtractor::new();
    let counted: Vec<CountedDocument> = labelled
        .into_par_iter()
        .map(|(year, doc)| {
            let text = extractor.extract(&doc.html);
            let counts = counter.count(&text);
            tracing::debug!(
                "Counted '{}' ({}): {} chars, {} mentions",
                doc.source,
                year,
                text.len(),
                counts.values().map(|c| c.total).sum::<u64>()
            );
            CountedDocument {
                source:   doc.source,
                year,
                has_text: !text.is_empty(),
                counts,
            }
        })
        .collect();

    if !counted.iter().any(|d| d.has_text) {
        return Err(InputError::NoExtractableText);
    }

    // ── Step 4: Merge per year ────────────────────────────────────────────────
    let mut yearly = YearlyKeywordCounts::new();
    for doc in counted {
        if !doc.has_text {
            tracing::warn!("'{}' yielded no text; {} counts as zero", doc.source, doc.year);
        }
        if yearly.insert(doc.year.clone(), doc.counts).is_some() {
            tracing::warn!("Year {} supplied more than once; keeping '{}'", doc.year, doc.source);
        }
    }

    // ── Step 5: Matrix ────────────────────────────────────────────────────────
    let (matrix, detailed_rows) = build_year_matrix(&yearly, taxonomy);

    // ── Step 6: Derived views ─────────────────────────────────────────────────
    let growth = match &options.growth_window {
        Some((start, end)) => Some(growth_ranking(&matrix, start, end)?),
        None => match matrix.years() {
            [first, .., last] => Some(growth_ranking(&matrix, first, last)?),
            _ => None,
        },
    };

    let derived_views = DerivedViews {
        trends:         trend_series(&matrix),
        relative_share: relative_share(&matrix),
        top_terms:      top_terms_by_year(&yearly, options.top_n),
        growth,
    };

    // ── Step 7: Summary ───────────────────────────────────────────────────────
    let summary = summarize(company_name, &matrix, taxonomy)?;

    tracing::info!(
        "Analysed {} for {} years across {} categories",
        company_name,
        matrix.years().len(),
        matrix.categories().len()
    );

    Ok(AnalysisReport {
        company_name: company_name.to_string(),
        yearly_keyword_counts: yearly,
        matrix,
        detailed_rows,
        summary,
        derived_views,
    })
}
