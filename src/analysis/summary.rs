// ============================================================
// Layer 5 — Summary Reporter
// ============================================================
// Per-category aggregates for the final report:
//
//   total_mentions   — sum across all analysed years
//   average_per_year — total / number of years (unrounded)
//   trend            — "increasing" if the latest year's count is
//                      strictly greater than the earliest year's,
//                      otherwise "decreasing"
//
// Equal first/last counts therefore report "decreasing". With a
// single year first == last, so every category is "decreasing".

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analysis::matrix::CategoryYearMatrix;
use crate::domain::{error::InputError, taxonomy::Taxonomy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    /// Strictly greater is increasing; ties go to decreasing.
    pub fn between(first: u64, last: u64) -> Self {
        if last > first {
            Self::Increasing
        } else {
            Self::Decreasing
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub total_mentions:   u64,
    pub average_per_year: f64,
    pub trend:            TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub company_name:       String,
    /// Ascending
    pub years_analyzed:     Vec<String>,
    pub categories_tracked: usize,
    /// Number of terms across all categories
    pub total_keywords:     usize,
    pub category_summary:   IndexMap<String, CategorySummary>,
}

/// Summarise the matrix. Its years are already ascending, so the first
/// column is the earliest year and the last column the latest.
pub fn summarize(
    company_name: &str,
    matrix:       &CategoryYearMatrix,
    taxonomy:     &Taxonomy,
) -> Result<Summary, InputError> {
    let years = matrix.years();
    if years.is_empty() {
        return Err(InputError::NoYearResolved);
    }
    let n_years = years.len() as f64;

    let category_summary = matrix
        .rows()
        .map(|(category, counts)| {
            let total: u64 = counts.iter().sum();
            // rows are never empty once a year exists
            let first = counts.first().copied().unwrap_or(0);
            let last  = counts.last().copied().unwrap_or(0);
            (
                category.to_string(),
                CategorySummary {
                    total_mentions:   total,
                    average_per_year: total as f64 / n_years,
                    trend:            TrendDirection::between(first, last),
                },
            )
        })
        .collect();

    Ok(Summary {
        company_name:       company_name.to_string(),
        years_analyzed:     years.to_vec(),
        categories_tracked: taxonomy.len(),
        total_keywords:     taxonomy.total_terms(),
        category_summary,
    })
}
