// ============================================================
// Layer 5 — Derived Views
// ============================================================
// Four independent transforms, each feeding one chart or table:
//
//   trend_series    — each category's counts over time
//                     (line chart)
//   relative_share  — each category's fraction of that year's
//                     mentions (heatmap)
//   top_terms       — the N most frequent terms of one year,
//                     across all categories (bar chart)
//   growth_ranking  — percent change per category between two
//                     years, highest first (diverging bar chart)
//
// Division by zero is guarded in place:
//   - a year with zero mentions overall gives share 0.0 for
//     every category
//   - growth from 0 → 0 is 0%; growth from 0 → n is reported as
//     NEW_EMERGENCE_PCT rather than an infinite percentage

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::matrix::CategoryYearMatrix;
use crate::domain::{counts::YearlyKeywordCounts, error::InputError};

/// Number of terms the top-terms view keeps when the caller
/// does not ask for a different N
pub const DEFAULT_TOP_N: usize = 15;

/// Growth reported for a category that went from zero mentions to
/// some. A fixed marker for "newly emerged", not a real percentage.
pub const NEW_EMERGENCE_PCT: f64 = 100.0;

// ─── Trend series ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year:  String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub category: String,
    pub points:   Vec<TrendPoint>,
}

/// Matrix rows as (year → count) series, unchanged.
pub fn trend_series(matrix: &CategoryYearMatrix) -> Vec<TrendSeries> {
    matrix
        .rows()
        .map(|(category, counts)| TrendSeries {
            category: category.to_string(),
            points:   matrix
                .years()
                .iter()
                .zip(counts)
                .map(|(year, &count)| TrendPoint { year: year.clone(), count })
                .collect(),
        })
        .collect()
}

// ─── Relative share ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRow {
    pub category: String,
    /// One proportion per year, aligned with `ShareTable::years`
    pub shares:   Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareTable {
    pub years: Vec<String>,
    pub rows:  Vec<ShareRow>,
}

impl ShareTable {
    pub fn share(&self, category: &str, year: &str) -> Option<f64> {
        let col = self.years.iter().position(|y| y == year)?;
        self.rows
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.shares[col])
    }

    /// Sum of shares for one year: 1.0, or 0.0 for an all-zero year
    pub fn column_sum(&self, year: &str) -> Option<f64> {
        let col = self.years.iter().position(|y| y == year)?;
        Some(self.rows.iter().map(|r| r.shares[col]).sum())
    }
}

/// Divide each cell by its year's total across all categories.
pub fn relative_share(matrix: &CategoryYearMatrix) -> ShareTable {
    let totals: Vec<u64> = (0..matrix.years().len())
        .map(|i| matrix.column_total(i))
        .collect();

    for (year, _) in matrix.years().iter().zip(&totals).filter(|(_, t)| **t == 0) {
        tracing::debug!("No mentions at all in {}; shares for that year are 0", year);
    }

    let rows = matrix
        .rows()
        .map(|(category, counts)| ShareRow {
            category: category.to_string(),
            shares:   counts
                .iter()
                .zip(&totals)
                .map(|(&count, &total)| {
                    if total == 0 {
                        0.0
                    } else {
                        count as f64 / total as f64
                    }
                })
                .collect(),
        })
        .collect();

    ShareTable {
        years: matrix.years().to_vec(),
        rows,
    }
}

// ─── Top terms ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTerm {
    pub term:     String,
    pub count:    u64,
    pub category: String,
}

/// The `n` most frequent terms of `year` across all categories.
///
/// Equal counts keep encounter order (category order, then term
/// order). A year with no matches, or one not in `yearly`, yields
/// an empty list.
pub fn top_terms(yearly: &YearlyKeywordCounts, year: &str, n: usize) -> Vec<TopTerm> {
    let Some(doc) = yearly.get(year) else {
        return Vec::new();
    };

    let mut all: Vec<TopTerm> = doc
        .iter()
        .flat_map(|(category, counts)| {
            counts.term_counts().map(move |tc| TopTerm {
                term:     tc.term,
                count:    tc.count,
                category: category.clone(),
            })
        })
        .collect();

    // sort_by is stable, so ties keep encounter order
    all.sort_by(|a, b| b.count.cmp(&a.count));
    all.truncate(n);
    all
}

/// `top_terms` for every year present
pub fn top_terms_by_year(yearly: &YearlyKeywordCounts, n: usize) -> BTreeMap<String, Vec<TopTerm>> {
    yearly
        .keys()
        .map(|year| (year.clone(), top_terms(yearly, year, n)))
        .collect()
}

// ─── Growth ranking ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthEntry {
    pub category:       String,
    pub start:          u64,
    pub end:            u64,
    pub percent_change: f64,
    /// True when `percent_change` is the NEW_EMERGENCE_PCT marker
    pub new_emergence:  bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRanking {
    pub start_year: String,
    pub end_year:   String,
    /// Highest growth first
    pub entries:    Vec<GrowthEntry>,
}

/// Percent change from `start` to `end`, with the zero-start clamps.
pub fn percent_change(start: u64, end: u64) -> f64 {
    match (start, end) {
        (0, 0) => 0.0,
        (0, _) => NEW_EMERGENCE_PCT,
        (s, e) => (e as f64 - s as f64) / s as f64 * 100.0,
    }
}

/// Rank categories by percent change between two years of the matrix.
pub fn growth_ranking(
    matrix:     &CategoryYearMatrix,
    start_year: &str,
    end_year:   &str,
) -> Result<GrowthRanking, InputError> {
    let start_idx = matrix
        .year_index(start_year)
        .ok_or_else(|| InputError::UnknownYear(start_year.to_string()))?;
    let end_idx = matrix
        .year_index(end_year)
        .ok_or_else(|| InputError::UnknownYear(end_year.to_string()))?;

    let mut entries: Vec<GrowthEntry> = matrix
        .rows()
        .map(|(category, counts)| {
            let (start, end) = (counts[start_idx], counts[end_idx]);
            GrowthEntry {
                category:       category.to_string(),
                start,
                end,
                percent_change: percent_change(start, end),
                new_emergence:  start == 0 && end > 0,
            }
        })
        .collect();

    // Stable: equal growth keeps taxonomy order
    entries.sort_by(|a, b| b.percent_change.total_cmp(&a.percent_change));

    Ok(GrowthRanking {
        start_year: start_year.to_string(),
        end_year:   end_year.to_string(),
        entries,
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::counts::{CategoryCount, DocumentCounts};
    use crate::domain::taxonomy::Taxonomy;

    const EPS: f64 = 1e-9;

    fn doc(entries: Vec<(&str, Vec<(&str, u64)>)>) -> DocumentCounts {
        entries
            .into_iter()
            .map(|(category, terms)| {
                let mut c = CategoryCount::default();
                for (term, n) in terms {
                    c.record(term, n);
                }
                (category.to_string(), c)
            })
            .collect()
    }

    /// Three categories over 2020..2022
    fn fixture() -> (YearlyKeywordCounts, CategoryYearMatrix) {
        let taxonomy = Taxonomy::from_pairs(vec![
            ("Growth", vec!["expansion", "growth"]),
            ("Risk", vec!["risk", "uncertainty"]),
            ("Cloud", vec!["cloud"]),
        ])
        .unwrap();

        let mut yearly = YearlyKeywordCounts::new();
        yearly.insert(
            "2020".into(),
            doc(vec![
                ("Growth", vec![("expansion", 2), ("growth", 2)]),
                ("Risk", vec![("risk", 6)]),
                ("Cloud", vec![]),
            ]),
        );
        yearly.insert(
            "2021".into(),
            doc(vec![("Growth", vec![]), ("Risk", vec![]), ("Cloud", vec![])]),
        );
        yearly.insert(
            "2022".into(),
            doc(vec![
                ("Growth", vec![("growth", 8)]),
                ("Risk", vec![("risk", 3)]),
                ("Cloud", vec![("cloud", 5)]),
            ]),
        );

        let matrix = CategoryYearMatrix::build(&yearly, &taxonomy);
        (yearly, matrix)
    }

    #[test]
    fn test_trend_series_mirrors_matrix() {
        let (_, m) = fixture();
        let series = trend_series(&m);
        assert_eq!(series.len(), 3);
        assert_eq!(series[1].category, "Risk");
        let counts: Vec<u64> = series[1].points.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![6, 0, 3]);
        assert_eq!(series[1].points[2].year, "2022");
    }

    #[test]
    fn test_relative_share_columns_sum_to_one() {
        let (_, m) = fixture();
        let shares = relative_share(&m);
        for year in ["2020", "2022"] {
            let sum = shares.column_sum(year).unwrap();
            assert!((sum - 1.0).abs() < EPS, "{year}: {sum}");
        }
        assert!((shares.share("Risk", "2020").unwrap() - 0.6).abs() < EPS);
    }

    #[test]
    fn test_relative_share_all_zero_year_is_zero() {
        let (_, m) = fixture();
        let shares = relative_share(&m);
        for row in &shares.rows {
            assert_eq!(row.shares[1], 0.0);
            assert!(!row.shares[1].is_nan());
        }
        assert_eq!(shares.column_sum("2021"), Some(0.0));
    }

    #[test]
    fn test_top_terms_sorted_with_stable_ties() {
        let (yearly, _) = fixture();
        let top = top_terms(&yearly, "2020", DEFAULT_TOP_N);
        let terms: Vec<&str> = top.iter().map(|t| t.term.as_str()).collect();
        // "expansion" and "growth" tie at 2 and keep taxonomy order
        assert_eq!(terms, vec!["risk", "expansion", "growth"]);
        assert_eq!(top[0].category, "Risk");
    }

    #[test]
    fn test_top_terms_truncates_to_n() {
        let (yearly, _) = fixture();
        let top = top_terms(&yearly, "2022", 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].term, "growth");
        assert_eq!(top[1].term, "cloud");
    }

    #[test]
    fn test_top_terms_empty_year_is_empty_not_error() {
        let (yearly, _) = fixture();
        assert!(top_terms(&yearly, "2021", DEFAULT_TOP_N).is_empty());
        assert!(top_terms(&yearly, "1999", DEFAULT_TOP_N).is_empty());

        let by_year = top_terms_by_year(&yearly, DEFAULT_TOP_N);
        assert_eq!(by_year.len(), 3);
        assert!(by_year["2021"].is_empty());
    }

    #[test]
    fn test_percent_change_clamps() {
        assert_eq!(percent_change(0, 5), NEW_EMERGENCE_PCT);
        assert_eq!(percent_change(0, 0), 0.0);
        assert!((percent_change(4, 8) - 100.0).abs() < EPS);
        assert!((percent_change(6, 3) + 50.0).abs() < EPS);
        assert!((percent_change(2, 2)).abs() < EPS);
    }

    #[test]
    fn test_growth_ranking_sorted_descending() {
        let (_, m) = fixture();
        let g = growth_ranking(&m, "2020", "2022").unwrap();
        let order: Vec<&str> = g.entries.iter().map(|e| e.category.as_str()).collect();
        // Growth 4→8 = +100, Cloud 0→5 = 100 (marker), Risk 6→3 = -50
        assert_eq!(order, vec!["Growth", "Cloud", "Risk"]);
        assert!(g.entries[1].new_emergence);
        assert!(!g.entries[0].new_emergence);
        assert!((g.entries[2].percent_change + 50.0).abs() < EPS);
    }

    #[test]
    fn test_growth_ranking_unknown_year() {
        let (_, m) = fixture();
        let err = growth_ranking(&m, "2020", "2030").unwrap_err();
        assert!(matches!(err, InputError::UnknownYear(y) if y == "2030"));
    }
}
