// ============================================================
// Layer 5 — Category × Year Matrix
// ============================================================
// Folds YearlyKeywordCounts into a dense table:
//
//                    2020   2021   2022
//   Sustainability      2      2      5
//   Technology          0      3      1
//
// Rows are taxonomy categories in taxonomy order. Columns are the
// years present in the input, ascending by label. Every cell is
// populated; a category with no data for a year holds 0, so the
// derived views never meet a missing value.
//
// The detailed rows flatten the sparse nested counts into a long
// table, one row per (year, category, term) with count > 0.

use serde::{Deserialize, Serialize};

use crate::domain::{counts::YearlyKeywordCounts, taxonomy::Taxonomy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryYearMatrix {
    categories: Vec<String>,
    years:      Vec<String>,
    /// cells[category_index][year_index]
    cells:      Vec<Vec<u64>>,
}

impl CategoryYearMatrix {
    /// Build the matrix from per-year counts.
    pub fn build(yearly: &YearlyKeywordCounts, taxonomy: &Taxonomy) -> Self {
        let categories: Vec<String> = taxonomy.categories().map(str::to_string).collect();
        // BTreeMap keys are already ascending
        let years: Vec<String> = yearly.keys().cloned().collect();

        let cells = categories
            .iter()
            .map(|category| {
                years
                    .iter()
                    .map(|year| {
                        yearly
                            .get(year)
                            .and_then(|doc| doc.get(category))
                            .map_or(0, |c| c.total)
                    })
                    .collect()
            })
            .collect();

        Self { categories, years, cells }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Column labels, ascending
    pub fn years(&self) -> &[String] {
        &self.years
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.categories.is_empty()
    }

    pub fn year_index(&self, year: &str) -> Option<usize> {
        self.years.iter().position(|y| y == year)
    }

    pub fn category_index(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Cell value, or None if either label is unknown
    pub fn get(&self, category: &str, year: &str) -> Option<u64> {
        let row = self.category_index(category)?;
        let col = self.year_index(year)?;
        Some(self.cells[row][col])
    }

    /// One category's counts across all years
    pub fn row(&self, category: &str) -> Option<&[u64]> {
        self.category_index(category).map(|i| self.cells[i].as_slice())
    }

    /// (category, counts-by-year) in row order
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.categories
            .iter()
            .zip(&self.cells)
            .map(|(c, row)| (c.as_str(), row.as_slice()))
    }

    /// Sum over all categories for one year column
    pub fn column_total(&self, year_index: usize) -> u64 {
        self.cells.iter().map(|row| row[year_index]).sum()
    }
}

/// One line of the long-form export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedRow {
    #[serde(rename = "Year")]
    pub year:     String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Keyword")]
    pub keyword:  String,
    #[serde(rename = "Count")]
    pub count:    u64,
}

/// Flatten per-year counts into (year, category, term, count) rows.
///
/// Ordered by year, then taxonomy category order, then the order in
/// which terms were matched.
pub fn detailed_rows(yearly: &YearlyKeywordCounts, taxonomy: &Taxonomy) -> Vec<DetailedRow> {
    let mut rows = Vec::new();

    for (year, doc) in yearly {
        for category in taxonomy.categories() {
            let Some(counts) = doc.get(category) else {
                continue;
            };
            for tc in counts.term_counts().filter(|tc| tc.count > 0) {
                rows.push(DetailedRow {
                    year:     year.clone(),
                    category: category.to_string(),
                    keyword:  tc.term,
                    count:    tc.count,
                });
            }
        }
    }

    rows
}

/// Build both the matrix and the detailed rows in one call.
pub fn build_year_matrix(
    yearly:   &YearlyKeywordCounts,
    taxonomy: &Taxonomy,
) -> (CategoryYearMatrix, Vec<DetailedRow>) {
    (
        CategoryYearMatrix::build(yearly, taxonomy),
        detailed_rows(yearly, taxonomy),
    )
}
