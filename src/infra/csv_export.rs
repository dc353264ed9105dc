// ============================================================
// Layer 6 — CSV Export
// ============================================================
// Writes the two tabular exports:
//
//   strategy_analysis.csv         — the category × year matrix
//     ,2020,2021
//     Sustainability,2.0,2.0
//     Technology,1.0,0.0
//
//   keyword_counts_detailed.csv   — one row per matched term
//     Year,Category,Keyword,Count
//     2020,Sustainability,climate,2
//
// Column order and the float rendering of matrix cells are kept
// stable for spreadsheets and scripts that already read them.
// Fields containing a comma, quote or newline are quoted.

use anyhow::{Context, Result};
use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::analysis::matrix::{CategoryYearMatrix, DetailedRow};

/// Quote a CSV field if it needs it, doubling embedded quotes
fn field(value: &str) -> Cow<'_, str> {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Write the matrix: header row of years, one row per category.
pub fn write_matrix_csv(path: &Path, matrix: &CategoryYearMatrix) -> Result<()> {
    let f = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    let mut w = BufWriter::new(f);

    // Leading empty cell is the (unnamed) index column
    let header: Vec<Cow<'_, str>> = matrix.years().iter().map(|y| field(y)).collect();
    writeln!(w, ",{}", header.join(","))?;

    for (category, counts) in matrix.rows() {
        let cells: Vec<String> = counts.iter().map(|&c| format!("{:.1}", c as f64)).collect();
        writeln!(w, "{},{}", field(category), cells.join(","))?;
    }

    w.flush()?;
    tracing::debug!("Wrote matrix CSV '{}'", path.display());
    Ok(())
}

/// Write the long-form (year, category, keyword, count) table.
pub fn write_detailed_csv(path: &Path, rows: &[DetailedRow]) -> Result<()> {
    let f = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    let mut w = BufWriter::new(f);

    writeln!(w, "Year,Category,Keyword,Count")?;
    for r in rows {
        writeln!(
            w,
            "{},{},{},{}",
            field(&r.year),
            field(&r.category),
            field(&r.keyword),
            r.count,
        )?;
    }

    w.flush()?;
    tracing::debug!("Wrote {} detailed rows to '{}'", rows.len(), path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::counts::{CategoryCount, DocumentCounts, YearlyKeywordCounts};
    use crate::domain::taxonomy::Taxonomy;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> (YearlyKeywordCounts, Taxonomy) {
        let taxonomy = Taxonomy::from_pairs(vec![
            ("Sustainability", vec!["climate"]),
            ("M&A, Deals", vec!["merger"]),
        ])
        .unwrap();

        let mut yearly = YearlyKeywordCounts::new();
        for (year, climate, merger) in [("2020", 2, 0), ("2021", 2, 1)] {
            let mut s = CategoryCount::default();
            s.record("climate", climate);
            let mut m = CategoryCount::default();
            m.record("merger", merger);
            let doc: DocumentCounts = [
                ("Sustainability".to_string(), s),
                ("M&A, Deals".to_string(), m),
            ]
            .into_iter()
            .collect();
            yearly.insert(year.to_string(), doc);
        }
        (yearly, taxonomy)
    }

    #[test]
    fn test_field_quoting() {
        assert_eq!(field("plain"), "plain");
        assert_eq!(field("a,b"), "\"a,b\"");
        assert_eq!(field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_matrix_csv_layout() {
        let (yearly, taxonomy) = sample();
        let matrix = CategoryYearMatrix::build(&yearly, &taxonomy);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("strategy_analysis.csv");

        write_matrix_csv(&path, &matrix).unwrap();
        let csv = fs::read_to_string(&path).unwrap();
        assert_eq!(
            csv,
            ",2020,2021\nSustainability,2.0,2.0\n\"M&A, Deals\",0.0,1.0\n"
        );
    }

    #[test]
    fn test_detailed_csv_layout() {
        let (yearly, taxonomy) = sample();
        let rows = crate::analysis::matrix::detailed_rows(&yearly, &taxonomy);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keyword_counts_detailed.csv");

        write_detailed_csv(&path, &rows).unwrap();
        let csv = fs::read_to_string(&path).unwrap();
        assert_eq!(
            csv,
            "Year,Category,Keyword,Count\n\
             2020,Sustainability,climate,2\n\
             2021,Sustainability,climate,2\n\
             2021,\"M&A, Deals\",merger,1\n"
        );
    }
}
