// ============================================================
// Layer 5 — Analysis Layer
// ============================================================
// Pure numeric transforms over the per-year counts. Nothing in
// this layer touches files, HTML or regexes, and nothing here
// renders: every result is plain data that a plotting or export
// layer can consume.
//
//   matrix.rs  — category × year table of totals, plus the
//                long-form (year, category, term, count) rows
//
//   views.rs   — trend series, per-year relative share,
//                top-N terms per year, start→end growth ranking
//
//   summary.rs — per-category totals, averages and trend
//                direction for the final report

/// Category × year matrix and detailed rows
pub mod matrix;

/// Derived analytical views over the matrix
pub mod views;

/// Aggregate statistics per category
pub mod summary;
