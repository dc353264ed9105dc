// ============================================================
// Layer 4 — Text Pipeline
// ============================================================
// Everything from a filing on disk to per-category counts.
//
//   .html / .htm files
//       │
//       ▼
//   HtmlLoader        → reads files, resolves fiscal years
//       │
//       ▼
//   TextExtractor     → strips markup, normalises whitespace
//       │
//       ▼
//   KeywordCounter    → per-term and per-category counts
//
// Each step is a separate module so it can be tested and
// replaced on its own.

/// Reads filings from a directory and resolves their years
pub mod loader;

/// HTML → normalised plain text
pub mod extractor;

/// Case-insensitive term counting with category aggregation
pub mod counter;
