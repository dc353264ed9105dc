// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File output for finished analyses. Nothing in here computes;
// it only serialises what the analysis layer produced.
//
//   json_store.rs    — pretty JSON read/write helpers
//   csv_export.rs    — matrix and detailed-row CSV files
//   report_writer.rs — ReportSink that lays out a per-company
//                      output directory
//
// A different delivery mechanism (zip archive, HTTP response,
// object storage) would be another ReportSink next to these.

/// JSON artifact helpers
pub mod json_store;

/// CSV exports of the matrix and detailed rows
pub mod csv_export;

/// Per-company output directory writer
pub mod report_writer;
