// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline itself is a set of pure functions; the traits
// here mark the two I/O seams around it:
//
//   DocumentSource → where filings come from
//                    (HtmlLoader reads a directory; an HTTP
//                    upload handler would be another impl)
//
//   ReportSink     → where finished reports go
//                    (ReportWriter writes JSON/CSV files; a
//                    zip packager or a web response would be
//                    another impl)
//
// The application layer is written against these traits only.

use anyhow::Result;

use crate::application::pipeline::AnalysisReport;
use crate::domain::document::Document;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can supply annual filings with year labels.
pub trait DocumentSource {
    /// Load every available document. Documents whose year could not
    /// be resolved are returned with `year: None` so the pipeline can
    /// report `NoYearResolved` when nothing usable remains.
    fn load_all(&self) -> Result<Vec<Document>>;
}

// ─── ReportSink ───────────────────────────────────────────────────────────────
/// Any component that can persist or deliver a finished analysis.
pub trait ReportSink {
    fn write(&self, report: &AnalysisReport) -> Result<()>;
}
