// ============================================================
// Layer 3 — Document Domain Types
// ============================================================
// One filing per fiscal year. A `Document` is what the caller
// hands to the pipeline: a year label plus the raw HTML bytes.
// The year label is resolved by the caller (file name or an
// explicit override). `None` means the caller could not resolve
// one, and the pipeline skips the document.

use serde::{Deserialize, Serialize};

/// A raw annual filing as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Where the bytes came from (file name), kept for log messages
    pub source: String,

    /// Fiscal-year label, expected to be a 4-digit token such as "2021"
    pub year: Option<String>,

    /// Undecoded HTML source
    #[serde(skip)]
    pub html: Vec<u8>,
}

impl Document {
    /// Create a document with a resolved year.
    ///
    /// Example:
    ///   let doc = Document::new("acme_2021.html", "2021", bytes);
    pub fn new(
        source: impl Into<String>,
        year:   impl Into<String>,
        html:   impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            source: source.into(),
            year:   Some(year.into()),
            html:   html.into(),
        }
    }

    /// Create a document whose year could not be resolved
    pub fn without_year(source: impl Into<String>, html: impl Into<Vec<u8>>) -> Self {
        Self {
            source: source.into(),
            year:   None,
            html:   html.into(),
        }
    }

    /// The year label if it is present and not blank
    pub fn resolved_year(&self) -> Option<&str> {
        self.year
            .as_deref()
            .map(str::trim)
            .filter(|y| !y.is_empty())
    }
}
