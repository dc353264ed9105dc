// ============================================================
// Layer 3 — Input Errors
// ============================================================
// Caller-correctable failures. These are reported back to the
// caller and never abort the process.
//
// Extraction degradation (malformed HTML, undecodable bytes) and
// arithmetic guards (division by zero in shares and growth) are
// NOT errors: they are resolved in place by the stage that meets
// them, so no variant exists for them here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("keyword taxonomy is empty; supply at least one category")]
    EmptyTaxonomy,

    #[error("keyword taxonomy is not valid JSON of the form {{\"Category\": [\"term\", ...]}}: {0}")]
    InvalidTaxonomy(#[from] serde_json::Error),

    #[error("category '{category}' contains a blank term")]
    BlankTerm { category: String },

    #[error("no documents supplied")]
    NoDocuments,

    #[error("no document has a resolvable year; file names should contain a year such as 2020 or 2021")]
    NoYearResolved,

    #[error("no document yielded extractable text")]
    NoExtractableText,

    #[error("year '{0}' is not present in the analysed documents")]
    UnknownYear(String),

    #[error("term '{term}' cannot be compiled into a matcher: {source}")]
    InvalidPattern {
        term:   String,
        #[source]
        source: regex::Error,
    },
}
