// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that define what the
// system talks about: filings, keyword taxonomies and counts.
//
// Rules for this layer:
//   - NO HTML parsing or regex matching
//   - NO file I/O
//   - Only plain data, validation and traits
//
// Everything downstream (the matrix, the derived views, the
// summary) is computed from the types declared here.

// An annual filing and its resolved year
pub mod document;

// Category → terms definition supplied for one run
pub mod taxonomy;

// Per-term / per-category / per-year count containers
pub mod counts;

// Caller-correctable input failures
pub mod error;

// Seams other layers implement
pub mod traits;
