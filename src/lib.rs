//! Keyword-category trend analysis over a company's annual filings.
//!
//! One HTML filing per fiscal year goes in; per-year keyword counts, a
//! category × year matrix, derived views and a summary come out:
//!
//! ```no_run
//! use filing_trends::application::pipeline::analyze;
//! use filing_trends::domain::{document::Document, taxonomy::Taxonomy};
//!
//! let taxonomy = Taxonomy::from_json(r#"{"Sustainability": ["climate", "carbon footprint"]}"#)?;
//! let docs = vec![
//!     Document::new("acme_2020.html", "2020", std::fs::read("acme_2020.html")?),
//!     Document::new("acme_2021.html", "2021", std::fs::read("acme_2021.html")?),
//! ];
//! let report = analyze("Acme", &taxonomy, docs)?;
//! println!("{:?}", report.summary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod analysis;
pub mod infra;
