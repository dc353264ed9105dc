// ============================================================
// Layer 3 — Count Containers
// ============================================================
// The canonical intermediate artifact of a run is
//
//   YearlyKeywordCounts: year → category → CategoryCount
//
// serialised to JSON as
//
//   { "2021": { "Sustainability": { "total": 2,
//                                   "terms": { "climate": 2 } } } }
//
// `terms` is sparse: a term with zero occurrences is absent.
// Years are kept in a BTreeMap so iteration is ascending by
// label; 4-digit labels make lexical order chronological.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Occurrences of one term within one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term:  String,
    pub count: u64,
}

/// Occurrences of every term of one category within one document.
///
/// Invariant: `total` equals the sum of the values in `terms`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub total: u64,
    pub terms: IndexMap<String, u64>,
}

impl CategoryCount {
    /// Record `count` occurrences of `term`. Zero counts leave the
    /// sparse term map untouched. A term listed twice in the same
    /// category accumulates into a single entry.
    pub fn record(&mut self, term: &str, count: u64) {
        if count == 0 {
            return;
        }
        *self.terms.entry(term.to_string()).or_insert(0) += count;
        self.total += count;
    }

    /// Matched terms in encounter order
    pub fn term_counts(&self) -> impl Iterator<Item = TermCount> + '_ {
        self.terms.iter().map(|(term, &count)| TermCount {
            term: term.clone(),
            count,
        })
    }
}

/// Per-document result: category → CategoryCount, in taxonomy order
pub type DocumentCounts = IndexMap<String, CategoryCount>;

/// Per-run result: year → DocumentCounts, ascending by year label
pub type YearlyKeywordCounts = BTreeMap<String, DocumentCounts>;
