// ============================================================
// Layer 3 — Keyword Taxonomy
// ============================================================
// An ordered mapping from category name to an ordered list of
// terms, e.g.
//
//   {
//     "Sustainability": ["climate", "carbon footprint"],
//     "Technology":     ["cloud", "artificial intelligence"]
//   }
//
// Order matters twice downstream: matrix rows follow category
// order, and ties in the top-terms view follow encounter order.
// IndexMap keeps JSON key order where a HashMap would not.
//
// A taxonomy is immutable for the duration of one analysis run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::error::InputError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    categories: IndexMap<String, Vec<String>>,
}

impl Taxonomy {
    /// Parse and validate a taxonomy from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let taxonomy: Taxonomy = serde_json::from_str(json)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Build a taxonomy from (category, terms) pairs, keeping their order.
    /// A repeated category name replaces the earlier terms in place.
    pub fn from_pairs<C, T, I>(pairs: I) -> Result<Self, InputError>
    where
        C: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = (C, Vec<T>)>,
    {
        let categories = pairs
            .into_iter()
            .map(|(c, terms)| (c.into(), terms.into_iter().map(Into::into).collect()))
            .collect();
        let taxonomy = Self { categories };
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Reject taxonomies the counter cannot work with:
    /// no categories at all, or a term that is empty after trimming.
    ///
    /// A category with zero terms is allowed; it simply counts zero.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.categories.is_empty() {
            return Err(InputError::EmptyTaxonomy);
        }
        for (category, terms) in &self.categories {
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(InputError::BlankTerm { category: category.clone() });
            }
        }
        Ok(())
    }

    /// Category names in taxonomy order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// (category, terms) pairs in taxonomy order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories.iter().map(|(c, t)| (c.as_str(), t.as_slice()))
    }

    pub fn terms(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Sum of the term-list lengths across all categories
    pub fn total_terms(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}
