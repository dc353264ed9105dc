// ============================================================
// Layer 4 — Keyword Counter
// ============================================================
// Counts taxonomy terms in one document's normalised text.
//
// Matching is case-insensitive: text and terms are lowercased.
// Two matching rules apply, chosen per term:
//
//   Multi-word term (contains a space), e.g. "net income"
//     → plain substring count, non-overlapping, left to right.
//       No word boundaries: "net income" also matches inside
//       "internet incomes".
//
//   Single-word term, e.g. "cat"
//     → whole-word count: the match must sit between non-word
//       characters (Unicode \b), so "cat" does not match inside
//       "category" or "catalog".
//
// Existing reports depend on this asymmetry; keep both rules.
//
// Each term is counted independently and the category total is
// the plain sum, so overlapping terms ("data", "data privacy")
// both count the same span.

use regex::Regex;

use crate::domain::{
    counts::{CategoryCount, DocumentCounts},
    error::InputError,
    taxonomy::Taxonomy,
};

/// How a single term is located in lowercased text
#[derive(Debug, Clone)]
enum TermMatcher {
    /// Non-overlapping substring occurrences of the lowercased phrase
    Phrase(String),
    /// Whole-word occurrences, `\b<term>\b`
    Word(Regex),
}

impl TermMatcher {
    fn compile(term: &str) -> Result<Self, InputError> {
        let lowered = term.to_lowercase();

        if lowered.contains(' ') {
            return Ok(Self::Phrase(lowered));
        }

        let pattern = format!(r"\b{}\b", regex::escape(&lowered));
        Regex::new(&pattern)
            .map(Self::Word)
            .map_err(|source| InputError::InvalidPattern {
                term: term.to_string(),
                source,
            })
    }

    fn count_in(&self, lowered_text: &str) -> u64 {
        let n = match self {
            Self::Phrase(phrase) => lowered_text.matches(phrase.as_str()).count(),
            Self::Word(re)       => re.find_iter(lowered_text).count(),
        };
        n as u64
    }
}

/// A term as written in the taxonomy plus its compiled matcher
#[derive(Debug, Clone)]
struct CompiledTerm {
    term:    String,
    matcher: TermMatcher,
}

/// Counts every taxonomy term in a document.
///
/// Built once per run so each single-word pattern is compiled once
/// and reused for every year. Holds no state between `count` calls.
#[derive(Debug, Clone)]
pub struct KeywordCounter {
    categories: Vec<(String, Vec<CompiledTerm>)>,
}

impl KeywordCounter {
    /// Compile matchers for every term of `taxonomy`.
    pub fn new(taxonomy: &Taxonomy) -> Result<Self, InputError> {
        taxonomy.validate()?;

        let categories = taxonomy
            .iter()
            .map(|(category, terms)| {
                let compiled = terms
                    .iter()
                    .map(|term| {
                        Ok(CompiledTerm {
                            term:    term.clone(),
                            matcher: TermMatcher::compile(term)?,
                        })
                    })
                    .collect::<Result<Vec<_>, InputError>>()?;
                Ok((category.to_string(), compiled))
            })
            .collect::<Result<Vec<_>, InputError>>()?;

        Ok(Self { categories })
    }

    /// Count all terms in `text`.
    ///
    /// Every taxonomy category gets an entry, even when nothing in it
    /// matched; term maps only list terms that occurred.
    pub fn count(&self, text: &str) -> DocumentCounts {
        let lowered = text.to_lowercase();
        let mut result = DocumentCounts::with_capacity(self.categories.len());

        for (category, terms) in &self.categories {
            let mut counts = CategoryCount::default();
            for t in terms {
                counts.record(&t.term, t.matcher.count_in(&lowered));
            }
            result.insert(category.clone(), counts);
        }

        result
    }
}

/// One-shot convenience: compile `taxonomy` and count `text`.
pub fn count_keywords(text: &str, taxonomy: &Taxonomy) -> Result<DocumentCounts, InputError> {
    Ok(KeywordCounter::new(taxonomy)?.count(text))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy(pairs: Vec<(&str, Vec<&str>)>) -> Taxonomy {
        Taxonomy::from_pairs(pairs).unwrap()
    }

    fn single(text: &str, term: &str) -> u64 {
        let t = taxonomy(vec![("C", vec![term])]);
        count_keywords(text, &t).unwrap()["C"].total
    }

    #[test]
    fn test_single_word_respects_word_boundaries() {
        assert_eq!(single("category cat catalog", "cat"), 1);
    }

    #[test]
    fn test_multi_word_counts_substrings() {
        assert_eq!(single("net income net income", "net income"), 2);
    }

    #[test]
    fn test_multi_word_overcounts_across_words() {
        // Substring rule: no boundary check for phrases
        assert_eq!(single("internet incomes", "net income"), 1);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(single("Climate CLIMATE climate", "climate"), 3);
        assert_eq!(single("Net Income rose", "NET INCOME"), 1);
    }

    #[test]
    fn test_word_boundary_at_punctuation() {
        assert_eq!(single("risk, risk. (risk) risk-based risks", "risk"), 4);
    }

    #[test]
    fn test_special_characters_are_literal() {
        assert_eq!(single("invest in r&d and c++ now", "c++"), 0);
        assert_eq!(single("spending on r.d rose", "r.d"), 1);
        assert_eq!(single("spending on rxd rose", "r.d"), 0);
    }

    #[test]
    fn test_phrase_matches_do_not_overlap() {
        assert_eq!(single("aa aa aa", "aa aa"), 1);
    }

    #[test]
    fn test_zero_matches_are_sparse_but_category_present() {
        let t = taxonomy(vec![("A", vec!["alpha"]), ("B", vec!["beta", "gamma"])]);
        let counts = count_keywords("alpha beta", &t).unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts["B"].total, 1);
        assert!(counts["B"].terms.contains_key("beta"));
        assert!(!counts["B"].terms.contains_key("gamma"));

        let empty = count_keywords("nothing here", &t).unwrap();
        assert_eq!(empty["A"].total, 0);
        assert!(empty["A"].terms.is_empty());
    }

    #[test]
    fn test_overlapping_terms_both_count() {
        let t = taxonomy(vec![("Privacy", vec!["data", "data privacy"])]);
        let counts = count_keywords("our data privacy policy", &t).unwrap();
        assert_eq!(counts["Privacy"].terms["data"], 1);
        assert_eq!(counts["Privacy"].terms["data privacy"], 1);
        assert_eq!(counts["Privacy"].total, 2);
    }

    #[test]
    fn test_term_order_does_not_change_counts() {
        let text = "data privacy and data security";
        let a = count_keywords(text, &taxonomy(vec![("P", vec!["data", "data privacy"])])).unwrap();
        let b = count_keywords(text, &taxonomy(vec![("P", vec!["data privacy", "data"])])).unwrap();
        assert_eq!(a["P"].total, b["P"].total);
        assert_eq!(a["P"].terms["data"], b["P"].terms["data"]);
    }

    #[test]
    fn test_terms_keep_taxonomy_spelling() {
        let t = taxonomy(vec![("S", vec!["Climate"])]);
        let counts = count_keywords("climate", &t).unwrap();
        assert_eq!(counts["S"].terms["Climate"], 1);
    }

    #[test]
    fn test_counting_is_idempotent() {
        let t = taxonomy(vec![
            ("Sustainability", vec!["climate", "carbon footprint"]),
            ("Tech", vec!["cloud"]),
        ]);
        let counter = KeywordCounter::new(&t).unwrap();
        let text = "Climate and cloud; carbon footprint of the cloud.";
        assert_eq!(counter.count(text), counter.count(text));
    }
}
