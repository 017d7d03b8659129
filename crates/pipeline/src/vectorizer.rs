//! TF-IDF vectorizer over short genre documents.
//!
//! Tokens are maximal runs of alphanumeric or underscore characters, at
//! least two characters long, lowercased, with English stop words removed.
//! The vocabulary is sorted, so column `i` is the `i`-th term in
//! lexicographic order. Weights are raw term counts times the smoothed idf
//! `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalized.

use crate::error::FeatureError;
use crate::stop_words::is_stop_word;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Split text into vocabulary tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2 && !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Sparse vector stored as `(column, weight)` pairs sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unordered entries; zero weights are dropped
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_unstable_by_key(|&(col, _)| col);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, column: usize) -> f64 {
        self.entries
            .binary_search_by_key(&column, |&(col, _)| col)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_col, a) = self.entries[i];
            let (b_col, b) = other.entries[j];
            match a_col.cmp(&b_col) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a * b;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Cosine similarity; 0.0 when either vector is zero
    pub fn cosine_similarity(&self, other: &SparseVector) -> f64 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        self.dot(other) / (norm_a * norm_b)
    }

    fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for entry in &mut self.entries {
                entry.1 /= norm;
            }
        }
        self
    }
}

/// A fitted TF-IDF model. The vocabulary never changes after `fit`.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    terms: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from a corpus.
    ///
    /// Fails when no document contributes a single token.
    pub fn fit<S: AsRef<str> + Sync>(documents: &[S]) -> Result<Self, FeatureError> {
        let n = documents.len();

        let doc_terms: Vec<BTreeSet<String>> = documents
            .par_iter()
            .map(|doc| tokenize(doc.as_ref()).into_iter().collect())
            .collect();

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for terms in doc_terms {
            for term in terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(FeatureError::EmptyVocabulary { documents: n });
        }

        let mut terms = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (term, df) in document_frequency {
            idf.push(((1.0 + n as f64) / (1.0 + df as f64)).ln() + 1.0);
            terms.push(term);
        }
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();

        Ok(Self {
            terms,
            vocabulary,
            idf,
        })
    }

    /// Project text into the fitted vocabulary. Unknown tokens are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&col) = self.vocabulary.get(&token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();
        SparseVector::new(entries).l2_normalized()
    }

    /// Vocabulary terms in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Column of a term, if it is in the vocabulary
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Adventure|Children's|Sci-Fi"),
            vec!["adventure", "children", "sci", "fi"]
        );
        assert_eq!(tokenize("(no genres listed)"), vec!["genres", "listed"]);
        assert!(tokenize("a | I").is_empty());
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let v = TfidfVectorizer::fit(&["Drama|Comedy", "Action"]).unwrap();
        assert_eq!(v.terms(), ["action", "comedy", "drama"]);
        assert_eq!(v.column("drama"), Some(2));
        assert_eq!(v.column("horror"), None);
    }

    #[test]
    fn test_smoothed_idf() {
        let v = TfidfVectorizer::fit(&["Comedy", "Comedy", "Drama"]).unwrap();
        let comedy = v.column("comedy").unwrap();
        let drama = v.column("drama").unwrap();
        assert!((v.idf()[comedy] - ((4.0f64 / 3.0).ln() + 1.0)).abs() < EPS);
        assert!((v.idf()[drama] - ((4.0f64 / 2.0).ln() + 1.0)).abs() < EPS);
    }

    #[test]
    fn test_transform_is_unit_length() {
        let v = TfidfVectorizer::fit(&["Comedy|Drama", "Drama", "Horror"]).unwrap();
        let vec = v.transform("Comedy|Drama");
        assert_eq!(vec.nnz(), 2);
        assert!((vec.norm() - 1.0).abs() < EPS);
        // The rarer term carries more weight
        assert!(vec.get(v.column("comedy").unwrap()) > vec.get(v.column("drama").unwrap()));
    }

    #[test]
    fn test_transform_ignores_unknown_tokens() {
        let v = TfidfVectorizer::fit(&["Comedy"]).unwrap();
        assert!(v.transform("Western").is_empty());
        assert_eq!(v.terms().len(), 1);
    }

    #[test]
    fn test_empty_vocabulary() {
        let err = TfidfVectorizer::fit(&["the", "a|an"]).unwrap_err();
        assert!(matches!(err, FeatureError::EmptyVocabulary { documents: 2 }));
    }

    #[test]
    fn test_cosine_similarity() {
        let a = SparseVector::new(vec![(0, 1.0), (2, 1.0)]);
        let b = SparseVector::new(vec![(2, 2.0)]);
        let zero = SparseVector::default();

        assert!((a.cosine_similarity(&a) - 1.0).abs() < EPS);
        assert!((a.cosine_similarity(&b) - 1.0 / 2f64.sqrt()).abs() < EPS);
        assert_eq!(a.cosine_similarity(&zero), 0.0);
        assert_eq!(SparseVector::new(vec![(1, 1.0)]).dot(&b), 0.0);
    }
}
