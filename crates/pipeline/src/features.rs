//! Genre feature space.
//!
//! One TF-IDF row per catalog row, in catalog order, over a vocabulary
//! fitted once on the whole catalog's genre text.

use crate::error::FeatureError;
use crate::vectorizer::{SparseVector, TfidfVectorizer};
use data_loader::DataIndex;
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// The frozen vectorizer and the catalog's feature matrix.
///
/// Immutable once built: queries may only project text through the
/// vectorizer, never refit it.
#[derive(Debug, Clone)]
pub struct GenreFeatureSpace {
    vectorizer: TfidfVectorizer,
    rows: Vec<SparseVector>,
}

impl GenreFeatureSpace {
    /// Fit the vectorizer on every catalog genre string and transform each row.
    pub fn build(data_index: &DataIndex) -> Result<Self, FeatureError> {
        let start = Instant::now();
        let documents: Vec<&str> = data_index
            .movies()
            .iter()
            .map(|movie| movie.genres.as_str())
            .collect();

        let space = Self::from_documents(&documents)?;

        info!(
            "Built genre feature space: {} rows x {} terms in {:.2?}",
            space.rows.len(),
            space.vectorizer.terms().len(),
            start.elapsed()
        );
        Ok(space)
    }

    /// Build directly from genre documents
    pub fn from_documents<S: AsRef<str> + Sync>(documents: &[S]) -> Result<Self, FeatureError> {
        let vectorizer = TfidfVectorizer::fit(documents)?;
        let rows = documents
            .par_iter()
            .map(|doc| vectorizer.transform(doc.as_ref()))
            .collect();
        Ok(Self { vectorizer, rows })
    }

    /// Project genre text into the frozen vocabulary
    pub fn project(&self, text: &str) -> SparseVector {
        self.vectorizer.transform(text)
    }

    /// Cosine similarity of `query` against every row, in catalog order
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        self.rows
            .par_iter()
            .map(|row| query.cosine_similarity(row))
            .collect()
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{JoinKey, Movie};

    fn create_test_index() -> DataIndex {
        let movies = [("A", "Comedy"), ("B", "Comedy|Romance"), ("C", "Drama")]
            .iter()
            .enumerate()
            .map(|(i, (title, genres))| Movie {
                id: i as i64 + 1,
                title: title.to_string(),
                genres: genres.to_string(),
            })
            .collect();
        DataIndex::from_parts(movies, vec![], JoinKey::Title)
    }

    #[test]
    fn test_one_row_per_catalog_row() {
        let space = GenreFeatureSpace::build(&create_test_index()).unwrap();
        assert_eq!(space.len(), 3);
        assert_eq!(space.vectorizer().terms(), ["comedy", "drama", "romance"]);
    }

    #[test]
    fn test_projection_matches_feature_row() {
        let space = GenreFeatureSpace::build(&create_test_index()).unwrap();
        assert_eq!(&space.project("Comedy|Romance"), space.row(1).unwrap());
    }

    #[test]
    fn test_similarities_rank_shared_genres_higher() {
        let space = GenreFeatureSpace::build(&create_test_index()).unwrap();
        let sims = space.similarities(&space.project("Comedy"));

        assert_eq!(sims.len(), 3);
        assert!((sims[0] - 1.0).abs() < 1e-9);
        assert!(sims[1] > 0.0 && sims[1] < 1.0);
        assert_eq!(sims[2], 0.0);
    }

    #[test]
    fn test_empty_catalog_fails() {
        let err = GenreFeatureSpace::build(&DataIndex::new()).unwrap_err();
        assert!(matches!(err, FeatureError::EmptyVocabulary { documents: 0 }));
    }
}
