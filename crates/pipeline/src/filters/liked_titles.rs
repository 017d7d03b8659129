//! Filter to remove the movies the user said they like.
//!
//! The exclusion is by title, so every catalog row sharing a liked title
//! is removed, whatever its id.

use crate::traits::Filter;
use crate::types::{Candidate, QueryContext};
use anyhow::Result;
use data_loader::DataIndex;
use std::sync::Arc;

/// Removes candidates whose title is one of the query's liked titles.
pub struct LikedTitlesFilter {
    data_index: Arc<DataIndex>,
}

impl LikedTitlesFilter {
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self { data_index }
    }
}

impl Filter for LikedTitlesFilter {
    fn name(&self) -> &str {
        "LikedTitlesFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &QueryContext,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| match self.data_index.movie_at(candidate.row) {
                Some(movie) => !context.liked_titles.contains(&movie.title),
                None => false,
            })
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{JoinKey, Movie};

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            genres: "Drama".to_string(),
        }
    }

    #[test]
    fn test_liked_titles_filter() {
        let index = Arc::new(DataIndex::from_parts(
            vec![movie(100, "Heat"), movie(101, "Ronin"), movie(200, "Heat"), movie(300, "Alien")],
            vec![],
            JoinKey::Title,
        ));
        let context = QueryContext::new(["Heat"]);

        let candidates = vec![
            Candidate::new(0, 100, 0.9),
            Candidate::new(1, 101, 0.8),
            Candidate::new(2, 200, 0.7),
            Candidate::new(3, 300, 0.6),
        ];

        let filter = LikedTitlesFilter::new(index);
        let filtered = filter.apply(candidates, &context).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].movie_id, 101);
        assert_eq!(filtered[1].movie_id, 300);
    }
}
