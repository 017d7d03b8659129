//! Integration tests for the pipeline.
//!
//! These tests verify that the feature space and the filters work together
//! in a realistic scenario.

use data_loader::{DataIndex, JoinKey, Movie, Rating};
use pipeline::filters::*;
use pipeline::{Candidate, FilterPipeline, GenreFeatureSpace, QueryContext};
use std::sync::Arc;

fn ratings(movie_id: i64, value: f64, count: usize) -> Vec<Rating> {
    (0..count)
        .map(|i| Rating {
            user_id: i as i64,
            movie_id,
            rating: value,
            timestamp: Some(1_000_000),
        })
        .collect()
}

fn create_test_setup() -> Arc<DataIndex> {
    let movies = vec![
        Movie { id: 1, title: "Liked Comedy".to_string(), genres: "Comedy|Romance".to_string() },
        Movie { id: 2, title: "Popular Comedy".to_string(), genres: "Comedy".to_string() },
        Movie { id: 3, title: "Bad Comedy".to_string(), genres: "Comedy|Romance".to_string() },
        Movie { id: 4, title: "Obscure Romance".to_string(), genres: "Romance".to_string() },
        Movie { id: 5, title: "Popular Horror".to_string(), genres: "Horror".to_string() },
    ];

    let mut all = Vec::new();
    all.extend(ratings(1, 4.8, 500));
    all.extend(ratings(2, 4.1, 350));
    all.extend(ratings(3, 2.0, 900));
    all.extend(ratings(4, 4.9, 12));
    all.extend(ratings(5, 3.9, 1000));

    Arc::new(DataIndex::from_parts(movies, all, JoinKey::Title))
}

fn score_catalog(index: &DataIndex, space: &GenreFeatureSpace, genres: &str) -> Vec<Candidate> {
    space
        .similarities(&space.project(genres))
        .into_iter()
        .enumerate()
        .map(|(row, sim)| Candidate::new(row, index.movies()[row].id, sim))
        .collect()
}

#[test]
fn test_full_pipeline_filters_correctly() {
    let index = create_test_setup();
    let space = GenreFeatureSpace::build(&index).unwrap();

    let pipeline = FilterPipeline::new()
        .add_filter(LikedTitlesFilter::new(index.clone()))
        .add_filter(MinimumRatingFilter::with_defaults(index.clone()));

    let candidates = score_catalog(&index, &space, "Comedy|Romance");
    let context = QueryContext::new(["Liked Comedy"]);
    let filtered = pipeline.apply(candidates, &context).unwrap();

    // Liked, low rated and rarely rated movies are gone, catalog order kept
    let ids: Vec<i64> = filtered.iter().map(|c| c.movie_id).collect();
    assert_eq!(ids, vec![2, 5]);
    assert!(filtered[0].similarity > 0.0);
    assert_eq!(filtered[1].similarity, 0.0);
}

#[test]
fn test_similarity_scores_are_bounded() {
    let index = create_test_setup();
    let space = GenreFeatureSpace::build(&index).unwrap();

    for candidate in score_catalog(&index, &space, "Comedy") {
        assert!(
            (0.0..=1.0 + 1e-12).contains(&candidate.similarity),
            "similarity out of range: {}",
            candidate.similarity
        );
    }
}
