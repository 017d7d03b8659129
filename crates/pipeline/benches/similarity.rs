//! Benchmarks for genre similarity scoring
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic catalog shaped like MovieLens genre strings.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pipeline::GenreFeatureSpace;

const GENRES: [&str; 18] = [
    "Action", "Adventure", "Animation", "Children", "Comedy", "Crime", "Documentary", "Drama",
    "Fantasy", "Film-Noir", "Horror", "Musical", "Mystery", "Romance", "Sci-Fi", "Thriller",
    "War", "Western",
];

fn synthetic_catalog(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            (0..=(i % 4))
                .map(|k| GENRES[(i * 7 + k * 5) % GENRES.len()])
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let docs = synthetic_catalog(27_000);

    c.bench_function("feature_space_build_27k", |b| {
        b.iter(|| {
            let space = GenreFeatureSpace::from_documents(black_box(&docs)).unwrap();
            black_box(space)
        })
    });
}

fn bench_similarities(c: &mut Criterion) {
    let docs = synthetic_catalog(27_000);
    let space = GenreFeatureSpace::from_documents(&docs).unwrap();
    let query = space.project("Comedy|Romance");

    c.bench_function("similarities_27k", |b| {
        b.iter(|| black_box(space.similarities(black_box(&query))))
    });
}

criterion_group!(benches, bench_build, bench_similarities);
criterion_main!(benches);
