use data_loader::{DataIndex, JoinKey};
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let movies = Path::new("data/movie.csv");
    let ratings = Path::new("data/rating.csv");

    println!("Loading catalog and ratings...\n");

    let start = Instant::now();
    let index = DataIndex::load_from_files(movies, ratings, JoinKey::Title)?;
    let elapsed = start.elapsed();

    let (movies, ratings) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Distinct titles: {}", index.titles().len());
    println!("Ratings: {}", ratings);
    println!("Stats groups: {}", index.stats_len());
    println!("\nPerformance: {:.0} ratings/second",
             ratings as f64 / elapsed.as_secs_f64());
    Ok(())
}
