use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::JoinKey;
use rayon::prelude::*;
use recommender::{EngineConfig, EngineError, Recommendation, RecommendationEngine};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Most movies a user may pick for one query
const MAX_SELECTIONS: usize = 3;

/// GenreRecs - movie recommendations by genre similarity
#[derive(Parser)]
#[command(name = "genre-recs")]
#[command(about = "Recommend well-rated movies with genres similar to ones you like", long_about = None)]
struct Cli {
    /// Path to the movie catalog CSV (movieId,title,genres)
    #[arg(short, long, default_value = "movie.csv")]
    movies: PathBuf,

    /// Path to the ratings CSV (userId,movieId,rating,timestamp)
    #[arg(short, long, default_value = "rating.csv")]
    ratings: PathBuf,

    /// How ratings are grouped and joined back to movies
    #[arg(long, value_enum, default_value_t = JoinKeyArg::Title)]
    join_key: JoinKeyArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum JoinKeyArg {
    /// Group by title (movies sharing a title share statistics)
    Title,
    /// Group by movie id
    MovieId,
}

impl From<JoinKeyArg> for JoinKey {
    fn from(arg: JoinKeyArg) -> Self {
        match arg {
            JoinKeyArg::Title => JoinKey::Title,
            JoinKeyArg::MovieId => JoinKey::MovieId,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Get recommendations for up to three liked movies
    Recommend {
        /// Exact title of a movie you like (repeat for more)
        #[arg(long = "movie", required = true)]
        movies: Vec<String>,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        top_n: usize,

        /// Print the rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the known titles
    Titles {
        /// Only show titles containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,

        /// Maximum number of titles to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Read selections from stdin, one query per line, titles separated by '|'
    Interactive {
        /// Number of recommendations per query
        #[arg(long, default_value = "10")]
        top_n: usize,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of queries to run
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = EngineConfig::new(&cli.movies, &cli.ratings).with_join_key(cli.join_key.into());

    println!(
        "Loading {} and {}...",
        config.movies_path.display(),
        config.ratings_path.display()
    );
    let start = Instant::now();
    let engine = RecommendationEngine::new(&config)
        .context("Fatal error initializing recommender")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        engine.movie_count(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            movies,
            top_n,
            json,
        } => handle_recommend(&engine, &movies, top_n, json)?,
        Commands::Titles { filter, limit } => handle_titles(&engine, filter, limit),
        Commands::Interactive { top_n } => handle_interactive(&engine, top_n)?,
        Commands::Benchmark { requests } => handle_benchmark(&engine, requests)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &RecommendationEngine,
    movies: &[String],
    top_n: usize,
    json: bool,
) -> Result<()> {
    if movies.len() > MAX_SELECTIONS {
        bail!("Choose up to {} movies (got {})", MAX_SELECTIONS, movies.len());
    }

    match engine.get_recommendations(movies, top_n) {
        Ok(recommendations) if json => {
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
        }
        Ok(recommendations) => print_recommendations(&recommendations),
        Err(e) => report_query_error(&e)?,
    }
    Ok(())
}

/// Handle the 'titles' command
fn handle_titles(engine: &RecommendationEngine, filter: Option<String>, limit: Option<usize>) {
    let needle = filter.map(|f| f.to_lowercase());
    let matches = engine
        .titles()
        .iter()
        .filter(|title| match &needle {
            Some(n) => title.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .take(limit.unwrap_or(usize::MAX));

    let mut shown = 0;
    for title in matches {
        println!("{}", title);
        shown += 1;
    }
    println!("{}", format!("{} of {} titles", shown, engine.titles().len()).dimmed());
}

/// Handle the 'interactive' command
fn handle_interactive(engine: &RecommendationEngine, top_n: usize) -> Result<()> {
    println!(
        "{}",
        "Enter up to 3 titles separated by '|', or 'quit' to exit.".bold()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        let selected: Vec<&str> = line
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if selected.is_empty() {
            println!("{}", "Please select at least one movie".yellow());
            continue;
        }
        if selected.len() > MAX_SELECTIONS {
            println!(
                "{}",
                format!("Choose up to {} movies", MAX_SELECTIONS).yellow()
            );
            continue;
        }

        match engine.get_recommendations(&selected, top_n) {
            Ok(recommendations) => print_recommendations(&recommendations),
            Err(e) => report_query_error(&e)?,
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(engine: &RecommendationEngine, requests: usize) -> Result<()> {
    let titles = engine.titles();
    if titles.is_empty() || requests == 0 {
        bail!("Nothing to benchmark");
    }

    // Random single-title queries
    let queries: Vec<&str> = (0..requests)
        .map(|_| titles[rand::random::<u64>() as usize % titles.len()].as_str())
        .collect();

    // Queries share the engine read-only across rayon workers
    let wall = Instant::now();
    let mut timings = queries
        .par_iter()
        .map(|title| -> std::result::Result<Duration, EngineError> {
            let start = Instant::now();
            engine.get_recommendations(&[*title], 10)?;
            Ok(start.elapsed())
        })
        .collect::<std::result::Result<Vec<Duration>, EngineError>>()?;
    let wall = wall.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / wall.as_secs_f32();

    println!("Benchmark results:");
    println!("Wall time: {:?}", wall);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print a query error for the user; only unrecoverable errors propagate
fn report_query_error(error: &EngineError) -> Result<()> {
    if !error.is_recoverable() {
        bail!("Error generating recommendations: {}", error);
    }
    println!("{} {}", "Error generating recommendations:".red(), error);
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("{}", "No recommendations found".yellow());
        return;
    }

    println!("{}", "Recommended Movies:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Genre Similarity: {:.3}, Avg Rating: {:.2}, Rating Count: {}",
            (i + 1).to_string().green(),
            rec.title,
            rec.genres,
            rec.similarity,
            rec.mean_rating,
            rec.rating_count
        );
    }
}
