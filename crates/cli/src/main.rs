use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::CatalogPaths;
use server::{RankedMovie, Recommender, RecommenderConfig, NO_MATCH_MESSAGE};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// CineRecs - Content-based Movie Recommendations
#[derive(Parser)]
#[command(name = "cine-recs")]
#[command(about = "Movie recommendation engine using TF-IDF similarity and weighted ratings", long_about = None)]
struct Cli {
    /// Directory holding movies_metadata.csv, credits.csv and keywords.csv
    #[arg(short, long, default_value = "data/tmdb")]
    data_dir: PathBuf,

    /// Override the metadata file path
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Override the credits file path
    #[arg(long)]
    credits: Option<PathBuf>,

    /// Override the keywords file path
    #[arg(long)]
    keywords: Option<PathBuf>,

    /// Movies with fewer votes are left out of the catalog
    #[arg(long, default_value = "10")]
    min_votes: u32,

    /// Fuzzy title score a match must exceed (0-100)
    #[arg(long, default_value = "60")]
    match_threshold: u8,

    /// Similarity candidates passed to re-ranking
    #[arg(long, default_value = "25")]
    candidates: usize,

    /// Number of titles to return
    #[arg(long, default_value = "5")]
    top_n: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Title {
        /// Movie title (typos are tolerated)
        #[arg(long)]
        query: String,

        /// Show similarity and weighted rating for each recommendation
        #[arg(long)]
        explain: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recommend movies matching a free-text description
    Text {
        /// Keywords, plot elements, people...
        #[arg(long)]
        query: String,

        #[arg(long)]
        explain: bool,

        #[arg(long)]
        json: bool,
    },

    /// Show the best fuzzy title matches for a query
    Search {
        #[arg(long)]
        query: String,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Run benchmark to test query performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let paths = catalog_paths(&cli);
    let config = RecommenderConfig::default()
        .with_min_vote_count(cli.min_votes)
        .with_match_threshold(cli.match_threshold)
        .with_candidate_pool(cli.candidates)
        .with_top_n(cli.top_n);

    // Build the engine once (this may take a moment)
    println!("Loading catalog from {}...", cli.data_dir.display());
    let start = Instant::now();
    let recommender = Arc::new(
        Recommender::load(&paths, config).context("Failed to build recommender")?,
    );
    println!(
        "{} Indexed {} movies in {:?}",
        "✓".green(),
        recommender.catalog().len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Title { query, explain, json } => handle_title(&recommender, &query, explain, json)?,
        Commands::Text { query, explain, json } => handle_text(&recommender, &query, explain, json)?,
        Commands::Search { query, limit } => handle_search(&recommender, &query, limit),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(recommender, requests, concurrent).await?,
    }

    Ok(())
}

fn catalog_paths(cli: &Cli) -> CatalogPaths {
    let mut paths = CatalogPaths::in_dir(&cli.data_dir);
    if let Some(metadata) = &cli.metadata {
        paths.metadata = metadata.clone();
    }
    if let Some(credits) = &cli.credits {
        paths.credits = credits.clone();
    }
    if let Some(keywords) = &cli.keywords {
        paths.keywords = keywords.clone();
    }
    paths
}

/// Blank queries are rejected here; the engine assumes non-empty input
fn require_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Query must not be empty");
    }
    Ok(())
}

/// Handle the 'title' command
fn handle_title(recommender: &Recommender, query: &str, explain: bool, json: bool) -> Result<()> {
    require_query(query)?;
    match recommender.rank_by_title(query) {
        Ok(ranking) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
                return Ok(());
            }
            println!(
                "{} {} (match score {})",
                "Because you searched for:".bold(),
                ranking.matched.title.bold().blue(),
                ranking.matched.score
            );
            print_recommendations(&ranking.movies, explain);
        }
        Err(err) => {
            info!("No title match: {}", err);
            if json {
                println!("{}", serde_json::json!({ "message": NO_MATCH_MESSAGE, "titles": [] }));
            } else {
                println!("{}", NO_MATCH_MESSAGE.yellow());
            }
        }
    }
    Ok(())
}

/// Handle the 'text' command
fn handle_text(recommender: &Recommender, query: &str, explain: bool, json: bool) -> Result<()> {
    require_query(query)?;
    let movies = recommender.rank_by_text(query);
    if json {
        println!("{}", serde_json::to_string_pretty(&movies)?);
        return Ok(());
    }
    if movies.is_empty() {
        println!("{}", "Nothing in the catalog matches that description.".yellow());
        return Ok(());
    }
    println!("{} {}", "Results for:".bold(), query.bold().blue());
    print_recommendations(&movies, explain);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(recommender: &Recommender, query: &str, limit: usize) {
    let threshold = recommender.resolver().threshold();
    println!("{}", format!("Title matches for '{}':", query).bold().blue());
    for m in recommender.resolver().top_matches(query, limit) {
        let score = if m.score > threshold {
            m.score.to_string().green()
        } else {
            m.score.to_string().red()
        };
        println!("  {:>3}  {}", score, m.title);
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    recommender: Arc<Recommender>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let catalog_size = recommender.catalog().len();
    if catalog_size == 0 {
        bail!("Catalog is empty, nothing to benchmark");
    }

    // Pick random catalog titles as queries
    let queries: Vec<String> = (0..requests)
        .map(|_| {
            let index = rand::random::<u32>() as usize % catalog_size;
            recommender
                .catalog()
                .get(index)
                .map(|m| m.title.clone())
                .unwrap_or_default()
        })
        .collect();

    // Split the queries across `concurrent` blocking workers sharing one engine
    let workers = concurrent.max(1);
    let chunk_size = queries.len().div_ceil(workers).max(1);
    let wall_start = Instant::now();
    let mut handles = vec![];
    for chunk in queries.chunks(chunk_size) {
        let recommender = recommender.clone();
        let chunk = chunk.to_vec();
        handles.push(tokio::task::spawn_blocking(move || {
            chunk
                .iter()
                .map(|query| {
                    let start = Instant::now();
                    recommender.recommend_by_title(query);
                    start.elapsed()
                })
                .collect::<Vec<Duration>>()
        }));
    }

    let mut timings = vec![];
    for handle in handles {
        timings.extend(handle.await.context("Benchmark worker panicked")?);
    }
    let wall_time = wall_start.elapsed();

    if timings.is_empty() {
        println!("No requests were made");
        return Ok(());
    }
    let total: Duration = timings.iter().sum();
    let avg_latency = total / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f64 / wall_time.as_secs_f64();

    println!("Benchmark results:");
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(movies: &[RankedMovie], explain: bool) {
    for (i, movie) in movies.iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().green(), movie.title);
        if explain {
            println!(
                "   similarity {:.3}, weighted rating {:.2} ({} votes, avg {:.1})",
                movie.similarity, movie.weighted_rating, movie.vote_count, movie.vote_average
            );
        }
    }
}
