//! Output module for persisting and reporting crawl results
//!
//! This module handles:
//! - Writing the ranked catalog as JSON (and reading it back as a cache)
//! - Printing the top-ranked movies
//! - Recording crawl statistics

mod json;
pub mod stats;
mod traits;

pub use json::{format_catalog, load_cached_catalog, load_catalog, write_catalog, JsonSink};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{CatalogSink, OutputError, OutputResult};

use crate::model::MovieRecord;

/// Formats the one-line summaries of the first `top_n` movies, ranked from 1
pub fn format_ranked(movies: &[MovieRecord], top_n: usize) -> Vec<String> {
    movies
        .iter()
        .take(top_n)
        .enumerate()
        .map(|(i, movie)| movie.summary_line(i + 1))
        .collect()
}

/// Prints the first `top_n` movies to stdout
pub fn print_ranked(movies: &[MovieRecord], top_n: usize) {
    println!("Top {} movies:", top_n.min(movies.len()));
    for line in format_ranked(movies, top_n) {
        println!("{}", line);
    }
}
