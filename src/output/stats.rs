//! Crawl run statistics
//!
//! Counters collected while the planner runs, plus a console report printed
//! at the end of a crawl.

use chrono::{DateTime, Utc};

/// Counters describing one crawl run
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished, if it has
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of search queries attempted
    pub queries_run: u64,

    /// Number of search queries whose fetch failed
    pub queries_failed: u64,

    /// Number of listing cards examined
    pub cards_seen: u64,

    /// Cards dropped because they had no usable title link
    pub cards_dropped: u64,

    /// Records discarded because their id was already seen
    pub duplicates: u64,

    /// Distinct movies collected
    pub unique_movies: u64,
}

impl CrawlStatistics {
    /// Creates empty statistics stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            queries_run: 0,
            queries_failed: 0,
            cards_seen: 0,
            cards_dropped: 0,
            duplicates: 0,
            unique_movies: 0,
        }
    }

    /// Run duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Share of queries that returned a page, as a percentage
    pub fn query_success_rate(&self) -> f64 {
        if self.queries_run == 0 {
            return 0.0;
        }
        ((self.queries_run - self.queries_failed) as f64 / self.queries_run as f64) * 100.0
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {} seconds", duration);
    }
    println!();

    println!("Queries:");
    println!("  Run: {}", stats.queries_run);
    println!("  Failed: {}", stats.queries_failed);
    println!("  Success Rate: {:.1}%", stats.query_success_rate());
    println!();

    println!("Listing Cards:");
    println!("  Examined: {}", stats.cards_seen);
    println!("  Dropped (no title link): {}", stats.cards_dropped);
    println!("  Duplicates skipped: {}", stats.duplicates);
    println!("  Unique movies: {}", stats.unique_movies);
}
