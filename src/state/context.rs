use crate::crawler::rank;
use crate::model::MovieRecord;
use crate::output::CrawlStatistics;
use chrono::Utc;
use std::collections::HashSet;

/// Mutable state of one crawl run
///
/// Holds the seen-identifier set and the accepted records in arrival order.
/// The planner threads a context through every query instead of keeping
/// crawl state in globals, so separate runs (and tests) never share it.
#[derive(Debug, Clone, Default)]
pub struct CrawlContext {
    seen_ids: HashSet<String>,
    records: Vec<MovieRecord>,
    stats: CrawlStatistics,
}

impl CrawlContext {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a record to the context
    ///
    /// The first record seen for an id is kept as-is; later records with the
    /// same id are discarded outright, even if they carry more fields.
    ///
    /// # Returns
    ///
    /// * `true` - The record was new and has been stored
    /// * `false` - The id was already present
    pub fn accept(&mut self, record: MovieRecord) -> bool {
        if self.seen_ids.contains(&record.id) {
            self.stats.duplicates += 1;
            tracing::trace!("Skipping duplicate {}", record.id);
            return false;
        }

        self.seen_ids.insert(record.id.clone());
        self.records.push(record);
        self.stats.unique_movies += 1;
        true
    }

    /// Returns true if a record with this id has been accepted
    pub fn has_seen(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    /// Counts one listing card, and whether it was dropped
    pub fn record_card(&mut self, dropped: bool) {
        self.stats.cards_seen += 1;
        if dropped {
            self.stats.cards_dropped += 1;
        }
    }

    /// Counts one search query, and whether its fetch failed
    pub fn record_query(&mut self, failed: bool) {
        self.stats.queries_run += 1;
        if failed {
            self.stats.queries_failed += 1;
        }
    }

    /// Stamps the run as finished
    pub fn finish(&mut self) {
        self.stats.finished_at = Some(Utc::now());
    }

    /// Number of distinct records accepted so far
    pub fn unique_count(&self) -> usize {
        self.records.len()
    }

    /// Accepted records in arrival order
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn stats(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Consumes the context, returning records ranked by rating and
    /// truncated to `limit`
    pub fn into_ranked(self, limit: usize) -> Vec<MovieRecord> {
        rank(self.records, limit)
    }
}
