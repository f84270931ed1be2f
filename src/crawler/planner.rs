//! Query planner - main crawl orchestration logic
//!
//! This module contains the crawl loop that:
//! - Plans the ordered list of search queries
//! - Fetches each search page and extracts its listing cards
//! - Paces requests between cards and between queries
//! - Feeds every record through a [`CrawlContext`] for deduplication
//! - Optionally enriches ranked records from their detail pages

use crate::config::{Config, SearchConfig};
use crate::crawler::aggregate::rank;
use crate::crawler::detail::extract_detail;
use crate::crawler::listing::extract_listing;
use crate::crawler::pacing::Pacer;
use crate::crawler::{FetchResult, Fetcher, HttpFetcher};
use crate::model::MovieRecord;
use crate::output::CrawlStatistics;
use crate::state::{CrawlContext, QueryState};
use crate::url::{parse_base_url, search_url, title_url};
use crate::ReelError;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// One planned search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Text sent as the `title` search parameter
    pub term: String,

    /// Maximum number of listing cards taken from the results
    pub cap: usize,
}

/// Ranked catalog plus the statistics of the run that produced it
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub movies: Vec<MovieRecord>,
    pub stats: CrawlStatistics,
}

/// Builds the ordered query list for a run
///
/// With the primary sweep enabled, the first base query is searched once
/// with `limit` as its cap. Then every base query and keyword follows with
/// the per-query cap; repeated terms (compared case-insensitively) are only
/// searched the first time they appear. A repeat would fetch the same
/// results page again and add nothing, so the keyword sweep runs fewer
/// searches than the plain concatenation of both lists.
pub fn plan_queries(search: &SearchConfig, limit: usize) -> Vec<SearchQuery> {
    let mut queries = Vec::new();

    if search.primary_sweep {
        if let Some(first) = search.base_queries.first() {
            queries.push(SearchQuery {
                term: first.trim().to_string(),
                cap: limit,
            });
        }
    }

    let mut seen = HashSet::new();
    for term in search.base_queries.iter().chain(search.keywords.iter()) {
        let term = term.trim();
        if term.is_empty() || !seen.insert(term.to_lowercase()) {
            continue;
        }
        queries.push(SearchQuery {
            term: term.to_string(),
            cap: search.per_query_cap as usize,
        });
    }

    queries
}

/// Drives searches, extraction and accumulation for one crawl
pub struct QueryPlanner {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetcher>,
    base_url: Url,
    search_url: Url,
    pacer: Pacer,
}

impl QueryPlanner {
    /// Creates a planner that fetches over HTTP
    pub fn new(config: Config) -> Result<Self, ReelError> {
        let fetcher = HttpFetcher::new(&config.site, &config.user_agent)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a planner using the given fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Result<Self, ReelError> {
        let base_url = parse_base_url(&config.site.base_url)?;
        let search_url = search_url(&base_url)?;
        let pacer = Pacer::from_config(&config.search);

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            base_url,
            search_url,
            pacer,
        })
    }

    /// Replaces the pacing derived from configuration
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// The query list a run with this `limit` would execute
    pub fn queries(&self, limit: usize) -> Vec<SearchQuery> {
        plan_queries(&self.config.search, limit)
    }

    /// Search-string parameters for one query
    fn search_params(&self, query: &SearchQuery) -> Vec<(String, String)> {
        vec![
            ("title".to_string(), query.term.clone()),
            (
                "title_type".to_string(),
                self.config.search.title_type.clone(),
            ),
            (
                "countries".to_string(),
                self.config.search.region_code.clone(),
            ),
            ("count".to_string(), query.cap.to_string()),
        ]
    }

    /// Runs a single search query, feeding its records into `context`
    ///
    /// A failed fetch is logged and contributes nothing; it never aborts
    /// the run. Returns the state the query finished in.
    pub async fn run_query(&self, query: &SearchQuery, context: &mut CrawlContext) -> QueryState {
        let mut state = QueryState::Idle.advance(QueryState::Fetching);
        tracing::info!("Searching for: {}", query.term);

        let body = match self
            .fetcher
            .fetch(&self.search_url, &self.search_params(query))
            .await
        {
            FetchResult::Success { body, .. } => body,
            failure => {
                tracing::warn!(
                    "Search for {:?} failed: {}",
                    query.term,
                    failure.failure_reason().unwrap_or_default()
                );
                context.record_query(true);
                return state.advance(QueryState::Done);
            }
        };
        context.record_query(false);

        state = state.advance(QueryState::Extracting);
        let cards = extract_listing(&body, &self.base_url, query.cap);
        let card_count = cards.len();

        state = state.advance(QueryState::Accumulating);
        let mut added = 0;
        for card in cards {
            match card {
                Some(record) => {
                    context.record_card(false);
                    if context.accept(record) {
                        added += 1;
                    }
                }
                None => context.record_card(true),
            }
            self.pacer.after_item().await;
        }

        tracing::debug!(
            "Query {:?}: {} cards, {} new movies",
            query.term,
            card_count,
            added
        );

        state.advance(QueryState::Done)
    }

    /// Runs every planned query in order and returns the filled context
    pub async fn collect(&self, limit: usize) -> CrawlContext {
        let queries = self.queries(limit);
        tracing::info!("Planned {} search queries", queries.len());

        let mut context = CrawlContext::new();
        for query in &queries {
            self.run_query(query, &mut context).await;
            self.pacer.after_query().await;
        }
        context.finish();

        tracing::info!(
            "Collected {} unique movies from {} queries",
            context.unique_count(),
            queries.len()
        );
        context
    }

    /// Runs the full crawl and returns the ranked catalog
    pub async fn run(&self, limit: usize) -> CrawlOutcome {
        let context = self.collect(limit).await;
        let stats = context.stats().clone();
        let movies = context.into_ranked(limit);
        CrawlOutcome { movies, stats }
    }

    /// Fetches and extracts the detail page of one title
    ///
    /// Returns None when the page cannot be fetched; an unrecognized page
    /// still yields a record carrying the id.
    pub async fn fetch_details(&self, id: &str) -> Option<MovieRecord> {
        let url = match title_url(&self.base_url, id) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot build title URL for {}: {}", id, e);
                return None;
            }
        };

        match self.fetcher.fetch(&url, &[]).await {
            FetchResult::Success { body, .. } => Some(extract_detail(&body, id, &self.base_url)),
            failure => {
                tracing::warn!(
                    "Error fetching movie details for {}: {}",
                    id,
                    failure.failure_reason().unwrap_or_default()
                );
                None
            }
        }
    }

    /// Builds enriched copies of `records` from their detail pages
    ///
    /// Order is preserved. Records whose detail page cannot be fetched are
    /// passed through unchanged.
    pub async fn enrich(&self, records: &[MovieRecord]) -> Vec<MovieRecord> {
        let mut enriched = Vec::with_capacity(records.len());

        for record in records {
            let merged = match self.fetch_details(&record.id).await {
                Some(detail) => record.with_details(&detail),
                None => record.clone(),
            };
            enriched.push(merged);
            self.pacer.after_item().await;
        }

        tracing::info!("Enriched {} movies from detail pages", enriched.len());
        enriched
    }

    /// Runs the full crawl, then enriches the ranked catalog
    ///
    /// A detail page can supply a rating the listing card lacked, so the
    /// enriched records are ranked again before they are returned.
    pub async fn run_enriched(&self, limit: usize) -> CrawlOutcome {
        let outcome = self.run(limit).await;
        let enriched = self.enrich(&outcome.movies).await;
        CrawlOutcome {
            movies: rank(enriched, limit),
            stats: outcome.stats,
        }
    }
}
