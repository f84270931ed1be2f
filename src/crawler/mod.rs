//! Crawler module for search, extraction and aggregation
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetcher`] capability
//! - Listing-card and detail-page extraction
//! - Request pacing between cards and queries
//! - Query planning and cross-query aggregation

mod aggregate;
mod detail;
mod fetcher;
mod listing;
mod pacing;
pub mod parser;
mod planner;

pub use aggregate::{aggregate, rank};
pub use detail::{extract_detail, extract_detail_document};
pub use fetcher::{
    build_http_client, fetch_url, user_agent_string, FetchResult, Fetcher, HttpFetcher,
};
pub use listing::{extract_card, extract_listing, CARD_SELECTOR};
pub use pacing::Pacer;
pub use planner::{plan_queries, CrawlOutcome, QueryPlanner, SearchQuery};

use crate::config::Config;
use crate::ReelError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Run every planned search query in order
/// 3. Deduplicate and rank the collected records
/// 4. Enrich the ranked records from their detail pages and rank them
///    again, when `enrich` is set
///
/// Writing the catalog is left to the caller.
pub async fn crawl(config: Config, enrich: bool) -> Result<CrawlOutcome, ReelError> {
    let limit = config.output.limit;
    let planner = QueryPlanner::new(config)?;

    let outcome = if enrich {
        planner.run_enriched(limit).await
    } else {
        planner.run(limit).await
    };

    Ok(outcome)
}
