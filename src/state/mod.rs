//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `QueryState`: Tracks the lifecycle of one search query
//! - `CrawlContext`: Seen identifiers, accepted records and run counters

mod context;
mod query_state;

// Re-export main types
pub use context::CrawlContext;
pub use query_state::QueryState;
