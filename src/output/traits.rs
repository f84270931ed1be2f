//! Output sink traits and errors

use crate::model::MovieRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for catalog sinks
///
/// A sink receives the final ranked collection once, at the end of a run.
/// Any failure is fatal to the run.
pub trait CatalogSink {
    /// Persists the ranked collection, replacing previous contents
    ///
    /// # Arguments
    ///
    /// * `movies` - Records in rank order
    fn write_catalog(&self, movies: &[MovieRecord]) -> OutputResult<()>;

    /// Human-readable description of where the catalog goes
    fn destination(&self) -> String;
}
