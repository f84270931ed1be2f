//! JSON catalog persistence
//!
//! The catalog is a pretty-printed UTF-8 JSON array with one object per
//! movie. Every field is written, absent values as `null`, and non-ASCII
//! text is kept literally rather than escaped.

use crate::crawler::rank;
use crate::model::MovieRecord;
use crate::output::traits::{CatalogSink, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sink writing the catalog to a JSON file
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSink for JsonSink {
    fn write_catalog(&self, movies: &[MovieRecord]) -> OutputResult<()> {
        write_catalog(movies, &self.path)
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Formats records as the catalog's JSON text
pub fn format_catalog(movies: &[MovieRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(movies)?)
}

/// Writes records to `output_path`, replacing any existing file
///
/// The text is fully serialized before the file is opened, so a
/// serialization failure leaves a previous catalog untouched.
pub fn write_catalog(movies: &[MovieRecord], output_path: &Path) -> OutputResult<()> {
    let json = format_catalog(movies)?;

    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    tracing::debug!(
        "Wrote {} movies to {}",
        movies.len(),
        output_path.display()
    );
    Ok(())
}

/// Reads a catalog previously written by [`write_catalog`]
///
/// Files using the older `imdb_id`, `runtime` and `imdb_url` keys are
/// accepted too.
pub fn load_catalog(path: &Path) -> OutputResult<Vec<MovieRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Loads a previous catalog for reuse instead of crawling
///
/// Returns the records re-ranked and truncated to `limit`, or None when the
/// file is missing, unreadable or holds no movies. None means a fresh crawl
/// should run.
pub fn load_cached_catalog(path: &Path, limit: usize) -> Option<Vec<MovieRecord>> {
    match load_catalog(path) {
        Ok(movies) if movies.is_empty() => {
            tracing::info!("Cached catalog {} is empty, crawling instead", path.display());
            None
        }
        Ok(movies) => {
            tracing::info!(
                "Loaded {} cached movies from {}",
                movies.len(),
                path.display()
            );
            Some(rank(movies, limit))
        }
        Err(e) => {
            tracing::warn!(
                "Cached catalog {} unavailable ({}), crawling instead",
                path.display(),
                e
            );
            None
        }
    }
}
