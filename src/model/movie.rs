use serde::{Deserialize, Serialize};

/// One movie as extracted from a listing card or a detail page
///
/// Only `id` is mandatory. Every other field is filled on a best-effort basis
/// by the extractors and serialized as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Stable external title key (e.g. `tt0123456`), the deduplication key
    #[serde(alias = "imdb_id")]
    pub id: String,

    pub title: Option<String>,

    /// Four-digit release year
    pub year: Option<i32>,

    /// Rating in `[0.0, 10.0]`
    pub rating: Option<f64>,

    #[serde(alias = "runtime")]
    pub runtime_minutes: Option<u32>,

    /// Genres in source order, duplicates preserved
    #[serde(default)]
    pub genres: Vec<String>,

    /// Plot summary. Listing cards always produce a string, empty when the
    /// card carries no plot paragraph.
    pub description: Option<String>,

    pub poster_url: Option<String>,

    #[serde(alias = "imdb_url")]
    pub source_url: Option<String>,
}

impl MovieRecord {
    /// Creates a record carrying only its identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            year: None,
            rating: None,
            runtime_minutes: None,
            genres: Vec::new(),
            description: None,
            poster_url: None,
            source_url: None,
        }
    }

    /// Rating used for ranking; an absent rating ranks as zero
    pub fn rank_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Builds a new record from this one with gaps filled from `detail`
    ///
    /// Values already present here win. An empty description or an empty
    /// genre list counts as a gap.
    pub fn with_details(&self, detail: &MovieRecord) -> MovieRecord {
        let description = match &self.description {
            Some(text) if !text.is_empty() => Some(text.clone()),
            _ => detail
                .description
                .clone()
                .or_else(|| self.description.clone()),
        };

        let genres = if self.genres.is_empty() {
            detail.genres.clone()
        } else {
            self.genres.clone()
        };

        MovieRecord {
            id: self.id.clone(),
            title: self.title.clone().or_else(|| detail.title.clone()),
            year: self.year.or(detail.year),
            rating: self.rating.or(detail.rating),
            runtime_minutes: self.runtime_minutes.or(detail.runtime_minutes),
            genres,
            description,
            poster_url: self.poster_url.clone().or_else(|| detail.poster_url.clone()),
            source_url: self.source_url.clone().or_else(|| detail.source_url.clone()),
        }
    }

    /// Formats the one-line ranked summary printed by the CLI
    ///
    /// Absent title or year print as `None`, absent rating as `N/A`.
    pub fn summary_line(&self, rank: usize) -> String {
        let title = self.title.as_deref().unwrap_or("None");
        let year = self
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "None".to_string());
        let rating = self
            .rating
            .map(|r| format!("{:?}", r))
            .unwrap_or_else(|| "N/A".to_string());

        format!("{}. {} ({}) - Rating: {}", rank, title, year, rating)
    }
}
