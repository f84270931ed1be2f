//! Cross-query deduplication and ranking

use crate::model::MovieRecord;
use crate::state::CrawlContext;

/// Merges a record stream into a ranked, size-bounded catalog
///
/// Records are deduplicated by id with first-writer-wins semantics, sorted
/// by descending rating (absent ratings rank as zero) and truncated to
/// `limit`. Records with equal ratings keep their arrival order.
///
/// # Example
///
/// ```
/// use regional_reels::{aggregate, MovieRecord};
///
/// let mut first = MovieRecord::new("tt1");
/// first.rating = Some(7.5);
/// let mut again = MovieRecord::new("tt1");
/// again.rating = Some(9.9);
/// let mut other = MovieRecord::new("tt2");
/// other.rating = Some(6.0);
///
/// let ranked = aggregate(vec![first, again, other], 10);
/// assert_eq!(ranked.len(), 2);
/// assert_eq!(ranked[0].rating, Some(7.5));
/// assert_eq!(ranked[1].id, "tt2");
/// ```
pub fn aggregate<I>(records: I, limit: usize) -> Vec<MovieRecord>
where
    I: IntoIterator<Item = MovieRecord>,
{
    let mut context = CrawlContext::new();
    for record in records {
        context.accept(record);
    }
    context.into_ranked(limit)
}

/// Sorts already-unique records by descending rating and truncates
///
/// The sort is stable and never touches the stored `rating` field.
pub fn rank(mut records: Vec<MovieRecord>, limit: usize) -> Vec<MovieRecord> {
    records.sort_by(|a, b| b.rank_rating().total_cmp(&a.rank_rating()));
    records.truncate(limit);
    records
}
