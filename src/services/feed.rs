use std::cmp::Ordering;

use crate::domain::feed::{FeedEntry, RawFeedRow};

/// Turns the raw post/reshare stream of a viewer's followees into the feed,
/// newest first.
///
/// Spam-flagged reshares are dropped. Ordering is by `(date, time)`
/// descending; rows with equal timestamps keep their stream order, which is
/// not a guarantee callers should rely on.
pub fn compose_feed(rows: impl IntoIterator<Item = RawFeedRow>) -> Vec<FeedEntry> {
	let mut entries: Vec<FeedEntry> = rows.into_iter().filter(|row| !(row.is_reshare && row.spam)).map(FeedEntry::from).collect();
	entries.sort_by(newest_first);
	entries
}

fn newest_first(
	a: &FeedEntry,
	b: &FeedEntry,
) -> Ordering {
	(b.date.as_str(), b.time.as_str()).cmp(&(a.date.as_str(), a.time.as_str()))
}
