use super::Repository;
use crate::{
	domain::feed::{FeedEntry, RawFeedRow},
	services::response::ServiceError,
};

impl Repository<FeedEntry> {
	/// Quacks written by and requacks made by the people `viewer_id` follows,
	/// spam rows included: quacks first, then requacks, each in store order.
	/// A requack row carries the requack's date and the quack's time of day.
	pub async fn raw_rows(
		&self,
		viewer_id: i32,
	) -> Result<Vec<RawFeedRow>, ServiceError> {
		let executor = self.executor.read().await;
		let rows = sqlx::query_as::<_, RawFeedRow>(
			"SELECT 0 AS is_reshare, q.id AS post_id, q.author_id AS actor_id, u.name AS actor_name, \
			        q.qdate AS date, q.qtime AS time, q.text AS text, 0 AS spam, q.rowid AS seq \
			 FROM quacks q \
			 JOIN follows f ON f.followee_id = q.author_id \
			 LEFT JOIN users u ON u.id = q.author_id \
			 WHERE f.follower_id = ?1 \
			 UNION ALL \
			 SELECT 1 AS is_reshare, q.id AS post_id, r.resharer_id AS actor_id, u.name AS actor_name, \
			        r.rdate AS date, q.qtime AS time, q.text AS text, r.spam AS spam, r.rowid AS seq \
			 FROM requacks r \
			 JOIN quacks q ON q.id = r.quack_id \
			 JOIN follows f ON f.followee_id = r.resharer_id \
			 LEFT JOIN users u ON u.id = r.resharer_id \
			 WHERE f.follower_id = ?1 \
			 ORDER BY is_reshare ASC, seq ASC",
		)
		.bind(viewer_id)
		.fetch_all(executor.connection())
		.await
		.map_err(|err| {
			tracing::error!("Could not read feed rows for {viewer_id}: {:?}", err);
			ServiceError::Store(err)
		})?;
		Ok(rows)
	}
}
