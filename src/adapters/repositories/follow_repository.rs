use super::{today, Repository};
use crate::{
	domain::{follow::Follow, user::entity::User},
	services::response::ServiceError,
};

impl Repository<Follow> {
	pub async fn followees(
		&self,
		follower_id: i32,
	) -> Result<Vec<i32>, ServiceError> {
		let executor = self.executor.read().await;
		let ids = sqlx::query_scalar::<_, i32>("SELECT followee_id FROM follows WHERE follower_id = ? ORDER BY followee_id ASC")
			.bind(follower_id)
			.fetch_all(executor.connection())
			.await?;
		Ok(ids)
	}

	/// Users following `followee_id`, by id.
	pub async fn followers(
		&self,
		followee_id: i32,
	) -> Result<Vec<User>, ServiceError> {
		let executor = self.executor.read().await;
		let users = sqlx::query_as::<_, User>(
			"SELECT u.id, u.name, u.email, u.phone, u.password FROM users u \
			 JOIN follows f ON f.follower_id = u.id \
			 WHERE f.followee_id = ? ORDER BY u.id ASC",
		)
		.bind(followee_id)
		.fetch_all(executor.connection())
		.await?;
		Ok(users)
	}

	/// `false` when the edge already existed.
	pub async fn insert(
		&self,
		follower_id: i32,
		followee_id: i32,
	) -> Result<bool, ServiceError> {
		let executor = self.executor.read().await;
		let result = sqlx::query("INSERT OR IGNORE INTO follows (follower_id, followee_id, start_date) VALUES (?, ?, ?)")
			.bind(follower_id)
			.bind(followee_id)
			.bind(today())
			.execute(executor.connection())
			.await
			.map_err(|err| {
				tracing::error!("Could not store follow {follower_id} -> {followee_id}: {:?}", err);
				ServiceError::Store(err)
			})?;
		Ok(result.rows_affected() == 1)
	}

	/// `false` when there was no such edge.
	pub async fn delete(
		&self,
		follower_id: i32,
		followee_id: i32,
	) -> Result<bool, ServiceError> {
		let executor = self.executor.read().await;
		let result = sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followee_id = ?")
			.bind(follower_id)
			.bind(followee_id)
			.execute(executor.connection())
			.await?;
		Ok(result.rows_affected() == 1)
	}
}
