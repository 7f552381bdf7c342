use super::{today, Repository};
use crate::{domain::quack::entity::Requack, services::response::ServiceError};

impl Repository<Requack> {
	/// Earlier requacks of `quack_id` by `user_id`, spam rows included.
	pub async fn by_user_on_quack(
		&self,
		user_id: i32,
		quack_id: i32,
	) -> Result<Vec<Requack>, ServiceError> {
		let executor = self.executor.read().await;
		let requacks = sqlx::query_as::<_, Requack>(
			"SELECT quack_id, resharer_id, rdate, spam FROM requacks \
			 WHERE resharer_id = ? AND quack_id = ? ORDER BY rowid ASC",
		)
		.bind(user_id)
		.bind(quack_id)
		.fetch_all(executor.connection())
		.await?;
		Ok(requacks)
	}

	pub async fn insert(
		&self,
		user_id: i32,
		quack_id: i32,
		spam: bool,
	) -> Result<Requack, ServiceError> {
		let requack = Requack {
			quack_id,
			resharer_id: user_id,
			date: today(),
			spam,
		};

		let executor = self.executor.read().await;
		sqlx::query("INSERT INTO requacks (quack_id, resharer_id, rdate, spam) VALUES (?, ?, ?, ?)")
			.bind(requack.quack_id)
			.bind(requack.resharer_id)
			.bind(&requack.date)
			.bind(requack.spam)
			.execute(executor.connection())
			.await
			.map_err(|err| {
				tracing::error!("Could not insert requack of {quack_id} by {user_id}: {:?}", err);
				ServiceError::Store(err)
			})?;
		Ok(requack)
	}

	/// Public requack count; spam rows are not counted.
	pub async fn count(
		&self,
		quack_id: i32,
	) -> Result<i64, ServiceError> {
		let executor = self.executor.read().await;
		let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM requacks WHERE quack_id = ? AND spam = 0")
			.bind(quack_id)
			.fetch_one(executor.connection())
			.await?;
		Ok(count)
	}
}
