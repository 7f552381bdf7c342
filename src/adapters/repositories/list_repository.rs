use super::Repository;
use crate::{
	domain::{list::QuackList, quack::entity::Quack},
	services::response::ServiceError,
};

impl Repository<QuackList> {
	/// `false` when the owner already has a list of that name.
	pub async fn create(
		&self,
		owner_id: i32,
		name: &str,
	) -> Result<bool, ServiceError> {
		let executor = self.executor.read().await;
		let result = sqlx::query("INSERT OR IGNORE INTO lists (owner_id, name) VALUES (?, ?)")
			.bind(owner_id)
			.bind(name)
			.execute(executor.connection())
			.await?;
		Ok(result.rows_affected() == 1)
	}

	pub async fn exists(
		&self,
		owner_id: i32,
		name: &str,
	) -> Result<bool, ServiceError> {
		let executor = self.executor.read().await;
		let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM lists WHERE owner_id = ? AND name = ?")
			.bind(owner_id)
			.bind(name)
			.fetch_optional(executor.connection())
			.await?;
		Ok(found.is_some())
	}

	/// `false` when the quack is already in the list.
	pub async fn add(
		&self,
		owner_id: i32,
		name: &str,
		quack_id: i32,
	) -> Result<bool, ServiceError> {
		let executor = self.executor.read().await;
		let result = sqlx::query("INSERT OR IGNORE INTO list_items (owner_id, list_name, quack_id) VALUES (?, ?, ?)")
			.bind(owner_id)
			.bind(name)
			.bind(quack_id)
			.execute(executor.connection())
			.await?;
		Ok(result.rows_affected() == 1)
	}

	pub async fn of_owner(
		&self,
		owner_id: i32,
	) -> Result<Vec<QuackList>, ServiceError> {
		let executor = self.executor.read().await;
		let lists = sqlx::query_as::<_, QuackList>("SELECT owner_id, name FROM lists WHERE owner_id = ? ORDER BY name ASC")
			.bind(owner_id)
			.fetch_all(executor.connection())
			.await?;
		Ok(lists)
	}

	/// Quacks in the list, in the order they were added.
	pub async fn quacks(
		&self,
		owner_id: i32,
		name: &str,
	) -> Result<Vec<Quack>, ServiceError> {
		let executor = self.executor.read().await;
		let quacks = sqlx::query_as::<_, Quack>(
			"SELECT q.id, q.author_id, q.text, q.qdate, q.qtime, q.reply_to_id FROM list_items i \
			 JOIN quacks q ON q.id = i.quack_id \
			 WHERE i.owner_id = ? AND i.list_name = ? ORDER BY i.rowid ASC",
		)
		.bind(owner_id)
		.bind(name)
		.fetch_all(executor.connection())
		.await?;
		Ok(quacks)
	}
}
