use futures::TryStreamExt;

use super::{Identified, Repository};
use crate::{
	domain::user::entity::{NewUser, ProfileSummary, User},
	services::response::ServiceError,
};

impl Identified for User {
	const TABLE: &'static str = "users";
}

impl Repository<User> {
	pub async fn insert(
		&self,
		id: i32,
		user: &NewUser,
	) -> Result<(), ServiceError> {
		let executor = self.executor.read().await;
		sqlx::query("INSERT INTO users (id, name, email, phone, password) VALUES (?, ?, ?, ?, ?)")
			.bind(id)
			.bind(&user.name)
			.bind(&user.email)
			.bind(user.phone)
			.bind(&user.password)
			.execute(executor.connection())
			.await
			.map_err(|err| {
				tracing::error!("Could not insert user {id}: {:?}", err);
				ServiceError::Store(err)
			})?;
		Ok(())
	}

	pub async fn get(
		&self,
		id: i32,
	) -> Result<Option<User>, ServiceError> {
		let executor = self.executor.read().await;
		let user = sqlx::query_as::<_, User>("SELECT id, name, email, phone, password FROM users WHERE id = ?")
			.bind(id)
			.fetch_optional(executor.connection())
			.await?;
		Ok(user)
	}

	/// Plaintext equality check against the stored password.
	pub async fn find_by_credentials(
		&self,
		id: i32,
		password: &str,
	) -> Result<Option<i32>, ServiceError> {
		let executor = self.executor.read().await;
		let found = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE id = ? AND password = ?")
			.bind(id)
			.bind(password)
			.fetch_optional(executor.connection())
			.await?;
		Ok(found)
	}

	pub async fn username(
		&self,
		id: i32,
	) -> Result<Option<String>, ServiceError> {
		let executor = self.executor.read().await;
		let name = sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = ?")
			.bind(id)
			.fetch_optional(executor.connection())
			.await?;
		Ok(name)
	}

	/// Case-insensitive substring match, shortest names first. Names are
	/// folded in Rust so that non-ASCII letters match regardless of case.
	pub async fn search_by_name(
		&self,
		term: &str,
	) -> Result<Vec<User>, ServiceError> {
		let needle = term.to_lowercase();
		let executor = self.executor.read().await;
		let mut users: Vec<User> = sqlx::query_as::<_, User>("SELECT id, name, email, phone, password FROM users")
			.fetch(executor.connection())
			.try_filter(|user: &User| futures::future::ready(user.name.to_lowercase().contains(&needle)))
			.try_collect()
			.await?;

		users.sort_by(|a, b| (a.name.chars().count(), &a.name, a.id).cmp(&(b.name.chars().count(), &b.name, b.id)));
		Ok(users)
	}

	pub async fn summary(
		&self,
		id: i32,
	) -> Result<ProfileSummary, ServiceError> {
		let executor = self.executor.read().await;
		let summary = sqlx::query_as::<_, ProfileSummary>(
			"SELECT \
			 (SELECT COUNT(*) FROM follows WHERE followee_id = ?1) AS followers, \
			 (SELECT COUNT(*) FROM follows WHERE follower_id = ?1) AS followees, \
			 (SELECT COUNT(*) FROM quacks WHERE author_id = ?1) AS quacks",
		)
		.bind(id)
		.fetch_one(executor.connection())
		.await?;
		Ok(summary)
	}
}
