use std::collections::HashSet;

use futures::TryStreamExt;

use super::{now_time, today, Identified, Repository};
use crate::{domain::quack::entity::Quack, services::response::ServiceError};

const QUACK_COLUMNS: &str = "q.id, q.author_id, q.text, q.qdate, q.qtime, q.reply_to_id";

impl Identified for Quack {
	const TABLE: &'static str = "quacks";
}

impl Repository<Quack> {
	/// Writes the quack and its hashtags together; either both land or neither.
	pub async fn insert(
		&self,
		id: i32,
		author_id: i32,
		text: &str,
		reply_to_id: Option<i32>,
		hashtags: &[String],
	) -> Result<Quack, ServiceError> {
		let quack = Quack {
			id,
			author_id,
			text: text.to_string(),
			date: today(),
			time: now_time(),
			reply_to_id,
		};

		let executor = self.executor.read().await;
		let mut trx = executor.connection().begin().await?;

		sqlx::query("INSERT INTO quacks (id, author_id, text, qdate, qtime, reply_to_id) VALUES (?, ?, ?, ?, ?, ?)")
			.bind(quack.id)
			.bind(quack.author_id)
			.bind(&quack.text)
			.bind(&quack.date)
			.bind(&quack.time)
			.bind(quack.reply_to_id)
			.execute(&mut *trx)
			.await
			.map_err(|err| {
				tracing::error!("Could not insert quack {id}: {:?}", err);
				ServiceError::Store(err)
			})?;

		for term in hashtags {
			sqlx::query("INSERT INTO hashtags (quack_id, term) VALUES (?, ?)")
				.bind(quack.id)
				.bind(term)
				.execute(&mut *trx)
				.await?;
		}

		trx.commit().await.map_err(|err| {
			tracing::error!("Error occurred during commit operation : {:?}", err);
			ServiceError::Store(err)
		})?;
		Ok(quack)
	}

	pub async fn get(
		&self,
		id: i32,
	) -> Result<Option<Quack>, ServiceError> {
		let executor = self.executor.read().await;
		let sql = format!("SELECT {QUACK_COLUMNS} FROM quacks q WHERE q.id = ?");
		let quack = sqlx::query_as::<_, Quack>(&sql).bind(id).fetch_optional(executor.connection()).await?;
		Ok(quack)
	}

	/// Everything `author_id` wrote, replies included, newest first.
	pub async fn by_author(
		&self,
		author_id: i32,
	) -> Result<Vec<Quack>, ServiceError> {
		let executor = self.executor.read().await;
		let sql = format!("SELECT {QUACK_COLUMNS} FROM quacks q WHERE q.author_id = ? ORDER BY q.qdate DESC, q.qtime DESC, q.id DESC");
		let quacks = sqlx::query_as::<_, Quack>(&sql).bind(author_id).fetch_all(executor.connection()).await?;
		Ok(quacks)
	}

	/// Replies to `quack_id`, oldest first.
	pub async fn replies(
		&self,
		quack_id: i32,
	) -> Result<Vec<Quack>, ServiceError> {
		let executor = self.executor.read().await;
		let sql = format!("SELECT {QUACK_COLUMNS} FROM quacks q WHERE q.reply_to_id = ? ORDER BY q.qdate ASC, q.qtime ASC, q.id ASC");
		let quacks = sqlx::query_as::<_, Quack>(&sql).bind(quack_id).fetch_all(executor.connection()).await?;
		Ok(quacks)
	}

	/// `#term` matches hashtags only; a bare keyword matches the text
	/// (case-insensitive) or a hashtag of the same spelling. Newest first.
	///
	/// Terms are lowercased here rather than with SQLite's `lower()`, which
	/// folds ASCII only while hashtags are stored with full Unicode folding.
	pub async fn search(
		&self,
		term: &str,
	) -> Result<Vec<Quack>, ServiceError> {
		let executor = self.executor.read().await;

		let quacks = match term.strip_prefix('#') {
			Some(tag) => {
				let sql = format!(
					"SELECT {QUACK_COLUMNS} FROM quacks q JOIN hashtags h ON h.quack_id = q.id \
					 WHERE h.term = ? \
					 ORDER BY q.qdate DESC, q.qtime DESC, q.id DESC"
				);
				sqlx::query_as::<_, Quack>(&sql).bind(tag.to_lowercase()).fetch_all(executor.connection()).await?
			}
			None => {
				let keyword = term.to_lowercase();
				let tagged: HashSet<i32> = sqlx::query_scalar::<_, i32>("SELECT quack_id FROM hashtags WHERE term = ?")
					.bind(&keyword)
					.fetch(executor.connection())
					.try_collect()
					.await?;

				let sql = format!("SELECT {QUACK_COLUMNS} FROM quacks q ORDER BY q.qdate DESC, q.qtime DESC, q.id DESC");
				let all = sqlx::query_as::<_, Quack>(&sql).fetch_all(executor.connection()).await?;
				all.into_iter()
					.filter(|quack| tagged.contains(&quack.id) || quack.text.to_lowercase().contains(&keyword))
					.collect()
			}
		};
		Ok(quacks)
	}
}
