pub(crate) mod feed_repository;
pub(crate) mod follow_repository;
pub(crate) mod list_repository;
pub(crate) mod quack_repository;
pub(crate) mod requack_repository;
pub(crate) mod user_repository;

use std::{marker::PhantomData, sync::Arc};

use chrono::Utc;
use futures::TryStreamExt;
use tokio::sync::RwLock;

use crate::{database::DatabaseExecutor, services::response::ServiceError};

pub trait TRepository {
	fn new(executor: Arc<RwLock<DatabaseExecutor>>) -> Self;
}

/// Store access for one kind of row. Each statement runs on its own; the
/// only multi-statement writes (quack + hashtags) use a transaction.
pub struct Repository<A> {
	pub executor: Arc<RwLock<DatabaseExecutor>>,
	pub _phantom: PhantomData<A>,
}

impl<A> TRepository for Repository<A> {
	fn new(executor: Arc<RwLock<DatabaseExecutor>>) -> Self {
		Self {
			executor,
			_phantom: Default::default(),
		}
	}
}

/// Rows whose primary key comes from the id allocator.
pub trait Identified {
	const TABLE: &'static str;
}

impl<A: Identified> Repository<A> {
	/// Every id currently in the table, ascending.
	pub async fn existing_ids(&self) -> Result<Vec<i32>, ServiceError> {
		let executor = self.executor.read().await;
		let sql = format!("SELECT id FROM {} ORDER BY id ASC", A::TABLE);
		let ids: Vec<i32> = sqlx::query_scalar::<_, i32>(&sql).fetch(executor.connection()).try_collect().await.map_err(|err| {
			tracing::error!("Could not read ids of {}: {:?}", A::TABLE, err);
			ServiceError::Store(err)
		})?;
		Ok(ids)
	}
}

/// Current GMT date, YYYY-MM-DD.
pub(crate) fn today() -> String {
	Utc::now().format("%Y-%m-%d").to_string()
}

/// Current GMT time of day, HH:MM:SS.
pub(crate) fn now_time() -> String {
	Utc::now().format("%H:%M:%S").to_string()
}
