use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::RwLock;

use crate::services::response::ServiceError;

pub type SharedExecutor = Arc<RwLock<DatabaseExecutor>>;

pub struct DatabaseExecutor {
	pool: SqlitePool,
}

impl DatabaseExecutor {
	pub async fn connect(
		url: &str,
		max_connections: u32,
	) -> Result<Self, ServiceError> {
		let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
		let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await.map_err(|err| {
			tracing::error!("Could not open database {url}: {err}");
			ServiceError::Store(err)
		})?;
		Ok(Self { pool })
	}

	/// Private database living as long as the executor. A single connection
	/// that never expires, otherwise SQLite would hand out a fresh empty
	/// database per connection.
	pub async fn in_memory() -> Result<Self, ServiceError> {
		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.idle_timeout(None)
			.max_lifetime(None)
			.connect("sqlite::memory:")
			.await?;
		let executor = Self { pool };
		executor.migrate().await?;
		Ok(executor)
	}

	pub fn connection(&self) -> &SqlitePool {
		&self.pool
	}

	pub async fn migrate(&self) -> Result<(), ServiceError> {
		sqlx::migrate!("./migrations").run(&self.pool).await.map_err(|err| {
			tracing::error!("Error occurred while migrating schema : {:?}", err);
			ServiceError::Migration(err)
		})
	}
}

impl From<DatabaseExecutor> for Arc<RwLock<DatabaseExecutor>> {
	fn from(value: DatabaseExecutor) -> Self {
		Arc::new(RwLock::new(value))
	}
}
