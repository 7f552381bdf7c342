use std::sync::{Arc, OnceLock};

use tokio::sync::RwLock;

use crate::{config::Config, database::DatabaseExecutor, services::response::ServiceError};

pub fn config() -> Result<&'static Config, ServiceError> {
	static CONFIG: OnceLock<Config> = OnceLock::new();
	let config = match CONFIG.get() {
		None => {
			let config = Config::new()?;

			CONFIG.get_or_init(|| config)
		}
		Some(config) => config,
	};
	Ok(config)
}

/// Process-wide executor over the configured database, migrated on first use.
pub async fn executor() -> Result<Arc<RwLock<DatabaseExecutor>>, ServiceError> {
	static EXECUTOR: OnceLock<Arc<RwLock<DatabaseExecutor>>> = OnceLock::new();

	let e = match EXECUTOR.get() {
		None => {
			let config = config()?;
			let executor = DatabaseExecutor::connect(&config.database_url, config.max_connections).await?;
			executor.migrate().await?;
			EXECUTOR.get_or_init(|| executor.into())
		}
		Some(e) => e,
	};
	Ok(e.clone())
}
