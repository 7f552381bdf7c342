use std::str::FromStr;

use crate::services::response::ServiceError;

pub struct Config {
	/// Which errors we want to log
	pub log_level: String,

	pub database_url: String,
	pub max_connections: u32,

	/// Step used by "see more" / "see less" on the feed
	pub feed_page_size: i32,
	/// Step used when browsing a user's quacks
	pub profile_page_size: i32,
	/// Step used for search results and follower listings
	pub result_page_size: i32,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			log_level: "warn".into(),
			database_url: "sqlite://quack.db?mode=rwc".into(),
			max_connections: 5,
			feed_page_size: 5,
			profile_page_size: 3,
			result_page_size: 5,
		}
	}
}

impl Config {
	pub fn new() -> Result<Config, ServiceError> {
		dotenv::dotenv().ok();
		let defaults = Config::default();
		let log_level = std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level);
		let database_url = std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);

		Ok(Config {
			log_level,
			database_url,
			max_connections: var_or("MAX_CONNECTIONS", defaults.max_connections)?,
			feed_page_size: page_size("FEED_PAGE_SIZE", defaults.feed_page_size)?,
			profile_page_size: page_size("PROFILE_PAGE_SIZE", defaults.profile_page_size)?,
			result_page_size: page_size("RESULT_PAGE_SIZE", defaults.result_page_size)?,
		})
	}
}

fn var_or<T: FromStr>(
	key: &str,
	default: T,
) -> Result<T, ServiceError> {
	match std::env::var(key) {
		Ok(raw) => raw.trim().parse::<T>().map_err(|_| ServiceError::Config(format!("{key} is not a valid number: {raw:?}"))),
		Err(_) => Ok(default),
	}
}

/// Pagination steps must be positive.
fn page_size(
	key: &str,
	default: i32,
) -> Result<i32, ServiceError> {
	let size = var_or(key, default)?;
	if size <= 0 {
		return Err(ServiceError::Config(format!("{key} must be a positive page size, got {size}")));
	}
	Ok(size)
}
