use serde::{Deserialize, Serialize};

/// Directed edge: `follower_id` follows `followee_id`.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
	pub follower_id: i32,
	pub followee_id: i32,
	pub start_date: String,
}
