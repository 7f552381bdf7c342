use serde::{Deserialize, Serialize};

/// A top-level post, or a reply when `reply_to_id` is set.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quack {
	pub id: i32,
	pub author_id: i32,
	pub text: String,
	/// YYYY-MM-DD
	#[sqlx(rename = "qdate")]
	pub date: String,
	/// HH:MM:SS
	#[sqlx(rename = "qtime")]
	pub time: String,
	pub reply_to_id: Option<i32>,
}

impl Quack {
	pub fn is_reply(&self) -> bool {
		self.reply_to_id.is_some()
	}
}

#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Requack {
	pub quack_id: i32,
	pub resharer_id: i32,
	#[sqlx(rename = "rdate")]
	pub date: String,
	pub spam: bool,
}
