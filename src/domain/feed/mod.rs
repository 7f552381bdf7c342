use serde::Serialize;

/// Shown in place of an author whose user row no longer resolves.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
	Post,
	Reshare,
}

/// One line of a viewer's feed. For a reshare the acting user is the
/// resharer and the timestamp date is the reshare's, while `post_id` and
/// `text` belong to the original quack.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize)]
pub struct FeedEntry {
	pub kind: FeedKind,
	pub post_id: i32,
	pub author_name: String,
	pub origin_user_id: i32,
	pub date: String,
	pub time: String,
	pub text: String,
}

/// Row of the combined post/reshare stream, before spam filtering and
/// ordering.
#[derive(Clone, PartialEq, Eq, Debug, sqlx::FromRow)]
pub struct RawFeedRow {
	pub is_reshare: bool,
	pub post_id: i32,
	pub actor_id: i32,
	pub actor_name: Option<String>,
	pub date: String,
	pub time: String,
	pub text: String,
	pub spam: bool,
}

impl From<RawFeedRow> for FeedEntry {
	fn from(row: RawFeedRow) -> Self {
		Self {
			kind: if row.is_reshare { FeedKind::Reshare } else { FeedKind::Post },
			post_id: row.post_id,
			author_name: row.actor_name.filter(|name| !name.is_empty()).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
			origin_user_id: row.actor_id,
			date: row.date,
			time: row.time,
			text: row.text,
		}
	}
}
