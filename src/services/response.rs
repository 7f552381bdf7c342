use serde::Serialize;
use thiserror::Error;

use super::pagination::PageMessage;
use crate::domain::{
	feed::FeedEntry,
	quack::entity::Quack,
	user::entity::{ProfileSummary, User},
};

/// Result of a follow attempt. Rejections are outcomes, not errors:
/// nothing is written for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FollowOutcome {
	Ok,
	SelfFollow,
	AlreadyFollowing,
}

/// Result of a requack attempt that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequackOutcome {
	Created,
	/// The user already requacked this quack; a spam-flagged row was written.
	MarkedSpam,
}

#[derive(Debug, Error)]
pub enum ValidationError {
	#[error("{0} must not be empty")]
	EmptyField(&'static str),
	#[error("invalid email format, e.g. example@ualberta.ca")]
	InvalidEmail,
	#[error("invalid phone number format, e.g. 510-827-7791")]
	InvalidPhone,
	#[error("user id must be a valid integer")]
	InvalidId,
	#[error("hashtag #{0} appears more than once")]
	DuplicateHashtag(String),
}

#[derive(Debug, Error)]
pub enum NotFound {
	#[error("invalid user id or password")]
	Credentials,
	#[error("no user with id {0}")]
	User(i32),
	#[error("no quack with id {0}")]
	Quack(i32),
	#[error("no list named {0:?}")]
	List(String),
	#[error("no feed entry at position {0}")]
	FeedEntry(usize),
}

#[derive(Debug, Error)]
pub enum ServiceError {
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error(transparent)]
	NotFound(#[from] NotFound),
	#[error("no user is logged in")]
	NotLoggedIn,
	#[error("could not complete: {0}")]
	Store(#[from] sqlx::Error),
	#[error("migration failed: {0}")]
	Migration(#[from] sqlx::migrate::MigrateError),
	#[error("could not serialize: {0}")]
	Serialization(#[from] serde_json::Error),
	#[error("identifier space exhausted")]
	CapacityExhausted,
	#[error("configuration error: {0}")]
	Config(String),
}

/// The visible page of a viewer's feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
	/// 1-based feed position of `entries[0]`.
	pub first_position: usize,
	pub entries: Vec<FeedEntry>,
	pub total: usize,
	pub message: PageMessage,
}

/// The visible page of a browsable result list (search results, followers).
#[derive(Debug, Clone, Serialize)]
pub struct ResultPage<T> {
	/// 1-based position of `items[0]` in the full result.
	pub first_position: usize,
	pub items: Vec<T>,
	pub total: usize,
	pub message: PageMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
	pub user: User,
	pub summary: ProfileSummary,
	/// 1-based position of `quacks[0]` among the user's quacks.
	pub first_position: usize,
	pub quacks: Vec<Quack>,
	pub message: PageMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuackDetail {
	pub quack: Quack,
	pub author_name: String,
	pub requack_count: i64,
	pub replies: Vec<Quack>,
}
