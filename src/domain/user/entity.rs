use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
	pub id: i32,
	pub name: String,
	pub email: String,
	pub phone: i64,
	#[serde(skip_serializing)]
	pub password: String,
}

/// Validated sign-up data, ready to be written once an id is allocated.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewUser {
	pub name: String,
	pub email: String,
	pub phone: i64,
	pub password: String,
}

/// Counts shown on a user's profile.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, sqlx::FromRow)]
pub struct ProfileSummary {
	pub followers: i64,
	pub followees: i64,
	pub quacks: i64,
}
