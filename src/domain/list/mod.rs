use serde::{Deserialize, Serialize};

/// A named collection of quacks; only its owner adds to it.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuackList {
	pub owner_id: i32,
	pub name: String,
}
