use super::response::{FollowOutcome, RequackOutcome};
use crate::domain::quack::entity::Requack;

/// Self-follows and repeated follows are refused before anything is written.
pub fn validate_follow(
	follower_id: i32,
	followee_id: i32,
	existing_followees: &[i32],
) -> FollowOutcome {
	if follower_id == followee_id {
		FollowOutcome::SelfFollow
	} else if existing_followees.contains(&followee_id) {
		FollowOutcome::AlreadyFollowing
	} else {
		FollowOutcome::Ok
	}
}

/// A repeated requack is still recorded, flagged as spam.
pub fn validate_requack(
	user_id: i32,
	quack_id: i32,
	existing: &[Requack],
) -> RequackOutcome {
	if existing.iter().any(|r| r.resharer_id == user_id && r.quack_id == quack_id) {
		RequackOutcome::MarkedSpam
	} else {
		RequackOutcome::Created
	}
}
