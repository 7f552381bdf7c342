use super::{pagination::PaginationController, response::ServiceError};
use crate::{config::Config, domain::feed::FeedEntry};

/// State of one interactive user session, passed into every handler call.
#[derive(Debug, Clone)]
pub struct Session {
	pub user_id: Option<i32>,
	pub feed: PaginationController,
	/// Browsing state of the profile being viewed.
	pub profile: PaginationController,
	/// Browsing state of search results and follower listings. Reset it
	/// before showing a new result set.
	pub results: PaginationController,
	/// Entries last rendered by `feed_page`, for selecting one by position.
	pub(crate) displayed: Vec<FeedEntry>,
	/// 1-based feed position of `displayed[0]`.
	pub(crate) displayed_from: usize,
}

impl Session {
	/// A logged-out session with page sizes taken from `config`.
	pub fn new(config: &Config) -> Self {
		Self {
			user_id: None,
			feed: PaginationController::new(config.feed_page_size),
			profile: PaginationController::new(config.profile_page_size),
			results: PaginationController::new(config.result_page_size),
			displayed: Vec::new(),
			displayed_from: 1,
		}
	}

	pub fn user_id(&self) -> Result<i32, ServiceError> {
		self.user_id.ok_or(ServiceError::NotLoggedIn)
	}

	pub fn is_logged_in(&self) -> bool {
		self.user_id.is_some()
	}

	/// The entry rendered at 1-based feed `position` by the last `feed_page`.
	pub fn displayed_entry(
		&self,
		position: usize,
	) -> Option<&FeedEntry> {
		position.checked_sub(self.displayed_from).and_then(|offset| self.displayed.get(offset))
	}

	pub(crate) fn log_in(
		&mut self,
		user_id: i32,
	) {
		self.user_id = Some(user_id);
		self.reset_browsing();
		self.displayed.clear();
	}

	pub(crate) fn log_out(&mut self) {
		self.user_id = None;
		self.reset_browsing();
		self.displayed.clear();
	}

	fn reset_browsing(&mut self) {
		self.feed.reset();
		self.profile.reset();
		self.results.reset();
	}
}
