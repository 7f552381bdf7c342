use std::ops::Range;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageMessage {
	None,
	/// The request went a full page past the end and was pulled back.
	NoMore,
	/// The request went below zero and was clamped.
	NoneShown,
}

/// Outcome of windowing a requested display count over `total` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
	/// Display count after clamping; this is the new controller state.
	pub count: i32,
	/// How many leading items of the result are displayed.
	pub shown: usize,
	pub message: PageMessage,
	page_size: i32,
}

impl Window {
	/// Items displayed so far, newest first.
	pub fn prefix(&self) -> Range<usize> {
		0..self.shown
	}

	/// The last page of the displayed prefix, which is what is on screen.
	pub fn page(&self) -> Range<usize> {
		self.shown.saturating_sub(self.page_size.max(0) as usize)..self.shown
	}
}

/// Windows a requested display count over a result of `total` items.
pub fn window(
	count: i32,
	total: usize,
	page_size: i32,
) -> Window {
	let total_i = i64::try_from(total).unwrap_or(i64::MAX);
	let requested = count as i64;
	let step = page_size as i64;

	let (count, shown, message) = if requested >= total_i + step && requested > 0 {
		((requested - step).max(0) as i32, total, PageMessage::NoMore)
	} else if requested >= total_i && requested > 0 {
		(count, total, PageMessage::None)
	} else if requested > 0 {
		(count, count as usize, PageMessage::None)
	} else if requested < 0 {
		(0, 0, PageMessage::NoneShown)
	} else {
		(0, 0, PageMessage::None)
	};

	Window {
		count,
		shown,
		message,
		page_size,
	}
}

/// Holds the "how many items are displayed" state of one browsable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationController {
	count: i32,
	page_size: i32,
}

impl PaginationController {
	/// Starts with one page requested.
	pub fn new(page_size: i32) -> Self {
		Self {
			count: page_size,
			page_size,
		}
	}

	pub fn count(&self) -> i32 {
		self.count
	}

	pub fn page_size(&self) -> i32 {
		self.page_size
	}

	pub fn more(&mut self) {
		self.count = self.count.saturating_add(self.page_size);
	}

	pub fn less(&mut self) {
		self.count = self.count.saturating_sub(self.page_size);
	}

	pub fn reset(&mut self) {
		self.count = self.page_size;
	}

	/// Windows the current request over `total` items and keeps the clamped count.
	pub fn apply(
		&mut self,
		total: usize,
	) -> Window {
		let window = window(self.count, total, self.page_size);
		self.count = window.count;
		window
	}
}
