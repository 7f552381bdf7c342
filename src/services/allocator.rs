use std::collections::BTreeSet;

use super::response::ServiceError;

/// Hands out the smallest unused positive id, then the smallest-magnitude
/// unused negative id once the positive range is full.
///
/// The allocator only decides; the caller writes the row. Between the two
/// another writer could take the same id, so concurrent callers need a
/// transaction or a unique constraint around read-decide-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
	ceiling: i32,
	floor: i32,
}

impl Default for IdAllocator {
	fn default() -> Self {
		Self {
			ceiling: i32::MAX,
			floor: i32::MIN,
		}
	}
}

impl IdAllocator {
	/// Narrows the id space to `floor..=-1` and `1..=ceiling`.
	pub fn with_bounds(
		ceiling: i32,
		floor: i32,
	) -> Self {
		Self {
			ceiling: ceiling.max(0),
			floor: floor.min(0),
		}
	}

	pub fn allocate(
		&self,
		existing_ids: impl IntoIterator<Item = i32>,
	) -> Result<i32, ServiceError> {
		let (negative, positive): (BTreeSet<i32>, BTreeSet<i32>) = existing_ids.into_iter().filter(|id| *id != 0).partition(|id| *id < 0);

		if let Some(id) = smallest_gap(positive.iter().copied(), 1, 1, self.ceiling as i64) {
			return Ok(id);
		}
		if let Some(id) = smallest_gap(negative.iter().rev().copied(), -1, -1, self.floor as i64) {
			tracing::warn!("Positive id space exhausted, allocating {id}");
			return Ok(id);
		}

		tracing::error!("Both id spaces exhausted");
		Err(ServiceError::CapacityExhausted)
	}
}

/// Walks `ids` (ordered away from zero) with a candidate starting at
/// `start`, stepping by `step` while the candidate is taken. Returns `None`
/// when the candidate passes `limit`.
fn smallest_gap(
	ids: impl Iterator<Item = i32>,
	start: i64,
	step: i64,
	limit: i64,
) -> Option<i32> {
	let mut candidate = start;
	for id in ids {
		if id as i64 == candidate {
			candidate += step;
		} else {
			break;
		}
	}

	let in_range = if step > 0 { candidate <= limit } else { candidate >= limit };
	in_range.then_some(candidate as i32)
}
