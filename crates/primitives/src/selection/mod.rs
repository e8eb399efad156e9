use smallvec::{SmallVec, smallvec};

use crate::range::{CharIdx, Range};


/// A set of non-overlapping ranges with a designated primary.
///
/// A selection always contains at least one range. The primary range
/// is the one suggestion triggers are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
	/// The collection of selection ranges (always non-empty).
	ranges: SmallVec<[Range; 1]>,
	/// Index of the primary range within `ranges`.
	primary_index: usize,
}

impl Selection {
	/// Create a new selection with at least one range.
	///
	/// Overlapping ranges are merged; duplicate carets collapse into one.
	pub fn new(primary: Range, others: impl IntoIterator<Item = Range>) -> Self {
		let mut ranges: SmallVec<[Range; 1]> = smallvec![primary];
		ranges.extend(others);

		let mut sel = Self { ranges, primary_index: 0 };
		sel.normalize();
		sel
	}

	/// Creates a single-range selection.
	pub fn single(anchor: CharIdx, head: CharIdx) -> Self {
		Self {
			ranges: smallvec![Range::new(anchor, head)],
			primary_index: 0,
		}
	}

	/// Creates a caret selection.
	pub fn point(pos: CharIdx) -> Self {
		Self::single(pos, pos)
	}

	/// Returns the primary range.
	pub fn primary(&self) -> Range {
		self.ranges[self.primary_index]
	}

	/// Returns the index of the primary range.
	pub fn primary_index(&self) -> usize {
		self.primary_index
	}

	/// Returns the number of ranges in this selection.
	#[allow(clippy::len_without_is_empty, reason = "Selection is never empty")]
	pub fn len(&self) -> usize {
		self.ranges.len()
	}

	/// Iterates over all ranges.
	pub fn iter(&self) -> impl Iterator<Item = &Range> {
		self.ranges.iter()
	}

	/// Returns the caret position when the selection is exactly one empty range.
	///
	/// Multiple carets, or any non-empty range, yield `None`.
	pub fn cursor(&self) -> Option<CharIdx> {
		match self.ranges.as_slice() {
			[range] if range.is_empty() => Some(range.head),
			_ => None,
		}
	}

	/// Transforms all ranges using the given function, returning a new selection.
	pub fn transform<F>(&self, mut f: F) -> Self
	where
		F: FnMut(&Range) -> Range,
	{
		let primary = f(&self.primary());
		let others = self
			.ranges
			.iter()
			.enumerate()
			.filter(|&(i, _)| i != self.primary_index)
			.map(|(_, r)| f(r));

		Self::new(primary, others)
	}

	/// Clamps all ranges to `[0, max_char]`.
	pub fn clamp(&mut self, max_char: CharIdx) {
		for range in &mut self.ranges {
			*range = range.clamp(max_char);
		}
		self.normalize();
	}

	/// Returns `true` if all range endpoints are within `[0, len]`.
	#[inline]
	pub fn is_in_bounds(&self, len: CharIdx) -> bool {
		self.primary_index < self.ranges.len()
			&& self.ranges.iter().all(|r| r.anchor <= len && r.head <= len)
	}

	/// Sorts ranges by start and folds overlapping ones together.
	///
	/// The primary follows whichever merged range absorbed it. Ranges that
	/// only touch, such as `[0, 5)` and `[5, 10)`, stay separate.
	fn normalize(&mut self) {
		if self.ranges.len() < 2 {
			return;
		}

		let primary = self.ranges[self.primary_index];
		let mut sorted = std::mem::take(&mut self.ranges);
		sorted.sort_by_key(|r| r.from());

		for range in sorted {
			let absorbs_primary = range == primary;
			match self.ranges.last_mut() {
				Some(last) if last.overlaps(&range) => {
					let held_primary = *last == primary;
					*last = last.merge(&range);
					if absorbs_primary || held_primary {
						self.primary_index = self.ranges.len() - 1;
					}
				}
				_ => {
					if absorbs_primary {
						self.primary_index = self.ranges.len();
					}
					self.ranges.push(range);
				}
			}
		}
	}
}
