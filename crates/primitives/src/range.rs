use serde::{Deserialize, Serialize};

/// Selection direction (anchor to head).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Head is after anchor.
	Forward,
	/// Head is before anchor.
	Backward,
}

/// A position in the document, measured in characters (not bytes).
///
/// Atomic inline nodes occupy exactly one position.
pub type CharIdx = usize;

/// A length or count in the document, measured in characters (not bytes).
pub type CharLen = usize;

/// A selection range defined by anchor and head positions.
///
/// The anchor is the fixed end and the head is the caret. Unlike a modal
/// editor's 1-cell model, the extent is a plain half-open gap range:
/// `[min, max)` regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
	/// The fixed end of the range.
	pub anchor: CharIdx,
	/// The moving end of the range (caret position).
	pub head: CharIdx,
}

impl Range {
	/// Creates a new range from anchor to head.
	pub fn new(anchor: CharIdx, head: CharIdx) -> Self {
		Self { anchor, head }
	}

	/// Creates a zero-width range (caret) at the given position.
	pub fn point(pos: CharIdx) -> Self {
		Self::new(pos, pos)
	}

	/// Returns the smaller of anchor and head.
	#[inline]
	pub fn from(&self) -> CharIdx {
		self.anchor.min(self.head)
	}

	/// Returns the larger of anchor and head.
	#[inline]
	pub fn to(&self) -> CharIdx {
		self.anchor.max(self.head)
	}

	/// Returns the length of the range in characters.
	#[inline]
	pub fn len(&self) -> CharLen {
		self.to() - self.from()
	}

	/// Returns true if anchor equals head.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.anchor == self.head
	}

	/// Returns the direction of this range.
	#[inline]
	pub fn direction(&self) -> Direction {
		if self.head < self.anchor {
			Direction::Backward
		} else {
			Direction::Forward
		}
	}

	/// Returns a new range with anchor and head swapped.
	pub fn flip(&self) -> Self {
		Self {
			anchor: self.head,
			head: self.anchor,
		}
	}

	/// Applies a function to both anchor and head.
	pub fn map(self, mut f: impl FnMut(CharIdx) -> CharIdx) -> Self {
		Self {
			anchor: f(self.anchor),
			head: f(self.head),
		}
	}

	/// Returns true if this range overlaps with another.
	///
	/// Two carets at the same position overlap.
	pub fn overlaps(&self, other: &Range) -> bool {
		if self.from() < other.to() && other.from() < self.to() {
			return true;
		}

		self.is_empty() && other.is_empty() && self.from() == other.from()
	}

	/// Merges two ranges, preserving the direction of `self`.
	pub fn merge(&self, other: &Range) -> Self {
		let from = self.from().min(other.from());
		let to = self.to().max(other.to());

		match self.direction() {
			Direction::Forward => Self::new(from, to),
			Direction::Backward => Self::new(to, from),
		}
	}

	/// Clamps anchor and head to `[0, max_char]`.
	pub fn clamp(&self, max_char: CharIdx) -> Self {
		self.map(|pos| pos.min(max_char))
	}

	/// Returns the extent of this range as a [`Span`].
	pub fn span(&self) -> Span {
		Span::new(self.from(), self.to())
	}
}

impl Default for Range {
	fn default() -> Self {
		Self::point(0)
	}
}

/// A half-open document range `[from, to)` with `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
	/// Inclusive start.
	pub from: CharIdx,
	/// Exclusive end.
	pub to: CharIdx,
}

impl Span {
	/// Creates a span, ordering the endpoints.
	pub fn new(a: CharIdx, b: CharIdx) -> Self {
		Self {
			from: a.min(b),
			to: a.max(b),
		}
	}

	/// Returns the number of positions covered.
	#[inline]
	pub fn len(&self) -> CharLen {
		self.to - self.from
	}

	/// Returns true if the span covers no positions.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.from == self.to
	}

	/// Returns true if `pos` lies in `[from, to]`.
	#[inline]
	pub fn touches(&self, pos: CharIdx) -> bool {
		self.from <= pos && pos <= self.to
	}
}
