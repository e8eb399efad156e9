//! Abstract screen geometry.
//!
//! These types describe rectangles and positions without depending on any
//! rendering surface. Hosts report caret rectangles in these units and the
//! panel presenter positions itself with them.


/// A rectangle with position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
	pub x: u16,
	pub y: u16,
	pub width: u16,
	pub height: u16,
}

impl Rect {
	/// Creates a new rectangle, saturating the size so edges stay in `u16`.
	pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
		let max_width = u16::MAX - x;
		let max_height = u16::MAX - y;
		Self {
			x,
			y,
			width: if width > max_width { max_width } else { width },
			height: if height > max_height { max_height } else { height },
		}
	}

	/// Returns the left edge x coordinate.
	pub const fn left(&self) -> u16 {
		self.x
	}

	/// Returns the right edge x coordinate (exclusive).
	pub const fn right(&self) -> u16 {
		self.x.saturating_add(self.width)
	}

	/// Returns the top edge y coordinate.
	pub const fn top(&self) -> u16 {
		self.y
	}

	/// Returns the bottom edge y coordinate (exclusive).
	pub const fn bottom(&self) -> u16 {
		self.y.saturating_add(self.height)
	}

	/// Returns the bottom-left corner.
	pub const fn bottom_left(&self) -> Position {
		Position::new(self.left(), self.bottom())
	}

	/// Returns true if `pos` lies inside the rectangle.
	pub const fn contains(&self, pos: Position) -> bool {
		pos.x >= self.left() && pos.x < self.right() && pos.y >= self.top() && pos.y < self.bottom()
	}
}

/// A position (x, y coordinate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
	pub x: u16,
	pub y: u16,
}

impl Position {
	/// Creates a new position.
	pub const fn new(x: u16, y: u16) -> Self {
		Self { x, y }
	}
}
