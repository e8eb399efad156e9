use crate::node::{ATOM_SENTINEL, InlineNode};
use crate::range::{CharIdx, CharLen};

/// A piece of inline content: a text run or an atomic node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
	Text(String),
	Node(InlineNode),
}

impl Inline {
	/// Number of document positions this piece occupies.
	pub fn char_len(&self) -> CharLen {
		match self {
			Inline::Text(text) => text.chars().count(),
			Inline::Node(_) => 1,
		}
	}
}

/// An ordered run of inline content, used as change payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
	pieces: Vec<Inline>,
}

impl Fragment {
	/// An empty fragment (pure deletion payload).
	pub fn empty() -> Self {
		Self::default()
	}

	/// A fragment holding one text run.
	pub fn text(text: impl Into<String>) -> Self {
		let mut fragment = Self::empty();
		fragment.push_text(text);
		fragment
	}

	/// A fragment holding one atomic node.
	pub fn node(node: InlineNode) -> Self {
		Self {
			pieces: vec![Inline::Node(node)],
		}
	}

	/// Appends text, merging with a trailing text run.
	pub fn push_text(&mut self, text: impl Into<String>) {
		let text = text.into();
		if text.is_empty() {
			return;
		}
		if let Some(Inline::Text(last)) = self.pieces.last_mut() {
			last.push_str(&text);
		} else {
			self.pieces.push(Inline::Text(text));
		}
	}

	/// Appends an atomic node.
	pub fn push_node(&mut self, node: InlineNode) {
		self.pieces.push(Inline::Node(node));
	}

	/// Returns the pieces in order.
	pub fn pieces(&self) -> &[Inline] {
		&self.pieces
	}

	/// Returns true if the fragment occupies no positions.
	pub fn is_empty(&self) -> bool {
		self.pieces.iter().all(|piece| piece.char_len() == 0)
	}

	/// Number of document positions the fragment occupies.
	pub fn char_len(&self) -> CharLen {
		self.pieces.iter().map(Inline::char_len).sum()
	}

	/// Iterates over the atomic nodes in order.
	pub fn nodes(&self) -> impl Iterator<Item = &InlineNode> {
		self.pieces.iter().filter_map(|piece| match piece {
			Inline::Node(node) => Some(node),
			Inline::Text(_) => None,
		})
	}

	/// Returns true if any text run contains the reserved atom sentinel.
	pub(crate) fn has_reserved_char(&self) -> bool {
		self.pieces.iter().any(|piece| matches!(piece, Inline::Text(text) if text.contains(ATOM_SENTINEL)))
	}

	/// Flattens the fragment into storage text, nodes becoming the sentinel.
	pub(crate) fn storage_text(&self) -> String {
		let mut out = String::new();
		for piece in &self.pieces {
			match piece {
				Inline::Text(text) => out.push_str(text),
				Inline::Node(_) => out.push(ATOM_SENTINEL),
			}
		}
		out
	}
}

impl From<&str> for Fragment {
	fn from(text: &str) -> Self {
		Self::text(text)
	}
}

impl From<String> for Fragment {
	fn from(text: String) -> Self {
		Self::text(text)
	}
}

impl From<InlineNode> for Fragment {
	fn from(node: InlineNode) -> Self {
		Self::node(node)
	}
}

/// Replaces the range `[from, to)` of the source document with `insert`.
///
/// An empty `insert` is a deletion, an empty range an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	pub from: CharIdx,
	pub to: CharIdx,
	pub insert: Fragment,
}

impl Change {
	/// Net change in document length.
	pub(crate) fn delta(&self) -> isize {
		self.insert.char_len() as isize - (self.to - self.from) as isize
	}
}

/// Bias determines how positions at change boundaries are mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Position stays before insertions at the same location.
	Left,
	/// Position moves after insertions at the same location.
	Right,
}
