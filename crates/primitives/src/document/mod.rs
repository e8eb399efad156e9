//! Paragraph-structured documents with atomic inline nodes.
//!
//! Content is stored as a [`Rope`] where paragraphs are separated by line
//! breaks and every atomic node occupies one [`ATOM_SENTINEL`] character. The
//! nodes themselves live in a side vector, ordered like their sentinels:
//! the `k`-th sentinel in the rope is `atoms[k]`.

use std::fmt;

use ropey::Rope;
use thiserror::Error;

use crate::node::{ATOM_SENTINEL, InlineNode};
use crate::range::{CharIdx, CharLen};
use crate::transaction::{Fragment, Inline};


/// Errors raised while resolving positions or applying edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	#[error("range {from}..{to} is out of bounds for document of length {len}")]
	OutOfBounds { from: CharIdx, to: CharIdx, len: CharLen },
	#[error("change starting at {from} overlaps the previous change ending at {prev_end}")]
	Unordered { from: CharIdx, prev_end: CharIdx },
	#[error("inserted text contains the reserved atom sentinel")]
	ReservedChar,
	#[error("selection is out of bounds for resulting document of length {len}")]
	SelectionOutOfBounds { len: CharLen },
}

/// A position resolved against its enclosing paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPos {
	/// Absolute document offset.
	pub pos: CharIdx,
	/// Zero-based paragraph index.
	pub paragraph: usize,
	/// Absolute offset of the paragraph's first position.
	pub paragraph_start: CharIdx,
}

impl ResolvedPos {
	/// Offset of the position within its paragraph.
	pub fn offset_in_paragraph(&self) -> CharLen {
		self.pos - self.paragraph_start
	}
}

/// An immutable-per-edit document snapshot.
///
/// Cloning is cheap for the text (ropes share structure); edits go through
/// [`crate::Transaction::apply`], which returns a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
	text: Rope,
	atoms: Vec<InlineNode>,
}

impl Document {
	/// Creates an empty document with one empty paragraph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a document from plain text; line breaks separate paragraphs.
	///
	/// Stray sentinel characters are dropped.
	pub fn from_text(text: &str) -> Self {
		let clean: String = text.chars().filter(|&c| c != ATOM_SENTINEL).collect();
		Self {
			text: Rope::from_str(&clean),
			atoms: Vec::new(),
		}
	}

	/// Creates a document from mixed inline content.
	pub fn from_fragment(fragment: &Fragment) -> Self {
		let mut doc = Self::new();
		doc.splice(0, 0, fragment);
		doc
	}

	/// Total number of positions.
	pub fn len_chars(&self) -> CharLen {
		self.text.len_chars()
	}

	/// Number of atomic nodes.
	pub fn node_count(&self) -> usize {
		self.atoms.len()
	}

	/// Resolves an absolute position to its paragraph.
	pub fn resolve(&self, pos: CharIdx) -> Result<ResolvedPos, EditError> {
		let len = self.len_chars();
		if pos > len {
			return Err(EditError::OutOfBounds { from: pos, to: pos, len });
		}
		let paragraph = self.text.char_to_line(pos);
		Ok(ResolvedPos {
			pos,
			paragraph,
			paragraph_start: self.text.line_to_char(paragraph),
		})
	}

	/// Plain text of `[from, to)` with every atomic node rendered as
	/// [`ATOM_SENTINEL`], never as its label.
	pub fn text_between(&self, from: CharIdx, to: CharIdx) -> Result<String, EditError> {
		self.check_range(from, to)?;
		Ok(self.text.slice(from..to).to_string())
	}

	/// Returns the node at `pos`, if that position holds one.
	pub fn node_at(&self, pos: CharIdx) -> Option<&InlineNode> {
		if pos >= self.len_chars() || self.text.char(pos) != ATOM_SENTINEL {
			return None;
		}
		self.atoms.get(self.atoms_before(pos))
	}

	/// Iterates over `(position, node)` pairs in document order.
	pub fn nodes(&self) -> impl Iterator<Item = (CharIdx, &InlineNode)> {
		self.text
			.chars()
			.enumerate()
			.filter(|&(_, c)| c == ATOM_SENTINEL)
			.map(|(pos, _)| pos)
			.zip(self.atoms.iter())
	}

	/// Copies `[from, to)` out as a fragment.
	///
	/// Callers pass a validated range; out-of-range ends are clamped.
	pub fn slice(&self, from: CharIdx, to: CharIdx) -> Fragment {
		let len = self.len_chars();
		let (from, to) = (from.min(len), to.min(len));
		let mut fragment = Fragment::empty();
		if from >= to {
			return fragment;
		}

		let mut atom = self.atoms_before(from);
		let mut run = String::new();
		for c in self.text.slice(from..to).chars() {
			if c == ATOM_SENTINEL {
				fragment.push_text(std::mem::take(&mut run));
				if let Some(node) = self.atoms.get(atom) {
					fragment.push_node(node.clone());
				}
				atom += 1;
			} else {
				run.push(c);
			}
		}
		fragment.push_text(run);
		fragment
	}

	/// Replaces `[from, to)` with `insert`, keeping the atom table aligned.
	///
	/// Only called by transaction application after validation.
	pub(crate) fn splice(&mut self, from: CharIdx, to: CharIdx, insert: &Fragment) {
		let first_atom = self.atoms_before(from);
		let removed_atoms = self
			.text
			.slice(from..to)
			.chars()
			.filter(|&c| c == ATOM_SENTINEL)
			.count();

		self.atoms.splice(
			first_atom..first_atom + removed_atoms,
			insert.nodes().cloned(),
		);
		self.text.remove(from..to);
		self.text.insert(from, &insert.storage_text());
	}

	fn atoms_before(&self, pos: CharIdx) -> usize {
		self.text
			.slice(..pos)
			.chars()
			.filter(|&c| c == ATOM_SENTINEL)
			.count()
	}

	fn check_range(&self, from: CharIdx, to: CharIdx) -> Result<(), EditError> {
		let len = self.len_chars();
		if from > to || to > len {
			return Err(EditError::OutOfBounds { from, to, len });
		}
		Ok(())
	}
}

/// Renders the document for display, nodes shown by their labels.
impl fmt::Display for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for piece in self.slice(0, self.len_chars()).pieces() {
			match piece {
				Inline::Text(text) => f.write_str(text)?,
				Inline::Node(node) => f.write_str(&node.label())?,
			}
		}
		Ok(())
	}
}
