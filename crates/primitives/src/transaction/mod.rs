//! Document edit transactions.
//!
//! A [`Transaction`] is an ordered list of non-overlapping [`Change`]s, all
//! expressed in the coordinates of the document it is applied to, plus an
//! optional explicit post-edit selection. Applying a transaction never mutates
//! its source: it yields a new [`Document`], so every edit produces a fresh
//! immutable snapshot.

mod types;

#[cfg(test)]
mod tests;

pub use types::{Bias, Change, Fragment, Inline};

use crate::document::{Document, EditError};
use crate::node::InlineNode;
use crate::range::{CharIdx, Range};
use crate::selection::Selection;

/// A batch of changes applied atomically, with an optional new selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
	changes: Vec<Change>,
	selection: Option<Selection>,
}

impl Transaction {
	/// Creates an empty transaction.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a selection-only transaction.
	pub fn select(selection: Selection) -> Self {
		Self::new().with_selection(selection)
	}

	/// Adds a change replacing `[from, to)` with `insert`.
	///
	/// Changes must be added in ascending, non-overlapping order; violations
	/// are reported by [`Transaction::apply`].
	pub fn replace(mut self, from: CharIdx, to: CharIdx, insert: impl Into<Fragment>) -> Self {
		self.changes.push(Change {
			from,
			to,
			insert: insert.into(),
		});
		self
	}

	/// Adds an insertion of `text` at `pos`.
	pub fn insert_text(self, pos: CharIdx, text: &str) -> Self {
		self.replace(pos, pos, text)
	}

	/// Adds a deletion of `[from, to)`.
	pub fn delete(self, from: CharIdx, to: CharIdx) -> Self {
		self.replace(from, to, Fragment::empty())
	}

	/// Adds a change replacing `[from, to)` with a single atomic node.
	pub fn replace_with_node(self, from: CharIdx, to: CharIdx, node: InlineNode) -> Self {
		self.replace(from, to, node)
	}

	/// Sets the explicit post-edit selection.
	pub fn with_selection(mut self, selection: Selection) -> Self {
		self.selection = Some(selection);
		self
	}

	/// Returns the changes in application order.
	pub fn changes(&self) -> &[Change] {
		&self.changes
	}

	/// Returns the explicit post-edit selection, if any.
	pub fn selection(&self) -> Option<&Selection> {
		self.selection.as_ref()
	}

	/// Returns true if applying this transaction alters document content.
	pub fn doc_changed(&self) -> bool {
		self.changes
			.iter()
			.any(|change| change.from != change.to || !change.insert.is_empty())
	}

	/// Checks ordering, bounds and payloads against the source document.
	fn validate(&self, doc: &Document) -> Result<(), EditError> {
		let len = doc.len_chars();
		let mut prev_end = 0;
		for (i, change) in self.changes.iter().enumerate() {
			if change.from > change.to || change.to > len {
				return Err(EditError::OutOfBounds {
					from: change.from,
					to: change.to,
					len,
				});
			}
			if i > 0 && change.from < prev_end {
				return Err(EditError::Unordered {
					from: change.from,
					prev_end,
				});
			}
			if change.insert.has_reserved_char() {
				return Err(EditError::ReservedChar);
			}
			prev_end = change.to;
		}
		if let Some(selection) = &self.selection {
			let len_after = len
				.checked_add_signed(self.changes.iter().map(Change::delta).sum())
				.unwrap_or(0);
			if !selection.is_in_bounds(len_after) {
				return Err(EditError::SelectionOutOfBounds { len: len_after });
			}
		}
		Ok(())
	}

	/// Applies the transaction, returning the resulting document.
	///
	/// The source document is left untouched.
	pub fn apply(&self, doc: &Document) -> Result<Document, EditError> {
		self.validate(doc)?;

		let mut out = doc.clone();
		// Back to front, so earlier offsets stay valid.
		for change in self.changes.iter().rev() {
			out.splice(change.from, change.to, &change.insert);
		}
		Ok(out)
	}

	/// Maps a source-document position into the resulting document.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut added = 0;
		let mut removed = 0;

		for change in &self.changes {
			if pos < change.from {
				break;
			}
			let inserted = change.insert.char_len();
			let deleted = change.to - change.from;

			let after = pos > change.to || (pos == change.to && (deleted > 0 || bias == Bias::Right));
			if after {
				added += inserted;
				removed += deleted;
				continue;
			}

			// Inside the replaced range, or at an insertion point with left bias.
			let start = change.from + added - removed;
			return match bias {
				Bias::Left => start,
				Bias::Right => start + inserted,
			};
		}

		pos + added - removed
	}

	/// Maps every range of `selection` into the resulting document.
	pub fn map_selection(&self, selection: &Selection) -> Selection {
		selection.transform(|range| {
			if range.is_empty() {
				return Range::point(self.map_pos(range.head, Bias::Right));
			}
			let (anchor_bias, head_bias) = if range.anchor < range.head {
				(Bias::Left, Bias::Right)
			} else {
				(Bias::Right, Bias::Left)
			};
			Range::new(self.map_pos(range.anchor, anchor_bias), self.map_pos(range.head, head_bias))
		})
	}

	/// Returns the post-edit selection: the explicit one, or `before` mapped.
	pub fn selection_after(&self, before: &Selection) -> Selection {
		self.selection
			.clone()
			.unwrap_or_else(|| self.map_selection(before))
	}

	/// Builds the transaction that undoes this one.
	///
	/// `before` must be the document this transaction was applied to. The
	/// inverse carries no selection; hosts restore their own saved selection.
	pub fn invert(&self, before: &Document) -> Transaction {
		let mut shift: isize = 0;
		let mut changes = Vec::with_capacity(self.changes.len());

		for change in &self.changes {
			let from = change.from.saturating_add_signed(shift);
			let to = from + change.insert.char_len();
			changes.push(Change {
				from,
				to,
				insert: before.slice(change.from, change.to),
			});
			shift += change.delta();
		}

		Transaction {
			changes,
			selection: None,
		}
	}
}
