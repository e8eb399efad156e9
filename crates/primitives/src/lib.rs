//! Core types for the autosuggest engine: documents, ranges, selections,
//! transactions, input events and inline nodes.

/// Paragraph-structured documents with atomic inline nodes.
pub mod document;
/// Screen geometry used to anchor floating panels.
pub mod geometry;
/// Key and mouse event types.
pub mod key;
/// Atomic inline nodes (mentions and tags).
pub mod node;
/// Text range types measured in characters.
pub mod range;
/// Selection types for single and multi-cursor editing.
pub mod selection;
/// Document edit transactions.
pub mod transaction;

pub use document::{Document, EditError, ResolvedPos};
pub use geometry::{Position, Rect};
pub use key::{Key, KeyCode, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use node::{ATOM_SENTINEL, Attrs, InlineNode, TriggerKind};
pub use range::{CharIdx, CharLen, Range, Span};
pub use ropey::Rope;
pub use selection::Selection;
pub use transaction::{Bias, Change, Fragment, Inline, Transaction};
