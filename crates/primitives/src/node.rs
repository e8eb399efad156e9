//! Atomic inline nodes.
//!
//! A committed mention or tag lives in the document as a single, non-editable
//! position. Text extraction renders it as [`ATOM_SENTINEL`], which is neither
//! a word character nor whitespace, so a trigger scan can never run across it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Character standing in for an atomic inline node in extracted text.
pub const ATOM_SENTINEL: char = '\u{FFFC}';

/// Attribute record carried by candidates and inline nodes.
pub type Attrs = serde_json::Map<String, Value>;

/// Which trigger started a suggestion, and which node a commit produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
	Mention,
	Tag,
}

impl TriggerKind {
	/// Lowercase name, as used in markup and logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Mention => "mention",
			Self::Tag => "tag",
		}
	}
}

impl fmt::Display for TriggerKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A structured inline element occupying one document position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineNode {
	pub kind: TriggerKind,
	pub attrs: Attrs,
}

impl InlineNode {
	/// Creates a node of the given kind from an attribute record.
	pub fn new(kind: TriggerKind, attrs: Attrs) -> Self {
		Self { kind, attrs }
	}

	/// Creates a mention node.
	pub fn mention(attrs: Attrs) -> Self {
		Self::new(TriggerKind::Mention, attrs)
	}

	/// Creates a tag node.
	pub fn tag(attrs: Attrs) -> Self {
		Self::new(TriggerKind::Tag, attrs)
	}

	/// Returns the display name: the first of `name`, `tag`, `id` present.
	pub fn name(&self) -> String {
		display_name(&self.attrs)
	}

	/// Returns the human readable label, e.g. `@Ann` or `#rust`.
	///
	/// The sigil is always the default `@` or `#`, whatever triggers created
	/// the node. Hosts with custom triggers render [`Self::name`] themselves.
	pub fn label(&self) -> String {
		let sigil = match self.kind {
			TriggerKind::Mention => '@',
			TriggerKind::Tag => '#',
		};
		format!("{sigil}{}", self.name())
	}
}

/// Picks a display name out of an attribute record.
pub fn display_name(attrs: &Attrs) -> String {
	["name", "tag", "id"]
		.iter()
		.find_map(|key| attrs.get(*key))
		.map(|value| match value {
			Value::String(s) => s.clone(),
			other => other.to_string(),
		})
		.unwrap_or_default()
}
