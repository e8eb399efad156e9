use serde::{Deserialize, Serialize};
use serde_json::Value;
use suggest_matcher::MatchDescriptor;
use suggest_primitives::node::display_name;
use suggest_primitives::{Attrs, Span, TriggerKind};


/// A suggestion offered by a provider.
///
/// The attribute record becomes the attrs of the inline node created when
/// the candidate is committed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(Attrs);

impl Candidate {
	pub fn new(attrs: Attrs) -> Self {
		Self(attrs)
	}

	pub fn attrs(&self) -> &Attrs {
		&self.0
	}

	pub fn into_attrs(self) -> Attrs {
		self.0
	}

	/// Display label: the first of `name`, `tag`, `id` present.
	pub fn label(&self) -> String {
		display_name(&self.0)
	}
}

impl From<Attrs> for Candidate {
	fn from(attrs: Attrs) -> Self {
		Self(attrs)
	}
}

impl TryFrom<Value> for Candidate {
	type Error = Value;

	/// Accepts JSON objects; any other value is handed back.
	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(attrs) => Ok(Self(attrs)),
			other => Err(other),
		}
	}
}

/// Snapshot of the suggestion workflow for one document state.
///
/// A new snapshot is built on every edit. When inactive, the range is
/// `0..0`, there is no kind, the query is empty, there are no suggestions and
/// the index is 0. Only the suggestion list and the index change in place,
/// and only for the snapshot whose `version` a fetch was scheduled with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestionState {
	version: u64,
	active: bool,
	range: Span,
	kind: Option<TriggerKind>,
	text: String,
	suggestions: Vec<Candidate>,
	index: usize,
}

impl SuggestionState {
	/// The initial, inactive state.
	pub fn init() -> Self {
		Self::default()
	}

	/// Returns an inactive state one version past `self`.
	pub fn reset(&self) -> Self {
		Self {
			version: self.version.wrapping_add(1),
			..Self::default()
		}
	}

	/// Records a trigger found at the caret.
	pub(crate) fn activate(&mut self, found: MatchDescriptor) {
		self.active = true;
		self.range = found.range;
		self.kind = Some(found.kind);
		self.text = found.query;
	}

	/// Token identifying this snapshot; fetch results carry it back.
	pub fn version(&self) -> u64 {
		self.version
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Absolute range from the trigger to the caret.
	pub fn range(&self) -> Span {
		self.range
	}

	pub fn kind(&self) -> Option<TriggerKind> {
		self.kind
	}

	/// Query typed after the trigger.
	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn suggestions(&self) -> &[Candidate] {
		&self.suggestions
	}

	pub fn index(&self) -> usize {
		self.index
	}

	/// Returns the highlighted candidate.
	pub fn selected(&self) -> Option<&Candidate> {
		self.suggestions.get(self.index)
	}

	/// Stores fetched candidates and highlights the first one.
	///
	/// Inactive states never hold suggestions, so the list is dropped.
	pub(crate) fn set_suggestions(&mut self, suggestions: Vec<Candidate>) {
		if !self.active {
			return;
		}
		self.suggestions = suggestions;
		self.index = 0;
	}

	/// Moves the highlight down, wrapping to the top.
	pub fn select_next(&mut self) {
		let len = self.suggestions.len();
		if len > 0 {
			self.index = (self.index + 1) % len;
		}
	}

	/// Moves the highlight up, wrapping to the bottom.
	pub fn select_prev(&mut self) {
		let len = self.suggestions.len();
		if len > 0 {
			self.index = (self.index + len - 1) % len;
		}
	}

	/// Highlights row `index`. Returns false if there is no such row.
	pub fn set_index(&mut self, index: usize) -> bool {
		if index >= self.suggestions.len() {
			return false;
		}
		self.index = index;
		true
	}
}
