use suggest_primitives::Span;

use crate::state::SuggestionState;

/// An inline class applied to a document range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
	pub span: Span,
	pub class: String,
}

impl Decoration {
	pub fn inline(span: Span, class: impl Into<String>) -> Self {
		Self {
			span,
			class: class.into(),
		}
	}
}

/// Decorations for `state`: the trigger span while active, nothing otherwise.
pub fn for_state(state: &SuggestionState, class: &str) -> Vec<Decoration> {
	if !state.is_active() {
		return Vec::new();
	}
	vec![Decoration::inline(state.range(), class)]
}
