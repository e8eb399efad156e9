use suggest_matcher::TriggerMatcher;
use suggest_primitives::{Document, Selection};
use tracing::trace;

use crate::state::SuggestionState;


/// Computes the suggestion state for a post-edit document and selection.
///
/// The result always starts from `previous.reset()`, so it depends only on
/// the inputs. Anything other than a single collapsed caret yields the
/// inactive state. Otherwise the paragraph text up to the caret is scanned
/// for a trigger.
pub fn rebuild(
	doc: &Document,
	selection: &Selection,
	previous: &SuggestionState,
	matcher: &TriggerMatcher,
) -> SuggestionState {
	let mut next = previous.reset();

	let Some(cursor) = selection.cursor() else {
		return next;
	};
	let resolved = match doc.resolve(cursor) {
		Ok(resolved) => resolved,
		Err(err) => {
			trace!(cursor, error = %err, "caret outside document");
			return next;
		}
	};
	let Ok(text) = doc.text_between(resolved.paragraph_start, cursor) else {
		return next;
	};

	if let Some(found) = matcher.find(&text, resolved.offset_in_paragraph(), resolved.paragraph_start) {
		trace!(kind = %found.kind, from = found.range.from, to = found.range.to, "trigger active");
		next.activate(found);
	}
	next
}
