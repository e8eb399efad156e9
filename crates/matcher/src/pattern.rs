use regex::Regex;
use suggest_primitives::TriggerKind;
use thiserror::Error;

/// Characters a query may consist of: word characters, `-` and `+`.
pub const QUERY_CLASS: &str = r"[\w\-+]";

/// Reasons a trigger configuration is rejected.
#[derive(Debug, Error)]
pub enum PatternError {
	#[error("{kind} trigger is empty")]
	Empty { kind: TriggerKind },
	#[error("{kind} trigger {trigger:?} contains whitespace")]
	Whitespace { kind: TriggerKind, trigger: String },
	#[error("{kind} trigger {trigger:?} contains {ch:?}, which may appear in a query")]
	QueryChar {
		kind: TriggerKind,
		trigger: String,
		ch: char,
	},
	#[error("mention and tag triggers are both {0:?}")]
	Duplicate(String),
	#[error("invalid trigger pattern: {0}")]
	Regex(#[from] regex::Error),
}

/// Checks a single trigger string.
///
/// A trigger must not be able to occur inside a query, otherwise the mention
/// and tag patterns could both match the same caret. `query_char` is the
/// compiled [`QUERY_CLASS`].
pub(crate) fn validate_trigger(kind: TriggerKind, trigger: &str, query_char: &Regex) -> Result<(), PatternError> {
	if trigger.is_empty() {
		return Err(PatternError::Empty { kind });
	}
	if trigger.chars().any(char::is_whitespace) {
		return Err(PatternError::Whitespace {
			kind,
			trigger: trigger.to_string(),
		});
	}
	if let Some(found) = query_char.find(trigger)
		&& let Some(ch) = found.as_str().chars().next()
	{
		return Err(PatternError::QueryChar {
			kind,
			trigger: trigger.to_string(),
			ch,
		});
	}
	Ok(())
}

/// Compiles the end-anchored pattern for one trigger kind.
///
/// Group `query` holds the text after the trigger. The leading `(?:^|\s)`
/// alternative is part of the match and is stripped by the caller.
pub(crate) fn compile(kind: TriggerKind, trigger: &str, allow_space: bool) -> Result<Regex, PatternError> {
	let trigger = regex::escape(trigger);
	let q = QUERY_CLASS;
	let query = match kind {
		TriggerKind::Mention if allow_space => format!(r"(?:{q}+\s?{q}*)?"),
		TriggerKind::Mention | TriggerKind::Tag => format!("{q}*"),
	};
	Ok(Regex::new(&format!(r"(?:^|\s){trigger}(?P<query>{query})$"))?)
}
