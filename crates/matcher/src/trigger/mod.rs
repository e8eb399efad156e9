use regex::Regex;
use suggest_primitives::{CharIdx, CharLen, Span, TriggerKind};

use crate::pattern::{PatternError, QUERY_CLASS, compile, validate_trigger};

#[cfg(test)]
mod tests;

/// An active trigger found at the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDescriptor {
	pub kind: TriggerKind,
	/// Absolute range from the trigger character up to the caret.
	pub range: Span,
	/// Text typed after the trigger. May be empty.
	pub query: String,
}

/// Compiled mention and tag patterns.
///
/// Construction validates the triggers so that at most one pattern can match
/// any given input.
#[derive(Debug, Clone)]
pub struct TriggerMatcher {
	mention: Regex,
	tag: Regex,
}

impl TriggerMatcher {
	/// Builds a matcher for the given triggers.
	///
	/// `allow_space` lets a mention query contain one space; tag queries are
	/// always single tokens.
	pub fn new(mention_trigger: &str, hashtag_trigger: &str, allow_space: bool) -> Result<Self, PatternError> {
		let query_char = Regex::new(QUERY_CLASS)?;
		validate_trigger(TriggerKind::Mention, mention_trigger, &query_char)?;
		validate_trigger(TriggerKind::Tag, hashtag_trigger, &query_char)?;
		if mention_trigger == hashtag_trigger {
			return Err(PatternError::Duplicate(mention_trigger.to_string()));
		}

		Ok(Self {
			mention: compile(TriggerKind::Mention, mention_trigger, allow_space)?,
			tag: compile(TriggerKind::Tag, hashtag_trigger, false)?,
		})
	}

	/// Scans `paragraph` up to `cursor` for a trigger touching the caret.
	///
	/// `cursor` is a character offset within the paragraph and is clamped to
	/// its length; `paragraph_start` is the absolute offset of the paragraph,
	/// added to the reported range.
	pub fn find(&self, paragraph: &str, cursor: CharLen, paragraph_start: CharIdx) -> Option<MatchDescriptor> {
		let end = paragraph
			.char_indices()
			.nth(cursor)
			.map_or(paragraph.len(), |(byte, _)| byte);
		let text = &paragraph[..end];

		[(TriggerKind::Mention, &self.mention), (TriggerKind::Tag, &self.tag)]
			.into_iter()
			.find_map(|(kind, pattern)| {
				let caps = pattern.captures(text)?;
				let whole = caps.get(0)?;
				let query = caps.name("query")?.as_str().to_string();

				let mut start = whole.start();
				if let Some(lead) = whole.as_str().chars().next()
					&& lead.is_whitespace()
				{
					start += lead.len_utf8();
				}

				let from = paragraph_start + text[..start].chars().count();
				let to = from + text[start..whole.end()].chars().count();
				Some(MatchDescriptor {
					kind,
					range: Span { from, to },
					query,
				})
			})
	}
}
