use proptest::prelude::*;
use suggest_primitives::ATOM_SENTINEL;

use super::*;

fn matcher(allow_space: bool) -> TriggerMatcher {
	TriggerMatcher::new("@", "#", allow_space).unwrap()
}

fn descriptor(kind: TriggerKind, from: usize, to: usize, query: &str) -> MatchDescriptor {
	MatchDescriptor {
		kind,
		range: Span { from, to },
		query: query.to_string(),
	}
}

#[test]
fn mention_after_word_and_space() {
	let found = matcher(true).find("hello @jo", 9, 0);
	assert_eq!(found, Some(descriptor(TriggerKind::Mention, 6, 9, "jo")));
}

#[test]
fn tag_stops_at_space() {
	let m = matcher(false);
	assert_eq!(
		m.find("#rock and roll", 5, 0),
		Some(descriptor(TriggerKind::Tag, 0, 5, "rock"))
	);
	// The caret has left the tag: nothing touches it anymore.
	assert_eq!(m.find("#rock and roll", 14, 0), None);
}

#[test]
fn tag_ignores_allow_space() {
	let m = matcher(true);
	assert_eq!(m.find("#rock ", 6, 0), None);
	assert_eq!(m.find("#rock a", 7, 0), None);
}

#[test]
fn mention_allows_one_space_when_enabled() {
	assert_eq!(
		matcher(true).find("hi @john sm", 11, 0),
		Some(descriptor(TriggerKind::Mention, 3, 11, "john sm"))
	);
	assert_eq!(
		matcher(true).find("hi @john ", 9, 0),
		Some(descriptor(TriggerKind::Mention, 3, 9, "john "))
	);
	assert_eq!(matcher(true).find("hi @john smith jr", 17, 0), None);
	assert_eq!(matcher(false).find("hi @john sm", 11, 0), None);
}

#[test]
fn space_never_leads_the_query() {
	assert_eq!(matcher(true).find("@ ", 2, 0), None);
}

#[test]
fn empty_query_right_after_trigger() {
	assert_eq!(matcher(true).find("say @", 5, 0), Some(descriptor(TriggerKind::Mention, 4, 5, "")));
	assert_eq!(matcher(true).find("#", 1, 0), Some(descriptor(TriggerKind::Tag, 0, 1, "")));
}

#[test]
fn trigger_at_paragraph_start() {
	assert_eq!(
		matcher(true).find("@ann", 4, 0),
		Some(descriptor(TriggerKind::Mention, 0, 4, "ann"))
	);
}

#[test]
fn trigger_inside_word_is_ignored() {
	assert_eq!(matcher(true).find("mail me@host", 12, 0), None);
	assert_eq!(matcher(true).find("issue#12", 8, 0), None);
}

#[test]
fn cursor_truncates_the_scan() {
	let m = matcher(true);
	assert_eq!(m.find("@ann and more", 2, 0), Some(descriptor(TriggerKind::Mention, 0, 2, "a")));
	assert_eq!(m.find("@ann", 99, 0), Some(descriptor(TriggerKind::Mention, 0, 4, "ann")));
}

#[test]
fn offsets_are_absolute() {
	assert_eq!(
		matcher(true).find("hello @jo", 9, 20),
		Some(descriptor(TriggerKind::Mention, 26, 29, "jo"))
	);
}

#[test]
fn offsets_count_characters_not_bytes() {
	assert_eq!(
		matcher(true).find("h\u{e9}llo @zo\u{eb}", 10, 0),
		Some(descriptor(TriggerKind::Mention, 6, 10, "zo\u{eb}"))
	);
	assert_eq!(
		matcher(true).find("a\u{3000}#\u{30bf}\u{30b0}", 5, 0),
		Some(descriptor(TriggerKind::Tag, 2, 5, "\u{30bf}\u{30b0}"))
	);
}

#[test]
fn atom_sentinel_blocks_retrigger() {
	let text = format!("{ATOM_SENTINEL}jo");
	assert_eq!(matcher(true).find(&text, 3, 0), None);

	let text = format!("@{ATOM_SENTINEL}");
	assert_eq!(matcher(true).find(&text, 2, 0), None);
}

#[test]
fn hyphen_and_plus_belong_to_query() {
	assert_eq!(
		matcher(false).find("#c++ #dev-ops", 13, 0),
		Some(descriptor(TriggerKind::Tag, 5, 13, "dev-ops"))
	);
	assert_eq!(matcher(false).find("@c++", 4, 0), Some(descriptor(TriggerKind::Mention, 0, 4, "c++")));
}

#[test]
fn multi_character_triggers_are_escaped() {
	let m = TriggerMatcher::new("@@", "$.", false).unwrap();
	assert_eq!(m.find("x @@bo", 6, 0), Some(descriptor(TriggerKind::Mention, 2, 6, "bo")));
	assert_eq!(m.find("$.ok", 4, 0), Some(descriptor(TriggerKind::Tag, 0, 4, "ok")));
	assert_eq!(m.find("$xok", 4, 0), None);
}

#[test]
fn rejects_malformed_triggers() {
	assert!(matches!(
		TriggerMatcher::new("", "#", true),
		Err(PatternError::Empty {
			kind: TriggerKind::Mention
		})
	));
	assert!(matches!(
		TriggerMatcher::new("@", "# ", true),
		Err(PatternError::Whitespace {
			kind: TriggerKind::Tag,
			..
		})
	));
	assert!(matches!(
		TriggerMatcher::new("a", "#", true),
		Err(PatternError::QueryChar { ch: 'a', .. })
	));
	assert!(matches!(
		TriggerMatcher::new("@", "-", true),
		Err(PatternError::QueryChar { ch: '-', .. })
	));
	assert!(matches!(TriggerMatcher::new("@", "@", true), Err(PatternError::Duplicate(_))));
}

proptest! {
	/// A trigger preceded by start or whitespace and followed by query
	/// characters up to the caret spans exactly trigger..caret.
	#[test]
	fn prop_range_spans_trigger_to_cursor(
		prefix in "([a-z]{0,6} ){0,3}",
		query in "[a-zA-Z0-9_+-]{0,8}",
		allow_space in any::<bool>(),
	) {
		let text = format!("{prefix}@{query}");
		let cursor = text.chars().count();
		let found = matcher(allow_space).find(&text, cursor, 3).unwrap();
		prop_assert_eq!(found.kind, TriggerKind::Mention);
		prop_assert_eq!(found.range.from, 3 + prefix.chars().count());
		prop_assert_eq!(found.range.to, 3 + cursor);
		prop_assert_eq!(found.query, query);
	}

	/// The mention and tag patterns never both match the same input.
	#[test]
	fn prop_mention_and_tag_are_exclusive(text in "[a-z@# +-]{0,16}", allow_space in any::<bool>()) {
		let m = matcher(allow_space);
		prop_assert!(!(m.mention.is_match(&text) && m.tag.is_match(&text)));
	}

	/// Tag queries never contain a space, whatever `allow_space` says.
	#[test]
	fn prop_tag_query_has_no_space(text in "[a-z# ]{0,16}", allow_space in any::<bool>()) {
		let cursor = text.chars().count();
		if let Some(found) = matcher(allow_space).find(&text, cursor, 0)
			&& found.kind == TriggerKind::Tag
		{
			prop_assert!(!found.query.contains(' '));
		}
	}

	/// The reported range always ends at the caret and covers the query.
	#[test]
	fn prop_range_ends_at_cursor(text in "[a-z@# ]{0,16}", cursor in 0usize..20) {
		let clamped = cursor.min(text.chars().count());
		if let Some(found) = matcher(true).find(&text, cursor, 0) {
			prop_assert_eq!(found.range.to, clamped);
			prop_assert_eq!(found.range.len(), 1 + found.query.chars().count());
		}
	}
}
