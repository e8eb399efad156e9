use proptest::prelude::*;
use serde_json::json;

use super::*;
use crate::node::Attrs;

fn ann() -> InlineNode {
	InlineNode::mention(Attrs::from_iter([("name".to_string(), json!("Ann"))]))
}

#[test]
fn apply_insert_and_delete() {
	let doc = Document::from_text("hello world");
	let out = Transaction::new()
		.insert_text(5, ",")
		.delete(6, 11)
		.apply(&doc)
		.unwrap();
	assert_eq!(out.to_string(), "hello, ");
	assert_eq!(doc.to_string(), "hello world");
}

#[test]
fn apply_rejects_unordered_changes() {
	let doc = Document::from_text("abcdef");
	let err = Transaction::new().delete(3, 5).delete(1, 2).apply(&doc).unwrap_err();
	assert_eq!(err, EditError::Unordered { from: 1, prev_end: 5 });
}

#[test]
fn apply_rejects_out_of_bounds() {
	let doc = Document::from_text("abc");
	let err = Transaction::new().delete(2, 9).apply(&doc).unwrap_err();
	assert!(matches!(err, EditError::OutOfBounds { len: 3, .. }));
}

#[test]
fn apply_rejects_sentinel_in_text() {
	let doc = Document::from_text("abc");
	let text = format!("x{}", crate::ATOM_SENTINEL);
	let err = Transaction::new().insert_text(0, &text).apply(&doc).unwrap_err();
	assert_eq!(err, EditError::ReservedChar);
}

#[test]
fn apply_rejects_selection_past_end() {
	let doc = Document::from_text("abc");
	let err = Transaction::new()
		.delete(0, 1)
		.with_selection(Selection::point(3))
		.apply(&doc)
		.unwrap_err();
	assert_eq!(err, EditError::SelectionOutOfBounds { len: 2 });
}

#[test]
fn replace_with_node_collapses_range() {
	let doc = Document::from_text("hello @jo");
	let tx = Transaction::new().replace_with_node(6, 9, ann());
	let out = tx.apply(&doc).unwrap();
	assert_eq!(out.len_chars(), 7);
	assert_eq!(out.to_string(), "hello @Ann");
	assert_eq!(tx.map_pos(9, Bias::Right), 7);
}

#[test]
fn map_pos_respects_bias_at_insertion_point() {
	let tx = Transaction::new().insert_text(3, "xy");
	assert_eq!(tx.map_pos(3, Bias::Left), 3);
	assert_eq!(tx.map_pos(3, Bias::Right), 5);
	assert_eq!(tx.map_pos(2, Bias::Right), 2);
	assert_eq!(tx.map_pos(4, Bias::Left), 6);
}

#[test]
fn map_pos_inside_deletion_collapses() {
	let tx = Transaction::new().delete(2, 6);
	assert_eq!(tx.map_pos(4, Bias::Left), 2);
	assert_eq!(tx.map_pos(4, Bias::Right), 2);
	assert_eq!(tx.map_pos(6, Bias::Left), 2);
	assert_eq!(tx.map_pos(8, Bias::Left), 4);
}

#[test]
fn selection_after_prefers_explicit_selection() {
	let before = Selection::point(2);
	let tx = Transaction::new().insert_text(0, "ab");
	assert_eq!(tx.selection_after(&before), Selection::point(4));

	let tx = tx.with_selection(Selection::point(1));
	assert_eq!(tx.selection_after(&before), Selection::point(1));
}

#[test]
fn selection_only_transaction_does_not_change_doc() {
	let tx = Transaction::select(Selection::single(0, 2));
	assert!(!tx.doc_changed());
	assert!(Transaction::new().insert_text(0, "a").doc_changed());
}

#[test]
fn invert_restores_replaced_node() {
	let doc = Document::from_text("hi @jo!");
	let tx = Transaction::new().replace_with_node(3, 6, ann());
	let after = tx.apply(&doc).unwrap();
	let undone = tx.invert(&doc).apply(&after).unwrap();
	assert_eq!(undone, doc);
}

fn arb_document() -> impl Strategy<Value = Document> {
	"[a-z @#\n]{0,40}".prop_map(|text| Document::from_text(&text))
}

fn arb_transaction(len: usize) -> impl Strategy<Value = Transaction> {
	prop::collection::vec((0..=len, 0..=len, "[a-z@ ]{0,4}"), 0..4).prop_map(|edits| {
		let mut bounds: Vec<(usize, usize, String)> = edits
			.into_iter()
			.map(|(a, b, text)| (a.min(b), a.max(b), text))
			.collect();
		bounds.sort_by_key(|(from, _, _)| *from);

		let mut tx = Transaction::new();
		let mut prev_end = 0;
		for (from, to, text) in bounds {
			if from < prev_end {
				continue;
			}
			tx = tx.replace(from, to, text.as_str());
			prev_end = to;
		}
		tx
	})
}

proptest! {
	/// Applying a transaction and then its inverse restores the original document.
	#[test]
	fn prop_invert_roundtrip(
		(doc, tx) in arb_document().prop_flat_map(|doc| {
			let len = doc.len_chars();
			(Just(doc), arb_transaction(len))
		})
	) {
		let after = tx.apply(&doc).unwrap();
		let restored = tx.invert(&doc).apply(&after).unwrap();
		prop_assert_eq!(restored.to_string(), doc.to_string());
	}

	/// Mapped positions always land inside the resulting document.
	#[test]
	fn prop_map_pos_in_bounds(
		(doc, tx, pos) in arb_document().prop_flat_map(|doc| {
			let len = doc.len_chars();
			(Just(doc), arb_transaction(len), 0..=len)
		})
	) {
		let after = tx.apply(&doc).unwrap();
		prop_assert!(tx.map_pos(pos, Bias::Left) <= after.len_chars());
		prop_assert!(tx.map_pos(pos, Bias::Right) <= after.len_chars());
	}
}
