//! Reference editor host.
//!
//! [`Editor`] wires a [`Document`] and a [`Selection`] to a
//! [`SuggestPlugin`] the way an interactive host would: every transaction
//! goes through the plugin's update, keys and pointer events reach the
//! plugin first, and delivered fetch results are applied when polled.
//!
//! Screen geometry is a simple grid: paragraph `n` is line `n` and every
//! document position is one cell wide.

use suggest_primitives::{
	CharIdx, Document, EditError, Key, KeyCode, MouseEvent, Range, Rect, Selection, Span, Transaction,
};
use tracing::{trace, warn};

use crate::config::SuggestConfig;
use crate::decoration::Decoration;
use crate::panel::ListPanel;
use crate::plugin::{EditorHost, SuggestPlugin};
use crate::state::SuggestionState;


/// One undoable step.
#[derive(Debug, Clone)]
struct Revision {
	/// Transaction restoring the previous document.
	inverse: Transaction,
	/// Selection before the step.
	selection: Selection,
}

/// Document, selection and history, without the plugin.
#[derive(Debug, Clone)]
pub struct EditorCore {
	doc: Document,
	selection: Selection,
	undo: Vec<Revision>,
	redo: Vec<Revision>,
	focused: bool,
}

impl EditorCore {
	pub fn new(doc: Document, mut selection: Selection) -> Self {
		selection.clamp(doc.len_chars());
		Self {
			doc,
			selection,
			undo: Vec::new(),
			redo: Vec::new(),
			focused: true,
		}
	}

	/// Applies `tx`, recording an undo step if the content changed.
	pub fn apply(&mut self, tx: &Transaction) -> Result<(), EditError> {
		let doc = tx.apply(&self.doc)?;
		let selection = tx.selection_after(&self.selection);
		if tx.doc_changed() {
			self.undo.push(Revision {
				inverse: tx.invert(&self.doc),
				selection: self.selection.clone(),
			});
			self.redo.clear();
		}
		self.doc = doc;
		self.selection = selection;
		Ok(())
	}

	/// Reverts the last step. Returns false if there is nothing to undo.
	pub fn undo(&mut self) -> Result<bool, EditError> {
		Self::step(&mut self.undo, &mut self.redo, &mut self.doc, &mut self.selection)
	}

	/// Reapplies the last undone step.
	pub fn redo(&mut self) -> Result<bool, EditError> {
		Self::step(&mut self.redo, &mut self.undo, &mut self.doc, &mut self.selection)
	}

	fn step(
		from: &mut Vec<Revision>,
		to: &mut Vec<Revision>,
		doc: &mut Document,
		selection: &mut Selection,
	) -> Result<bool, EditError> {
		let Some(revision) = from.pop() else {
			return Ok(false);
		};
		let next = match revision.inverse.apply(doc) {
			Ok(next) => next,
			Err(err) => {
				from.push(revision);
				return Err(err);
			}
		};
		to.push(Revision {
			inverse: revision.inverse.invert(doc),
			selection: selection.clone(),
		});
		*doc = next;
		*selection = revision.selection;
		Ok(true)
	}

	pub fn can_undo(&self) -> bool {
		!self.undo.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.redo.is_empty()
	}

	pub fn is_focused(&self) -> bool {
		self.focused
	}

	pub fn blur(&mut self) {
		self.focused = false;
	}
}

impl EditorHost for EditorCore {
	fn document(&self) -> &Document {
		&self.doc
	}

	fn selection(&self) -> &Selection {
		&self.selection
	}

	fn dispatch(&mut self, tx: Transaction) -> Result<(), EditError> {
		self.apply(&tx)
	}

	fn focus(&mut self) {
		self.focused = true;
	}

	fn span_rect(&self, span: Span) -> Option<Rect> {
		let start = self.doc.resolve(span.from).ok()?;
		let cell = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
		Some(Rect::new(
			cell(start.offset_in_paragraph()),
			cell(start.paragraph),
			cell(span.len()),
			1,
		))
	}
}

/// Reference editor with suggestions attached.
pub struct Editor {
	core: EditorCore,
	plugin: SuggestPlugin<ListPanel>,
}

impl Editor {
	/// Creates an empty editor.
	pub fn new(config: SuggestConfig) -> Self {
		Self::with_document(config, Document::new(), Selection::point(0))
	}

	/// Creates an editor over plain `text` with the caret at its end.
	pub fn with_text(config: SuggestConfig, text: &str) -> Self {
		let doc = Document::from_text(text);
		let end = doc.len_chars();
		Self::with_document(config, doc, Selection::point(end))
	}

	pub fn with_document(config: SuggestConfig, doc: Document, selection: Selection) -> Self {
		let core = EditorCore::new(doc, selection);
		let mut plugin = SuggestPlugin::new(config, ListPanel::new());
		plugin.update(&core);
		Self { core, plugin }
	}

	pub fn document(&self) -> &Document {
		&self.core.doc
	}

	pub fn selection(&self) -> &Selection {
		&self.core.selection
	}

	pub fn core(&self) -> &EditorCore {
		&self.core
	}

	pub fn core_mut(&mut self) -> &mut EditorCore {
		&mut self.core
	}

	pub fn plugin(&self) -> &SuggestPlugin<ListPanel> {
		&self.plugin
	}

	pub fn state(&self) -> &SuggestionState {
		self.plugin.state()
	}

	pub fn panel(&self) -> &ListPanel {
		self.plugin.presenter()
	}

	pub fn decorations(&self) -> Vec<Decoration> {
		self.plugin.decorations()
	}

	/// Applies `tx` and lets the plugin observe the result.
	pub fn dispatch(&mut self, tx: Transaction) -> Result<(), EditError> {
		self.core.apply(&tx)?;
		self.plugin.update(&self.core);
		Ok(())
	}

	/// Moves the selection without editing.
	pub fn set_selection(&mut self, selection: Selection) -> Result<(), EditError> {
		self.dispatch(Transaction::select(selection))
	}

	/// Replaces every selection range with `text`, leaving a caret after each
	/// insertion.
	pub fn type_text(&mut self, text: &str) -> Result<(), EditError> {
		self.edit_each(text, |range| (range.from(), range.to()))
	}

	/// Deletes every non-empty range, or the position before each caret.
	pub fn backspace(&mut self) -> Result<(), EditError> {
		self.edit_each("", |range| {
			if range.is_empty() {
				(range.from().saturating_sub(1), range.to())
			} else {
				(range.from(), range.to())
			}
		})
	}

	fn edit_each(&mut self, text: &str, extent: impl Fn(&Range) -> (CharIdx, CharIdx)) -> Result<(), EditError> {
		let inserted = text.chars().count();
		let selection = self.core.selection.clone();

		let mut tx = Transaction::new();
		let mut carets = Vec::with_capacity(selection.len());
		let (mut added, mut removed, mut prev_end) = (0, 0, 0);
		for range in selection.iter() {
			let (from, to) = extent(range);
			let from = from.max(prev_end);
			let to = to.max(from);
			tx = tx.replace(from, to, text);
			carets.push(Range::point(from - removed + added + inserted));
			added += inserted;
			removed += to - from;
			prev_end = to;
		}

		let primary = carets.remove(selection.primary_index());
		self.dispatch(tx.with_selection(Selection::new(primary, carets)))
	}

	/// Moves the primary caret by `delta` positions, dropping other ranges.
	pub fn move_caret(&mut self, delta: isize) -> Result<(), EditError> {
		let head = self.core.selection.primary().head;
		let target = head.saturating_add_signed(delta).min(self.core.doc.len_chars());
		self.set_selection(Selection::point(target))
	}

	/// Routes a key: the plugin first, then the editor's own bindings.
	pub fn handle_key(&mut self, key: Key) -> bool {
		if self.plugin.handle_key(key, &mut self.core) {
			return true;
		}

		let result = match key.code {
			KeyCode::Char('z') if key.modifiers.ctrl => return self.undo(),
			KeyCode::Char('y') if key.modifiers.ctrl => return self.redo(),
			_ if key.modifiers.has_command() => return false,
			KeyCode::Char(c) => self.type_text(&c.to_string()),
			KeyCode::Enter => self.type_text("\n"),
			KeyCode::Backspace => self.backspace(),
			KeyCode::Left => self.move_caret(-1),
			KeyCode::Right => self.move_caret(1),
			_ => return false,
		};

		match result {
			Ok(()) => true,
			Err(err) => {
				warn!(error = %err, ?key, "edit rejected");
				false
			}
		}
	}

	/// Routes a pointer event to the suggestion panel.
	pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
		self.plugin.handle_mouse(event, &mut self.core)
	}

	/// Reverts the last edit. Returns false if there was nothing to undo.
	pub fn undo(&mut self) -> bool {
		self.history_step(EditorCore::undo)
	}

	/// Reapplies the last undone edit.
	pub fn redo(&mut self) -> bool {
		self.history_step(EditorCore::redo)
	}

	fn history_step(&mut self, step: fn(&mut EditorCore) -> Result<bool, EditError>) -> bool {
		match step(&mut self.core) {
			Ok(true) => {
				self.plugin.update(&self.core);
				true
			}
			Ok(false) => false,
			Err(err) => {
				warn!(error = %err, "history step failed");
				false
			}
		}
	}

	/// Applies fetch results delivered so far.
	pub fn poll(&mut self) -> usize {
		let applied = self.plugin.poll_fetches(&self.core);
		if applied > 0 {
			trace!(applied, "applied suggestion results");
		}
		applied
	}

	/// Waits for the next fetch result and applies it if still current.
	pub async fn next_suggestions(&mut self) -> bool {
		self.plugin.next_fetch(&self.core).await
	}
}
