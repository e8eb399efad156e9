use suggest_primitives::{
	CharIdx, EditError, InlineNode, Key, KeyCode, MouseButton, MouseEvent, MouseEventKind, Selection, Transaction,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::panel::Presenter;
use crate::plugin::{EditorHost, SuggestPlugin};

/// Reasons a commit is abandoned.
#[derive(Debug, Error)]
pub enum CommitError {
	#[error("suggestion range {from}..{to} no longer reads {expected:?} (found {found:?})")]
	RangeMismatch {
		from: CharIdx,
		to: CharIdx,
		expected: String,
		found: String,
	},
	#[error(transparent)]
	Edit(#[from] EditError),
}

impl<P: Presenter> SuggestPlugin<P> {
	/// Handles a key while a trigger is active. Returns true if consumed.
	pub fn handle_key(&mut self, key: Key, host: &mut dyn EditorHost) -> bool {
		if !self.state.is_active() || key.modifiers.has_command() {
			return false;
		}

		match key.code {
			KeyCode::Down => {
				self.state.select_next();
				self.render_rows();
				true
			}
			KeyCode::Up => {
				self.state.select_prev();
				self.render_rows();
				true
			}
			KeyCode::Enter => {
				self.commit_or_dismiss(self.state.index(), host);
				true
			}
			KeyCode::Esc => {
				debug!(version = self.state.version(), "suggestions dismissed");
				self.dismiss();
				true
			}
			_ => false,
		}
	}

	/// Handles pointer events over the panel. Returns true if consumed.
	///
	/// Hovering a row highlights it; a left click commits it and focuses the
	/// editor.
	pub fn handle_mouse(&mut self, event: MouseEvent, host: &mut dyn EditorHost) -> bool {
		if !self.state.is_active() {
			return false;
		}
		let Some(row) = self.presenter.hit_test(event.position) else {
			return false;
		};

		match event.kind {
			MouseEventKind::Moved => {
				if self.state.set_index(row) {
					self.presenter.highlight(row);
				}
				true
			}
			MouseEventKind::Down(MouseButton::Left) => {
				self.commit_or_dismiss(row, host);
				host.focus();
				true
			}
			MouseEventKind::Down(_) => false,
		}
	}

	/// Replaces the trigger span with an inline node built from candidate
	/// `index`.
	///
	/// Returns `Ok(false)` when there is no such candidate. Before editing,
	/// the span must still read trigger plus query; otherwise nothing is
	/// changed and [`CommitError::RangeMismatch`] is returned.
	pub fn commit(&mut self, index: usize, host: &mut dyn EditorHost) -> Result<bool, CommitError> {
		let Some(kind) = self.state.kind() else {
			return Ok(false);
		};
		let Some(candidate) = self.state.suggestions().get(index).cloned() else {
			return Ok(false);
		};

		let range = self.state.range();
		let expected = format!("{}{}", self.config.trigger(kind), self.state.text());
		let found = host.document().text_between(range.from, range.to)?;
		if found != expected {
			return Err(CommitError::RangeMismatch {
				from: range.from,
				to: range.to,
				expected,
				found,
			});
		}

		debug!(%kind, from = range.from, to = range.to, label = %candidate.label(), "committing suggestion");
		let node = InlineNode::new(kind, candidate.into_attrs());
		let tx = Transaction::new()
			.replace_with_node(range.from, range.to, node)
			.with_selection(Selection::point(range.from + 1));

		self.fetch.cancel();
		host.dispatch(tx)?;
		self.update(&*host);
		Ok(true)
	}

	fn commit_or_dismiss(&mut self, index: usize, host: &mut dyn EditorHost) {
		if let Err(err) = self.commit(index, host) {
			warn!(error = %err, "suggestion commit aborted");
			self.dismiss();
		}
	}
}
