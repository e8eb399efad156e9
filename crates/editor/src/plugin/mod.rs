//! Host-facing suggestion plugin.
//!
//! # Lifecycle
//!
//! A host drives the plugin at four points:
//!
//! 1. After every transaction, [`SuggestPlugin::update`] rebuilds the state
//!    and runs the after-update hook, which schedules a fetch while a
//!    trigger is active and hides the panel otherwise.
//! 2. Keys and pointer events go to [`SuggestPlugin::handle_key`] and
//!    [`SuggestPlugin::handle_mouse`] before the host's own handling; a
//!    `true` return means the event was consumed.
//! 3. On each event loop turn, [`SuggestPlugin::poll_fetches`] applies
//!    delivered results (or [`SuggestPlugin::next_fetch`] awaits one).
//! 4. When drawing, [`SuggestPlugin::decorations`] marks the trigger span.
//!
//! # Stale results
//!
//! Each rebuild produces a new state version. A fetch result carries the
//! version it was scheduled for and is applied only while that version is
//! still current. Editing inside the same query therefore discards the
//! in-flight answer and waits for the next one.

use suggest_primitives::{Document, EditError, Rect, Selection, Span, Transaction};
use tracing::debug;

use crate::config::SuggestConfig;
use crate::decoration::{self, Decoration};
use crate::fetch::{FetchController, FetchResult};
use crate::panel::{BottomLeft, ListPanel, Positioner, Presenter};
use crate::state::SuggestionState;
use crate::transition::rebuild;


/// Editing surface the plugin reads from and commits through.
pub trait EditorHost {
	fn document(&self) -> &Document;
	fn selection(&self) -> &Selection;
	/// Applies `tx` to the document and selection.
	///
	/// The plugin rebuilds its own state after dispatching, so hosts must
	/// not feed plugin-originated transactions back into
	/// [`SuggestPlugin::update`].
	fn dispatch(&mut self, tx: Transaction) -> Result<(), EditError>;
	/// Returns keyboard focus to the editing surface.
	fn focus(&mut self);
	/// On-screen rectangle covering `span`, if it is visible.
	fn span_rect(&self, span: Span) -> Option<Rect>;
}

/// Mention and tag suggestions for one editor.
pub struct SuggestPlugin<P = ListPanel> {
	pub(crate) config: SuggestConfig,
	pub(crate) state: SuggestionState,
	pub(crate) fetch: FetchController,
	pub(crate) presenter: P,
	positioner: Box<dyn Positioner>,
}

impl<P: Presenter> SuggestPlugin<P> {
	/// Creates the plugin in its initial, inactive state.
	pub fn new(config: SuggestConfig, presenter: P) -> Self {
		let fetch = FetchController::new(
			config.provider().clone(),
			config.delay(),
			config.options().max_suggestions,
		);
		Self {
			config,
			state: SuggestionState::init(),
			fetch,
			presenter,
			positioner: Box::new(BottomLeft),
		}
	}

	/// Replaces the panel positioning strategy.
	pub fn with_positioner(mut self, positioner: impl Positioner + 'static) -> Self {
		self.positioner = Box::new(positioner);
		self
	}

	pub fn config(&self) -> &SuggestConfig {
		&self.config
	}

	pub fn state(&self) -> &SuggestionState {
		&self.state
	}

	pub fn presenter(&self) -> &P {
		&self.presenter
	}

	pub fn fetch(&self) -> &FetchController {
		&self.fetch
	}

	/// State reducer: rebuilds the state for a post-edit document.
	pub fn apply(&mut self, doc: &Document, selection: &Selection) {
		self.state = rebuild(doc, selection, &self.state, self.config.matcher());
	}

	/// After-update hook: schedules a fetch for an active trigger, or cancels
	/// any pending fetch and hides the panel.
	pub fn view_update(&mut self) {
		match self.state.kind() {
			Some(kind) if self.state.is_active() => {
				self.fetch.schedule(self.state.version(), kind, self.state.text());
			}
			_ => {
				self.fetch.cancel();
				self.presenter.hide();
			}
		}
	}

	/// Rebuilds the state from `host` and runs the after-update hook.
	pub fn update(&mut self, host: &dyn EditorHost) {
		self.apply(host.document(), host.selection());
		self.view_update();
	}

	/// Inline decorations for the current state.
	pub fn decorations(&self) -> Vec<Decoration> {
		decoration::for_state(&self.state, &self.config.options().suggestion_text_class)
	}

	/// Applies every result delivered so far. Returns how many were current.
	pub fn poll_fetches(&mut self, host: &dyn EditorHost) -> usize {
		let mut applied = 0;
		while let Some(result) = self.fetch.try_next() {
			if self.deliver(result, host) {
				applied += 1;
			}
		}
		applied
	}

	/// Waits for the next delivered result and applies it if current.
	pub async fn next_fetch(&mut self, host: &dyn EditorHost) -> bool {
		match self.fetch.next().await {
			Some(result) => self.deliver(result, host),
			None => false,
		}
	}

	fn deliver(&mut self, result: FetchResult, host: &dyn EditorHost) -> bool {
		if !self.state.is_active() || result.version != self.state.version() {
			debug!(
				version = result.version,
				current = self.state.version(),
				query = %result.query,
				"discarding stale suggestions"
			);
			return false;
		}

		debug!(version = result.version, count = result.candidates.len(), "suggestions delivered");
		self.state.set_suggestions(result.candidates);
		self.render_rows();

		match host.span_rect(self.state.range()) {
			Some(target) => self.presenter.show(self.positioner.anchor(target)),
			None => debug!(range = ?self.state.range(), "trigger span is off screen"),
		}
		true
	}

	/// Re-renders the list with the current highlight.
	pub(crate) fn render_rows(&mut self) {
		let Some(kind) = self.state.kind() else {
			return;
		};
		let markup = self.config.renderer().render(
			self.state.suggestions(),
			kind,
			self.state.index(),
			&self.config.options().active_class,
		);
		self.presenter.render(&markup, self.state.suggestions(), kind);
		self.presenter.highlight(self.state.index());
	}

	/// Cancels the pending fetch, hides the panel and forces the inactive
	/// state until the next edit.
	pub fn dismiss(&mut self) {
		self.fetch.cancel();
		self.presenter.hide();
		self.state = self.state.reset();
	}
}
