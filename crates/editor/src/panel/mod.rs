//! Floating suggestion panel.
//!
//! The plugin never draws anything itself. It hands markup to a
//! [`Presenter`], asks a [`Positioner`] where the panel goes, and routes
//! pointer events back through [`Presenter::hit_test`].

use std::fmt::Write as _;

use suggest_primitives::{Position, Rect, TriggerKind};

use crate::state::Candidate;


/// Host-side panel that shows the candidate list.
pub trait Presenter {
	/// Replaces the panel content.
	fn render(&mut self, markup: &str, candidates: &[Candidate], kind: TriggerKind);
	/// Shows the panel with its top-left corner at `anchor`.
	fn show(&mut self, anchor: Position);
	fn hide(&mut self);
	/// Marks row `index` as the active one.
	fn highlight(&mut self, index: usize);
	/// Returns the row under `position`, if the panel is visible there.
	fn hit_test(&self, position: Position) -> Option<usize>;
	fn is_visible(&self) -> bool;
}

/// Computes where the panel goes for the on-screen rectangle of the
/// trigger span.
pub trait Positioner: Send + Sync {
	fn anchor(&self, target: Rect) -> Position;
}

/// Places the panel right below the start of the trigger span.
#[derive(Debug, Clone, Copy, Default)]
pub struct BottomLeft;

impl Positioner for BottomLeft {
	fn anchor(&self, target: Rect) -> Position {
		target.bottom_left()
	}
}

/// Produces panel markup for a candidate list.
pub trait SuggestionRenderer: Send + Sync {
	/// Renders `candidates`, marking row `active` with `active_class`.
	fn render(&self, candidates: &[Candidate], kind: TriggerKind, active: usize, active_class: &str) -> String;
}

impl<F> SuggestionRenderer for F
where
	F: Fn(&[Candidate], TriggerKind, usize, &str) -> String + Send + Sync,
{
	fn render(&self, candidates: &[Candidate], kind: TriggerKind, active: usize, active_class: &str) -> String {
		self(candidates, kind, active, active_class)
	}
}

/// Default renderer: a flat `div` list of escaped labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRenderer;

impl SuggestionRenderer for ListRenderer {
	fn render(&self, candidates: &[Candidate], _kind: TriggerKind, active: usize, active_class: &str) -> String {
		let mut out = String::from(r#"<div class="suggestion-item-list">"#);
		for (i, candidate) in candidates.iter().enumerate() {
			out.push_str(r#"<div class="suggestion-item"#);
			if i == active {
				out.push(' ');
				out.push_str(&escape_html(active_class));
			}
			let _ = write!(out, r#"">{}</div>"#, escape_html(&candidate.label()));
		}
		out.push_str("</div>");
		out
	}
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			c => out.push(c),
		}
	}
	out
}

/// Reference presenter laying candidates out one row per line.
///
/// Row `i` occupies the line `anchor.y + i`, as wide as the longest label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPanel {
	markup: String,
	rows: Vec<String>,
	kind: Option<TriggerKind>,
	anchor: Option<Position>,
	highlighted: usize,
}

impl ListPanel {
	pub fn new() -> Self {
		Self::default()
	}

	/// Markup from the last render.
	pub fn markup(&self) -> &str {
		&self.markup
	}

	/// Row labels from the last render.
	pub fn rows(&self) -> &[String] {
		&self.rows
	}

	pub fn kind(&self) -> Option<TriggerKind> {
		self.kind
	}

	/// Top-left corner while visible.
	pub fn anchor(&self) -> Option<Position> {
		self.anchor
	}

	pub fn highlighted(&self) -> usize {
		self.highlighted
	}

	/// Screen area covered by the rows while visible.
	pub fn bounds(&self) -> Option<Rect> {
		let anchor = self.anchor?;
		let width = self.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
		Some(Rect::new(
			anchor.x,
			anchor.y,
			u16::try_from(width).unwrap_or(u16::MAX),
			u16::try_from(self.rows.len()).unwrap_or(u16::MAX),
		))
	}
}

impl Presenter for ListPanel {
	fn render(&mut self, markup: &str, candidates: &[Candidate], kind: TriggerKind) {
		self.markup = markup.to_string();
		self.rows = candidates.iter().map(Candidate::label).collect();
		self.kind = Some(kind);
		self.highlighted = 0;
	}

	fn show(&mut self, anchor: Position) {
		self.anchor = Some(anchor);
	}

	fn hide(&mut self) {
		self.anchor = None;
	}

	fn highlight(&mut self, index: usize) {
		self.highlighted = index;
	}

	fn hit_test(&self, position: Position) -> Option<usize> {
		let bounds = self.bounds()?;
		bounds
			.contains(position)
			.then(|| usize::from(position.y - bounds.y))
	}

	fn is_visible(&self) -> bool {
		self.anchor.is_some()
	}
}
