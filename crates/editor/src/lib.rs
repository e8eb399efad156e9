#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Inline mention and tag suggestions.
//!
//! This crate turns trigger matches into a suggestion workflow: it tracks the
//! active trigger across edits, fetches candidates with a trailing debounce,
//! handles list navigation and commits the chosen candidate as an atomic
//! inline node.
//!
//! # Main Types
//!
//! - [`SuggestPlugin`] - state reducer, key/mouse handling and fetch driving
//! - [`SuggestionState`] - per-edit snapshot of the active trigger
//! - [`FetchController`] - debounced, cancelable provider calls
//! - [`Editor`] - a reference host wiring a document to the plugin
//!
//! # Flow
//!
//! ```text
//! edit ─▶ rebuild ─▶ after-update ─▶ schedule fetch ─▶ provider
//!                                                        │
//! commit ◀─ key/mouse ◀─ panel ◀─ apply if version matches ◀┘
//! ```

/// Options, validation and the immutable runtime configuration.
pub mod config;
/// Inline decorations produced for the active trigger.
pub mod decoration;
/// Reference editor host.
pub mod editor;
/// Debounced suggestion fetching.
pub mod fetch;
/// Key and mouse handling for the open suggestion list.
mod interaction;
/// Panel presenter contract, positioning and the default renderer.
pub mod panel;
/// The host-facing plugin.
pub mod plugin;
/// Suggestion state snapshots and candidates.
pub mod state;
/// Per-edit state transition.
pub mod transition;

pub use config::{ConfigError, SuggestConfig, SuggestOptions};
pub use decoration::Decoration;
pub use editor::{Editor, EditorCore};
pub use fetch::{EmptyProvider, FetchController, FetchResult, SuggestionProvider};
pub use interaction::CommitError;
pub use panel::{BottomLeft, ListPanel, ListRenderer, Positioner, Presenter, SuggestionRenderer};
pub use plugin::{EditorHost, SuggestPlugin};
pub use state::{Candidate, SuggestionState};
pub use transition::rebuild;
