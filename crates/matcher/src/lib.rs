//! Trigger detection for inline mentions and tags.
//!
//! Given the text of a paragraph up to the caret, [`TriggerMatcher::find`]
//! decides whether a mention (`@ann`) or tag (`#rust`) trigger touches the
//! caret, and reports its kind, absolute range and query text.
//!
//! The scan is a plain regex re-run over the paragraph prefix on every call.
//! Paragraphs are small, so no incremental state is kept.

mod pattern;
mod trigger;

pub use pattern::{PatternError, QUERY_CLASS};
pub use trigger::{MatchDescriptor, TriggerMatcher};
