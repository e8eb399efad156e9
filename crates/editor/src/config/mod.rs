//! Suggestion configuration.
//!
//! [`SuggestOptions`] is the serializable part, usually read from TOML.
//! [`SuggestConfig`] is built from it once, validated, and never changes
//! afterwards; it also carries the provider and renderer callbacks.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use suggest_matcher::{PatternError, TriggerMatcher};
use suggest_primitives::TriggerKind;
use thiserror::Error;

use crate::fetch::{EmptyProvider, SuggestionProvider};
use crate::panel::{ListRenderer, SuggestionRenderer};


/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error(transparent)]
	Pattern(#[from] PatternError),
	#[error("max_suggestions must be at least 1")]
	ZeroMaxSuggestions,
	#[error("invalid suggestion options: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Serializable suggestion options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestOptions {
	/// Character sequence starting a mention.
	#[serde(default = "default_mention_trigger")]
	pub mention_trigger: String,
	/// Character sequence starting a tag.
	#[serde(default = "default_hashtag_trigger")]
	pub hashtag_trigger: String,
	/// Whether a mention query may contain one inner space.
	#[serde(default = "default_allow_space")]
	pub allow_space: bool,
	/// Class added to the highlighted row.
	#[serde(default = "default_active_class")]
	pub active_class: String,
	/// Class of the inline decoration over the active trigger.
	#[serde(default = "default_suggestion_text_class")]
	pub suggestion_text_class: String,
	/// Provider results are cut to this many candidates.
	#[serde(default = "default_max_suggestions")]
	pub max_suggestions: usize,
	/// Trailing debounce before the provider is called.
	#[serde(default = "default_delay_ms")]
	pub delay_ms: u64,
}

fn default_mention_trigger() -> String {
	"@".into()
}

fn default_hashtag_trigger() -> String {
	"#".into()
}

fn default_allow_space() -> bool {
	true
}

fn default_active_class() -> String {
	"suggestion-item-active".into()
}

fn default_suggestion_text_class() -> String {
	"prosemirror-suggestion".into()
}

fn default_max_suggestions() -> usize {
	10
}

fn default_delay_ms() -> u64 {
	500
}

impl Default for SuggestOptions {
	fn default() -> Self {
		Self {
			mention_trigger: default_mention_trigger(),
			hashtag_trigger: default_hashtag_trigger(),
			allow_space: default_allow_space(),
			active_class: default_active_class(),
			suggestion_text_class: default_suggestion_text_class(),
			max_suggestions: default_max_suggestions(),
			delay_ms: default_delay_ms(),
		}
	}
}

impl SuggestOptions {
	/// Parses options from TOML; missing keys take their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	/// Reads and parses a TOML options file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&input)
	}
}

/// Validated, immutable configuration.
#[derive(Clone)]
pub struct SuggestConfig {
	options: SuggestOptions,
	matcher: TriggerMatcher,
	provider: Arc<dyn SuggestionProvider>,
	renderer: Arc<dyn SuggestionRenderer>,
}

impl SuggestConfig {
	/// Validates `options` and compiles the trigger patterns.
	///
	/// The provider defaults to [`EmptyProvider`] and the renderer to
	/// [`ListRenderer`].
	pub fn new(options: SuggestOptions) -> Result<Self, ConfigError> {
		if options.max_suggestions == 0 {
			return Err(ConfigError::ZeroMaxSuggestions);
		}
		let matcher = TriggerMatcher::new(&options.mention_trigger, &options.hashtag_trigger, options.allow_space)?;
		Ok(Self {
			options,
			matcher,
			provider: Arc::new(EmptyProvider),
			renderer: Arc::new(ListRenderer),
		})
	}

	/// Replaces the suggestion provider.
	pub fn with_provider(mut self, provider: impl SuggestionProvider + 'static) -> Self {
		self.provider = Arc::new(provider);
		self
	}

	/// Replaces the suggestion provider with a shared one.
	pub fn with_shared_provider(mut self, provider: Arc<dyn SuggestionProvider>) -> Self {
		self.provider = provider;
		self
	}

	/// Replaces the candidate markup renderer.
	pub fn with_renderer(mut self, renderer: impl SuggestionRenderer + 'static) -> Self {
		self.renderer = Arc::new(renderer);
		self
	}

	pub fn options(&self) -> &SuggestOptions {
		&self.options
	}

	pub fn matcher(&self) -> &TriggerMatcher {
		&self.matcher
	}

	pub fn provider(&self) -> &Arc<dyn SuggestionProvider> {
		&self.provider
	}

	pub fn renderer(&self) -> &dyn SuggestionRenderer {
		self.renderer.as_ref()
	}

	/// The configured trigger for `kind`.
	pub fn trigger(&self, kind: TriggerKind) -> &str {
		match kind {
			TriggerKind::Mention => &self.options.mention_trigger,
			TriggerKind::Tag => &self.options.hashtag_trigger,
		}
	}

	pub fn delay(&self) -> Duration {
		Duration::from_millis(self.options.delay_ms)
	}
}

impl fmt::Debug for SuggestConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SuggestConfig")
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}
