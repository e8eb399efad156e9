//! Debounced suggestion fetching.
//!
//! Every active state update schedules exactly one provider call after a
//! trailing delay. Scheduling again, or cancelling, cancels the previous
//! schedule's token, so only the latest timer can reach the provider.
//!
//! Results are not applied here. They travel back over a channel tagged with
//! the state version captured at schedule time, and the plugin drops any
//! result whose version is no longer current.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use suggest_primitives::TriggerKind;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::state::Candidate;

#[cfg(test)]
mod tests;

/// Source of candidates for a trigger query.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
	/// Returns candidates for `query` typed after a trigger of `kind`.
	async fn suggest(&self, kind: TriggerKind, query: &str) -> anyhow::Result<Vec<Candidate>>;
}

/// Provider that never suggests anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyProvider;

#[async_trait]
impl SuggestionProvider for EmptyProvider {
	async fn suggest(&self, _kind: TriggerKind, _query: &str) -> anyhow::Result<Vec<Candidate>> {
		Ok(Vec::new())
	}
}

/// Candidates delivered for one scheduled fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
	/// State version the fetch was scheduled for.
	pub version: u64,
	pub kind: TriggerKind,
	pub query: String,
	pub candidates: Vec<Candidate>,
}

/// Controller for debounced, cancelable provider calls.
pub struct FetchController {
	generation: u64,
	in_flight: Option<InFlightFetch>,
	provider: Arc<dyn SuggestionProvider>,
	delay: Duration,
	max_suggestions: usize,
	tx: mpsc::UnboundedSender<FetchResult>,
	rx: mpsc::UnboundedReceiver<FetchResult>,
}

struct InFlightFetch {
	cancel: CancellationToken,
}

impl FetchController {
	/// Creates a controller calling `provider` after `delay` of quiet.
	pub fn new(provider: Arc<dyn SuggestionProvider>, delay: Duration, max_suggestions: usize) -> Self {
		let (tx, rx) = mpsc::unbounded_channel();
		Self {
			generation: 0,
			in_flight: None,
			provider,
			delay,
			max_suggestions,
			tx,
			rx,
		}
	}

	/// Number of fetches scheduled so far.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true if the latest schedule has not been cancelled.
	pub fn is_pending(&self) -> bool {
		self.in_flight.is_some()
	}

	/// Cancels the pending schedule, if any.
	pub fn cancel(&mut self) {
		if let Some(in_flight) = self.in_flight.take() {
			trace!(generation = self.generation, "cancelling suggestion fetch");
			in_flight.cancel.cancel();
		}
	}

	/// Schedules a provider call for `query`, replacing any earlier schedule.
	///
	/// Must be called from within a tokio runtime; outside one the fetch is
	/// skipped with a warning.
	pub fn schedule(&mut self, version: u64, kind: TriggerKind, query: &str) {
		self.cancel();
		self.generation = self.generation.wrapping_add(1);

		let Ok(runtime) = Handle::try_current() else {
			warn!(version, "no async runtime, suggestion fetch skipped");
			return;
		};

		let cancel = CancellationToken::new();
		self.in_flight = Some(InFlightFetch { cancel: cancel.clone() });

		debug!(
			generation = self.generation,
			version,
			%kind,
			query,
			delay_ms = self.delay.as_millis() as u64,
			"scheduling suggestion fetch"
		);

		let provider = Arc::clone(&self.provider);
		let delay = self.delay;
		let max = self.max_suggestions;
		let tx = self.tx.clone();
		let query = query.to_string();

		runtime.spawn(async move {
			if delay > Duration::ZERO {
				tokio::select! {
					_ = cancel.cancelled() => return,
					_ = sleep(delay) => {}
				}
			} else if cancel.is_cancelled() {
				return;
			}

			// The provider runs in its own task so a panic cannot take the
			// controller's task down with it.
			let call = {
				let query = query.clone();
				tokio::spawn(async move { provider.suggest(kind, &query).await })
			};
			let abort = call.abort_handle();
			let outcome = tokio::select! {
				_ = cancel.cancelled() => {
					abort.abort();
					return;
				}
				outcome = call => outcome,
			};

			let mut candidates = match outcome {
				Ok(Ok(candidates)) => candidates,
				Ok(Err(err)) => {
					warn!(version, %kind, query = %query, error = %err, "suggestion provider failed");
					return;
				}
				Err(err) if err.is_panic() => {
					warn!(version, %kind, query = %query, "suggestion provider panicked");
					return;
				}
				Err(err) => {
					debug!(version, error = %err, "suggestion provider task ended early");
					return;
				}
			};

			if cancel.is_cancelled() {
				return;
			}

			candidates.truncate(max);
			let _ = tx.send(FetchResult {
				version,
				kind,
				query,
				candidates,
			});
		});
	}

	/// Returns the next delivered result without waiting.
	pub fn try_next(&mut self) -> Option<FetchResult> {
		self.rx.try_recv().ok()
	}

	/// Waits for the next delivered result.
	pub async fn next(&mut self) -> Option<FetchResult> {
		self.rx.recv().await
	}
}

impl Drop for FetchController {
	fn drop(&mut self) {
		self.cancel();
	}
}
