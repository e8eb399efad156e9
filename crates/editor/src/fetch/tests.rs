use parking_lot::Mutex;
use serde_json::json;

use super::*;

/// Provider that records every call and answers with one candidate per
/// query character. `"fail"` returns an error and `"boom"` panics.
#[derive(Default)]
struct RecordingProvider {
	calls: Mutex<Vec<(TriggerKind, String)>>,
	latency: Duration,
}

impl RecordingProvider {
	fn slow(latency: Duration) -> Self {
		Self {
			latency,
			..Self::default()
		}
	}

	fn calls(&self) -> Vec<(TriggerKind, String)> {
		self.calls.lock().clone()
	}
}

#[async_trait]
impl SuggestionProvider for RecordingProvider {
	async fn suggest(&self, kind: TriggerKind, query: &str) -> anyhow::Result<Vec<Candidate>> {
		self.calls.lock().push((kind, query.to_string()));
		if self.latency > Duration::ZERO {
			sleep(self.latency).await;
		}
		match query {
			"fail" => anyhow::bail!("directory offline"),
			"boom" => panic!("provider exploded"),
			_ => Ok(query
				.chars()
				.map(|c| Candidate::try_from(json!({ "name": c.to_string() })).unwrap())
				.collect()),
		}
	}
}

fn controller(provider: &Arc<RecordingProvider>, delay_ms: u64) -> FetchController {
	FetchController::new(provider.clone(), Duration::from_millis(delay_ms), 10)
}

async fn elapse(ms: u64) {
	sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn rapid_schedules_coalesce_into_one_call() {
	let provider = Arc::new(RecordingProvider::default());
	let mut fetch = controller(&provider, 500);

	fetch.schedule(1, TriggerKind::Mention, "j");
	elapse(100).await;
	fetch.schedule(2, TriggerKind::Mention, "jo");
	elapse(100).await;
	fetch.schedule(3, TriggerKind::Mention, "joh");

	elapse(499).await;
	assert!(provider.calls().is_empty());
	assert!(fetch.try_next().is_none());

	elapse(2).await;
	assert_eq!(provider.calls(), vec![(TriggerKind::Mention, "joh".to_string())]);

	let result = fetch.try_next().unwrap();
	assert_eq!(result.version, 3);
	assert_eq!(result.query, "joh");
	assert_eq!(result.candidates.len(), 3);
	assert!(fetch.try_next().is_none());
	assert_eq!(fetch.generation(), 3);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cancel_prevents_provider_call() {
	let provider = Arc::new(RecordingProvider::default());
	let mut fetch = controller(&provider, 500);

	fetch.schedule(1, TriggerKind::Tag, "ru");
	assert!(fetch.is_pending());
	elapse(200).await;
	fetch.cancel();
	assert!(!fetch.is_pending());

	elapse(1_000).await;
	assert!(provider.calls().is_empty());
	assert!(fetch.try_next().is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn zero_delay_calls_immediately() {
	let provider = Arc::new(RecordingProvider::default());
	let mut fetch = controller(&provider, 0);

	fetch.schedule(7, TriggerKind::Tag, "ru");
	elapse(1).await;

	let result = fetch.try_next().unwrap();
	assert_eq!(result.version, 7);
	assert_eq!(result.kind, TriggerKind::Tag);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cancel_during_slow_call_drops_result() {
	let provider = Arc::new(RecordingProvider::slow(Duration::from_secs(2)));
	let mut fetch = controller(&provider, 100);

	fetch.schedule(1, TriggerKind::Mention, "an");
	elapse(500).await;
	assert_eq!(provider.calls().len(), 1);

	fetch.cancel();
	elapse(5_000).await;
	assert!(fetch.try_next().is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn superseded_slow_call_never_delivers() {
	let provider = Arc::new(RecordingProvider::slow(Duration::from_secs(1)));
	let mut fetch = controller(&provider, 100);

	fetch.schedule(1, TriggerKind::Mention, "an");
	elapse(500).await;
	fetch.schedule(2, TriggerKind::Mention, "ann");

	let result = fetch.next().await.unwrap();
	assert_eq!(result.version, 2);
	assert_eq!(provider.calls().len(), 2);
	assert!(fetch.try_next().is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn provider_error_delivers_nothing() {
	let provider = Arc::new(RecordingProvider::default());
	let mut fetch = controller(&provider, 10);

	fetch.schedule(1, TriggerKind::Mention, "fail");
	elapse(50).await;
	assert_eq!(provider.calls().len(), 1);
	assert!(fetch.try_next().is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn provider_panic_is_isolated() {
	let provider = Arc::new(RecordingProvider::default());
	let mut fetch = controller(&provider, 10);

	fetch.schedule(1, TriggerKind::Mention, "boom");
	elapse(50).await;
	assert!(fetch.try_next().is_none());

	fetch.schedule(2, TriggerKind::Mention, "ok");
	elapse(50).await;
	assert_eq!(fetch.try_next().map(|r| r.version), Some(2));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn results_are_truncated() {
	let provider = Arc::new(RecordingProvider::default());
	let mut fetch = FetchController::new(provider.clone(), Duration::from_millis(10), 2);

	fetch.schedule(1, TriggerKind::Tag, "abcdef");
	elapse(50).await;
	let result = fetch.try_next().unwrap();
	let labels: Vec<_> = result.candidates.iter().map(Candidate::label).collect();
	assert_eq!(labels, ["a", "b"]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn empty_provider_delivers_empty_list() {
	let mut fetch = FetchController::new(Arc::new(EmptyProvider), Duration::from_millis(10), 10);
	fetch.schedule(4, TriggerKind::Mention, "x");
	elapse(50).await;
	let result = fetch.try_next().unwrap();
	assert_eq!(result.version, 4);
	assert!(result.candidates.is_empty());
}

#[test]
fn schedule_outside_runtime_is_skipped() {
	let provider = Arc::new(RecordingProvider::default());
	let mut fetch = controller(&provider, 10);
	fetch.schedule(1, TriggerKind::Mention, "jo");
	assert!(!fetch.is_pending());
	assert_eq!(fetch.generation(), 1);
}
