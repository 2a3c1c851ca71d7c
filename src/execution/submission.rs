use std::future::Future;

use leptos::prelude::*;
use log::{debug, warn};

use super::error::Result;
use super::report::ExecutionReport;

/// `Idle -> Submitting -> (Succeeded | Failed)`; the next `begin` moves back
/// to `Submitting`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SubmissionState<T> {
	#[default]
	Idle,
	Submitting,
	Succeeded(T),
	Failed(String),
}

/// Busy flag plus last outcome for one kind of request. Only one request per
/// tracker is admitted at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission<T = ExecutionReport> {
	state: SubmissionState<T>,
}

impl<T> Default for Submission<T> {
	fn default() -> Self {
		Self {
			state: SubmissionState::Idle,
		}
	}
}

impl<T> Submission<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> &SubmissionState<T> {
		&self.state
	}

	pub fn is_busy(&self) -> bool {
		matches!(self.state, SubmissionState::Submitting)
	}

	/// Returns `false` without changing state while a request is in flight.
	pub fn begin(&mut self) -> bool {
		if self.is_busy() {
			warn!("Submission ignored: another request is still in flight");
			return false;
		}
		self.state = SubmissionState::Submitting;
		true
	}

	/// Records the outcome; always clears the busy flag.
	pub fn finish(&mut self, outcome: Result<T>) {
		self.state = match outcome {
			Ok(value) => SubmissionState::Succeeded(value),
			Err(e) => {
				warn!("Request failed: {e}");
				SubmissionState::Failed(e.to_string())
			}
		};
	}
}

/// Where a [`Submission`] lives. Access yields `None` once the owner is gone,
/// e.g. a page signal disposed while a response was pending.
pub trait SubmissionSlot<T> {
	fn with_submission<R>(&self, f: impl FnOnce(&mut Submission<T>) -> R) -> Option<R>;
}

impl<T: Send + Sync + 'static> SubmissionSlot<T> for RwSignal<Submission<T>> {
	fn with_submission<R>(&self, f: impl FnOnce(&mut Submission<T>) -> R) -> Option<R> {
		self.try_update(f)
	}
}

/// Admits one request on `slot`, awaits it and records the outcome. `request`
/// is only polled once admitted. Returns `false` if it was not admitted.
pub async fn submit<T, S>(slot: &S, request: impl Future<Output = Result<T>>) -> bool
where
	S: SubmissionSlot<T>,
{
	if !slot.with_submission(Submission::begin).unwrap_or(false) {
		return false;
	}
	let outcome = request.await;
	if slot.with_submission(|s| s.finish(outcome)).is_none() {
		debug!("Submission owner dropped before the response arrived");
	}
	true
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};

	use futures::executor::block_on;
	use serde_json::{Value, json};

	use super::*;
	use crate::execution::client::ExecutionClient;
	use crate::execution::error::ExecutionError;
	use crate::execution::request::{ExecutionParams, ExecutionRequest, build_request};

	impl<T> SubmissionSlot<T> for RefCell<Submission<T>> {
		fn with_submission<R>(&self, f: impl FnOnce(&mut Submission<T>) -> R) -> Option<R> {
			Some(f(&mut self.borrow_mut()))
		}
	}

	/// Answers every call with a fixed outcome.
	struct FakeClient {
		outcome: Result<ExecutionReport>,
		upload: Result<Value>,
		calls: Cell<usize>,
	}

	impl FakeClient {
		fn answering(outcome: Result<ExecutionReport>) -> Self {
			Self {
				outcome,
				upload: Ok(json!({})),
				calls: Cell::new(0),
			}
		}
	}

	impl ExecutionClient for FakeClient {
		async fn run_strategy(&self, _request: &ExecutionRequest) -> Result<ExecutionReport> {
			self.calls.set(self.calls.get() + 1);
			self.outcome.clone()
		}

		async fn fetch_ohlcv(&self, _symbol: &str) -> Result<Value> {
			self.calls.set(self.calls.get() + 1);
			self.upload.clone()
		}

		async fn list_symbols(&self) -> Result<Vec<String>> {
			Ok(Vec::new())
		}
	}

	fn request() -> ExecutionRequest {
		build_request(&["BTC-USDT".into()], &[], &ExecutionParams::default())
	}

	#[test]
	fn transport_failure_clears_busy_and_allows_retry() {
		let refused = ExecutionError::Transport("connection refused".into());
		let client = FakeClient::answering(Err(refused));
		let run = RwSignal::new(Submission::new());
		let request = request();

		assert!(block_on(submit(&run, client.run_strategy(&request))));
		assert!(!run.with_untracked(Submission::is_busy));
		run.with_untracked(|s| match s.state() {
			SubmissionState::Failed(msg) => assert!(msg.contains("connection refused")),
			other => panic!("unexpected state {other:?}"),
		});

		assert!(block_on(submit(&run, client.run_strategy(&request))));
		assert_eq!(client.calls.get(), 2);
	}

	#[test]
	fn success_stores_report() {
		let mut row = serde_json::Map::new();
		row.insert("symbol".into(), json!("BTC-USDT"));
		let report = ExecutionReport {
			session_id: None,
			results: vec![row],
		};
		let client = FakeClient::answering(Ok(report.clone()));
		let run = RefCell::new(Submission::new());

		block_on(submit(&run, client.run_strategy(&request())));
		assert_eq!(run.borrow().state(), &SubmissionState::Succeeded(report));
		assert!(!run.borrow().is_busy());
	}

	#[test]
	fn failed_upload_clears_busy() {
		let mut client = FakeClient::answering(Ok(ExecutionReport::default()));
		client.upload = Err(ExecutionError::Status { status: 502 });
		let upload = RefCell::new(Submission::<Value>::new());

		assert!(block_on(submit(&upload, client.fetch_ohlcv("BTC-USDT"))));
		assert!(!upload.borrow().is_busy());
		assert!(matches!(upload.borrow().state(), SubmissionState::Failed(_)));
	}

	#[test]
	fn second_begin_is_refused_while_in_flight() {
		let mut submission: Submission = Submission::new();
		assert!(submission.begin());
		assert!(submission.is_busy());
		assert!(!submission.begin());

		submission.finish(Err(ExecutionError::Status { status: 500 }));
		assert!(!submission.is_busy());
		assert!(submission.begin());
	}

	#[test]
	fn in_flight_submission_is_not_sent_again() {
		let client = FakeClient::answering(Ok(ExecutionReport::default()));
		let run = RefCell::new(Submission::new());
		run.borrow_mut().begin();

		assert!(!block_on(submit(&run, client.run_strategy(&request()))));
		assert_eq!(client.calls.get(), 0);
		assert!(run.borrow().is_busy());
	}

	#[test]
	fn disposed_owner_drops_outcome() {
		let client = FakeClient::answering(Ok(ExecutionReport::default()));
		let run = RwSignal::new(Submission::new());
		run.dispose();

		assert!(!block_on(submit(&run, client.run_strategy(&request()))));
		assert_eq!(client.calls.get(), 0);
	}
}
