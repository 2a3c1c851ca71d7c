use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;
use serde_json::Value;

use crate::components::run_results::RunResults;
use crate::components::strategy_graph::{
	ConfigPanel, DragController, GraphHandle, GraphStore, Palette, StrategyCanvas,
};
use crate::config::AppConfig;
use crate::execution::{
	ExecutionClient, HttpExecutionClient, Submission, SubmissionState, build_request, submit,
};

const FALLBACK_SYMBOL: &str = "BTC-USDT";

fn upload_status(state: &SubmissionState<Value>) -> Option<String> {
	match state {
		SubmissionState::Idle | SubmissionState::Submitting => None,
		SubmissionState::Succeeded(_) => Some("OHLCV data uploaded successfully!".to_string()),
		SubmissionState::Failed(message) => Some(format!("Failed to upload OHLCV data: {message}")),
	}
}

/// Strategy builder: palette, canvas, optional config panel and run controls.
#[component]
pub fn Home(#[prop(into)] symbols: Signal<Vec<String>>) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let client = HttpExecutionClient::new(config.api_base_url);
	let params = config.execution;

	let graph = GraphHandle::new();
	let drag = RwSignal::new(DragController::new());
	let show_config = RwSignal::new(false);
	let run = RwSignal::new(Submission::new());
	let upload = RwSignal::new(Submission::<Value>::new());

	let run_strategy = {
		let client = client.clone();
		move |_| {
			if run.with_untracked(Submission::is_busy) {
				return;
			}
			let request = graph
				.with_untracked(|s| build_request(&symbols.get_untracked(), s.nodes(), &params));
			info!("Running strategy with indicators {:?}", request.indicators);
			let client = client.clone();
			spawn_local(async move {
				submit(&run, client.run_strategy(&request)).await;
			});
		}
	};

	let upload_ohlcv = move |_| {
		if upload.with_untracked(Submission::is_busy) {
			return;
		}
		let symbol = symbols
			.with_untracked(|s| s.first().cloned())
			.unwrap_or_else(|| FALLBACK_SYMBOL.to_string());
		let client = client.clone();
		spawn_local(async move {
			let request = async {
				let outcome = client.fetch_ohlcv(&symbol).await;
				if let Ok(body) = &outcome {
					info!("Upload result for {symbol}: {body}");
				}
				outcome
			};
			submit(&upload, request).await;
		});
	};

	let running = move || run.with(Submission::is_busy);
	let uploading = move || upload.with(Submission::is_busy);

	view! {
		<div class="builder">
			<aside class="components-panel">
				<div class="panel-header">
					<h2>"Strategy Components"</h2>
					<button class="icon-button" on:click=move |_| show_config.update(|v| *v = !*v)>
						"⚙"
					</button>
				</div>
				<Palette graph=graph drag=drag />
			</aside>

			<div class="workspace">
				<div class="toolbar">
					<span class="muted">"Selected: " {move || symbols.get().join(", ")}</span>
					<div class="toolbar-actions">
						<span class="muted">
							{move || upload.with(|u| upload_status(u.state()))}
						</span>
						<button class="upload" on:click=upload_ohlcv disabled=uploading>
							{move || if uploading() { "Uploading..." } else { "Upload OHLCV" }}
						</button>
						<button
							class="run"
							on:click=run_strategy
							disabled=move || running() || graph.with(GraphStore::is_empty)
						>
							{move || if running() { "Running..." } else { "Run Strategy" }}
						</button>
					</div>
				</div>

				<div class="canvas-area">
					<StrategyCanvas graph=graph drag=drag />
				</div>

				<RunResults state=Signal::derive(move || run.with(|r| r.state().clone())) />
			</div>

			<Show when=move || show_config.get()>
				<ConfigPanel graph=graph on_close=move |_| show_config.set(false) />
			</Show>
		</div>
	}
}
