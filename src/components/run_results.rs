use leptos::prelude::*;

use crate::execution::{ExecutionReport, SubmissionState, format_cell};

/// Outcome of the last strategy run: an error line or a metrics table.
#[component]
pub fn RunResults(#[prop(into)] state: Signal<SubmissionState<ExecutionReport>>) -> impl IntoView {
	move || match state.get() {
		SubmissionState::Idle | SubmissionState::Submitting => ().into_any(),
		SubmissionState::Failed(message) => view! {
			<section class="results">
				<h3>"Strategy Results"</h3>
				<div class="error">{message}</div>
			</section>
		}
		.into_any(),
		SubmissionState::Succeeded(report) => {
			let columns = report.columns();
			let header = columns
				.iter()
				.map(|c| view! { <th>{c.clone()}</th> })
				.collect_view();
			let rows = report
				.results
				.iter()
				.map(|row| {
					let cells = columns
						.iter()
						.map(|c| {
							let text = row.get(c).map(format_cell).unwrap_or_default();
							view! { <td>{text}</td> }
						})
						.collect_view();
					view! { <tr>{cells}</tr> }
				})
				.collect_view();
			view! {
				<section class="results">
					<h3>"Strategy Results"</h3>
					<table>
						<thead>
							<tr>{header}</tr>
						</thead>
						<tbody>{rows}</tbody>
					</table>
				</section>
			}
			.into_any()
		}
	}
}
