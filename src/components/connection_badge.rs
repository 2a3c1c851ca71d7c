use leptos::prelude::*;

/// Read-only view of the execution service's reachability.
#[component]
pub fn ConnectionBadge(#[prop(into)] connected: Signal<bool>) -> impl IntoView {
	view! {
		<div class="connection" class:online=move || connected.get()>
			<span class="dot" />
			<span>{move || if connected.get() { "Connected" } else { "Disconnected" }}</span>
		</div>
	}
}
