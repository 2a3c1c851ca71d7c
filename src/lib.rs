//! Leptos client-side app for assembling trading strategies on a canvas and
//! submitting them to a backtesting service.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info, warn};

// Modules
mod components;
pub mod config;
mod execution;
mod pages;

// Top-Level pages
use crate::components::connection_badge::ConnectionBadge;
use crate::execution::{ExecutionClient, HttpExecutionClient};
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

pub use crate::config::AppConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Loads configuration, probes the execution service and routes to the
/// builder.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = AppConfig::load();
	let symbols = RwSignal::new(config.default_symbols.clone());
	let connected = RwSignal::new(false);

	let client = HttpExecutionClient::new(config.api_base_url.clone());
	spawn_local(async move {
		match client.list_symbols().await {
			Ok(available) => {
				info!("Execution service lists {} symbols", available.len());
				connected.set(true);
			}
			Err(e) => warn!("Execution service unavailable: {e}"),
		}
	});
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Strategy Canvas" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<header class="app-header">
				<span class="brand">"Strategy Canvas"</span>
				<ConnectionBadge connected=connected />
			</header>
			<main class="app-main">
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=move || view! { <Home symbols=symbols /> } />
				</Routes>
			</main>
		</Router>
	}
}
