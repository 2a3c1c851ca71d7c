//! Application settings: built-in defaults, then build-time environment, then
//! an optional JSON document embedded in the host page.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::execution::ExecutionParams;

/// Id of the `<script type="application/json">` element read at startup.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Failure to apply a configuration layer.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The embedded document is not valid JSON for [`AppConfig`].
	#[error("invalid configuration document: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Settings the app runs with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Base URL of the execution service.
	pub api_base_url: String,
	/// Symbols a run is submitted for.
	pub default_symbols: Vec<String>,
	/// Run parameters forwarded with every strategy request.
	pub execution: ExecutionParams,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: "http://localhost:8000".to_string(),
			default_symbols: vec!["BTC-USDT".to_string()],
			execution: ExecutionParams::default(),
		}
	}
}

/// Comma-separated list with blanks dropped.
fn split_symbols(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}

impl AppConfig {
	/// Applies build-time overrides (`STRATEGY_API_URL`, `STRATEGY_SYMBOLS`).
	pub fn with_env(self, api_url: Option<&str>, symbols: Option<&str>) -> Self {
		let mut config = self;
		if let Some(url) = api_url.filter(|u| !u.is_empty()) {
			config.api_base_url = url.to_string();
		}
		if let Some(symbols) = symbols.map(split_symbols).filter(|s| !s.is_empty()) {
			config.default_symbols = symbols;
		}
		config
	}

	/// Overlays a JSON document. Fields it omits keep their current value
	/// only at the top level; nested objects that are present are read whole
	/// with their own defaults.
	pub fn with_json(self, doc: &str) -> Result<Self, ConfigError> {
		let mut merged = serde_json::to_value(&self)?;
		let overlay: serde_json::Value = serde_json::from_str(doc)?;
		if let (Some(base), serde_json::Value::Object(top)) = (merged.as_object_mut(), overlay) {
			for (key, value) in top {
				base.insert(key, value);
			}
		}
		Ok(serde_json::from_value(merged)?)
	}

	/// Full layered load for the browser.
	pub fn load() -> Self {
		let config = Self::default()
			.with_env(option_env!("STRATEGY_API_URL"), option_env!("STRATEGY_SYMBOLS"));
		let config = match embedded_document() {
			Some(doc) => match config.clone().with_json(&doc) {
				Ok(config) => config,
				Err(e) => {
					warn!("Ignoring #{CONFIG_ELEMENT_ID}: {e}");
					config
				}
			},
			None => config,
		};
		info!("Execution service at {}", config.api_base_url);
		config
	}
}

fn embedded_document() -> Option<String> {
	web_sys::window()?
		.document()?
		.get_element_by_id(CONFIG_ELEMENT_ID)?
		.text_content()
		.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_local_service() {
		let config = AppConfig::default();
		assert_eq!(config.api_base_url, "http://localhost:8000");
		assert_eq!(config.default_symbols, ["BTC-USDT"]);
		assert_eq!(config.execution.exchange, "okx");
		assert_eq!(config.execution.portfolio_allocation, 1.0);
	}

	#[test]
	fn env_overrides_skip_blank_values() {
		let config = AppConfig::default()
			.with_env(Some("https://api.example"), Some(" ETH-USDT, ,SOL-USDT "));
		assert_eq!(config.api_base_url, "https://api.example");
		assert_eq!(config.default_symbols, ["ETH-USDT", "SOL-USDT"]);

		let config = AppConfig::default().with_env(Some(""), Some(" , "));
		assert_eq!(config, AppConfig::default());
	}

	#[test]
	fn json_overlay_replaces_only_given_fields() {
		let base = AppConfig::default().with_env(Some("https://api.example"), None);
		let config = base
			.with_json(r#"{ "default_symbols": ["ADA-USDT"], "execution": { "fees": 0.002 } }"#)
			.unwrap();
		assert_eq!(config.api_base_url, "https://api.example");
		assert_eq!(config.default_symbols, ["ADA-USDT"]);
		assert_eq!(config.execution.fees, 0.002);
		assert_eq!(config.execution.slippage, 0.001);
	}

	#[test]
	fn invalid_json_is_an_error() {
		assert!(AppConfig::default().with_json("{ nope").is_err());
		assert!(
			AppConfig::default()
				.with_json(r#"{ "default_symbols": "BTC-USDT" }"#)
				.is_err()
		);
	}
}
