use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::{ExecutionError, Result};

/// One per-symbol metrics row, keys in the order the service sent them.
pub type MetricRecord = Map<String, Value>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecutionReport {
	pub session_id: Option<String>,
	pub results: Vec<MetricRecord>,
}

impl ExecutionReport {
	/// Table columns: the keys of the first record.
	pub fn columns(&self) -> Vec<String> {
		self.results
			.first()
			.map(|r| r.keys().cloned().collect())
			.unwrap_or_default()
	}
}

#[derive(Deserialize)]
struct RunResponse {
	#[serde(default)]
	session_id: Option<String>,
	#[serde(default)]
	results: Option<Vec<MetricRecord>>,
	#[serde(default)]
	error: Option<String>,
}

/// Parses a `/run_strategy` body: `{ results: [...] }` or `{ error: "..." }`.
pub fn parse_report(body: &str) -> Result<ExecutionReport> {
	let response: RunResponse =
		serde_json::from_str(body).map_err(|e| ExecutionError::MalformedResponse(e.to_string()))?;
	if let Some(error) = response.error {
		return Err(ExecutionError::Rejected(error));
	}
	let results = response
		.results
		.ok_or_else(|| ExecutionError::MalformedResponse("missing `results`".to_string()))?;
	Ok(ExecutionReport {
		session_id: response.session_id,
		results,
	})
}

/// Renders a metric cell the way the results table shows it.
pub fn format_cell(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => "None".to_string(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn results_keep_row_and_column_order() {
		let body = r#"{
			"session_id": "abc",
			"results": [
				{ "symbol": "BTC-USDT", "PnL %": 12.5, "Sharpe": 1.1 },
				{ "symbol": "ETH-USDT", "PnL %": -3.0, "Sharpe": null }
			]
		}"#;
		let report = parse_report(body).unwrap();
		assert_eq!(report.session_id.as_deref(), Some("abc"));
		assert_eq!(report.columns(), ["symbol", "PnL %", "Sharpe"]);
		assert_eq!(report.results[1]["symbol"], json!("ETH-USDT"));
		assert_eq!(format_cell(&report.results[1]["Sharpe"]), "None");
		assert_eq!(format_cell(&report.results[0]["PnL %"]), "12.5");
	}

	#[test]
	fn error_body_becomes_rejected() {
		let err = parse_report(r#"{ "error": "no data for BTC-USDT" }"#).unwrap_err();
		assert_eq!(err, ExecutionError::Rejected("no data for BTC-USDT".into()));
		assert_eq!(err.to_string(), "strategy run failed: no data for BTC-USDT");
	}

	#[test]
	fn missing_or_invalid_body_is_malformed() {
		assert!(matches!(
			parse_report(r#"{ "session_id": "x" }"#),
			Err(ExecutionError::MalformedResponse(_))
		));
		assert!(matches!(
			parse_report("<html>502</html>"),
			Err(ExecutionError::MalformedResponse(_))
		));
		assert!(matches!(
			parse_report(r#"{ "results": "nope" }"#),
			Err(ExecutionError::MalformedResponse(_))
		));
	}

	#[test]
	fn empty_results_are_a_valid_report() {
		let report = parse_report(r#"{ "results": [] }"#).unwrap();
		assert!(report.results.is_empty());
		assert!(report.columns().is_empty());
	}
}
