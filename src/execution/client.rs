use gloo_net::http::{Request, Response};
use log::debug;
use serde_json::Value;

use super::error::{ExecutionError, Result};
use super::report::{ExecutionReport, parse_report};
use super::request::ExecutionRequest;

/// Calls into the external execution service.
#[allow(async_fn_in_trait)]
pub trait ExecutionClient {
	async fn run_strategy(&self, request: &ExecutionRequest) -> Result<ExecutionReport>;

	/// Asks the service to ingest historical candles for `symbol`. The
	/// response is passed through untouched.
	async fn fetch_ohlcv(&self, symbol: &str) -> Result<Value>;

	async fn list_symbols(&self) -> Result<Vec<String>>;
}

#[derive(Clone, Debug)]
pub struct HttpExecutionClient {
	base_url: String,
}

impl HttpExecutionClient {
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self { base_url }
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}
}

fn transport(e: gloo_net::Error) -> ExecutionError {
	ExecutionError::Transport(e.to_string())
}

async fn read_body(response: Response) -> Result<String> {
	if !response.ok() {
		return Err(ExecutionError::Status {
			status: response.status(),
		});
	}
	response
		.text()
		.await
		.map_err(|e| ExecutionError::MalformedResponse(e.to_string()))
}

impl ExecutionClient for HttpExecutionClient {
	async fn run_strategy(&self, request: &ExecutionRequest) -> Result<ExecutionReport> {
		let url = self.url("/run_strategy");
		debug!("POST {url} with {} indicators", request.indicators.len());
		let response = Request::post(&url)
			.json(request)
			.map_err(transport)?
			.send()
			.await
			.map_err(transport)?;
		parse_report(&read_body(response).await?)
	}

	async fn fetch_ohlcv(&self, symbol: &str) -> Result<Value> {
		let symbol = String::from(js_sys::encode_uri_component(symbol));
		let url = self.url(&format!("/fetch_ohlcv/{symbol}"));
		debug!("POST {url}");
		let response = Request::post(&url).send().await.map_err(transport)?;
		let body = read_body(response).await?;
		serde_json::from_str(&body).map_err(|e| ExecutionError::MalformedResponse(e.to_string()))
	}

	async fn list_symbols(&self) -> Result<Vec<String>> {
		let url = self.url("/symbols");
		let response = Request::get(&url).send().await.map_err(transport)?;
		let body = read_body(response).await?;
		serde_json::from_str(&body).map_err(|e| ExecutionError::MalformedResponse(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_drops_trailing_slashes() {
		let client = HttpExecutionClient::new("http://localhost:8000//");
		assert_eq!(client.base_url(), "http://localhost:8000");
		assert_eq!(client.url("/run_strategy"), "http://localhost:8000/run_strategy");
	}
}
