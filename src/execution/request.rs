use serde::{Deserialize, Serialize};

use crate::components::strategy_graph::{Category, StrategyNode};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLimits {
	pub max_drawdown: f64,
}

impl Default for RiskLimits {
	fn default() -> Self {
		Self { max_drawdown: 0.2 }
	}
}

/// Run parameters that do not come from the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionParams {
	pub market_type: String,
	pub exchange: String,
	pub logic: String,
	pub order_type: String,
	pub slippage: f64,
	pub fees: f64,
	pub risk: RiskLimits,
	pub portfolio_allocation: f64,
}

impl Default for ExecutionParams {
	fn default() -> Self {
		Self {
			market_type: "spot".to_string(),
			exchange: "okx".to_string(),
			logic: "buy_and_hold".to_string(),
			order_type: "market".to_string(),
			slippage: 0.001,
			fees: 0.001,
			risk: RiskLimits::default(),
			portfolio_allocation: 1.0,
		}
	}
}

/// Body of `POST /run_strategy`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExecutionRequest {
	pub symbols: Vec<String>,
	pub market_type: String,
	pub exchange: String,
	pub indicators: Vec<String>,
	pub logic: String,
	pub order_type: String,
	pub slippage: f64,
	pub fees: f64,
	pub risk: RiskLimits,
	pub portfolio_allocation: f64,
}

/// Symbols pass through in caller order; `indicators` lists the names of
/// indicator nodes in graph order. Conditions and actions are not sent.
pub fn build_request(
	symbols: &[String],
	nodes: &[StrategyNode],
	params: &ExecutionParams,
) -> ExecutionRequest {
	let ExecutionParams {
		market_type,
		exchange,
		logic,
		order_type,
		slippage,
		fees,
		risk,
		portfolio_allocation,
	} = params.clone();

	ExecutionRequest {
		symbols: symbols.to_vec(),
		market_type,
		exchange,
		indicators: nodes
			.iter()
			.filter(|n| n.category() == Category::Indicator)
			.map(|n| n.name.clone())
			.collect(),
		logic,
		order_type,
		slippage,
		fees,
		risk,
		portfolio_allocation,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::components::strategy_graph::GraphStore;

	#[test]
	fn only_indicator_names_are_sent() {
		let mut store = GraphStore::new();
		store.add_node(Category::Indicator, "EMA");
		store.add_node(Category::Condition, "Cross Over");
		store.add_node(Category::Action, "Buy Order");

		let params = ExecutionParams::default();
		let request = build_request(&["BTC-USDT".into()], store.nodes(), &params);
		assert_eq!(request.indicators, ["EMA"]);
	}

	#[test]
	fn indicators_keep_graph_order_and_duplicates() {
		let mut store = GraphStore::new();
		store.add_node(Category::Indicator, "RSI");
		store.add_node(Category::Indicator, "EMA");
		store.add_node(Category::Indicator, "RSI");

		let request = build_request(&[], store.nodes(), &ExecutionParams::default());
		assert_eq!(request.indicators, ["RSI", "EMA", "RSI"]);
		assert!(request.symbols.is_empty());
	}

	#[test]
	fn wire_shape_matches_run_strategy_body() {
		let symbols = vec!["ETH-USDT".to_string(), "BTC-USDT".to_string()];
		let request = build_request(&symbols, &[], &ExecutionParams::default());
		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({
				"symbols": ["ETH-USDT", "BTC-USDT"],
				"market_type": "spot",
				"exchange": "okx",
				"indicators": [],
				"logic": "buy_and_hold",
				"order_type": "market",
				"slippage": 0.001,
				"fees": 0.001,
				"risk": { "max_drawdown": 0.2 },
				"portfolio_allocation": 1.0
			})
		);
	}

	#[test]
	fn params_fill_missing_fields_with_defaults() {
		let params: ExecutionParams =
			serde_json::from_value(json!({ "exchange": "binance", "risk": {} })).unwrap();
		assert_eq!(params.exchange, "binance");
		assert_eq!(params.market_type, "spot");
		assert_eq!(params.risk.max_drawdown, 0.2);
	}
}
