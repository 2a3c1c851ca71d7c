pub mod connection_badge;
pub mod run_results;
pub mod strategy_graph;
