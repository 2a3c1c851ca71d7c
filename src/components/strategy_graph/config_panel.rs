use leptos::prelude::*;
use log::debug;
use serde_json::{Number, Value};

use super::catalog::{self, FieldKind, FieldSchema};
use super::store::GraphHandle;
use super::types::{Category, NodeConfig, NodeId, NodeUpdate, StrategyNode};

/// Turns raw form input into a config value. Unparsable numbers and unknown
/// choices yield `None` and are not written; numbers are clamped to the
/// field's bounds and rounded for integer fields.
pub fn parse_field_input(field: &FieldSchema, raw: &str) -> Option<Value> {
	match field.kind {
		FieldKind::Number {
			min, max, integer, ..
		} => {
			let mut n = raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())?;
			if let Some(min) = min {
				n = n.max(min);
			}
			if let Some(max) = max {
				n = n.min(max);
			}
			if integer {
				Some(Value::from(n.round() as i64))
			} else {
				Number::from_f64(n).map(Value::Number)
			}
		}
		FieldKind::Choice { options, .. } => options
			.iter()
			.find(|(value, _)| *value == raw)
			.map(|(value, _)| Value::from(*value)),
	}
}

/// Text shown in a field: the stored value, or the schema default.
pub fn display_value(field: &FieldSchema, config: &NodeConfig) -> String {
	match (config.get(field.key), field.kind) {
		(Some(Value::String(s)), _) => s.clone(),
		(Some(Value::Number(n)), _) => n.to_string(),
		(_, FieldKind::Number { default, .. }) => default.to_string(),
		(_, FieldKind::Choice { default, .. }) => default.to_string(),
	}
}

/// The parts of a node the form depends on.
#[derive(Clone, Debug, PartialEq)]
struct FormSubject {
	id: NodeId,
	category: Category,
	name: String,
	config: NodeConfig,
}

impl FormSubject {
	fn of(node: &StrategyNode) -> Self {
		Self {
			id: node.id.clone(),
			category: node.category(),
			name: node.name.clone(),
			config: node.config.clone(),
		}
	}
}

#[component]
pub fn ConfigPanel(graph: GraphHandle, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
	// Position is left out so dragging a node doesn't rebuild the form.
	let selected = Memo::new(move |_| graph.with(|s| s.selected_node().map(FormSubject::of)));

	view! {
		<aside class="config-panel">
			<div class="panel-header">
				<h3>"Configuration"</h3>
				<button class="icon-button" on:click=move |_| on_close.run(())>
					"×"
				</button>
			</div>
			{move || match selected.get() {
				None => {
					view! {
						<div class="placeholder">"Select a node to configure its parameters"</div>
					}
						.into_any()
				}
				Some(node) => {
					let fields = catalog::fields_for(node.category, &node.name);
					let form = if fields.is_empty() {
						view! {
							<div class="placeholder">
								"No configuration available for this component"
							</div>
						}
							.into_any()
					} else {
						fields
							.iter()
							.map(|field| {
								let id = node.id.clone();
								let current = display_value(field, &node.config);
								view! {
									<ConfigField graph=graph id=id field=field current=current />
								}
							})
							.collect_view()
							.into_any()
					};
					view! {
						<div class="selected-summary">
							<div class="muted">"Selected Component"</div>
							<div class="node-name">{node.name.clone()}</div>
							<div class="muted capitalize">{node.category.as_str()}</div>
						</div>
						<div class="config-fields">{form}</div>
					}
						.into_any()
				}
			}}
		</aside>
	}
}

#[component]
fn ConfigField(
	graph: GraphHandle,
	id: String,
	field: &'static FieldSchema,
	current: String,
) -> impl IntoView {
	let commit = move |raw: String| match parse_field_input(field, &raw) {
		Some(value) => {
			graph.update_node(&id, NodeUpdate::config_value(field.key, value));
		}
		None => debug!("Rejected input {raw:?} for {}", field.key),
	};

	let input = match field.kind {
		FieldKind::Number { min, max, .. } => view! {
			<input
				type="number"
				prop:value=current
				min=min.map(|m| m.to_string())
				max=max.map(|m| m.to_string())
				on:change=move |ev| commit(event_target_value(&ev))
			/>
		}
		.into_any(),
		FieldKind::Choice { options, .. } => view! {
			<select on:change=move |ev| commit(event_target_value(&ev))>
				{options
					.iter()
					.map(|(value, label)| {
						view! {
							<option value=*value selected={*value == current.as_str()}>
								{*label}
							</option>
						}
					})
					.collect_view()}
			</select>
		}
		.into_any(),
	};

	view! {
		<label class="config-field">
			<span>{field.label}</span>
			{input}
		</label>
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::components::strategy_graph::types::Point;

	fn field(category: Category, name: &str, key: &str) -> &'static FieldSchema {
		catalog::fields_for(category, name)
			.iter()
			.find(|f| f.key == key)
			.unwrap()
	}

	#[test]
	fn integer_fields_round_and_clamp() {
		let period = field(Category::Indicator, "RSI", "period");
		assert_eq!(parse_field_input(period, "21"), Some(json!(21)));
		assert_eq!(parse_field_input(period, " 21.6 "), Some(json!(22)));
		assert_eq!(parse_field_input(period, "-5"), Some(json!(1)));

		let overbought = field(Category::Indicator, "RSI", "overbought");
		assert_eq!(parse_field_input(overbought, "250"), Some(json!(100)));
	}

	#[test]
	fn float_fields_keep_fraction() {
		let std_dev = field(Category::Indicator, "Bollinger Bands", "std_dev");
		assert_eq!(parse_field_input(std_dev, "2.5"), Some(json!(2.5)));
		let level = field(Category::Condition, "Price Above", "level");
		assert_eq!(parse_field_input(level, "64000.25"), Some(json!(64000.25)));
	}

	#[test]
	fn garbage_is_not_written() {
		let period = field(Category::Indicator, "EMA", "period");
		assert_eq!(parse_field_input(period, ""), None);
		assert_eq!(parse_field_input(period, "abc"), None);
		assert_eq!(parse_field_input(period, "NaN"), None);

		let source = field(Category::Indicator, "EMA", "source");
		assert_eq!(parse_field_input(source, "vwap"), None);
		assert_eq!(parse_field_input(source, "high"), Some(json!("high")));
	}

	#[test]
	fn display_falls_back_to_schema_default() {
		let period = field(Category::Indicator, "EMA", "period");
		let order_type = field(Category::Action, "Buy Order", "order_type");
		let mut config = NodeConfig::new();
		assert_eq!(display_value(period, &config), "20");
		assert_eq!(display_value(order_type, &config), "market");

		config.insert("period".into(), json!(50));
		config.insert("order_type".into(), json!("limit"));
		assert_eq!(display_value(period, &config), "50");
		assert_eq!(display_value(order_type, &config), "limit");
	}

	#[test]
	fn form_subject_ignores_position() {
		let origin = Point::new(0.0, 0.0);
		let mut node = StrategyNode::new("n1".into(), Category::Indicator, "EMA", origin);
		let before = FormSubject::of(&node);
		node.position = Point::new(120.0, 45.0);
		assert_eq!(FormSubject::of(&node), before);

		node.config.insert("period".into(), json!(30));
		assert_ne!(FormSubject::of(&node), before);
	}
}
