//! Static registry of placeable blocks, plus the lookup tables that map a
//! node's `(category, name)` to its visual treatment and parameter schema.

use super::types::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
	TrendingUp,
	BarChart,
	Activity,
	Zap,
	Target,
	Dollar,
}

impl Icon {
	pub fn glyph(self) -> &'static str {
		match self {
			Icon::TrendingUp => "↗",
			Icon::BarChart => "▥",
			Icon::Activity => "∿",
			Icon::Zap => "ϟ",
			Icon::Target => "◎",
			Icon::Dollar => "$",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
	Number {
		default: f64,
		min: Option<f64>,
		max: Option<f64>,
		integer: bool,
	},
	Choice {
		options: &'static [(&'static str, &'static str)],
		default: &'static str,
	},
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSchema {
	pub key: &'static str,
	pub label: &'static str,
	pub kind: FieldKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatalogEntry {
	pub category: Category,
	pub name: &'static str,
	pub icon: Icon,
	/// Swatch color behind the icon in the palette.
	pub swatch: &'static str,
	pub fields: &'static [FieldSchema],
}

/// Fill and border colors of a placed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeStyle {
	pub fill: &'static str,
	pub border: &'static str,
}

const fn int(
	key: &'static str,
	label: &'static str,
	default: f64,
	min: f64,
	max: f64,
) -> FieldSchema {
	FieldSchema {
		key,
		label,
		kind: FieldKind::Number {
			default,
			min: Some(min),
			max: Some(max),
			integer: true,
		},
	}
}

const fn float(
	key: &'static str,
	label: &'static str,
	default: f64,
	min: Option<f64>,
	max: Option<f64>,
) -> FieldSchema {
	FieldSchema {
		key,
		label,
		kind: FieldKind::Number {
			default,
			min,
			max,
			integer: false,
		},
	}
}

const PRICE_SOURCES: &[(&str, &str)] = &[
	("close", "Close"),
	("open", "Open"),
	("high", "High"),
	("low", "Low"),
];

const ORDER_TYPES: &[(&str, &str)] = &[("market", "Market"), ("limit", "Limit"), ("stop", "Stop")];

const SOURCE: FieldSchema = FieldSchema {
	key: "source",
	label: "Source",
	kind: FieldKind::Choice {
		options: PRICE_SOURCES,
		default: "close",
	},
};

const ORDER_FIELDS: &[FieldSchema] = &[
	FieldSchema {
		key: "order_type",
		label: "Order Type",
		kind: FieldKind::Choice {
			options: ORDER_TYPES,
			default: "market",
		},
	},
	int("quantity_pct", "Quantity (%)", 100.0, 1.0, 100.0),
];

pub const CATALOG: &[CatalogEntry] = &[
	CatalogEntry {
		category: Category::Indicator,
		name: "EMA",
		icon: Icon::TrendingUp,
		swatch: "#2563eb",
		fields: &[int("period", "Period", 20.0, 1.0, 500.0), SOURCE],
	},
	CatalogEntry {
		category: Category::Indicator,
		name: "RSI",
		icon: Icon::BarChart,
		swatch: "#9333ea",
		fields: &[
			int("period", "Period", 14.0, 1.0, 500.0),
			int("overbought", "Overbought Level", 70.0, 0.0, 100.0),
			int("oversold", "Oversold Level", 30.0, 0.0, 100.0),
		],
	},
	CatalogEntry {
		category: Category::Indicator,
		name: "MACD",
		icon: Icon::Activity,
		swatch: "#16a34a",
		fields: &[
			int("fast", "Fast Period", 12.0, 1.0, 500.0),
			int("slow", "Slow Period", 26.0, 1.0, 500.0),
			int("signal", "Signal Period", 9.0, 1.0, 500.0),
		],
	},
	CatalogEntry {
		category: Category::Indicator,
		name: "Bollinger Bands",
		icon: Icon::Zap,
		swatch: "#ca8a04",
		fields: &[
			int("period", "Period", 20.0, 1.0, 500.0),
			float("std_dev", "Std. Deviations", 2.0, Some(0.1), Some(10.0)),
			SOURCE,
		],
	},
	CatalogEntry {
		category: Category::Condition,
		name: "Price Above",
		icon: Icon::TrendingUp,
		swatch: "#ea580c",
		fields: &[float("level", "Price Level", 0.0, Some(0.0), None)],
	},
	CatalogEntry {
		category: Category::Condition,
		name: "Cross Over",
		icon: Icon::Target,
		swatch: "#dc2626",
		fields: &[
			int("fast", "Fast Period", 12.0, 1.0, 500.0),
			int("slow", "Slow Period", 26.0, 1.0, 500.0),
		],
	},
	CatalogEntry {
		category: Category::Condition,
		name: "RSI Overbought",
		icon: Icon::BarChart,
		swatch: "#db2777",
		fields: &[int("threshold", "Threshold", 70.0, 0.0, 100.0)],
	},
	CatalogEntry {
		category: Category::Action,
		name: "Buy Order",
		icon: Icon::Dollar,
		swatch: "#16a34a",
		fields: ORDER_FIELDS,
	},
	CatalogEntry {
		category: Category::Action,
		name: "Sell Order",
		icon: Icon::Dollar,
		swatch: "#dc2626",
		fields: ORDER_FIELDS,
	},
	CatalogEntry {
		category: Category::Action,
		name: "Stop Loss",
		icon: Icon::Target,
		swatch: "#ca8a04",
		fields: &[float("stop_pct", "Stop Distance (%)", 5.0, Some(0.1), Some(100.0))],
	},
];

pub fn entries(category: Category) -> impl Iterator<Item = &'static CatalogEntry> {
	CATALOG.iter().filter(move |e| e.category == category)
}

pub fn lookup(category: Category, name: &str) -> Option<&'static CatalogEntry> {
	CATALOG
		.iter()
		.find(|e| e.category == category && e.name == name)
}

/// Parameter schema for a node; empty when the name is not in the catalog.
pub fn fields_for(category: Category, name: &str) -> &'static [FieldSchema] {
	lookup(category, name).map(|e| e.fields).unwrap_or(&[])
}

/// Icon shown on a placed block. Nodes named outside the catalog fall back to
/// a trend arrow.
pub fn icon_for(category: Category, name: &str) -> Icon {
	lookup(category, name)
		.map(|e| e.icon)
		.unwrap_or(Icon::TrendingUp)
}

pub fn node_style(category: Category, name: &str) -> NodeStyle {
	match category {
		Category::Indicator => NodeStyle {
			fill: "#2563eb",
			border: "#3b82f6",
		},
		Category::Condition => NodeStyle {
			fill: "#ea580c",
			border: "#f97316",
		},
		Category::Action if name.contains("Buy") => NodeStyle {
			fill: "#16a34a",
			border: "#22c55e",
		},
		Category::Action => NodeStyle {
			fill: "#dc2626",
			border: "#ef4444",
		},
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn names_are_unique_within_each_category() {
		let mut seen = HashSet::new();
		for entry in CATALOG {
			assert!(
				seen.insert((entry.category, entry.name)),
				"duplicate entry {}",
				entry.name
			);
		}
		for category in Category::ALL {
			assert!(entries(category).count() >= 3);
		}
	}

	#[test]
	fn lookup_respects_category() {
		assert!(lookup(Category::Indicator, "EMA").is_some());
		assert!(lookup(Category::Condition, "EMA").is_none());
		assert!(fields_for(Category::Action, "Teleport").is_empty());
	}

	#[test]
	fn schema_defaults_stay_within_bounds() {
		for entry in CATALOG {
			for field in entry.fields {
				match field.kind {
					FieldKind::Number { default, min, max, .. } => {
						assert!(min.is_none_or(|m| default >= m), "{}", field.key);
						assert!(max.is_none_or(|m| default <= m), "{}", field.key);
					}
					FieldKind::Choice { options, default } => {
						assert!(options.iter().any(|(v, _)| *v == default));
					}
				}
			}
		}
	}

	#[test]
	fn action_color_follows_buy_in_name() {
		assert_eq!(node_style(Category::Action, "Buy Order").fill, "#16a34a");
		assert_eq!(node_style(Category::Action, "Sell Order").fill, "#dc2626");
		assert_eq!(node_style(Category::Action, "Stop Loss").fill, "#dc2626");
		assert_eq!(node_style(Category::Indicator, "Anything").fill, "#2563eb");
	}
}
