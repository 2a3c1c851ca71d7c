use std::fmt;
use std::ops::{Add, Sub};

use serde_json::{Map, Value};

/// Parameter name -> value. Shape depends on the node's `(category, name)`.
pub type NodeConfig = Map<String, Value>;

pub type NodeId = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	Indicator,
	Condition,
	Action,
}

impl Category {
	pub const ALL: [Category; 3] = [Category::Indicator, Category::Condition, Category::Action];

	pub fn as_str(self) -> &'static str {
		match self {
			Category::Indicator => "indicator",
			Category::Condition => "condition",
			Category::Action => "action",
		}
	}

	/// Heading used for the palette section.
	pub fn heading(self) -> &'static str {
		match self {
			Category::Indicator => "Technical Indicators",
			Category::Condition => "Conditions",
			Category::Action => "Actions",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Point in canvas-pixel space (or screen space, depending on the caller).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	pub fn origin(&self) -> Point {
		Point::new(self.x, self.y)
	}

	/// Half-open on the far edges so adjacent rects never both claim a point.
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct StrategyNode {
	pub id: NodeId,
	category: Category,
	pub name: String,
	pub config: NodeConfig,
	pub position: Point,
}

impl StrategyNode {
	pub fn new(id: NodeId, category: Category, name: impl Into<String>, position: Point) -> Self {
		Self {
			id,
			category,
			name: name.into(),
			config: NodeConfig::new(),
			position,
		}
	}

	/// Fixed at creation; there is no setter.
	pub fn category(&self) -> Category {
		self.category
	}
}

/// Partial update for a node. Absent fields are preserved; `config` is merged
/// key by key into the existing config.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeUpdate {
	pub position: Option<Point>,
	pub config: Option<NodeConfig>,
}

impl NodeUpdate {
	pub fn position(p: Point) -> Self {
		Self {
			position: Some(p),
			config: None,
		}
	}

	pub fn config(partial: NodeConfig) -> Self {
		Self {
			position: None,
			config: Some(partial),
		}
	}

	/// Single-key config partial.
	pub fn config_value(key: impl Into<String>, value: Value) -> Self {
		let mut partial = NodeConfig::new();
		partial.insert(key.into(), value);
		Self::config(partial)
	}
}
