use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::catalog::{self, NodeStyle};
use super::types::{NodeId, Point, Rect, StrategyNode};

pub const GRID_TILE: f64 = 20.0;
pub const BLOCK_WIDTH: f64 = 168.0;
pub const BLOCK_HEIGHT: f64 = 64.0;
const CLOSE_SIZE: f64 = 18.0;
const CONNECTOR_RADIUS: f64 = 7.0;
const PADDING: f64 = 14.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
	pub id: NodeId,
	pub rect: Rect,
	pub title: String,
	pub badge: &'static str,
	pub glyph: &'static str,
	pub style: NodeStyle,
	pub selected: bool,
	/// Being dragged; drawn last and slightly enlarged.
	pub lifted: bool,
}

impl Block {
	pub fn close_rect(&self) -> Rect {
		Rect::new(
			self.rect.x + self.rect.width - CLOSE_SIZE - 6.0,
			self.rect.y + 6.0,
			CLOSE_SIZE,
			CLOSE_SIZE,
		)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
	None,
	DropHint,
	EmptyHint,
}

/// Everything one frame shows, derived from store state without side effects.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	pub width: f64,
	pub height: f64,
	pub hovering: bool,
	pub blocks: Vec<Block>,
	pub overlay: Overlay,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
	Body(NodeId),
	Delete(NodeId),
}

pub fn build_scene(
	nodes: &[StrategyNode],
	selected: Option<&NodeId>,
	hovering: bool,
	dragged: Option<&NodeId>,
	(width, height): (f64, f64),
) -> Scene {
	let mut blocks: Vec<Block> = nodes
		.iter()
		.map(|node| {
			let category = node.category();
			Block {
				id: node.id.clone(),
				rect: Rect::new(node.position.x, node.position.y, BLOCK_WIDTH, BLOCK_HEIGHT),
				title: node.name.clone(),
				badge: category.as_str(),
				glyph: catalog::icon_for(category, &node.name).glyph(),
				style: catalog::node_style(category, &node.name),
				selected: selected == Some(&node.id),
				lifted: dragged == Some(&node.id),
			}
		})
		.collect();
	// Stable partition keeps creation order for everything else.
	blocks.sort_by_key(|b| b.lifted);

	let overlay = if hovering {
		Overlay::DropHint
	} else if nodes.is_empty() {
		Overlay::EmptyHint
	} else {
		Overlay::None
	};

	Scene {
		width,
		height,
		hovering,
		blocks,
		overlay,
	}
}

/// Topmost block under `p`, distinguishing its delete control.
pub fn hit_test(scene: &Scene, p: Point) -> Option<Hit> {
	scene.blocks.iter().rev().find_map(|block| {
		if block.close_rect().contains(p) {
			Some(Hit::Delete(block.id.clone()))
		} else if block.rect.contains(p) {
			Some(Hit::Body(block.id.clone()))
		} else {
			None
		}
	})
}

pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(if scene.hovering { "#374151" } else { "#1f2937" });
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
	draw_grid(scene, ctx);
	for block in &scene.blocks {
		draw_block(block, ctx);
	}
	draw_overlay(scene, ctx);
}

fn draw_grid(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("rgba(59, 130, 246, 0.05)");
	ctx.set_line_width(1.0);
	ctx.begin_path();
	let mut x = 0.5;
	while x < scene.width {
		ctx.move_to(x, 0.0);
		ctx.line_to(x, scene.height);
		x += GRID_TILE;
	}
	let mut y = 0.5;
	while y < scene.height {
		ctx.move_to(0.0, y);
		ctx.line_to(scene.width, y);
		y += GRID_TILE;
	}
	ctx.stroke();
}

fn draw_block(block: &Block, ctx: &CanvasRenderingContext2d) {
	let Rect {
		x,
		y,
		width,
		height,
	} = block.rect;

	ctx.save();
	if block.lifted {
		// Scale about the block centre.
		let (cx, cy) = (x + width / 2.0, y + height / 2.0);
		let _ = ctx.translate(cx, cy);
		let _ = ctx.scale(1.05, 1.05);
		let _ = ctx.translate(-cx, -cy);
		ctx.set_global_alpha(0.75);
	}

	if block.selected {
		ctx.set_stroke_style_str("#60a5fa");
		ctx.set_line_width(2.0);
		ctx.stroke_rect(x - 4.0, y - 4.0, width + 8.0, height + 8.0);
	}

	ctx.set_fill_style_str(block.style.fill);
	ctx.fill_rect(x, y, width, height);
	ctx.set_stroke_style_str(block.style.border);
	ctx.set_line_width(2.0);
	ctx.stroke_rect(x, y, width, height);

	ctx.set_fill_style_str("white");
	ctx.set_font("500 14px sans-serif");
	let _ = ctx.fill_text(
		&format!("{} {}", block.glyph, block.title),
		x + PADDING,
		y + PADDING + 12.0,
	);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
	ctx.set_font("12px sans-serif");
	let _ = ctx.fill_text(block.badge, x + PADDING, y + height - PADDING);

	let close = block.close_rect();
	ctx.set_fill_style_str("white");
	ctx.set_font("14px sans-serif");
	let _ = ctx.fill_text("×", close.x + 4.0, close.y + 13.0);

	// Decorative connectors; edges are not modelled.
	for cx in [x, x + width] {
		ctx.begin_path();
		let _ = ctx.arc(cx, y + height / 2.0, CONNECTOR_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("#d1d5db");
		ctx.fill();
		ctx.set_stroke_style_str("#4b5563");
		ctx.set_line_width(2.0);
		ctx.stroke();
	}
	ctx.restore();
}

fn draw_overlay(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let (cx, cy) = (scene.width / 2.0, scene.height / 2.0);
	ctx.set_text_align("center");
	match scene.overlay {
		Overlay::None => {}
		Overlay::DropHint => {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(8.0),
				&JsValue::from_f64(4.0),
			));
			ctx.set_stroke_style_str("rgba(96, 165, 250, 0.6)");
			ctx.set_line_width(2.0);
			ctx.stroke_rect(8.0, 8.0, scene.width - 16.0, scene.height - 16.0);
			let _ = ctx.set_line_dash(&js_sys::Array::new());

			ctx.set_fill_style_str("#60a5fa");
			ctx.set_font("500 18px sans-serif");
			let _ = ctx.fill_text("Drop component here", cx, cy);
		}
		Overlay::EmptyHint => {
			ctx.set_fill_style_str("#9ca3af");
			ctx.set_font("20px sans-serif");
			let _ = ctx.fill_text("Build Your Strategy", cx, cy - 12.0);
			ctx.set_font("14px sans-serif");
			let _ = ctx.fill_text(
				"Drag components from the left panel to create your trading strategy",
				cx,
				cy + 14.0,
			);
		}
	}
	ctx.set_text_align("start");
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::strategy_graph::types::Category;

	const SIZE: (f64, f64) = (800.0, 600.0);

	fn node(id: &str, category: Category, name: &str, x: f64, y: f64) -> StrategyNode {
		StrategyNode::new(id.to_string(), category, name, Point::new(x, y))
	}

	#[test]
	fn empty_graph_shows_prompt_unless_hovering() {
		let scene = build_scene(&[], None, false, None, SIZE);
		assert_eq!(scene.overlay, Overlay::EmptyHint);
		let scene = build_scene(&[], None, true, None, SIZE);
		assert_eq!(scene.overlay, Overlay::DropHint);
	}

	#[test]
	fn blocks_sit_at_node_positions_with_selection_ring() {
		let nodes = [
			node("a", Category::Indicator, "EMA", 10.0, 20.0),
			node("b", Category::Action, "Buy Order", 300.0, 40.0),
		];
		let selected = "b".to_string();
		let scene = build_scene(&nodes, Some(&selected), false, None, SIZE);

		assert_eq!(scene.overlay, Overlay::None);
		assert_eq!(scene.blocks[0].rect.origin(), Point::new(10.0, 20.0));
		assert!(!scene.blocks[0].selected);
		assert!(scene.blocks[1].selected);
		assert_eq!(scene.blocks[1].badge, "action");
		assert_eq!(scene.blocks[1].style.fill, "#16a34a");
	}

	#[test]
	fn dragged_block_is_drawn_last() {
		let nodes = [
			node("a", Category::Indicator, "EMA", 0.0, 0.0),
			node("b", Category::Indicator, "RSI", 0.0, 0.0),
			node("c", Category::Indicator, "MACD", 0.0, 0.0),
		];
		let dragged = "a".to_string();
		let scene = build_scene(&nodes, None, false, Some(&dragged), SIZE);
		let order: Vec<_> = scene.blocks.iter().map(|b| b.id.as_str()).collect();
		assert_eq!(order, ["b", "c", "a"]);
		assert!(scene.blocks[2].lifted);
	}

	#[test]
	fn hit_test_prefers_topmost_block_and_delete_control() {
		let nodes = [
			node("under", Category::Indicator, "EMA", 100.0, 100.0),
			node("over", Category::Condition, "Cross Over", 120.0, 110.0),
		];
		let scene = build_scene(&nodes, None, false, None, SIZE);

		assert_eq!(
			hit_test(&scene, Point::new(130.0, 150.0)),
			Some(Hit::Body("over".into()))
		);
		assert_eq!(
			hit_test(&scene, Point::new(105.0, 105.0)),
			Some(Hit::Body("under".into()))
		);
		let close = scene.blocks[1].close_rect();
		assert_eq!(
			hit_test(&scene, Point::new(close.x + 2.0, close.y + 2.0)),
			Some(Hit::Delete("over".into()))
		);
		assert_eq!(hit_test(&scene, Point::new(5.0, 5.0)), None);
	}
}
