//! Pointer gesture bookkeeping for the two drag flows: a palette entry dropped
//! onto the canvas, and a placed node moved within it. Browser listeners live
//! in the canvas component; this module only turns samples into mutations.

use log::debug;

use super::store::GraphOps;
use super::types::{Category, NodeId, NodeUpdate, Point, Rect};

/// What a palette drag carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PalettePayload {
	pub category: Category,
	pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeDrag {
	pub node_id: NodeId,
	/// Pointer minus node position at press time.
	pub offset: Point,
}

impl NodeDrag {
	pub fn position_for(&self, pointer: Point) -> Point {
		pointer - self.offset
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActiveDrag {
	Palette(PalettePayload),
	Node(NodeDrag),
}

/// At most one gesture is in flight; beginning a new one replaces the old.
#[derive(Clone, Debug, Default)]
pub struct DragController {
	active: Option<ActiveDrag>,
	hovering: bool,
}

/// Drop point in canvas coordinates for a pointer in screen coordinates.
pub fn drop_point(pointer: Point, canvas_origin: Point) -> Point {
	pointer - canvas_origin
}

impl DragController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn active(&self) -> Option<&ActiveDrag> {
		self.active.as_ref()
	}

	/// Node currently being repositioned, if any.
	pub fn dragged_node(&self) -> Option<&NodeId> {
		match &self.active {
			Some(ActiveDrag::Node(drag)) => Some(&drag.node_id),
			_ => None,
		}
	}

	pub fn is_hovering(&self) -> bool {
		self.hovering
	}

	pub fn begin_palette(&mut self, category: Category, name: &str) {
		debug!("Palette drag started for {category} {name:?}");
		self.hovering = false;
		self.active = Some(ActiveDrag::Palette(PalettePayload {
			category,
			name: name.to_string(),
		}));
	}

	/// Hover feedback only applies while a palette payload is in flight.
	/// Returns whether the hover state changed.
	pub fn set_hover(&mut self, over_canvas: bool) -> bool {
		let hovering = over_canvas && matches!(self.active, Some(ActiveDrag::Palette(_)));
		let changed = hovering != self.hovering;
		self.hovering = hovering;
		changed
	}

	/// Completes a palette drag released at `pointer` (screen coordinates).
	/// A release outside `canvas` creates nothing.
	pub fn drop_palette<S: GraphOps>(
		&mut self,
		store: &mut S,
		pointer: Point,
		canvas: Rect,
	) -> Option<NodeId> {
		self.hovering = false;
		let Some(ActiveDrag::Palette(payload)) = self.active.take() else {
			return None;
		};
		if !canvas.contains(pointer) {
			debug!("Palette drop outside canvas ignored");
			return None;
		}
		let at = drop_point(pointer, canvas.origin());
		let id = store.add_node(payload.category, &payload.name)?;
		store.update_node(&id, NodeUpdate::position(at));
		Some(id)
	}

	/// Starts repositioning `node_id`. Both points share one coordinate space.
	pub fn begin_node(&mut self, node_id: NodeId, node_position: Point, pointer: Point) {
		debug!("Node drag started for {node_id}");
		self.hovering = false;
		self.active = Some(ActiveDrag::Node(NodeDrag {
			node_id,
			offset: pointer - node_position,
		}));
	}

	/// Applies one movement sample. Returns the new position when a node drag
	/// is active.
	pub fn pointer_move<S: GraphOps>(&self, store: &mut S, pointer: Point) -> Option<Point> {
		let Some(ActiveDrag::Node(drag)) = &self.active else {
			return None;
		};
		let position = drag.position_for(pointer);
		store.update_node(&drag.node_id, NodeUpdate::position(position));
		Some(position)
	}

	/// Ends whatever gesture is in flight without further mutation.
	pub fn end(&mut self) -> Option<ActiveDrag> {
		self.hovering = false;
		self.active.take()
	}
}
