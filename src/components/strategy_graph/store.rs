use leptos::prelude::*;
use log::{debug, info};

use super::types::{Category, NodeId, NodeUpdate, Point, StrategyNode};

/// Area new nodes are scattered over when they are not dropped at a point.
pub const DEFAULT_SPAWN_AREA: (f64, f64) = (400.0, 300.0);

/// Mutation contract shared by the plain store and its reactive handle.
pub trait GraphOps {
	fn add_node(&mut self, category: Category, name: &str) -> Option<NodeId>;
	fn update_node(&mut self, id: &str, update: NodeUpdate) -> bool;
}

/// Owns the placed nodes (in creation order) and the current selection.
#[derive(Clone, Debug)]
pub struct GraphStore {
	nodes: Vec<StrategyNode>,
	selected: Option<NodeId>,
	spawn_area: (f64, f64),
	next_seq: u64,
}

impl Default for GraphStore {
	fn default() -> Self {
		Self::new()
	}
}

impl GraphStore {
	pub fn new() -> Self {
		Self {
			nodes: Vec::new(),
			selected: None,
			spawn_area: DEFAULT_SPAWN_AREA,
			next_seq: 0,
		}
	}

	pub fn nodes(&self) -> &[StrategyNode] {
		&self.nodes
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: &str) -> Option<&StrategyNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn selected_id(&self) -> Option<&NodeId> {
		self.selected.as_ref()
	}

	pub fn selected_node(&self) -> Option<&StrategyNode> {
		self.selected.as_deref().and_then(|id| self.node(id))
	}

	/// Keeps randomized placement inside the visible canvas.
	pub fn set_spawn_area(&mut self, width: f64, height: f64) {
		self.spawn_area = (width.max(1.0), height.max(1.0));
	}

	pub fn add_node(&mut self, category: Category, name: &str) -> NodeId {
		let seq = self.next_seq;
		self.next_seq += 1;
		let millis = chrono::Utc::now().timestamp_millis();
		// Timestamp alone collides for adds within the same millisecond.
		let id = format!("{category}-{millis}-{seq}");
		let seed = (millis.unsigned_abs() as usize).wrapping_add(seq as usize);
		let position = Point::new(
			rand_simple(seed) * self.spawn_area.0,
			rand_simple(seed.wrapping_mul(7).wrapping_add(3)) * self.spawn_area.1,
		);
		info!("Adding {category} node {name:?} as {id}");
		self.nodes
			.push(StrategyNode::new(id.clone(), category, name, position));
		id
	}

	pub fn update_node(&mut self, id: &str, update: NodeUpdate) -> bool {
		let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
			debug!("Ignoring update for unknown node {id}");
			return false;
		};
		if let Some(position) = update.position {
			node.position = position;
		}
		if let Some(partial) = update.config {
			for (key, value) in partial {
				node.config.insert(key, value);
			}
		}
		true
	}

	pub fn delete_node(&mut self, id: &str) -> bool {
		let before = self.nodes.len();
		self.nodes.retain(|n| n.id != id);
		if self.selected.as_deref() == Some(id) {
			self.selected = None;
		}
		let removed = self.nodes.len() != before;
		if removed {
			info!("Deleted node {id}");
		} else {
			debug!("Ignoring delete for unknown node {id}");
		}
		removed
	}

	/// Does not check that `id` exists; callers only select rendered nodes.
	pub fn select(&mut self, id: Option<NodeId>) {
		self.selected = id;
	}
}

impl GraphOps for GraphStore {
	fn add_node(&mut self, category: Category, name: &str) -> Option<NodeId> {
		Some(GraphStore::add_node(self, category, name))
	}

	fn update_node(&mut self, id: &str, update: NodeUpdate) -> bool {
		GraphStore::update_node(self, id, update)
	}
}

/// Cheap pseudo-random number in `[0, 1)`.
fn rand_simple(seed: usize) -> f64 {
	let x = (seed.wrapping_add(1).wrapping_mul(9301).wrapping_add(49297)) % 233280;
	(x as f64) / 233280.0
}

/// Reactive handle to the single [`GraphStore`]. Copy it into each component;
/// every mutation goes through these methods.
#[derive(Clone, Copy)]
pub struct GraphHandle(RwSignal<GraphStore>);

impl Default for GraphHandle {
	fn default() -> Self {
		Self::new()
	}
}

impl GraphHandle {
	pub fn new() -> Self {
		Self(RwSignal::new(GraphStore::new()))
	}

	/// Tracked read access.
	pub fn with<U>(&self, f: impl FnOnce(&GraphStore) -> U) -> U {
		self.0.with(f)
	}

	pub fn with_untracked<U>(&self, f: impl FnOnce(&GraphStore) -> U) -> U {
		self.0.with_untracked(f)
	}

	pub fn add_node(&self, category: Category, name: &str) -> Option<NodeId> {
		self.0.try_update(|s| s.add_node(category, name))
	}

	pub fn update_node(&self, id: &str, update: NodeUpdate) -> bool {
		self.0
			.try_update(|s| s.update_node(id, update))
			.unwrap_or(false)
	}

	pub fn delete_node(&self, id: &str) -> bool {
		self.0.try_update(|s| s.delete_node(id)).unwrap_or(false)
	}

	pub fn select(&self, id: Option<NodeId>) {
		self.0.update(|s| s.select(id));
	}

	pub fn set_spawn_area(&self, width: f64, height: f64) {
		self.0.update_untracked(|s| s.set_spawn_area(width, height));
	}
}

impl GraphOps for GraphHandle {
	fn add_node(&mut self, category: Category, name: &str) -> Option<NodeId> {
		GraphHandle::add_node(self, category, name)
	}

	fn update_node(&mut self, id: &str, update: NodeUpdate) -> bool {
		GraphHandle::update_node(self, id, update)
	}
}
