use leptos::ev;
use leptos::leptos_dom::helpers::WindowListenerHandle;
use leptos::prelude::*;
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, DragEvent, HtmlCanvasElement, MouseEvent};

use super::drag::DragController;
use super::render::{self, BLOCK_HEIGHT, BLOCK_WIDTH, Hit, Scene};
use super::store::GraphHandle;
use super::types::{Point, Rect};

/// Window listeners backing one node drag. Dropping the session detaches
/// them, so replacing or clearing the stored session always cleans up.
struct DragSession {
	listeners: Vec<WindowListenerHandle>,
}

impl DragSession {
	fn attach(
		graph: GraphHandle,
		drag: RwSignal<DragController>,
		canvas_ref: NodeRef<leptos::html::Canvas>,
		session: StoredValue<Option<DragSession>, LocalStorage>,
	) -> Self {
		let finish = move || {
			drag.update(|d| {
				d.end();
			});
			// Drops this session, removing the listeners that called us.
			session.set_value(None);
		};
		let listeners = vec![
			window_event_listener(ev::mousemove, move |ev: MouseEvent| {
				let Some(canvas) = canvas_ref.get_untracked() else {
					return;
				};
				let p = client_point(&ev) - canvas_bounds(&canvas).origin();
				drag.with_untracked(|d| {
					let mut graph = graph;
					d.pointer_move(&mut graph, p);
				});
			}),
			window_event_listener(ev::mouseup, move |_: MouseEvent| finish()),
			// Pointer released outside the window never delivers mouseup.
			window_event_listener(ev::blur, move |_| finish()),
		];
		Self { listeners }
	}
}

impl Drop for DragSession {
	fn drop(&mut self) {
		debug!("Detaching {} drag listeners", self.listeners.len());
		for handle in self.listeners.drain(..) {
			handle.remove();
		}
	}
}

fn client_point(ev: &MouseEvent) -> Point {
	Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

/// Canvas rectangle in screen coordinates.
fn canvas_bounds(canvas: &HtmlCanvasElement) -> Rect {
	let rect = canvas.get_bounding_client_rect();
	Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn measure(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|(w, h)| *w > 0.0 && *h > 0.0)
		.unwrap_or((800.0, 600.0))
}

#[component]
pub fn StrategyCanvas(graph: GraphHandle, drag: RwSignal<DragController>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let size = RwSignal::new((800.0, 600.0));
	let scene: StoredValue<Option<Scene>> = StoredValue::new(None);
	let session: StoredValue<Option<DragSession>, LocalStorage> = StoredValue::new_local(None);

	let remeasure = move || {
		if let Some(canvas) = canvas_ref.get_untracked() {
			let (w, h) = measure(&canvas);
			graph.set_spawn_area(w - BLOCK_WIDTH, h - BLOCK_HEIGHT);
			size.set((w, h));
		}
	};

	Effect::new(move |_| {
		if canvas_ref.get().is_some() {
			remeasure();
		}
	});
	let resize = window_event_listener(ev::resize, move |_| remeasure());
	on_cleanup(move || resize.remove());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (w, h) = size.get();
		if canvas.width() != w as u32 || canvas.height() != h as u32 {
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
		}
		let next = graph.with(|s| {
			drag.with(|d| {
				render::build_scene(
					s.nodes(),
					s.selected_id(),
					d.is_hovering(),
					d.dragged_node(),
					(w, h),
				)
			})
		});
		if let Some(ctx) = context_2d(&canvas) {
			render::render(&next, &ctx);
		}
		scene.set_value(Some(next));
	});

	let hit_at = move |ev: &MouseEvent| -> Option<(Hit, Point)> {
		let canvas = canvas_ref.get_untracked()?;
		let p = client_point(ev) - canvas_bounds(&canvas).origin();
		scene.with_value(|s| s.as_ref().and_then(|s| render::hit_test(s, p)).map(|hit| (hit, p)))
	};

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some((Hit::Body(id), p)) = hit_at(&ev) else {
			return;
		};
		let Some(position) = graph.with_untracked(|s| s.node(&id).map(|n| n.position)) else {
			return;
		};
		ev.prevent_default();
		drag.update(|d| d.begin_node(id, position, p));
		// Replacing any stale session detaches its listeners first.
		session.set_value(Some(DragSession::attach(graph, drag, canvas_ref, session)));
	};

	let on_click = move |ev: MouseEvent| match hit_at(&ev) {
		Some((Hit::Body(id), _)) => graph.select(Some(id)),
		Some((Hit::Delete(id), _)) => {
			graph.delete_node(&id);
		}
		None => graph.select(None),
	};

	let on_dragover = move |ev: DragEvent| {
		// Required for the element to accept a drop.
		ev.prevent_default();
		drag.maybe_update(|d| d.set_hover(true));
	};

	let on_dragleave = move |_: DragEvent| {
		drag.maybe_update(|d| d.set_hover(false));
	};

	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (pointer, bounds) = (client_point(&ev), canvas_bounds(&canvas));
		let created = drag
			.try_update(|d| {
				let mut graph = graph;
				d.drop_palette(&mut graph, pointer, bounds)
			})
			.flatten();
		if let Some(id) = created {
			info!("Dropped {id} at {:?}", pointer - bounds.origin());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			id="strategy-canvas"
			class="strategy-canvas"
			on:mousedown=on_mousedown
			on:click=on_click
			on:dragover=on_dragover
			on:dragleave=on_dragleave
			on:drop=on_drop
			style="position: absolute; top: 0; left: 0; display: block;"
		/>
	}
}
