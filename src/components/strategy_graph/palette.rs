use leptos::prelude::*;
use web_sys::DragEvent;

use super::catalog::{self, CatalogEntry};
use super::drag::DragController;
use super::store::GraphHandle;
use super::types::Category;

/// Catalog entries grouped by category. Click adds at a random spot; drag
/// onto the canvas adds at the drop point.
#[component]
pub fn Palette(graph: GraphHandle, drag: RwSignal<DragController>) -> impl IntoView {
	view! {
		<div class="palette">
			{Category::ALL
				.into_iter()
				.map(|category| {
					view! {
						<section>
							<h3 class="palette-heading">{category.heading()}</h3>
							<div class="palette-items">
								{catalog::entries(category)
									.map(|entry| {
										view! { <PaletteItem entry=entry graph=graph drag=drag /> }
									})
									.collect_view()}
							</div>
						</section>
					}
				})
				.collect_view()}
		</div>
	}
}

#[component]
fn PaletteItem(
	entry: &'static CatalogEntry,
	graph: GraphHandle,
	drag: RwSignal<DragController>,
) -> impl IntoView {
	let (dragging, set_dragging) = signal(false);

	let on_dragstart = move |ev: DragEvent| {
		// Firefox refuses to start a drag without data.
		if let Some(dt) = ev.data_transfer() {
			let _ = dt.set_data("text/plain", entry.name);
			dt.set_effect_allowed("copy");
		}
		drag.update(|d| d.begin_palette(entry.category, entry.name));
		set_dragging.set(true);
	};

	// Fires after `drop` when the release landed on the canvas, so anything
	// still in flight here was released elsewhere.
	let on_dragend = move |_: DragEvent| {
		drag.update(|d| {
			d.end();
		});
		set_dragging.set(false);
	};

	view! {
		<div
			class="palette-item"
			class:dragging=move || dragging.get()
			draggable="true"
			on:click=move |_| {
				graph.add_node(entry.category, entry.name);
			}
			on:dragstart=on_dragstart
			on:dragend=on_dragend
		>
			<span class="swatch" style:background-color=entry.swatch>
				{entry.icon.glyph()}
			</span>
			<span class="palette-label">{entry.name}</span>
		</div>
	}
}
