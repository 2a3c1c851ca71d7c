pub mod catalog;
mod component;
mod config_panel;
pub mod drag;
mod palette;
pub mod render;
pub mod store;
pub mod types;

pub use component::StrategyCanvas;
pub use config_panel::ConfigPanel;
pub use drag::DragController;
pub use palette::Palette;
pub use store::{GraphHandle, GraphStore};
pub use types::{Category, StrategyNode};
