//! Conversion of rendered frames into egui textures.

mod texture;

pub use texture::{render_view, to_color_image};
