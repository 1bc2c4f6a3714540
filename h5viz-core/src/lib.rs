//! h5viz-core: Colormaps, rendering, image grids and ROI selection.
//!
//! This crate is format-agnostic: it works on `ndarray` images and produces
//! RGBA rasters. HDF5 access lives in `h5viz-io`.
//!

pub mod colormap;
pub mod error;
pub mod figure;
pub mod grid;
pub mod render;
pub mod roi;
pub mod stack;
pub mod util;

pub use colormap::{
    parse_color, ColorStop, Colormap, ConjunctiveColormap, Preset, RandomKind, RandomOptions, Rgb,
    Rgba,
};
pub use error::{Error, Result, RoiError};
pub use figure::{plot_to_image, savefig, Figure, Panel, SaveOptions};
pub use grid::{plot_image_grid, subplot_indices, GridOptions};
pub use render::{auto_clim, colorbar, normalize, render_image, Clim};
pub use roi::{polygon_area, polygon_mask, ClickOutcome, Point, RoiSelector, SelectionState};
pub use stack::ImageStack;
