//! UI rendering modules.
//!
//! - `control_panel`: Left sidebar with file, dataset, view and ROI controls
//! - `main_view`: Central panel with the current frame
//! - `theme`: Colors, fonts and button styles

mod control_panel;
mod main_view;
pub mod theme;
