//! UI state for view options.

/// View toggles shown in the control panel.
pub struct UiState {
    /// Draw ROI outlines over the image.
    pub show_overlay: bool,
    /// Use one color range for the whole stack instead of per frame.
    pub shared_clim: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_overlay: true,
            shared_clim: true,
        }
    }
}
