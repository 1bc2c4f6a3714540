//! Main application state and logic.
//!
//! Contains the `H5vizApp` struct which manages the GUI state,
//! the loaded image stack, ROI selection and message handling.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use eframe::egui;
use h5viz_core::{Clim, ClickOutcome, Colormap, ImageStack, Preset, RoiSelector};
use h5viz_io::{write_rois, WriteMode};
use log::{debug, info, warn};

use crate::message::AppMessage;
use crate::pipeline::{list_datasets_worker, load_stack_worker};
use crate::state::{ProcessingState, UiState};
use crate::viewer::render_view;

/// Main application state.
pub struct H5vizApp {
    /// Currently opened HDF5 file.
    pub(crate) selected_file: Option<PathBuf>,
    /// Image datasets found in the file.
    pub(crate) datasets: Vec<String>,
    /// Dataset currently shown.
    pub(crate) selected_dataset: Option<String>,

    /// Loaded image stack.
    pub(crate) stack: Option<ImageStack>,
    /// Color limits spanning the whole stack.
    pub(crate) stack_clim: Option<Clim>,
    /// ROI selection on the loaded stack.
    pub(crate) selector: Option<RoiSelector>,
    /// Current cursor info (row, col, value).
    pub(crate) cursor_info: Option<(usize, usize, f64)>,

    /// Current colormap selection.
    pub(crate) preset: Preset,
    /// Colormap built from `preset`.
    pub(crate) cmap: Colormap,
    /// UI display state.
    pub(crate) ui_state: UiState,

    /// Message receiver for async operations.
    pub(crate) rx: Receiver<AppMessage>,
    /// Message sender for async operations.
    pub(crate) tx: Sender<AppMessage>,

    /// Processing state (listing/loading progress).
    pub(crate) processing: ProcessingState,

    /// Cached frame texture.
    pub(crate) texture: Option<egui::TextureHandle>,
    /// Whether the texture must be rebuilt.
    pub(crate) texture_dirty: bool,
}

impl Default for H5vizApp {
    fn default() -> Self {
        let (tx, rx) = channel();
        let preset = Preset::default();
        Self {
            selected_file: None,
            datasets: Vec::new(),
            selected_dataset: None,

            stack: None,
            stack_clim: None,
            selector: None,
            cursor_info: None,

            preset,
            cmap: preset.colormap(),
            ui_state: UiState::default(),

            rx,
            tx,

            processing: ProcessingState::default(),

            texture: None,
            texture_dirty: false,
        }
    }
}

impl H5vizApp {
    /// List the image datasets of a file asynchronously.
    pub fn open_file(&mut self, path: PathBuf) {
        self.reset_file_state(path.as_path());
        self.processing.start("Listing datasets...");

        let tx = self.tx.clone();
        thread::spawn(move || list_datasets_worker(path, &tx));
    }

    /// Reset application state for a new file.
    fn reset_file_state(&mut self, path: &Path) {
        self.selected_file = Some(path.to_path_buf());
        self.datasets.clear();
        self.selected_dataset = None;
        self.clear_stack();
    }

    fn clear_stack(&mut self) {
        self.stack = None;
        self.stack_clim = None;
        self.selector = None;
        self.cursor_info = None;
        self.texture = None;
    }

    /// Load a dataset of the open file asynchronously.
    pub fn load_dataset(&mut self, dataset: String) {
        let Some(path) = self.selected_file.clone() else {
            return;
        };
        self.selected_dataset = Some(dataset.clone());
        self.clear_stack();
        self.processing.start(format!("Loading {dataset}..."));

        let tx = self.tx.clone();
        thread::spawn(move || load_stack_worker(&path, dataset, &tx));
    }

    /// Switch the colormap.
    pub fn set_preset(&mut self, preset: Preset) {
        if preset != self.preset {
            self.preset = preset;
            self.cmap = preset.colormap();
            self.texture_dirty = true;
        }
    }

    /// Show another frame of the stack.
    pub fn set_frame(&mut self, index: usize) {
        if let Some(stack) = &mut self.stack {
            match stack.set_frame(index) {
                Ok(()) => self.texture_dirty = true,
                Err(e) => warn!("{e}"),
            }
        }
    }

    /// Toggle between stack-wide and per-frame color limits.
    pub fn set_shared_clim(&mut self, shared: bool) {
        self.ui_state.shared_clim = shared;
        if let Some(stack) = &mut self.stack {
            stack.set_clim(if shared { self.stack_clim } else { None });
            self.texture_dirty = true;
        }
    }

    /// Forward a click in image coordinates to the ROI selector.
    pub fn handle_click(&mut self, x: f64, y: f64) {
        let Some(selector) = &mut self.selector else {
            return;
        };
        if selector.click(x, y) == ClickOutcome::Added {
            self.texture_dirty = true;
        }
    }

    /// Close the current polygon and start another.
    pub fn new_roi(&mut self) {
        if let Some(selector) = &mut self.selector {
            if let Err(e) = selector.new_roi() {
                self.processing.status_text = format!("Error: {e}");
            }
        }
    }

    /// Rasterize every ROI and detach the selector from input.
    pub fn confirm_rois(&mut self) {
        let Some(selector) = &mut self.selector else {
            return;
        };
        self.processing.status_text = match selector.confirm() {
            Ok(masks) => format!("Confirmed {} ROI(s)", masks.len()),
            Err(e) => format!("Error: {e}"),
        };
    }

    /// Write the confirmed ROI masks and polygons to an HDF5 file.
    pub fn save_rois(&mut self, path: &Path) {
        let Some(selector) = &self.selector else {
            return;
        };
        let Some(masks) = selector.masks() else {
            self.processing.status_text = "Confirm the ROIs before saving".to_string();
            return;
        };
        self.processing.status_text =
            match write_rois(path, masks, selector.polygons(), WriteMode::Truncate) {
                Ok(()) => format!("Saved {} ROI(s) to {}", masks.len(), path.display()),
                Err(e) => format!("Error: {e}"),
            };
    }

    /// Rebuild the frame texture if anything changed.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if !self.texture_dirty {
            return;
        }
        self.texture_dirty = false;
        let Some(stack) = &self.stack else {
            self.texture = None;
            return;
        };
        let selector = self
            .selector
            .as_ref()
            .filter(|_| self.ui_state.show_overlay);
        let img = render_view(stack, &self.cmap, selector);
        match &mut self.texture {
            Some(texture) => texture.set(img, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("frame", img, egui::TextureOptions::NEAREST));
            }
        }
    }

    /// Handle pending messages from async workers.
    pub fn handle_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                AppMessage::DatasetsListed(path, names) => {
                    if self.selected_file.as_deref() != Some(path.as_path()) {
                        continue;
                    }
                    self.processing.finish(format!(
                        "{} image dataset(s) in {}",
                        names.len(),
                        path.display()
                    ));
                    self.datasets = names;
                    if let Some(first) = self.datasets.first().cloned() {
                        self.load_dataset(first);
                    }
                }
                AppMessage::LoadComplete(stack, dataset, dur) => {
                    if self.selected_dataset.as_deref() != Some(dataset.as_str()) {
                        continue;
                    }
                    self.processing.finish(format!(
                        "Loaded {} frame(s) of {} in {:.2}s",
                        stack.len(),
                        dataset,
                        dur.as_secs_f64()
                    ));
                    self.install_stack(*stack);
                }
                AppMessage::LoadError(path, dataset, e) => {
                    let stale_file = self.selected_file.as_deref() != Some(path.as_path());
                    let stale_dataset = dataset
                        .is_some_and(|d| self.selected_dataset.as_deref() != Some(d.as_str()));
                    if stale_file || stale_dataset {
                        debug!("Dropping stale error for {}: {e}", path.display());
                        continue;
                    }
                    self.processing.finish(format!("Error: {e}"));
                }
            }
        }
    }

    fn install_stack(&mut self, mut stack: ImageStack) {
        self.stack_clim = stack.clim();
        if !self.ui_state.shared_clim {
            stack.set_clim(None);
        }
        self.selector = match RoiSelector::for_image(stack.current_frame()) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!("ROI selection disabled: {e}");
                None
            }
        };
        let (h, w) = stack.frame_dim();
        info!("Showing {h}x{w} stack with {} frame(s)", stack.len());
        self.stack = Some(stack);
        self.texture_dirty = true;
    }
}

impl eframe::App for H5vizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_messages();
        self.refresh_texture(ctx);
        self.render_side_panel(ctx);
        self.render_central_panel(ctx);
        // Rebuild here too so ROI clicks show up on the next frame.
        self.refresh_texture(ctx);

        if self.processing.is_loading || self.texture_dirty {
            ctx.request_repaint();
        }
    }
}
