//! Main view (central panel) rendering.

use eframe::egui;
use egui_plot::{Plot, PlotImage, PlotPoint};

use crate::app::H5vizApp;
use crate::util::{pixel_at, plot_to_image, usize_to_f32, usize_to_f64};

impl H5vizApp {
    /// Render the central panel with the current frame.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (Some(tex), Some(stack)) = (&self.texture, &self.stack) else {
                ui.centered_and_justified(|ui| ui.label("No Data"));
                return;
            };

            if let Some(title) = stack.title() {
                ui.label(title);
            }

            let (h, w) = stack.frame_dim();
            let (hf, wf) = (usize_to_f64(h), usize_to_f64(w));
            let response = Plot::new("frame")
                .data_aspect(1.0)
                .allow_double_click_reset(false)
                .show(ui, |plot_ui| {
                    plot_ui.image(PlotImage::new(
                        tex,
                        PlotPoint::new(wf / 2.0, hf / 2.0),
                        [usize_to_f32(w), usize_to_f32(h)],
                    ));
                    plot_ui.pointer_coordinate()
                });

            let pointer = response.inner;
            self.cursor_info = pointer.and_then(|p| {
                let (row, col) = pixel_at(p.x, p.y, h, w)?;
                Some((row, col, stack.current_frame()[[row, col]]))
            });

            if response.response.clicked() {
                if let Some(p) = pointer {
                    let (x, y) = plot_to_image(p.x, p.y, h);
                    self.handle_click(x, y);
                }
            }
        });
    }
}
