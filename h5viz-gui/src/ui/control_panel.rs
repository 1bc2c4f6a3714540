//! Control panel (left sidebar) rendering.

use eframe::egui;
use h5viz_core::{Preset, SelectionState};
use rfd::FileDialog;

use super::theme::{accent, form_label, primary_button, stat_label, stat_value};
use crate::app::H5vizApp;

const HDF5_EXTENSIONS: [&str; 4] = ["h5", "hdf5", "hdf", "nxs"];

impl H5vizApp {
    /// Render the left sidebar.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(280.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("H5VIZ")
                        .size(14.0)
                        .strong()
                        .color(accent::BLUE),
                );
                ui.separator();

                self.render_file_section(ui);
                ui.separator();
                self.render_view_section(ui);
                ui.separator();
                self.render_roi_section(ui);
                ui.separator();
                self.render_cursor_info(ui);

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    self.render_status(ui);
                });
            });
    }

    fn render_file_section(&mut self, ui: &mut egui::Ui) {
        let can_open = !self.processing.is_loading;
        if ui
            .add_enabled(can_open, primary_button("Open file"))
            .clicked()
        {
            if let Some(path) = FileDialog::new()
                .add_filter("HDF5", &HDF5_EXTENSIONS)
                .pick_file()
            {
                self.open_file(path);
            }
        }

        if let Some(path) = &self.selected_file {
            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            ui.label(stat_value(&name)).on_hover_text(path.display().to_string());
        }

        ui.label(form_label("Dataset"));
        let mut chosen = None;
        let selected_text = self.selected_dataset.as_deref().unwrap_or("(none)");
        egui::ComboBox::from_id_salt("dataset")
            .selected_text(selected_text)
            .width(250.0)
            .show_ui(ui, |ui| {
                for name in &self.datasets {
                    let selected = self.selected_dataset.as_deref() == Some(name.as_str());
                    if ui.selectable_label(selected, name).clicked() && !selected {
                        chosen = Some(name.clone());
                    }
                }
            });
        if let Some(name) = chosen {
            self.load_dataset(name);
        }
    }

    fn render_view_section(&mut self, ui: &mut egui::Ui) {
        if let Some(stack) = &self.stack {
            if stack.len() > 1 {
                ui.label(form_label("Frame"));
                let mut index = stack.current_index();
                let max = stack.len() - 1;
                if ui.add(egui::Slider::new(&mut index, 0..=max)).changed() {
                    self.set_frame(index);
                }
            }
        }

        ui.label(form_label("Colormap"));
        let mut preset = self.preset;
        egui::ComboBox::from_id_salt("colormap")
            .selected_text(preset.name())
            .show_ui(ui, |ui| {
                for option in Preset::ALL {
                    ui.selectable_value(&mut preset, option, option.name());
                }
            });
        self.set_preset(preset);

        let mut shared = self.ui_state.shared_clim;
        if ui
            .checkbox(&mut shared, "Same color range for all frames")
            .changed()
        {
            self.set_shared_clim(shared);
        }
        if ui
            .checkbox(&mut self.ui_state.show_overlay, "Show ROI outlines")
            .changed()
        {
            self.texture_dirty = true;
        }
    }

    fn render_roi_section(&mut self, ui: &mut egui::Ui) {
        ui.label(form_label("Regions of interest"));
        let Some(selector) = &self.selector else {
            ui.label(stat_label("Load a dataset to select ROIs"));
            return;
        };

        let state = selector.state();
        let finished = selector.is_finished();
        let has_masks = selector.masks().is_some();
        egui::Grid::new("roi_stats").num_columns(2).show(ui, |ui| {
            ui.label(stat_label("State"));
            ui.label(stat_value(match state {
                SelectionState::Collecting => "collecting",
                SelectionState::RoiConfirmed => "ROI closed",
                SelectionState::Finished => "finished",
            }));
            ui.end_row();
            ui.label(stat_label("Closed ROIs"));
            ui.label(stat_value(&selector.polygons().len().to_string()));
            ui.end_row();
            ui.label(stat_label("Current points"));
            ui.label(stat_value(&selector.current_polygon().len().to_string()));
            ui.end_row();
        });

        ui.horizontal(|ui| {
            if ui.add_enabled(!finished, egui::Button::new("New ROI")).clicked() {
                self.new_roi();
                self.texture_dirty = true;
            }
            if ui
                .add_enabled(!finished, egui::Button::new("Confirm ROI"))
                .clicked()
            {
                self.confirm_rois();
                self.texture_dirty = true;
            }
        });

        if ui
            .add_enabled(has_masks, primary_button("Save masks"))
            .clicked()
        {
            if let Some(path) = FileDialog::new()
                .add_filter("HDF5", &HDF5_EXTENSIONS)
                .set_file_name("rois.h5")
                .save_file()
            {
                self.save_rois(&path);
            }
        }
    }

    fn render_cursor_info(&self, ui: &mut egui::Ui) {
        let Some((row, col, value)) = self.cursor_info else {
            return;
        };
        egui::Grid::new("cursor").num_columns(2).show(ui, |ui| {
            ui.label(stat_label("Pixel"));
            ui.label(stat_value(&format!("({row}, {col})")));
            ui.end_row();
            ui.label(stat_label("Value"));
            ui.label(stat_value(&format!("{value:.4}")));
            ui.end_row();
        });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let color = if self.processing.status_text.starts_with("Error") {
            accent::RED
        } else {
            ui.visuals().text_color()
        };
        ui.horizontal_wrapped(|ui| {
            if self.processing.is_loading {
                ui.spinner();
            }
            ui.label(egui::RichText::new(&self.processing.status_text).color(color));
        });
    }
}
