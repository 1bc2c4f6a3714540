//! Application theme and color definitions.
//!
//! Monospace fonts and flat widgets over egui's dark or light visuals,
//! following the system preference.

use eframe::egui::{self, Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Shared accent colors (same for both themes).
pub mod accent {
    use eframe::egui::Color32;

    pub const BLUE: Color32 = Color32::from_rgb(0x4a, 0x9e, 0xff);
    pub const GREEN: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
    pub const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
}

/// Surface and text colors for one theme.
struct Palette {
    panel: Color32,
    faint: Color32,
    input: Color32,
    border: Color32,
    border_light: Color32,
    text: Color32,
    text_muted: Color32,
    hover: Color32,
    selection_alpha: f32,
}

const DARK: Palette = Palette {
    panel: Color32::from_rgb(0x1f, 0x1f, 0x1f),
    faint: Color32::from_rgb(0x1a, 0x1a, 0x1a),
    input: Color32::from_rgb(0x2a, 0x2a, 0x2a),
    border: Color32::from_rgb(0x33, 0x33, 0x33),
    border_light: Color32::from_rgb(0x44, 0x44, 0x44),
    text: Color32::from_rgb(0xe0, 0xe0, 0xe0),
    text_muted: Color32::from_rgb(0x88, 0x88, 0x88),
    hover: Color32::from_rgb(0x3a, 0x3a, 0x3a),
    selection_alpha: 0.3,
};

const LIGHT: Palette = Palette {
    panel: Color32::from_rgb(0xff, 0xff, 0xff),
    faint: Color32::from_rgb(0xf5, 0xf5, 0xf5),
    input: Color32::from_rgb(0xf0, 0xf0, 0xf0),
    border: Color32::from_rgb(0xd0, 0xd0, 0xd0),
    border_light: Color32::from_rgb(0xc0, 0xc0, 0xc0),
    text: Color32::from_rgb(0x1a, 0x1a, 0x1a),
    text_muted: Color32::from_rgb(0x66, 0x66, 0x66),
    hover: Color32::from_rgb(0xdd, 0xdd, 0xdd),
    selection_alpha: 0.2,
};

/// Configure style based on current visuals (dark/light mode).
pub fn configure_style(ctx: &egui::Context) {
    let visuals = if ctx.style().visuals.dark_mode {
        build_visuals(Visuals::dark(), &DARK)
    } else {
        build_visuals(Visuals::light(), &LIGHT)
    };
    ctx.set_visuals(visuals);
    configure_fonts_and_spacing(ctx);
}

fn build_visuals(mut visuals: Visuals, palette: &Palette) -> Visuals {
    visuals.window_fill = palette.panel;
    visuals.panel_fill = palette.panel;
    visuals.faint_bg_color = palette.faint;
    visuals.extreme_bg_color = palette.input;

    let widgets = &mut visuals.widgets;
    for (state, fill, fg, border) in [
        (&mut widgets.noninteractive, palette.input, palette.text_muted, palette.border),
        (&mut widgets.inactive, palette.input, palette.text, palette.border_light),
        (&mut widgets.hovered, palette.hover, palette.text, accent::BLUE),
        (&mut widgets.active, accent::BLUE, Color32::WHITE, accent::BLUE),
        (&mut widgets.open, palette.input, palette.text, palette.border_light),
    ] {
        state.bg_fill = fill;
        state.fg_stroke = Stroke::new(1.0, fg);
        state.bg_stroke = Stroke::new(1.0, border);
        state.rounding = Rounding::same(4.0);
    }

    visuals.selection.bg_fill = accent::BLUE.gamma_multiply(palette.selection_alpha);
    visuals.selection.stroke = Stroke::new(1.0, accent::BLUE);
    visuals
}

/// Configure fonts and spacing (theme-independent).
fn configure_fonts_and_spacing(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.text_styles = [
        (TextStyle::Small, FontId::new(10.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Heading, FontId::new(14.0, FontFamily::Monospace)),
        (
            TextStyle::Monospace,
            FontId::new(12.0, FontFamily::Monospace),
        ),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.indent = 16.0;

    ctx.set_style(style);
}

/// Style a button as the primary action button.
pub fn primary_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(Color32::WHITE))
        .fill(accent::GREEN)
        .rounding(Rounding::same(4.0))
}

/// Create a form label.
pub fn form_label(text: &str) -> egui::RichText {
    egui::RichText::new(text.to_uppercase()).size(10.0)
}

/// Create a stat label (left column).
pub fn stat_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0).weak()
}

/// Create a stat value (right column).
pub fn stat_value(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0)
}
