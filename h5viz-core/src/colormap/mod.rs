//! Colormap construction and lookup.
//!
//! A [`Colormap`] is an ordered list of control points over `[0, 1]` that is
//! sampled into a lookup table of `N` entries, plus dedicated colors for
//! values below the range (`under`), above it (`over`) and NaN (`bad`).

mod conjunctive;
mod preset;

pub use conjunctive::ConjunctiveColormap;
pub use preset::Preset;

use log::info;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::util::{unit_to_u8, usize_to_f32};
use crate::{Error, Result};

/// RGB color with channels in `[0, 1]`.
pub type Rgb = [f32; 3];

/// RGBA color with channels in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Default lookup-table size.
pub const DEFAULT_LUT_SIZE: usize = 256;
/// Default color for values below the colormap range.
pub const DEFAULT_UNDER: Rgb = [0.0, 0.0, 0.0];
/// Default color for values above the colormap range.
pub const DEFAULT_OVER: Rgb = [0.5, 0.5, 0.5];
/// Default color for NaN values.
pub const DEFAULT_BAD: Rgb = [0.9, 0.9, 0.9];

/// Hue wheel used by [`Colormap::simple_default`].
pub const HUE_WHEEL: [Rgb; 12] = [
    [1.0, 0.0, 0.0],
    [1.0, 0.6, 0.0],
    [0.9, 0.9, 0.0],
    [0.6, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 0.6],
    [0.0, 0.8, 0.8],
    [0.0, 0.6, 1.0],
    [0.0, 0.0, 1.0],
    [0.6, 0.0, 1.0],
    [0.8, 0.0, 0.8],
    [1.0, 0.0, 0.6],
];

/// A single control point of a colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub position: f32,
    /// Color at this position.
    pub color: Rgb,
}

impl ColorStop {
    /// Creates a control point.
    #[must_use]
    pub const fn new(position: f32, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Flavor of randomly generated label colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RandomKind {
    /// Strong colors: each color is scaled so its brightest channel is 1.
    #[default]
    Bright,
    /// Pastel colors with every channel in `[0.6, 0.95)`.
    Soft,
    /// Raw uniform RGB.
    Random,
}

/// Options for [`Colormap::random`].
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RandomOptions {
    pub kind: RandomKind,
    pub first_color_black: bool,
    pub last_color_black: bool,
    pub verbose: bool,
}

/// Linear-segmented colormap with a quantized lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    stops: Vec<ColorStop>,
    lut: Vec<Rgb>,
    under: Rgb,
    over: Rgb,
    bad: Rgb,
}

impl Colormap {
    /// Build a colormap from control points.
    ///
    /// # Errors
    /// Returns an error if there are fewer than two points, if positions are
    /// not strictly increasing from 0 to 1, or if a channel lies outside
    /// `[0, 1]`.
    pub fn from_stops(name: impl Into<String>, stops: Vec<ColorStop>) -> Result<Self> {
        validate_stops(&stops)?;
        let mut cmap = Self {
            name: name.into(),
            stops,
            lut: Vec::new(),
            under: DEFAULT_UNDER,
            over: DEFAULT_OVER,
            bad: DEFAULT_BAD,
        };
        cmap.rebuild_lut(DEFAULT_LUT_SIZE);
        Ok(cmap)
    }

    /// Build a colormap from evenly spaced colors.
    ///
    /// # Errors
    /// Returns [`Error::TooFewColors`] for fewer than two colors.
    pub fn simple(colors: &[Rgb]) -> Result<Self> {
        Self::from_list("none", colors, DEFAULT_LUT_SIZE)
    }

    /// Build the default hue-wheel colormap.
    #[must_use]
    pub fn simple_default() -> Self {
        let stops = evenly_spaced(&HUE_WHEEL);
        let mut cmap = Self {
            name: "none".to_string(),
            stops,
            lut: Vec::new(),
            under: DEFAULT_UNDER,
            over: DEFAULT_OVER,
            bad: DEFAULT_BAD,
        };
        cmap.rebuild_lut(DEFAULT_LUT_SIZE);
        cmap
    }

    /// Build a colormap from named or hex colors (e.g. `["w", "r"]`).
    ///
    /// # Errors
    /// Returns an error if a color cannot be parsed or fewer than two are given.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let colors = names
            .iter()
            .map(|name| parse_color(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::simple(&colors)
    }

    /// Build evenly spaced colors with a lookup table of `n` entries.
    ///
    /// # Errors
    /// Returns [`Error::TooFewColors`] for fewer than two colors.
    pub fn from_list(name: impl Into<String>, colors: &[Rgb], n: usize) -> Result<Self> {
        if colors.len() < 2 {
            return Err(Error::TooFewColors(colors.len()));
        }
        let mut cmap = Self::from_stops(name, evenly_spaced(colors))?;
        cmap.rebuild_lut(n.max(2));
        Ok(cmap)
    }

    /// Create a random colormap with one color per label.
    ///
    /// Useful for segmentation label images.
    ///
    /// # Errors
    /// Returns [`Error::TooFewColors`] when `n_labels < 2`.
    pub fn random<R: Rng + ?Sized>(
        n_labels: usize,
        options: RandomOptions,
        rng: &mut R,
    ) -> Result<Self> {
        if n_labels < 2 {
            return Err(Error::TooFewColors(n_labels));
        }
        if options.verbose {
            info!("Number of labels: {n_labels}");
        }

        let mut colors: Vec<Rgb> = (0..n_labels)
            .map(|_| match options.kind {
                RandomKind::Soft => [
                    rng.gen_range(0.6..0.95),
                    rng.gen_range(0.6..0.95),
                    rng.gen_range(0.6..0.95),
                ],
                RandomKind::Bright | RandomKind::Random => [rng.gen(), rng.gen(), rng.gen()],
            })
            .collect();

        if options.kind == RandomKind::Bright {
            for color in &mut colors {
                let max = color.iter().copied().fold(0.0_f32, f32::max);
                if max > 0.0 {
                    for channel in color.iter_mut() {
                        *channel /= max;
                    }
                }
            }
        }
        if options.first_color_black {
            colors[0] = [0.0; 3];
        }
        if options.last_color_black {
            colors[n_labels - 1] = [0.0; 3];
        }

        Self::from_list("new_map", &colors, n_labels)
    }

    /// Replace the out-of-range and NaN colors.
    #[must_use]
    pub fn with_extremes(mut self, under: Rgb, over: Rgb, bad: Rgb) -> Self {
        self.under = under;
        self.over = over;
        self.bad = bad;
        self
    }

    /// Resample the lookup table to `n` entries (at least two).
    #[must_use]
    pub fn resampled(mut self, n: usize) -> Self {
        self.rebuild_lut(n.max(2));
        self
    }

    /// Colormap name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Control points.
    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Number of lookup-table entries.
    #[must_use]
    pub fn lut_size(&self) -> usize {
        self.lut.len()
    }

    /// Color for values below the range.
    #[must_use]
    pub fn under(&self) -> Rgb {
        self.under
    }

    /// Color for values above the range.
    #[must_use]
    pub fn over(&self) -> Rgb {
        self.over
    }

    /// Color for NaN values.
    #[must_use]
    pub fn bad(&self) -> Rgb {
        self.bad
    }

    /// Look up a normalized value.
    ///
    /// NaN returns `bad`, values below 0 return `under`, values above 1
    /// return `over`. Everything else is quantized into the lookup table.
    #[must_use]
    pub fn sample(&self, value: f64) -> Rgba {
        let rgb = self.sample_rgb(value);
        [rgb[0], rgb[1], rgb[2], 1.0]
    }

    /// Look up a normalized value and return RGBA bytes.
    #[must_use]
    pub fn sample_u8(&self, value: f64) -> [u8; 4] {
        let rgb = self.sample_rgb(value);
        [unit_to_u8(rgb[0]), unit_to_u8(rgb[1]), unit_to_u8(rgb[2]), 255]
    }

    fn sample_rgb(&self, value: f64) -> Rgb {
        if value.is_nan() {
            return self.bad;
        }
        if value < 0.0 {
            return self.under;
        }
        if value > 1.0 {
            return self.over;
        }
        self.lut[lut_index(value, self.lut.len())]
    }

    /// Interpolate the control points at `x` without quantization.
    #[must_use]
    pub fn interpolate(&self, x: f32) -> Rgb {
        let x = x.clamp(0.0, 1.0);
        let upper = self
            .stops
            .iter()
            .position(|stop| stop.position >= x)
            .unwrap_or(self.stops.len() - 1);
        if upper == 0 || self.stops[upper].position == x {
            return self.stops[upper].color;
        }
        let lo = self.stops[upper - 1];
        let hi = self.stops[upper];
        let span = hi.position - lo.position;
        let t = if span > 0.0 {
            (x - lo.position) / span
        } else {
            1.0
        };
        [
            lo.color[0] + (hi.color[0] - lo.color[0]) * t,
            lo.color[1] + (hi.color[1] - lo.color[1]) * t,
            lo.color[2] + (hi.color[2] - lo.color[2]) * t,
        ]
    }

    fn rebuild_lut(&mut self, n: usize) {
        let denom = usize_to_f32(n - 1);
        self.lut = (0..n)
            .map(|i| self.interpolate(usize_to_f32(i) / denom))
            .collect();
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Preset::Viridis.colormap()
    }
}

/// Quantize `value` in `[0, 1]` into a lookup-table index.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lut_index(value: f64, n: usize) -> usize {
    let scaled = (value * crate::util::usize_to_f64(n)).floor();
    (scaled as usize).min(n - 1)
}

fn evenly_spaced(colors: &[Rgb]) -> Vec<ColorStop> {
    let denom = usize_to_f32(colors.len().saturating_sub(1).max(1));
    colors
        .iter()
        .enumerate()
        .map(|(i, &color)| ColorStop::new(usize_to_f32(i) / denom, color))
        .collect()
}

fn validate_stops(stops: &[ColorStop]) -> Result<()> {
    if stops.len() < 2 {
        return Err(Error::TooFewColors(stops.len()));
    }
    let first = stops[0].position;
    let last = stops[stops.len() - 1].position;
    if first != 0.0 || last != 1.0 {
        return Err(Error::InvalidColormap(format!(
            "positions must span [0, 1], got [{first}, {last}]"
        )));
    }
    for pair in stops.windows(2) {
        if pair[1].position <= pair[0].position {
            return Err(Error::InvalidColormap(format!(
                "positions must increase: {} then {}",
                pair[0].position, pair[1].position
            )));
        }
    }
    if let Some(stop) = stops
        .iter()
        .find(|stop| stop.color.iter().any(|c| !(0.0..=1.0).contains(c)))
    {
        return Err(Error::InvalidColormap(format!(
            "channel out of [0, 1] at position {}",
            stop.position
        )));
    }
    Ok(())
}

/// Parse a color given as a single-letter or full name, or `#rrggbb` hex.
///
/// # Errors
/// Returns [`Error::UnknownColor`] if the string is not recognized.
pub fn parse_color(name: &str) -> Result<Rgb> {
    let trimmed = name.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| Error::UnknownColor(name.to_string()));
    }
    let rgb = match trimmed.to_ascii_lowercase().as_str() {
        "r" | "red" => [1.0, 0.0, 0.0],
        "g" => [0.0, 0.5, 0.0],
        "green" => [0.0, 0.5, 0.0],
        "lime" => [0.0, 1.0, 0.0],
        "b" | "blue" => [0.0, 0.0, 1.0],
        "c" => [0.0, 0.75, 0.75],
        "cyan" => [0.0, 1.0, 1.0],
        "m" => [0.75, 0.0, 0.75],
        "magenta" => [1.0, 0.0, 1.0],
        "y" => [0.75, 0.75, 0.0],
        "yellow" => [1.0, 1.0, 0.0],
        "k" | "black" => [0.0, 0.0, 0.0],
        "w" | "white" => [1.0, 1.0, 1.0],
        "gray" | "grey" => [0.5, 0.5, 0.5],
        "orange" => [1.0, 0.647, 0.0],
        _ => return Err(Error::UnknownColor(name.to_string())),
    };
    Ok(rgb)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
