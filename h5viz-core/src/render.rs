//! Mapping scalar images through a colormap into RGBA rasters.

use image::{Rgba, RgbaImage};
use ndarray::ArrayView2;

use crate::colormap::Colormap;
use crate::util::{u32_to_usize, usize_to_u32};

/// Color limits `(vmin, vmax)` used to normalize values before lookup.
pub type Clim = (f64, f64);

/// Compute autoscaled color limits from the finite values of an image.
///
/// Returns `(0.0, 1.0)` when the image has no finite values.
#[must_use]
pub fn auto_clim(image: ArrayView2<'_, f64>) -> Clim {
    let (min, max) = image
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min.is_finite() {
        (min, max)
    } else {
        (0.0, 1.0)
    }
}

/// Normalize a value into `[0, 1]` given color limits.
///
/// Values outside the limits fall outside `[0, 1]` so the colormap can apply
/// its under/over colors. A degenerate range maps everything to 0.
#[must_use]
pub fn normalize(value: f64, clim: Clim) -> f64 {
    let (vmin, vmax) = clim;
    let range = vmax - vmin;
    if value.is_nan() {
        return f64::NAN;
    }
    if range <= 0.0 {
        return 0.0;
    }
    (value - vmin) / range
}

/// Render a 2-D image through a colormap.
///
/// Row 0 of the array becomes the top row of the raster. When `clim` is
/// `None` the limits are taken from the image's finite minimum and maximum.
#[must_use]
pub fn render_image(image: ArrayView2<'_, f64>, cmap: &Colormap, clim: Option<Clim>) -> RgbaImage {
    let clim = clim.unwrap_or_else(|| auto_clim(image));
    let (height, width) = image.dim();
    let mut raster = RgbaImage::new(usize_to_u32(width), usize_to_u32(height));

    for ((row, col), &value) in image.indexed_iter() {
        let rgba = cmap.sample_u8(normalize(value, clim));
        raster.put_pixel(usize_to_u32(col), usize_to_u32(row), Rgba(rgba));
    }
    raster
}

/// Render a colormap as a horizontal bar, low values on the left.
#[must_use]
pub fn colorbar(cmap: &Colormap, width: u32, height: u32) -> RgbaImage {
    let width = width.max(1);
    let denom = f64::from(width.saturating_sub(1).max(1));
    let column: Vec<[u8; 4]> = (0..width)
        .map(|x| cmap.sample_u8(f64::from(x) / denom))
        .collect();
    RgbaImage::from_fn(width, height.max(1), |x, _| Rgba(column[u32_to_usize(x)]))
}
