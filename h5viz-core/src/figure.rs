//! Figures: an RGBA canvas plus the layout of the panels drawn on it.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use log::debug;
use ndarray::Array3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::util::{f64_to_u32_saturating, u32_to_usize, usize_to_u32};
use crate::{Error, Result};

/// Resolution that a figure's native pixel size corresponds to.
pub const BASE_DPI: u32 = 100;

/// One panel (axes) of a figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
    /// Left edge in canvas pixels.
    pub x: u32,
    /// Top edge in canvas pixels.
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Panel title, shown by hosts that render text.
    pub title: Option<String>,
}

/// A rendered figure.
#[derive(Debug, Clone)]
pub struct Figure {
    canvas: RgbaImage,
    panels: Vec<Panel>,
}

impl Figure {
    /// Create a blank figure filled with `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> Self {
        Self {
            canvas: RgbaImage::from_pixel(width, height, Rgba(background)),
            panels: Vec::new(),
        }
    }

    /// Wrap a single raster as a one-panel figure.
    #[must_use]
    pub fn from_image(image: RgbaImage, title: Option<String>) -> Self {
        let (width, height) = image.dimensions();
        Self {
            canvas: image,
            panels: vec![Panel {
                row: 0,
                col: 0,
                x: 0,
                y: 0,
                width,
                height,
                title,
            }],
        }
    }

    /// Draw `image` at `(x, y)` and record it as a panel.
    pub fn add_panel(&mut self, image: &RgbaImage, mut panel: Panel) {
        imageops::replace(
            &mut self.canvas,
            image,
            i64::from(panel.x),
            i64::from(panel.y),
        );
        panel.width = image.width();
        panel.height = image.height();
        self.panels.push(panel);
    }

    /// Draw a one-pixel frame around a panel's bounds.
    pub fn frame_panel(&mut self, index: usize, color: [u8; 4]) {
        let Some(panel) = self.panels.get(index) else {
            return;
        };
        let (cw, ch) = self.canvas.dimensions();
        let x0 = panel.x.saturating_sub(1);
        let y0 = panel.y.saturating_sub(1);
        let x1 = (panel.x + panel.width).min(cw.saturating_sub(1));
        let y1 = (panel.y + panel.height).min(ch.saturating_sub(1));
        for x in x0..=x1 {
            self.canvas.put_pixel(x, y0, Rgba(color));
            self.canvas.put_pixel(x, y1, Rgba(color));
        }
        for y in y0..=y1 {
            self.canvas.put_pixel(x0, y, Rgba(color));
            self.canvas.put_pixel(x1, y, Rgba(color));
        }
    }

    /// The figure's raster.
    #[must_use]
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Consume the figure, returning its raster.
    #[must_use]
    pub fn into_canvas(self) -> RgbaImage {
        self.canvas
    }

    /// Panel layout, in drawing order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }
}

/// Convert a figure to a `(height, width, channels)` byte array.
///
/// With `keep_alpha` the channels are RGBA, otherwise RGB.
#[must_use]
pub fn plot_to_image(figure: &Figure, keep_alpha: bool) -> Array3<u8> {
    let canvas = figure.canvas();
    let channels = if keep_alpha { 4 } else { 3 };
    let shape = (
        u32_to_usize(canvas.height()),
        u32_to_usize(canvas.width()),
        channels,
    );
    Array3::from_shape_fn(shape, |(y, x, c)| {
        canvas.get_pixel(usize_to_u32(x), usize_to_u32(y)).0[c]
    })
}

/// Options for [`savefig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaveOptions {
    /// Output resolution; the canvas is scaled by `dpi / BASE_DPI`.
    pub dpi: u32,
    /// Create missing parent directories.
    pub mkdir: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            dpi: 300,
            mkdir: true,
        }
    }
}

/// Save a figure, inferring the format from the path's suffix.
///
/// # Errors
/// Returns [`Error::MissingExtension`] if the path has no suffix,
/// [`Error::UnsupportedFormat`] if the suffix is not a writable image format,
/// or an I/O / encoding error.
pub fn savefig<P: AsRef<Path>>(figure: &Figure, path: P, options: &SaveOptions) -> Result<()> {
    let path = path.as_ref();
    let Some(ext) = path.extension().filter(|ext| !ext.is_empty()) else {
        return Err(Error::MissingExtension(path.to_path_buf()));
    };
    let format = ImageFormat::from_extension(ext)
        .filter(|format| format.writing_enabled())
        .ok_or_else(|| Error::UnsupportedFormat(ext.to_string_lossy().into_owned()))?;

    if options.mkdir {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    let scaled = scale_for_dpi(figure.canvas(), options.dpi);
    let image = DynamicImage::ImageRgba8(scaled);
    if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, format)?;
    } else {
        image.save_with_format(path, format)?;
    }
    debug!(
        "Saved {}x{} figure to {} at {} dpi",
        figure.width(),
        figure.height(),
        path.display(),
        options.dpi
    );
    Ok(())
}

fn scale_for_dpi(canvas: &RgbaImage, dpi: u32) -> RgbaImage {
    if dpi == BASE_DPI || dpi == 0 {
        return canvas.clone();
    }
    let factor = f64::from(dpi) / f64::from(BASE_DPI);
    let width = f64_to_u32_saturating(f64::from(canvas.width()) * factor).max(1);
    let height = f64_to_u32_saturating(f64::from(canvas.height()) * factor).max(1);
    imageops::resize(canvas, width, height, FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn checker() -> Figure {
        let img = RgbaImage::from_fn(4, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 128])
            }
        });
        Figure::from_image(img, Some("checker".to_string()))
    }

    #[test]
    fn test_plot_to_image_shapes() {
        let fig = checker();
        let rgba = plot_to_image(&fig, true);
        assert_eq!(rgba.shape(), &[2, 4, 4]);
        assert_eq!(rgba[[0, 1, 3]], 128);
        let rgb = plot_to_image(&fig, false);
        assert_eq!(rgb.shape(), &[2, 4, 3]);
        assert_eq!(rgb[[0, 0, 0]], 255);
        assert_eq!(rgb[[0, 1, 2]], 255);
    }

    #[test]
    fn test_savefig_requires_suffix() {
        let dir = tempdir().unwrap();
        let err = savefig(&checker(), dir.path().join("figure"), &SaveOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingExtension(_)));
    }

    #[test]
    fn test_savefig_unknown_suffix() {
        let dir = tempdir().unwrap();
        let err = savefig(&checker(), dir.path().join("figure.xyz"), &SaveOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_savefig_scales_and_mkdirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("figure.png");
        savefig(&checker(), &path, &SaveOptions { dpi: 200, mkdir: true }).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (8, 4));
    }

    #[test]
    fn test_savefig_without_mkdir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("figure.png");
        let options = SaveOptions {
            dpi: BASE_DPI,
            mkdir: false,
        };
        assert!(savefig(&checker(), &path, &options).is_err());
    }

    #[test]
    fn test_frame_panel() {
        let mut fig = Figure::new(10, 10, [0, 0, 0, 255]);
        let tile = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        fig.add_panel(
            &tile,
            Panel {
                row: 0,
                col: 0,
                x: 3,
                y: 3,
                width: 0,
                height: 0,
                title: None,
            },
        );
        fig.frame_panel(0, [200, 200, 200, 255]);
        assert_eq!(fig.panels()[0].width, 4);
        assert_eq!(fig.canvas().get_pixel(2, 2).0, [200, 200, 200, 255]);
        assert_eq!(fig.canvas().get_pixel(4, 4).0, [9, 9, 9, 255]);
    }
}
