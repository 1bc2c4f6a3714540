//! Image grids.

use image::RgbaImage;
use log::debug;
use ndarray::{Array2, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::colormap::{Colormap, Preset};
use crate::figure::{Figure, Panel};
use crate::render::{render_image, Clim};
use crate::util::usize_to_u32;
use crate::{Error, Result};

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
const FRAME: [u8; 4] = [0, 0, 0, 255];

/// Subscript `(row, col)` of every cell in a `rows x cols` grid, in
/// column-major order.
#[must_use]
pub fn subplot_indices(rows: usize, cols: usize) -> Vec<(usize, usize)> {
    (0..rows * cols).map(|k| (k % rows, k / rows)).collect()
}

/// Layout and appearance options for [`plot_image_grid`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    /// `(rows, cols)`.
    pub grid_shape: (usize, usize),
    /// Palette used when no explicit colormap is passed.
    pub preset: Preset,
    /// Draw a frame around each panel.
    pub show_axis: bool,
    /// Gap between panels in pixels.
    pub padding: u32,
    /// Shared color limits; each image autoscales when `None`.
    pub clim: Option<Clim>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            grid_shape: (10, 10),
            preset: Preset::Viridis,
            show_axis: false,
            padding: 4,
            clim: None,
        }
    }
}

/// Plot a grid of 2-D images.
///
/// Images fill cells in column-major order. Cells beyond the number of images
/// stay empty and images beyond the number of cells are not drawn. Each cell
/// is as large as the largest image.
///
/// # Errors
/// Returns an error if `images` is empty, the grid has no cells, or the
/// number of labels differs from the number of images.
pub fn plot_image_grid(
    images: &[ArrayView2<'_, f64>],
    labels: Option<&[String]>,
    cmap: Option<&Colormap>,
    options: &GridOptions,
) -> Result<Figure> {
    if images.is_empty() {
        return Err(Error::EmptyStack);
    }
    let (rows, cols) = options.grid_shape;
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidArgument(format!(
            "grid shape must be non-zero, got {rows}x{cols}"
        )));
    }
    if let Some(labels) = labels {
        if labels.len() != images.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![images.len()],
                actual: vec![labels.len()],
            });
        }
    }

    let default_cmap;
    let cmap = if let Some(cmap) = cmap {
        cmap
    } else {
        default_cmap = options.preset.colormap();
        &default_cmap
    };

    let cells = subplot_indices(rows, cols);
    let n_drawn = images.len().min(cells.len());
    let cell_h = images.iter().map(|img| img.nrows()).max().unwrap_or(0);
    let cell_w = images.iter().map(|img| img.ncols()).max().unwrap_or(0);
    let pad = options.padding;
    let cell_w32 = usize_to_u32(cell_w);
    let cell_h32 = usize_to_u32(cell_h);
    let width = usize_to_u32(cols) * (cell_w32 + pad) + pad;
    let height = usize_to_u32(rows) * (cell_h32 + pad) + pad;

    debug!("Rendering {n_drawn} images into a {rows}x{cols} grid ({width}x{height} px)");

    let rendered: Vec<RgbaImage> = images[..n_drawn]
        .par_iter()
        .map(|img| render_image(*img, cmap, options.clim))
        .collect();

    let mut figure = Figure::new(width, height, BACKGROUND);
    for (index, (tile, &(row, col))) in rendered.iter().zip(&cells).enumerate() {
        let panel = Panel {
            row,
            col,
            x: pad + usize_to_u32(col) * (cell_w32 + pad),
            y: pad + usize_to_u32(row) * (cell_h32 + pad),
            width: tile.width(),
            height: tile.height(),
            title: labels.map(|labels| labels[index].clone()),
        };
        figure.add_panel(tile, panel);
        if options.show_axis {
            figure.frame_panel(index, FRAME);
        }
    }
    Ok(figure)
}

/// Split a `(n, height, width)` stack into per-frame views.
#[must_use]
pub fn stack_views<'a>(stack: &'a ArrayView3<'a, f64>) -> Vec<ArrayView2<'a, f64>> {
    stack.axis_iter(Axis(0)).collect()
}

/// Convert owned frames into views.
#[must_use]
pub fn frame_views(frames: &[Array2<f64>]) -> Vec<ArrayView2<'_, f64>> {
    frames.iter().map(Array2::view).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_subplot_indices_column_major() {
        let idx = subplot_indices(2, 3);
        assert_eq!(idx, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_grid_layout() {
        let frames: Vec<Array2<f64>> = (0..3)
            .map(|i| Array2::from_elem((4, 5), f64::from(i)))
            .collect();
        let labels: Vec<String> = (0..3).map(|i| format!("frame {i}")).collect();
        let options = GridOptions {
            grid_shape: (2, 2),
            padding: 1,
            ..GridOptions::default()
        };
        let fig = plot_image_grid(&frame_views(&frames), Some(&labels), None, &options).unwrap();
        assert_eq!(fig.width(), 2 * (5 + 1) + 1);
        assert_eq!(fig.height(), 2 * (4 + 1) + 1);
        let panels = fig.panels();
        assert_eq!(panels.len(), 3);
        assert_eq!((panels[1].row, panels[1].col), (1, 0));
        assert_eq!((panels[2].x, panels[2].y), (7, 1));
        assert_eq!(panels[2].title.as_deref(), Some("frame 2"));
        // Fourth cell stays background.
        assert_eq!(fig.canvas().get_pixel(8, 7).0, BACKGROUND);
    }

    #[test]
    fn test_extra_images_not_drawn() {
        let frames: Vec<Array2<f64>> = (0..5).map(|_| Array2::zeros((2, 2))).collect();
        let options = GridOptions {
            grid_shape: (1, 2),
            ..GridOptions::default()
        };
        let fig = plot_image_grid(&frame_views(&frames), None, None, &options).unwrap();
        assert_eq!(fig.panels().len(), 2);
    }

    #[test]
    fn test_label_mismatch() {
        let frames = vec![Array2::<f64>::zeros((2, 2))];
        let labels = vec!["a".to_string(), "b".to_string()];
        let err = plot_image_grid(
            &frame_views(&frames),
            Some(&labels),
            None,
            &GridOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_empty_grid_errors() {
        let err = plot_image_grid(&[], None, None, &GridOptions::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyStack));
    }

    #[test]
    fn test_show_axis_frames() {
        let frames = vec![Array2::<f64>::zeros((3, 3))];
        let options = GridOptions {
            grid_shape: (1, 1),
            padding: 2,
            show_axis: true,
            ..GridOptions::default()
        };
        let fig = plot_image_grid(&frame_views(&frames), None, None, &options).unwrap();
        assert_eq!(fig.canvas().get_pixel(1, 1).0, FRAME);
    }
}
