//! Polygon ROI selection on an image.
//!
//! [`RoiSelector`] is driven by a host UI: pointer clicks add vertices to the
//! in-progress polygon, "new ROI" closes it and starts another, and
//! "confirm" closes the last one, detaches input and rasterizes every polygon
//! into a boolean mask.
//!
//! Coordinates are `(x, y)` = `(column, row)` with pixel centers on integer
//! positions, so the image spans `-0.5..=width - 0.5` horizontally.

use image::{Rgba, RgbaImage};
use log::{debug, info};
use ndarray::{Array2, ArrayView2};

use crate::error::RoiError;
use crate::util::{f64_to_usize_bounded, usize_to_f64};

/// A polygon vertex `(x, y)`.
pub type Point = (f64, f64);

const OUTLINE: [u8; 4] = [255, 255, 255, 255];
const OUTLINE_THICKNESS: i64 = 2;

/// Selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Clicks add points to the in-progress polygon.
    #[default]
    Collecting,
    /// A polygon was just closed with "new ROI"; the next click starts the
    /// following polygon.
    RoiConfirmed,
    /// Input is detached and masks are computed.
    Finished,
}

/// Result of feeding a click to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The point was appended; the overlay should be redrawn.
    Added,
    /// The click was outside the image or input is detached.
    Ignored,
}

/// Interactive polygon ROI selection state machine.
#[derive(Debug, Clone)]
pub struct RoiSelector {
    height: usize,
    width: usize,
    completed: Vec<Vec<Point>>,
    current: Vec<Point>,
    state: SelectionState,
    masks: Option<Vec<Array2<bool>>>,
}

impl RoiSelector {
    /// Create a selector for an image of `height x width` pixels.
    ///
    /// # Errors
    /// Returns [`RoiError::EmptyImage`] if either dimension is zero.
    pub fn new(height: usize, width: usize) -> Result<Self, RoiError> {
        if height == 0 || width == 0 {
            return Err(RoiError::EmptyImage { height, width });
        }
        Ok(Self {
            height,
            width,
            completed: Vec::new(),
            current: Vec::new(),
            state: SelectionState::Collecting,
            masks: None,
        })
    }

    /// Create a selector sized to `image`.
    ///
    /// # Errors
    /// Returns [`RoiError::EmptyImage`] for an empty image.
    pub fn for_image(image: ArrayView2<'_, f64>) -> Result<Self, RoiError> {
        let (height, width) = image.dim();
        Self::new(height, width)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Whether input has been detached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == SelectionState::Finished
    }

    /// `(height, width)` of the source image.
    #[must_use]
    pub fn dim(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Whether `(x, y)` lies on the image.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x.is_finite()
            && y.is_finite()
            && (-0.5..=usize_to_f64(self.width) - 0.5).contains(&x)
            && (-0.5..=usize_to_f64(self.height) - 0.5).contains(&y)
    }

    /// Feed a pointer click.
    pub fn click(&mut self, x: f64, y: f64) -> ClickOutcome {
        if self.is_finished() || !self.contains_point(x, y) {
            return ClickOutcome::Ignored;
        }
        self.current.push((x, y));
        self.state = SelectionState::Collecting;
        debug!(
            "ROI {} point {} at ({x:.1}, {y:.1})",
            self.completed.len() + 1,
            self.current.len()
        );
        ClickOutcome::Added
    }

    /// Close the in-progress polygon and start a new one.
    ///
    /// # Errors
    /// Returns [`RoiError::Finished`] after [`confirm`](Self::confirm).
    pub fn new_roi(&mut self) -> Result<(), RoiError> {
        if self.is_finished() {
            return Err(RoiError::Finished);
        }
        self.completed.push(std::mem::take(&mut self.current));
        self.state = SelectionState::RoiConfirmed;
        Ok(())
    }

    /// Close the last polygon, detach input and compute one mask per polygon.
    ///
    /// # Errors
    /// Returns [`RoiError::Finished`] if called twice.
    pub fn confirm(&mut self) -> Result<&[Array2<bool>], RoiError> {
        if self.is_finished() {
            return Err(RoiError::Finished);
        }
        self.completed.push(std::mem::take(&mut self.current));
        self.state = SelectionState::Finished;

        let masks: Vec<Array2<bool>> = self
            .completed
            .iter()
            .map(|polygon| polygon_mask(polygon, self.height, self.width))
            .collect();
        info!("Computed {} ROI masks", masks.len());
        Ok(self.masks.insert(masks).as_slice())
    }

    /// Completed polygons.
    #[must_use]
    pub fn polygons(&self) -> &[Vec<Point>] {
        &self.completed
    }

    /// Polygon currently being built.
    #[must_use]
    pub fn current_polygon(&self) -> &[Point] {
        &self.current
    }

    /// Masks, available once finished. Length matches [`polygons`](Self::polygons).
    #[must_use]
    pub fn masks(&self) -> Option<&[Array2<bool>]> {
        self.masks.as_deref()
    }

    /// Draw every polygon as a closed outline on a copy of `base`.
    ///
    /// The in-progress polygon is drawn once it has at least two points.
    #[must_use]
    pub fn overlay(&self, base: &RgbaImage) -> RgbaImage {
        let mut image = base.clone();
        for polygon in &self.completed {
            draw_closed_polyline(&mut image, polygon);
        }
        if self.current.len() > 1 {
            draw_closed_polyline(&mut image, &self.current);
        }
        image
    }
}

/// Rasterize a polygon into a `height x width` mask using the even-odd rule
/// at pixel centers.
#[must_use]
pub fn polygon_mask(vertices: &[Point], height: usize, width: usize) -> Array2<bool> {
    let mut mask = Array2::from_elem((height, width), false);
    if vertices.len() < 3 {
        return mask;
    }
    let (min_x, max_x, min_y, max_y) = bounds(vertices);
    let col_range = pixel_range(min_x, max_x, width);
    let row_range = pixel_range(min_y, max_y, height);
    for row in row_range {
        for col in col_range.clone() {
            if point_in_polygon((usize_to_f64(col), usize_to_f64(row)), vertices) {
                mask[[row, col]] = true;
            }
        }
    }
    mask
}

/// Unsigned polygon area (shoelace formula).
#[must_use]
pub fn polygon_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut area2 = 0.0;
    for i in 0..n {
        let (x1, y1) = vertices[i];
        let (x2, y2) = vertices[(i + 1) % n];
        area2 += x1 * y2 - x2 * y1;
    }
    area2.abs() * 0.5
}

/// Even-odd point-in-polygon test.
#[must_use]
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let (px, py) = point;
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        let intersects = ((yi > py) != (yj > py))
            && (px < (xj - xi) * (py - yi) / (yj - yi + f64::EPSILON) + xi);
        if intersects {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn bounds(vertices: &[Point]) -> (f64, f64, f64, f64) {
    vertices.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), &(x, y)| {
            (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
        },
    )
}

/// Pixel indices whose centers fall in `[lo, hi]`, clipped to `0..len`.
fn pixel_range(lo: f64, hi: f64, len: usize) -> std::ops::Range<usize> {
    if hi < 0.0 {
        return 0..0;
    }
    let start = f64_to_usize_bounded(lo.ceil().max(0.0), len).unwrap_or(len);
    let end = f64_to_usize_bounded(hi.floor(), len).map_or(len, |v| v + 1);
    start..end.max(start)
}

#[allow(clippy::cast_possible_truncation)]
fn round_to_i64(value: f64) -> i64 {
    value.round() as i64
}

fn draw_closed_polyline(image: &mut RgbaImage, polygon: &[Point]) {
    match polygon.len() {
        0 => {}
        1 => stamp(image, round_to_i64(polygon[0].0), round_to_i64(polygon[0].1)),
        n => {
            for i in 0..n {
                draw_segment(image, polygon[i], polygon[(i + 1) % n]);
            }
        }
    }
}

/// Bresenham line with a square brush.
fn draw_segment(image: &mut RgbaImage, from: Point, to: Point) {
    let (mut x0, mut y0) = (round_to_i64(from.0), round_to_i64(from.1));
    let (x1, y1) = (round_to_i64(to.0), round_to_i64(to.1));
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp(image, x0, y0);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn stamp(image: &mut RgbaImage, x: i64, y: i64) {
    let half = OUTLINE_THICKNESS / 2;
    for oy in -half..OUTLINE_THICKNESS - half {
        for ox in -half..OUTLINE_THICKNESS - half {
            let (Ok(px), Ok(py)) = (u32::try_from(x + ox), u32::try_from(y + oy)) else {
                continue;
            };
            if px < image.width() && py < image.height() {
                image.put_pixel(px, py, Rgba(OUTLINE));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lo: f64, hi: f64) -> Vec<Point> {
        vec![(lo, lo), (hi, lo), (hi, hi), (lo, hi)]
    }

    #[test]
    fn test_click_outside_ignored() {
        let mut roi = RoiSelector::new(10, 20).unwrap();
        assert_eq!(roi.click(-1.0, 3.0), ClickOutcome::Ignored);
        assert_eq!(roi.click(3.0, 9.6), ClickOutcome::Ignored);
        assert_eq!(roi.click(f64::NAN, 1.0), ClickOutcome::Ignored);
        assert!(roi.current_polygon().is_empty());
        assert_eq!(roi.click(19.5, -0.5), ClickOutcome::Added);
        assert_eq!(roi.current_polygon().len(), 1);
    }

    #[test]
    fn test_state_transitions() {
        let mut roi = RoiSelector::new(10, 10).unwrap();
        assert_eq!(roi.state(), SelectionState::Collecting);
        roi.click(1.0, 1.0);
        roi.click(5.0, 1.0);
        roi.click(5.0, 5.0);
        roi.new_roi().unwrap();
        assert_eq!(roi.state(), SelectionState::RoiConfirmed);
        assert_eq!(roi.polygons().len(), 1);
        assert!(roi.current_polygon().is_empty());

        roi.click(6.0, 6.0);
        assert_eq!(roi.state(), SelectionState::Collecting);
        roi.click(9.0, 6.0);
        roi.click(9.0, 9.0);
        let masks = roi.confirm().unwrap();
        assert_eq!(masks.len(), 2);
        assert_eq!(roi.state(), SelectionState::Finished);
        assert_eq!(roi.polygons().len(), 2);
        assert_eq!(roi.masks().unwrap().len(), roi.polygons().len());
    }

    #[test]
    fn test_finished_is_immutable() {
        let mut roi = RoiSelector::new(8, 8).unwrap();
        for (x, y) in square(1.0, 4.0) {
            roi.click(x, y);
        }
        roi.confirm().unwrap();
        let before = roi.masks().unwrap().to_vec();
        assert_eq!(roi.click(2.0, 2.0), ClickOutcome::Ignored);
        assert_eq!(roi.new_roi(), Err(RoiError::Finished));
        assert_eq!(roi.confirm().unwrap_err(), RoiError::Finished);
        assert_eq!(roi.masks().unwrap(), before.as_slice());
        assert_eq!(roi.polygons().len(), 1);
    }

    #[test]
    fn test_empty_image_rejected() {
        assert_eq!(
            RoiSelector::new(0, 5).unwrap_err(),
            RoiError::EmptyImage { height: 0, width: 5 }
        );
    }

    #[test]
    fn test_square_mask_matches_area() {
        let polygon = square(10.0, 30.0);
        let mask = polygon_mask(&polygon, 64, 64);
        let count = mask.iter().filter(|&&v| v).count();
        assert_eq!(count, 400);
        assert!((polygon_area(&polygon) - 400.0).abs() < 1e-9);
        assert!(mask[[10, 10]]);
        assert!(!mask[[30, 30]]);
    }

    #[test]
    fn test_triangle_mask_near_area() {
        let polygon = vec![(5.0, 5.0), (85.0, 12.0), (30.0, 70.0)];
        let area = polygon_area(&polygon);
        let mask = polygon_mask(&polygon, 100, 100);
        let count = usize_to_f64(mask.iter().filter(|&&v| v).count());
        assert!((count - area).abs() / area < 0.05, "count {count} area {area}");
    }

    #[test]
    fn test_polygon_clipped_to_image() {
        let polygon = vec![(-10.0, -10.0), (4.5, -10.0), (4.5, 4.5), (-10.0, 4.5)];
        let mask = polygon_mask(&polygon, 10, 10);
        assert_eq!(mask.iter().filter(|&&v| v).count(), 25);
    }

    #[test]
    fn test_degenerate_polygons_give_empty_masks() {
        let mut roi = RoiSelector::new(5, 5).unwrap();
        roi.click(1.0, 1.0);
        roi.new_roi().unwrap();
        let masks = roi.confirm().unwrap();
        assert_eq!(masks.len(), 2);
        assert!(masks.iter().all(|m| m.iter().all(|&v| !v)));
    }

    #[test]
    fn test_overlay_draws_outline() {
        let mut roi = RoiSelector::new(20, 20).unwrap();
        let base = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        roi.click(2.0, 2.0);
        // A single point is not drawn while in progress.
        assert_eq!(roi.overlay(&base), base);
        roi.click(15.0, 2.0);
        roi.click(15.0, 15.0);
        let drawn = roi.overlay(&base);
        assert_eq!(drawn.get_pixel(8, 2).0, OUTLINE);
        assert_eq!(drawn.get_pixel(15, 8).0, OUTLINE);
        assert_eq!(drawn.get_pixel(10, 12).0, [0, 0, 0, 255]);
    }
}
