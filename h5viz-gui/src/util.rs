//! Numeric conversion utilities for h5viz-gui.
//!
//! These functions handle conversions between numeric types with explicit
//! handling of precision loss and bounds checking.

/// Convert usize to f32 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f32(value: usize) -> f32 {
    value as f32
}

/// Convert usize to f64 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Convert f64 to usize with bounds checking.
///
/// Returns `None` if the value is not finite, negative, or >= `max_exclusive`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_usize_bounded(value: f64, max_exclusive: usize) -> Option<usize> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let max_f64 = usize_to_f64(max_exclusive);
    if value >= max_f64 {
        return None;
    }
    Some(value as usize)
}

/// Map a plot coordinate to image `(x, y)` coordinates.
///
/// The image occupies `[0, width] x [0, height]` in the plot with row 0 at
/// the top; pixel centers land on integer image coordinates.
pub fn plot_to_image(px: f64, py: f64, height: usize) -> (f64, f64) {
    (px - 0.5, usize_to_f64(height) - py - 0.5)
}

/// Pixel `(row, col)` under a plot coordinate, if inside the image.
pub fn pixel_at(px: f64, py: f64, height: usize, width: usize) -> Option<(usize, usize)> {
    let col = f64_to_usize_bounded(px, width)?;
    let row = f64_to_usize_bounded(usize_to_f64(height) - py, height)?;
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_to_usize_bounded() {
        assert_eq!(f64_to_usize_bounded(3.7, 4), Some(3));
        assert_eq!(f64_to_usize_bounded(4.0, 4), None);
        assert_eq!(f64_to_usize_bounded(-0.1, 4), None);
        assert_eq!(f64_to_usize_bounded(f64::NAN, 4), None);
    }

    #[test]
    fn test_plot_to_image() {
        // Center of the top-left pixel of a 10-row image.
        assert_eq!(plot_to_image(0.5, 9.5, 10), (0.0, 0.0));
        assert_eq!(plot_to_image(3.5, 0.5, 10), (3.0, 9.0));
    }

    #[test]
    fn test_pixel_at() {
        assert_eq!(pixel_at(0.2, 9.9, 10, 5), Some((0, 0)));
        assert_eq!(pixel_at(4.9, 0.1, 10, 5), Some((9, 4)));
        assert_eq!(pixel_at(5.1, 3.0, 10, 5), None);
        assert_eq!(pixel_at(1.0, 10.5, 10, 5), None);
    }
}
