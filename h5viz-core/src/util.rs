//! Numeric conversion utilities.
//!
//! These functions handle conversions between numeric types with explicit
//! handling of precision loss and bounds checking.

/// Convert usize to f32 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn usize_to_f32(value: usize) -> f32 {
    value as f32
}

/// Convert usize to f64 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Convert f32 to u8 with clamping to [0, 255].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn f32_to_u8(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 255.0);
    clamped.round() as u8
}

/// Convert a unit-range channel to a byte.
#[must_use]
pub fn unit_to_u8(value: f32) -> u8 {
    f32_to_u8(value * 255.0)
}

/// Convert f64 to usize with bounds checking.
///
/// Returns `None` if the value is not finite, negative, or >= `max_exclusive`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
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

/// Convert f64 to u32, rounding and saturating at the type bounds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn f64_to_u32_saturating(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(u32::MAX)) as u32
}

/// Convert u32 to usize.
#[must_use]
pub fn u32_to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Convert usize to u32, saturating.
#[must_use]
pub fn usize_to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_to_u8_clamps() {
        assert_eq!(f32_to_u8(-4.0), 0);
        assert_eq!(f32_to_u8(300.0), 255);
        assert_eq!(f32_to_u8(127.6), 128);
    }

    #[test]
    fn test_f64_to_usize_bounded() {
        assert_eq!(f64_to_usize_bounded(3.7, 10), Some(3));
        assert_eq!(f64_to_usize_bounded(10.0, 10), None);
        assert_eq!(f64_to_usize_bounded(-0.1, 10), None);
        assert_eq!(f64_to_usize_bounded(f64::NAN, 10), None);
    }

    #[test]
    fn test_f64_to_u32_saturating() {
        assert_eq!(f64_to_u32_saturating(-1.0), 0);
        assert_eq!(f64_to_u32_saturating(2.5), 3);
        assert_eq!(f64_to_u32_saturating(1e12), u32::MAX);
    }
}
