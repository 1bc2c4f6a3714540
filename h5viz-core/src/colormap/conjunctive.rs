//! Combining several colormaps into one by multiplying their outputs.

use ndarray::{Array2, ArrayView2, Axis};

use super::Colormap;
use crate::{Error, Result};

/// Colormap over `k` input columns: each column is mapped through its own
/// colormap and the RGBA results are multiplied together.
#[derive(Debug, Clone)]
pub struct ConjunctiveColormap {
    cmaps: Vec<Colormap>,
    normalize: bool,
    normalization_range: [f64; 2],
    name: String,
}

impl ConjunctiveColormap {
    /// Create a conjunctive colormap.
    ///
    /// # Errors
    /// Returns an error if no colormaps are given.
    pub fn new(cmaps: Vec<Colormap>) -> Result<Self> {
        if cmaps.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one colormap is required".to_string(),
            ));
        }
        Ok(Self {
            cmaps,
            normalize: false,
            normalization_range: [0.0, 255.0],
            name: "cmap_conjunctive".to_string(),
        })
    }

    /// Min-max normalize each input column to `[0, 1]` before lookup.
    #[must_use]
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Range the `[0, 1]` products are scaled into.
    #[must_use]
    pub fn normalization_range(mut self, low: f64, high: f64) -> Self {
        self.normalization_range = [low, high];
        self
    }

    /// Rename the colormap.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Colormap name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of input columns.
    #[must_use]
    pub fn n_cmaps(&self) -> usize {
        self.cmaps.len()
    }

    /// Map `(n_samples, n_cmaps)` inputs to `(n_samples, 4)` colors.
    ///
    /// # Errors
    /// Returns an error if the column count does not match the number of
    /// colormaps, or if normalization is requested on a single row.
    pub fn apply(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.cmaps.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![x.nrows(), self.cmaps.len()],
                actual: x.shape().to_vec(),
            });
        }

        let x = if self.normalize {
            if x.nrows() < 2 {
                return Err(Error::InvalidArgument(
                    "normalization needs more than one row".to_string(),
                ));
            }
            normalize_columns(x)
        } else {
            x.to_owned()
        };

        let [low, high] = self.normalization_range;
        let mut colors = Array2::<f64>::ones((x.nrows(), 4));
        for (cmap, column) in self.cmaps.iter().zip(x.axis_iter(Axis(1))) {
            for (mut row, &value) in colors.axis_iter_mut(Axis(0)).zip(column.iter()) {
                let rgba = cmap.sample(value);
                for (out, channel) in row.iter_mut().zip(rgba) {
                    *out *= f64::from(channel);
                }
            }
        }
        colors.mapv_inplace(|c| c * (high - low) + low);
        Ok(colors)
    }

    /// Like [`apply`](Self::apply), truncating toward zero like an integer
    /// cast.
    ///
    /// # Errors
    /// See [`apply`](Self::apply).
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply_int(&self, x: ArrayView2<'_, f64>) -> Result<Array2<i64>> {
        Ok(self.apply(x)?.mapv(|c| c.trunc() as i64))
    }
}

fn normalize_columns(x: ArrayView2<'_, f64>) -> Array2<f64> {
    let mut out = x.to_owned();
    for mut column in out.axis_iter_mut(Axis(1)) {
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        column.mapv_inplace(|v| (v - min) / range);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::Preset;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_product_of_two_grayscales() {
        let gray = Preset::Grayscale.colormap();
        let conj = ConjunctiveColormap::new(vec![gray.clone(), gray])
            .unwrap()
            .normalization_range(0.0, 1.0);
        let x = array![[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]];
        let out = conj.apply(x.view()).unwrap();
        assert_eq!(out.shape(), &[3, 4]);
        assert_relative_eq!(out[[0, 0]], 1.0);
        assert_relative_eq!(out[[1, 0]], 0.0);
        assert_relative_eq!(out[[2, 1]], 0.0);
        // Alpha is always 1 * 1.
        assert_relative_eq!(out[[2, 3]], 1.0);
    }

    #[test]
    fn test_default_range_and_int() {
        let gray = Preset::Grayscale.colormap();
        let conj = ConjunctiveColormap::new(vec![gray]).unwrap();
        let out = conj.apply_int(array![[1.0], [0.0]].view()).unwrap();
        assert_eq!(out[[0, 0]], 255);
        assert_eq!(out[[1, 0]], 0);
        assert_eq!(out[[1, 3]], 255);
    }

    #[test]
    fn test_normalize_columns() {
        let gray = Preset::Grayscale.colormap();
        let conj = ConjunctiveColormap::new(vec![gray])
            .unwrap()
            .normalize(true)
            .normalization_range(0.0, 1.0);
        let out = conj.apply(array![[10.0], [20.0]].view()).unwrap();
        assert_relative_eq!(out[[0, 0]], 0.0);
        assert_relative_eq!(out[[1, 0]], 1.0);
    }

    #[test]
    fn test_column_mismatch() {
        let conj = ConjunctiveColormap::new(vec![Preset::Hot.colormap()]).unwrap();
        let err = conj.apply(array![[0.1, 0.2]].view()).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_normalize_needs_rows() {
        let conj = ConjunctiveColormap::new(vec![Preset::Hot.colormap()])
            .unwrap()
            .normalize(true);
        assert!(conj.apply(array![[0.5]].view()).is_err());
    }
}
