//! Image-stack scrubbing.
//!
//! [`ImageStack`] holds a sequence of equally shaped frames and a cursor. A
//! host UI binds a slider to [`ImageStack::set_frame`] and redraws with
//! [`ImageStack::render`].

use image::RgbaImage;
use ndarray::{Array2, ArrayView2, ArrayView3, Axis};

use crate::colormap::Colormap;
use crate::render::{render_image, Clim};
use crate::{Error, Result};

/// A stack of frames with a current-frame cursor.
#[derive(Debug, Clone)]
pub struct ImageStack {
    frames: Vec<Array2<f64>>,
    labels: Option<Vec<String>>,
    clim: Option<Clim>,
    current: usize,
}

impl ImageStack {
    /// Create a stack from owned frames.
    ///
    /// # Errors
    /// Returns an error if there are no frames, frame shapes differ, or the
    /// label count differs from the frame count.
    pub fn new(frames: Vec<Array2<f64>>, labels: Option<Vec<String>>) -> Result<Self> {
        let Some(first) = frames.first() else {
            return Err(Error::EmptyStack);
        };
        let shape = first.shape().to_vec();
        if let Some(bad) = frames.iter().find(|f| f.shape() != shape.as_slice()) {
            return Err(Error::ShapeMismatch {
                expected: shape,
                actual: bad.shape().to_vec(),
            });
        }
        if let Some(labels) = &labels {
            if labels.len() != frames.len() {
                return Err(Error::ShapeMismatch {
                    expected: vec![frames.len()],
                    actual: vec![labels.len()],
                });
            }
        }
        Ok(Self {
            frames,
            labels,
            clim: None,
            current: 0,
        })
    }

    /// Create a stack from a `(n, height, width)` array.
    ///
    /// # Errors
    /// Returns [`Error::EmptyStack`] if `n` is zero.
    pub fn from_array(stack: ArrayView3<'_, f64>) -> Result<Self> {
        let frames = stack.axis_iter(Axis(0)).map(|f| f.to_owned()).collect();
        Self::new(frames, None)
    }

    /// Fix the color limits shared by every frame.
    #[must_use]
    pub fn with_clim(mut self, clim: Option<Clim>) -> Self {
        self.clim = clim;
        self
    }

    /// Update the shared color limits.
    pub fn set_clim(&mut self, clim: Option<Clim>) {
        self.clim = clim;
    }

    /// Shared color limits.
    #[must_use]
    pub fn clim(&self) -> Option<Clim> {
        self.clim
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; stacks hold at least one frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// `(height, width)` of every frame.
    #[must_use]
    pub fn frame_dim(&self) -> (usize, usize) {
        self.frames[0].dim()
    }

    /// Index of the current frame.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Move the cursor.
    ///
    /// # Errors
    /// Returns [`Error::FrameOutOfRange`] if `index >= len()`.
    pub fn set_frame(&mut self, index: usize) -> Result<()> {
        if index >= self.frames.len() {
            return Err(Error::FrameOutOfRange {
                index,
                len: self.frames.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// The current frame.
    #[must_use]
    pub fn current_frame(&self) -> ArrayView2<'_, f64> {
        self.frames[self.current].view()
    }

    /// Label of the current frame, if labels were given.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.labels
            .as_ref()
            .map(|labels| labels[self.current].as_str())
    }

    /// Render the current frame.
    #[must_use]
    pub fn render(&self, cmap: &Colormap) -> RgbaImage {
        render_image(self.current_frame(), cmap, self.clim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::Preset;
    use ndarray::Array3;

    #[test]
    fn test_scrub_frames() {
        let arr = Array3::from_shape_fn((3, 2, 2), |(i, _, _)| f64::from(u8::try_from(i).unwrap()));
        let mut stack = ImageStack::from_array(arr.view()).unwrap();
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.frame_dim(), (2, 2));
        stack.set_frame(2).unwrap();
        assert_eq!(stack.current_frame()[[0, 0]], 2.0);
        assert!(stack.title().is_none());
        let err = stack.set_frame(3).unwrap_err();
        assert!(matches!(err, Error::FrameOutOfRange { index: 3, len: 3 }));
        assert_eq!(stack.current_index(), 2);
    }

    #[test]
    fn test_labels_and_clim() {
        let frames = vec![Array2::zeros((2, 2)), Array2::from_elem((2, 2), 10.0)];
        let labels = vec!["dark".to_string(), "bright".to_string()];
        let mut stack = ImageStack::new(frames, Some(labels))
            .unwrap()
            .with_clim(Some((0.0, 10.0)));
        stack.set_frame(1).unwrap();
        assert_eq!(stack.title(), Some("bright"));
        let raster = stack.render(&Preset::Grayscale.colormap());
        assert_eq!(raster.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_rejects_mixed_shapes() {
        let frames = vec![Array2::zeros((2, 2)), Array2::zeros((3, 2))];
        assert!(matches!(
            ImageStack::new(frames, None),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(ImageStack::new(Vec::new(), None), Err(Error::EmptyStack)));
    }
}
