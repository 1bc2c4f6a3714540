//! Error types for h5viz-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for h5viz operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for h5viz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A gradient needs at least two colors.
    #[error("must specify at least two colors, got {0}")]
    TooFewColors(usize),

    /// Colormap control points are malformed.
    #[error("invalid colormap: {0}")]
    InvalidColormap(String),

    /// A color name or hex string could not be parsed.
    #[error("unrecognized color: {0:?}")]
    UnknownColor(String),

    /// Array shapes disagree.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Invalid argument passed by the caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An image stack or grid was given no images.
    #[error("no images to display")]
    EmptyStack,

    /// Frame index is out of range.
    #[error("frame index {index} out of range for stack of {len}")]
    FrameOutOfRange { index: usize, len: usize },

    /// Output path lacks a file-extension suffix.
    #[error("path must have a suffix: {}", .0.display())]
    MissingExtension(PathBuf),

    /// Output format cannot be inferred from the suffix.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// ROI selection error.
    #[error("roi error: {0}")]
    Roi(#[from] RoiError),

    /// Image encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// ROI selection errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiError {
    /// Selection was already confirmed; input is detached.
    #[error("selection already finished")]
    Finished,

    /// Image dimensions must be non-zero.
    #[error("image has zero size ({height}x{width})")]
    EmptyImage { height: usize, width: usize },
}
