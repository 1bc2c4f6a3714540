//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HDF5 library error.
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// Target file or group member already exists.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// A value has no HDF5 dataset counterpart.
    #[error("unsupported type at {path}: {ty}")]
    UnsupportedType { path: String, ty: String },

    /// Invalid file format.
    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    /// Array construction error.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Zip archive error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] h5viz_core::Error),
}
