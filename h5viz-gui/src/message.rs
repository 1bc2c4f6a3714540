//! Application message types for async communication.
//!
//! Messages are sent from background worker threads to the main UI thread
//! via channels to report completion and errors.

use std::path::PathBuf;
use std::time::Duration;

use h5viz_core::ImageStack;

/// Messages sent from background workers to the UI thread.
pub enum AppMessage {
    /// The image datasets of a file were listed.
    ///
    /// Contains the file path and the full paths of its 2-D/3-D numeric
    /// datasets.
    DatasetsListed(PathBuf, Vec<String>),

    /// A dataset was loaded as an image stack.
    ///
    /// Contains:
    /// - `ImageStack`: The loaded frames
    /// - `String`: Dataset path
    /// - `Duration`: Time taken to load
    LoadComplete(Box<ImageStack>, String, Duration),

    /// Listing or loading failed.
    ///
    /// Contains the file path, the dataset path when a load failed (`None`
    /// when listing failed) and the error text.
    LoadError(PathBuf, Option<String>, String),
}
