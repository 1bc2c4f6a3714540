//! Image stacks and ROI masks stored in HDF5 datasets.

use std::path::Path;

use h5viz_core::roi::Point;
use h5viz_core::ImageStack;
use hdf5::types::TypeDescriptor;
use hdf5::{Dataset, File};
use log::info;
use ndarray::{Array2, Axis, Ix2, Ix3};

use crate::tree::{write_tree, Tree, WriteMode};
use crate::value::DatasetValue;
use crate::{Error, Result};

/// Name of the group ROI selections are written under.
pub const ROI_GROUP: &str = "rois";

/// Whether a dataset can be shown as an image or image stack.
#[must_use]
pub fn is_image_dataset(dataset: &Dataset) -> bool {
    let ndim = dataset.ndim();
    if ndim != 2 && ndim != 3 {
        return false;
    }
    dataset
        .dtype()
        .and_then(|t| t.to_descriptor())
        .is_ok_and(|d| {
            matches!(
                d,
                TypeDescriptor::Unsigned(_)
                    | TypeDescriptor::Integer(_)
                    | TypeDescriptor::Float(_)
                    | TypeDescriptor::Boolean
            )
        })
}

/// Split a numeric value into 2-D frames.
///
/// A 2-D value is a single frame; a 3-D value is a stack along axis 0.
///
/// # Errors
/// Returns [`Error::InvalidFormat`] for strings or other dimensionalities.
pub fn value_frames(value: &DatasetValue, path: &str) -> Result<Vec<Array2<f64>>> {
    let Some(array) = value.to_f64() else {
        return Err(Error::InvalidFormat(format!(
            "{path} holds {} data, not numbers",
            value.dtype()
        )));
    };
    match array.ndim() {
        2 => Ok(vec![array.into_dimensionality::<Ix2>()?]),
        3 => {
            let stack = array.into_dimensionality::<Ix3>()?;
            Ok(stack.axis_iter(Axis(0)).map(|f| f.to_owned()).collect())
        }
        n => Err(Error::InvalidFormat(format!(
            "{path} is {n}-D; expected a 2-D image or 3-D stack"
        ))),
    }
}

/// Read a dataset as 2-D frames.
///
/// # Errors
/// Returns an error if the dataset cannot be read or is not a 2-D/3-D
/// numeric array.
pub fn read_frames(dataset: &Dataset) -> Result<Vec<Array2<f64>>> {
    let value = DatasetValue::read(dataset)?;
    value_frames(&value, &dataset.name())
}

/// Open `path` and load the dataset at `dataset_path` as an image stack.
///
/// # Errors
/// Returns an error if the file or dataset cannot be read, or the data is not
/// a 2-D/3-D numeric array.
pub fn read_stack<P: AsRef<Path>>(path: P, dataset_path: &str) -> Result<ImageStack> {
    let file = File::open(path)?;
    let dataset = file.dataset(dataset_path)?;
    let frames = read_frames(&dataset)?;
    Ok(ImageStack::new(frames, None)?)
}

/// Build the tree written for a set of ROI selections.
///
/// Each ROI `i` becomes `rois/roi_<i>/mask` (boolean image) and
/// `rois/roi_<i>/vertices` (`(n, 2)` array of `x, y`, omitted for empty
/// polygons).
///
/// # Errors
/// Returns [`Error::InvalidFormat`] if masks and polygons differ in number.
pub fn roi_tree(masks: &[Array2<bool>], polygons: &[Vec<Point>]) -> Result<Tree> {
    if masks.len() != polygons.len() {
        return Err(Error::InvalidFormat(format!(
            "{} masks for {} polygons",
            masks.len(),
            polygons.len()
        )));
    }
    let width = masks.len().to_string().len();
    let mut rois = Tree::new();
    for (index, (mask, polygon)) in masks.iter().zip(polygons).enumerate() {
        let vertices = Array2::from_shape_fn((polygon.len(), 2), |(row, col)| {
            let (x, y) = polygon[row];
            if col == 0 {
                x
            } else {
                y
            }
        });
        let mut roi = Tree::new().with("mask", mask.clone());
        if !polygon.is_empty() {
            roi.insert("vertices", vertices);
        }
        rois.insert_group(format!("roi_{index:0width$}"), roi);
    }
    Ok(Tree::new().with_group(ROI_GROUP, rois))
}

/// Write ROI masks and their polygons to an HDF5 file.
///
/// # Errors
/// Returns an error if the file cannot be written; see [`write_tree`].
pub fn write_rois<P: AsRef<Path>>(
    path: P,
    masks: &[Array2<bool>],
    polygons: &[Vec<Point>],
    mode: WriteMode,
) -> Result<()> {
    let tree = roi_tree(masks, polygons)?;
    write_tree(path.as_ref(), &tree, mode, false)?;
    info!("Wrote {} ROI masks to {}", masks.len(), path.as_ref().display());
    Ok(())
}
