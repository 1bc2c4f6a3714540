//! Dataset listing and loading workers.
//!
//! These run in a background thread and report back through the app's
//! message channel.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Instant;

use anyhow::Context;
use h5viz_core::{auto_clim, Clim, ImageStack};
use h5viz_io::{datasets, is_image_dataset, read_frames};
use log::{debug, info};
use ndarray::Array2;

use crate::message::AppMessage;

/// Full paths of every dataset in `path` that can be shown as an image.
pub fn image_datasets(path: &Path) -> anyhow::Result<Vec<String>> {
    let file = hdf5::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut names = Vec::new();
    for item in datasets(&file)? {
        let (name, dataset) = item?;
        if is_image_dataset(&dataset) {
            names.push(name);
        } else {
            debug!("Skipping non-image dataset {name}");
        }
    }
    Ok(names)
}

/// Load `dataset` from `path`, labelling frames by index when it is a stack.
pub fn load_stack(path: &Path, dataset: &str) -> anyhow::Result<ImageStack> {
    let file = hdf5::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let frames = read_frames(&file.dataset(dataset)?)
        .with_context(|| format!("failed to load {dataset} from {}", path.display()))?;
    let labels = (frames.len() > 1).then(|| {
        (0..frames.len())
            .map(|i| format!("{dataset} [{i}]"))
            .collect()
    });
    let clim = stack_clim(&frames);
    Ok(ImageStack::new(frames, labels)?.with_clim(clim))
}

/// Color limits covering every frame, or `None` when there are none.
pub fn stack_clim(frames: &[Array2<f64>]) -> Option<Clim> {
    let (lo, hi) = frames
        .iter()
        .map(|frame| auto_clim(frame.view()))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
}

/// List the image datasets of `path` and send them to the UI thread.
pub fn list_datasets_worker(path: PathBuf, tx: &Sender<AppMessage>) {
    let msg = match image_datasets(&path) {
        Ok(names) => {
            info!("Found {} image dataset(s) in {}", names.len(), path.display());
            AppMessage::DatasetsListed(path, names)
        }
        Err(e) => AppMessage::LoadError(path, None, format!("{e:#}")),
    };
    let _ = tx.send(msg);
}

/// Load a dataset as an image stack and send it to the UI thread.
pub fn load_stack_worker(path: &Path, dataset: String, tx: &Sender<AppMessage>) {
    let start = Instant::now();
    let msg = match load_stack(path, &dataset) {
        Ok(stack) => AppMessage::LoadComplete(Box::new(stack), dataset, start.elapsed()),
        Err(e) => AppMessage::LoadError(path.to_path_buf(), Some(dataset), format!("{e:#}")),
    };
    let _ = tx.send(msg);
}
