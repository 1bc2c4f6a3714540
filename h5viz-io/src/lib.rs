//! h5viz-io: HDF5 tree utilities and file helpers for h5viz.
//!
//! This crate prints, writes and reads HDF5 hierarchies through an in-memory
//! [`Tree`], loads image stacks from datasets, and provides small file
//! helpers (JSON/YAML persistence, zip extraction).
//!

mod error;
pub mod files;
pub mod images;
pub mod tree;
pub mod value;

pub use error::{Error, Result};
pub use files::{
    extract_zip, json_load, json_save, load_by_suffix, prepare_filepath_for_saving, yaml_load,
    yaml_save, SaveFileOptions,
};
pub use images::{is_image_dataset, read_frames, read_stack, roi_tree, value_frames, write_rois};
pub use tree::{
    datasets, make_tree, read_group, read_tree, show_file_tree, show_group_items,
    show_item_tree, write_tree, DatasetIter, Hierarchy, Member, Node, ShowOptions, Tree,
    WriteMode,
};
pub use value::{format_shape, DatasetValue};
