//! Background workers for file inspection and dataset loading.

mod loader;

pub use loader::{list_datasets_worker, load_stack_worker};
