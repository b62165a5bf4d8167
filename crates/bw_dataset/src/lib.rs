pub mod loader;

pub use loader::{DatasetLoader, DEFAULT_DATASET_PATH};
