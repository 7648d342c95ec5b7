//! Knowledge base loading from the built-in catalog or a dataset file.

mod dataset;

pub use dataset::{DatasetError, load_dataset, load_knowledge};
