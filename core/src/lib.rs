pub mod api;
pub mod cases;
pub mod cli;
pub mod convert;
pub mod dataset;
pub mod error;
pub mod inventory;
pub mod tags;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{BuildConfig, DatasetBuilder};
pub use convert::{convert_file, convert_tree, BatchOptions, ConvertOptions, ConvertReport};
pub use dataset::BuildReport;
pub use error::{DdsmError, Result};
pub use types::*;
