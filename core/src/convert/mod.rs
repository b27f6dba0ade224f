//! DICOM to PNG conversion
//!
//! Single-file conversion plus a batch mode that mirrors a DICOM tree
//! into a PNG tree under an output-size quota.

pub mod batch;
pub mod image;

pub use self::batch::{convert_tree, BatchOptions, ConvertReport};
pub use self::image::{convert_file, ConvertOptions};
