//! Core type definitions for CBIS-DDSM dataset preparation
//!
//! This module provides the fundamental types used throughout the library:
//! - [`ExamId`]: Parsed exam folder identifier and merge-key derivation
//! - [`LesionKind`] / [`Split`]: Axes of the official case CSVs
//! - [`Pathology`]: Normalized ground-truth diagnosis
//! - [`Label`]: The four-class dataset label
//! - [`BitDepth`]: Output depth for PNG conversion

mod enums;
mod exam_id;

pub use enums::{
    normalize_pathology, BitDepth, Label, Laterality, LesionKind, Pathology, Split, ViewPosition,
};
pub use exam_id::{merge_key, ExamId};
