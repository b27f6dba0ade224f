use std::path::PathBuf;
use thiserror::Error;

/// Result type for ddsmprep operations
pub type Result<T> = std::result::Result<T, DdsmError>;

/// Error types for ddsmprep operations
///
/// `MissingInput` and `QuotaExceeded` are fatal and abort a run.
/// `DecodeError` is recoverable during inventory scans and batch
/// conversion, where the failing file is skipped and counted.
#[derive(Error, Debug)]
pub enum DdsmError {
    /// Required input directory or file is absent
    #[error("missing required input: {}", .0.display())]
    MissingInput(PathBuf),

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Pixel data decode error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Invalid or unexpected value (pathology string, exam id, bit depth)
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Batch conversion output quota reached
    #[error("output quota exceeded: {written} bytes written, limit {limit}")]
    QuotaExceeded { written: u64, limit: u64 },

    /// CSV read/write error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// PNG encode/decode error
    #[error("image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper conversions
impl From<String> for DdsmError {
    fn from(s: String) -> Self {
        DdsmError::InvalidValue(s)
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for DdsmError {
    fn from(e: dicom_object::ReadError) -> Self {
        DdsmError::DicomError(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for DdsmError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        DdsmError::InvalidValue(format!("{}", e))
    }
}

impl From<dicom_pixeldata::Error> for DdsmError {
    fn from(e: dicom_pixeldata::Error) -> Self {
        DdsmError::DecodeError(format!("{}", e))
    }
}
