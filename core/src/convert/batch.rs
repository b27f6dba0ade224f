use crate::convert::image::{convert_file, ConvertOptions};
use crate::error::{DdsmError, Result};
use crate::inventory::collect_dicom_files;
use log::{info, warn};
use std::fmt;
use std::fs;
use std::path::Path;

/// Options for batch conversion of a DICOM tree
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Per-file conversion options
    pub convert: ConvertOptions,

    /// Abort the batch once this many output bytes were written
    ///
    /// The check runs before each file, so a single large file may
    /// overshoot the limit.
    pub max_output_bytes: Option<u64>,
}

/// Counters for one batch conversion run
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ConvertReport {
    /// Files converted successfully
    pub converted: usize,

    /// Files skipped after a decode or read failure
    pub failed: usize,

    /// Total PNG bytes written
    pub bytes_written: u64,
}

impl fmt::Display for ConvertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion Report")?;
        writeln!(f, "=================")?;
        writeln!(f)?;
        writeln!(f, "Converted: {}", self.converted)?;
        writeln!(f, "Failed:    {}", self.failed)?;
        writeln!(f, "Bytes:     {}", self.bytes_written)?;
        Ok(())
    }
}

/// Converts every `.dcm` file under a root, mirroring the tree
///
/// Each file's path relative to `dicom_root` is reproduced under
/// `png_root` with a `.png` extension. Files are processed in sorted
/// order. Per-file decode failures are counted and skipped; reaching
/// the output quota aborts the whole batch.
pub fn convert_tree(dicom_root: &Path, png_root: &Path, options: &BatchOptions) -> Result<ConvertReport> {
    if !dicom_root.is_dir() {
        return Err(DdsmError::MissingInput(dicom_root.to_path_buf()));
    }

    let files = collect_dicom_files(dicom_root)?;
    info!("Found {} DICOM files under {}", files.len(), dicom_root.display());

    let mut report = ConvertReport::default();

    for dicom_path in files {
        if let Some(limit) = options.max_output_bytes {
            if report.bytes_written >= limit {
                return Err(DdsmError::QuotaExceeded {
                    written: report.bytes_written,
                    limit,
                });
            }
        }

        // collect_dicom_files only yields paths under dicom_root
        let relative = dicom_path
            .strip_prefix(dicom_root)
            .map_err(|_| DdsmError::InvalidValue(format!(
                "path escapes root: {}",
                dicom_path.display()
            )))?;
        let png_path = png_root.join(relative).with_extension("png");

        match convert_file(&dicom_path, &png_path, &options.convert) {
            Ok(()) => {
                report.converted += 1;
                report.bytes_written += fs::metadata(&png_path)?.len();
            }
            Err(e @ (DdsmError::IoError(_) | DdsmError::ImageError(_))) => return Err(e),
            Err(e) => {
                warn!("Skipping {}: {}", dicom_path.display(), e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Converted {} files ({} failed, {} bytes)",
        report.converted, report.failed, report.bytes_written
    );
    Ok(report)
}
