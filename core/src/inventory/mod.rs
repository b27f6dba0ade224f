//! Filesystem inventories of converted mammograms and ROI mask DICOMs
//!
//! Both scans are deterministic: directory listings are sorted before
//! any "first" or "last" selection rule is applied, so results do not
//! depend on filesystem iteration order.

pub mod mammograms;
pub mod masks;

pub use mammograms::{collect_mammograms, MammogramScan};
pub use masks::{collect_masks, MaskScan};

use crate::error::Result;
use crate::types::ExamId;
use std::fs;
use std::path::{Path, PathBuf};

/// One inventoried exam: identifier plus the file chosen for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    /// Exam identifier string, as spelled by the folder name
    pub exam: String,

    /// Path to the selected file
    pub path: PathBuf,
}

/// Lists the exam subfolders of a root directory, sorted by name
///
/// Returns `(folder name, folder path, parsed id)` for every direct
/// subfolder whose name parses as a CBIS-DDSM exam identifier; other
/// entries are ignored.
pub(crate) fn exam_subfolders(root: &Path) -> Result<Vec<(String, PathBuf, ExamId)>> {
    let mut folders = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(id) = ExamId::parse(&name) {
            folders.push((name, path, id));
        }
    }

    folders.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(folders)
}

/// Recursively collects all files under a directory
pub(crate) fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Recursively collects all `.dcm` files under a directory, sorted
pub(crate) fn collect_dicom_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut all = Vec::new();
    collect_files(dir, &mut all)?;

    let mut files: Vec<PathBuf> = all
        .into_iter()
        .filter(|p| {
            p.extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("dcm"))
        })
        .collect();
    files.sort();
    Ok(files)
}
