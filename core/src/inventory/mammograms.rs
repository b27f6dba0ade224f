use crate::error::{DdsmError, Result};
use crate::inventory::{collect_files, exam_subfolders, InventoryRecord};
use log::{info, warn};
use std::path::Path;

/// Result of scanning the converted PNG tree for mammograms
#[derive(Debug, Default)]
pub struct MammogramScan {
    /// One record per exam folder that held at least one file
    pub records: Vec<InventoryRecord>,

    /// Mammogram folders visited
    pub folders_seen: usize,

    /// Folders skipped because they held no files
    pub empty_folders: usize,

    /// Folders that held more than one file (ambiguous selection)
    pub multi_file_folders: usize,
}

/// Collects one mammogram path per `_CC`/`_MLO` exam folder
///
/// Exam folders are expected to hold exactly one image after
/// conversion. When more than one file is present the
/// lexicographically last one is selected and a warning names the
/// folder; empty folders are skipped and counted.
pub fn collect_mammograms(png_root: &Path) -> Result<MammogramScan> {
    if !png_root.is_dir() {
        return Err(DdsmError::MissingInput(png_root.to_path_buf()));
    }

    let mut scan = MammogramScan::default();

    for (name, path, id) in exam_subfolders(png_root)? {
        if !id.is_mammogram() {
            continue;
        }
        scan.folders_seen += 1;

        let mut files = Vec::new();
        collect_files(&path, &mut files)?;
        files.sort();

        match files.last() {
            None => {
                warn!("Skipping {}: no files after conversion", name);
                scan.empty_folders += 1;
            }
            Some(file) => {
                if files.len() > 1 {
                    warn!(
                        "{}: {} files found, selecting {}",
                        name,
                        files.len(),
                        file.display()
                    );
                    scan.multi_file_folders += 1;
                }
                scan.records.push(InventoryRecord {
                    exam: name,
                    path: file.clone(),
                });
            }
        }
    }

    info!(
        "Collected {} mammograms from {} folders",
        scan.records.len(),
        scan.folders_seen
    );
    Ok(scan)
}
