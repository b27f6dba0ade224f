use crate::error::{DdsmError, Result};
use crate::inventory::{collect_dicom_files, exam_subfolders, InventoryRecord};
use crate::tags::{get_u16_value, BITS_ALLOCATED, PIXEL_REPRESENTATION};
use dicom_object::open_file;
use dicom_pixeldata::PixelDecoder as _;
use log::{info, warn};
use std::path::Path;

/// Result of scanning the DICOM tree for ROI masks
#[derive(Debug, Default)]
pub struct MaskScan {
    /// One record per mask folder with a qualifying DICOM file
    pub records: Vec<InventoryRecord>,

    /// Mask folders visited
    pub folders_seen: usize,

    /// Individual `.dcm` files that failed to open or decode
    pub decode_failures: usize,

    /// Folders where no file decoded with 16-bit unsigned depth
    pub folders_without_mask: usize,
}

/// Collects one ROI mask path per abnormality exam folder
///
/// A mask folder is any exam subfolder whose identifier carries an
/// abnormality index. Its `.dcm` files are scanned in sorted order and
/// the first one whose pixel data decodes with 16-bit unsigned depth
/// is taken as the mask. Files that fail to decode are skipped and
/// counted; folders with no qualifying file are counted.
pub fn collect_masks(dicom_root: &Path) -> Result<MaskScan> {
    if !dicom_root.is_dir() {
        return Err(DdsmError::MissingInput(dicom_root.to_path_buf()));
    }

    let mut scan = MaskScan::default();

    for (name, path, id) in exam_subfolders(dicom_root)? {
        if !id.is_mask() {
            continue;
        }
        scan.folders_seen += 1;

        let mut mask = None;
        for file in collect_dicom_files(&path)? {
            match is_mask_dicom(&file) {
                Ok(true) => {
                    mask = Some(file);
                    break;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Skipping {}: {}", file.display(), e);
                    scan.decode_failures += 1;
                }
            }
        }

        match mask {
            Some(path) => scan.records.push(InventoryRecord { exam: name, path }),
            None => {
                warn!("{}: no 16-bit mask image found", name);
                scan.folders_without_mask += 1;
            }
        }
    }

    info!(
        "Collected {} masks from {} folders ({} decode failures)",
        scan.records.len(),
        scan.folders_seen,
        scan.decode_failures
    );
    Ok(scan)
}

/// Checks whether a DICOM file decodes as a 16-bit unsigned image
///
/// The decode itself is the gate: corrupt files error out instead of
/// being classified.
fn is_mask_dicom(path: &Path) -> Result<bool> {
    let obj = open_file(path)?;
    obj.decode_pixel_data()?;

    let is_16bit = get_u16_value(&obj, BITS_ALLOCATED) == Some(16);
    let is_unsigned = get_u16_value(&obj, PIXEL_REPRESENTATION).unwrap_or(0) == 0;
    Ok(is_16bit && is_unsigned)
}
