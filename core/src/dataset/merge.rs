use crate::dataset::stage::{read_staged, stage_csv_name};
use crate::error::Result;
use crate::types::{merge_key, Label, LesionKind, Pathology, Split};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Row of a final dataset CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalRow {
    pub mammogram_path: String,
    pub mask_path: String,
    pub label: u8,
}

/// Join counts for one merged split
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeOutcome {
    /// Rows written to the final CSV
    pub rows_written: usize,

    /// Mask rows whose merge key matched no mammogram (dropped)
    pub unjoined_masks: usize,

    /// Joined rows whose two sides disagreed on the label (dropped)
    pub label_conflicts: usize,
}

/// Returns the final CSV path for a split
pub fn dataset_csv_path(output_dir: &Path, split: Split) -> PathBuf {
    output_dir.join(format!("{}_dataset.csv", split))
}

/// Merges the staged mammogram and mask CSVs for one split
///
/// Calc and mass subsets are concatenated, labels derived from the
/// lesion kind and staged pathology, and the mask side inner-joined
/// against the mammogram side on the derived merge key. The output
/// CSV has columns `mammogram_path,mask_path,label`.
pub fn merge_split(
    split: Split,
    mam_dir: &Path,
    mask_dir: &Path,
    output_dir: &Path,
) -> Result<MergeOutcome> {
    // Mammogram side: merge key is the exam identifier itself
    let mut mammograms: HashMap<String, (String, Label)> = HashMap::new();
    for kind in LesionKind::ALL {
        for row in read_staged(&mam_dir.join(stage_csv_name(kind, split)))? {
            let label = Label::from_parts(kind, Pathology::from_raw(&row.pathology)?);
            mammograms.insert(row.img, (row.path, label));
        }
    }

    fs::create_dir_all(output_dir)?;
    let out_path = dataset_csv_path(output_dir, split);
    let mut writer = csv::Writer::from_path(&out_path)?;
    let mut outcome = MergeOutcome::default();

    for kind in LesionKind::ALL {
        for row in read_staged(&mask_dir.join(stage_csv_name(kind, split)))? {
            let label = Label::from_parts(kind, Pathology::from_raw(&row.pathology)?);
            let key = merge_key(&row.img);

            match mammograms.get(key) {
                None => {
                    warn!("{}: no mammogram for merge key {}, dropped", row.img, key);
                    outcome.unjoined_masks += 1;
                }
                Some((_, mam_label)) if *mam_label != label => {
                    warn!(
                        "{}: label {} disagrees with mammogram label {}, dropped",
                        row.img, label, mam_label
                    );
                    outcome.label_conflicts += 1;
                }
                Some((mam_path, _)) => {
                    writer.serialize(FinalRow {
                        mammogram_path: mam_path.clone(),
                        mask_path: row.path,
                        label: label.code(),
                    })?;
                    outcome.rows_written += 1;
                }
            }
        }
    }

    writer.flush()?;
    info!(
        "{}: wrote {} rows ({} unjoined, {} label conflicts)",
        out_path.display(),
        outcome.rows_written,
        outcome.unjoined_masks,
        outcome.label_conflicts
    );
    Ok(outcome)
}
