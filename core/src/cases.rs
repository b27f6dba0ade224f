//! Loading of the official CBIS-DDSM case description CSVs
//!
//! Four fixed files live under the CSV root, one per lesion kind and
//! split. Each row carries a pathology string and slash-delimited
//! file paths whose first segment is the exam identifier.

use crate::error::{DdsmError, Result};
use crate::types::{LesionKind, Pathology, Split};
use log::info;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Which path column of the official CSVs identifies the exam
///
/// The mammogram inventory joins on `image file path`, the mask
/// inventory on `ROI mask file path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathColumn {
    Image,
    RoiMask,
}

/// One loaded case: exam identifier and normalized pathology
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRow {
    pub exam: String,
    pub pathology: Pathology,
}

#[derive(Debug, Deserialize)]
struct RawCaseRow {
    pathology: String,

    #[serde(rename = "image file path", default)]
    image_file_path: Option<String>,

    #[serde(rename = "ROI mask file path", default)]
    roi_mask_file_path: Option<String>,
}

/// Returns the official filename for a lesion kind and split
///
/// Note the "train" stem: the official files are named
/// `*_case_description_train_set.csv`, not "training".
pub fn case_csv_name(kind: LesionKind, split: Split) -> String {
    format!(
        "{}_case_description_{}_set.csv",
        kind.simple_name(),
        split.csv_stem()
    )
}

/// Loads one official case CSV, keyed by the selected path column
///
/// Exam identifiers are the first slash-delimited segment of the path
/// column; duplicates keep the first occurrence. Pathology strings
/// are normalized and parsed, and an unknown pathology is an error. A
/// missing CSV file is fatal.
pub fn load_case_table(
    csv_root: &Path,
    kind: LesionKind,
    split: Split,
    column: PathColumn,
) -> Result<Vec<CaseRow>> {
    let path = csv_root.join(case_csv_name(kind, split));
    if !path.is_file() {
        return Err(DdsmError::MissingInput(path));
    }

    let mut reader = csv::Reader::from_path(&path)?;
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for result in reader.deserialize::<RawCaseRow>() {
        let raw = result?;
        let file_path = match column {
            PathColumn::Image => raw.image_file_path,
            PathColumn::RoiMask => raw.roi_mask_file_path,
        }
        .unwrap_or_default();

        // The official files occasionally embed stray whitespace in
        // path cells
        let exam = file_path
            .split('/')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if exam.is_empty() || !seen.insert(exam.clone()) {
            continue;
        }

        let pathology = Pathology::from_raw(raw.pathology.trim())?;
        rows.push(CaseRow { exam, pathology });
    }

    info!("Loaded {} cases from {}", rows.len(), path.display());
    Ok(rows)
}
