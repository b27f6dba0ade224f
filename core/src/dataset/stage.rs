use crate::cases::CaseRow;
use crate::error::Result;
use crate::inventory::InventoryRecord;
use crate::types::{LesionKind, Pathology, Split};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Row of an intermediate per-prefix CSV
///
/// Pathology is stored in its normalized string form so the staged
/// files stay inspectable between the two pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedRow {
    pub img: String,
    pub path: String,
    pub pathology: String,
}

/// Join counts for one staged subset
#[derive(Debug, Default, Clone, Copy)]
pub struct StageCounts {
    /// Inventory records matched to an official case row
    pub matched: usize,

    /// Inventory records with no case row (dropped, inner join)
    pub unmatched: usize,
}

/// Returns the intermediate CSV name for a lesion kind and split
pub fn stage_csv_name(kind: LesionKind, split: Split) -> String {
    format!("{}-{}.csv", kind, split)
}

/// Inner-joins an inventory subset against official case rows
///
/// Only inventory records whose exam identifier starts with
/// `<Lesion>-<Split>` prefix of the case table are considered.
/// Matched records are written to `out_csv`; unmatched ones are
/// counted and dropped.
pub fn stage_inventory(
    records: &[InventoryRecord],
    cases: &[CaseRow],
    prefix: &str,
    out_csv: &Path,
) -> Result<StageCounts> {
    let by_exam: HashMap<&str, Pathology> = cases
        .iter()
        .map(|c| (c.exam.as_str(), c.pathology))
        .collect();

    if let Some(parent) = out_csv.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(out_csv)?;
    let mut counts = StageCounts::default();

    for record in records.iter().filter(|r| r.exam.starts_with(prefix)) {
        match by_exam.get(record.exam.as_str()) {
            Some(pathology) => {
                writer.serialize(StagedRow {
                    img: record.exam.clone(),
                    path: record.path.display().to_string(),
                    pathology: pathology.to_string(),
                })?;
                counts.matched += 1;
            }
            None => {
                warn!("{}: no matching case row, dropped", record.exam);
                counts.unmatched += 1;
            }
        }
    }

    writer.flush()?;
    Ok(counts)
}

/// Reads back a staged CSV written by [`stage_inventory`]
///
/// A zero-byte file (no records were staged) reads as an empty set.
pub fn read_staged(path: &Path) -> Result<Vec<StagedRow>> {
    if fs::metadata(path)?.len() == 0 {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<StagedRow>() {
        rows.push(result?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn record(exam: &str) -> InventoryRecord {
        InventoryRecord {
            exam: exam.to_string(),
            path: PathBuf::from(format!("/data/{}/img.png", exam)),
        }
    }

    fn case(exam: &str, pathology: Pathology) -> CaseRow {
        CaseRow {
            exam: exam.to_string(),
            pathology,
        }
    }

    #[test]
    fn test_stage_inner_join_drops_unmatched() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("calc-training.csv");

        let records = vec![
            record("Calc-Training_P_00001_LEFT_CC"),
            record("Calc-Training_P_00002_LEFT_CC"),
            // Wrong prefix, must be ignored entirely
            record("Mass-Training_P_00003_LEFT_CC"),
        ];
        let cases = vec![case("Calc-Training_P_00001_LEFT_CC", Pathology::Malignant)];

        let counts = stage_inventory(&records, &cases, "Calc-Training", &out).unwrap();
        assert_eq!(counts.matched, 1);
        assert_eq!(counts.unmatched, 1);

        let staged = read_staged(&out).unwrap();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].img, "Calc-Training_P_00001_LEFT_CC");
        assert_eq!(staged[0].pathology, "MALIGNANT");
    }

    #[test]
    fn test_empty_stage_reads_back_empty() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("mass-test.csv");

        let counts = stage_inventory(&[], &[], "Mass-Test", &out).unwrap();
        assert_eq!(counts.matched, 0);
        assert!(read_staged(&out).unwrap().is_empty());
    }

    #[test]
    fn test_stage_csv_names() {
        assert_eq!(
            stage_csv_name(LesionKind::Calc, Split::Training),
            "calc-training.csv"
        );
        assert_eq!(stage_csv_name(LesionKind::Mass, Split::Test), "mass-test.csv");
    }
}
