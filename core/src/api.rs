use crate::cases::{load_case_table, PathColumn};
use crate::dataset::{merge_split, stage_csv_name, stage_inventory, BuildReport};
use crate::error::{DdsmError, Result};
use crate::inventory::{collect_mammograms, collect_masks};
use crate::types::{LesionKind, Split};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

/// Configuration for one dataset build
///
/// All paths are explicit; there is no implicit working-directory
/// state beyond the default temp folder location.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root of converted PNG images, one subfolder per exam
    pub png_root: PathBuf,

    /// Root of original DICOM files, scanned for ROI masks
    pub dicom_root: PathBuf,

    /// Directory holding the four official case description CSVs
    pub csv_root: PathBuf,

    /// Where `training_dataset.csv` / `test_dataset.csv` are written
    pub output_dir: PathBuf,

    /// Base for the intermediate CSV folders; defaults to the current
    /// working directory
    pub temp_dir: Option<PathBuf>,

    /// Keep the intermediate CSV folders after the merge
    pub keep_temp: bool,
}

/// High-level dataset build pipeline
///
/// Runs the full collect → stage → merge sequence and returns the
/// aggregate [`BuildReport`]. Missing input roots or case CSVs are
/// fatal; unjoinable or undecodable records are counted and dropped.
pub struct DatasetBuilder {
    config: BuildConfig,
}

impl DatasetBuilder {
    /// Creates a builder for the given configuration
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Builds `training_dataset.csv` and `test_dataset.csv`
    pub fn build(&self) -> Result<BuildReport> {
        let config = &self.config;
        for root in [&config.png_root, &config.dicom_root, &config.csv_root] {
            if !root.is_dir() {
                return Err(DdsmError::MissingInput(root.clone()));
            }
        }
        fs::create_dir_all(&config.output_dir)?;

        let mammograms = collect_mammograms(&config.png_root)?;
        let masks = collect_masks(&config.dicom_root)?;

        let mut report = BuildReport {
            mammogram_folders: mammograms.folders_seen,
            empty_mammogram_folders: mammograms.empty_folders,
            multi_file_mammogram_folders: mammograms.multi_file_folders,
            mask_folders: masks.folders_seen,
            mask_decode_failures: masks.decode_failures,
            mask_folders_without_mask: masks.folders_without_mask,
            ..BuildReport::default()
        };

        let temp_base = config
            .temp_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let mam_dir = temp_base.join("temp_mammograms_csv");
        let mask_dir = temp_base.join("temp_masks_csv");

        for kind in LesionKind::ALL {
            for split in Split::ALL {
                let prefix = format!("{}-{}", kind.prefix_name(), split.prefix_name());
                let name = stage_csv_name(kind, split);

                let cases = load_case_table(&config.csv_root, kind, split, PathColumn::Image)?;
                let counts =
                    stage_inventory(&mammograms.records, &cases, &prefix, &mam_dir.join(&name))?;
                report.unmatched_mammograms += counts.unmatched;

                let cases = load_case_table(&config.csv_root, kind, split, PathColumn::RoiMask)?;
                let counts =
                    stage_inventory(&masks.records, &cases, &prefix, &mask_dir.join(&name))?;
                report.unmatched_masks += counts.unmatched;
            }
        }

        for split in Split::ALL {
            let outcome = merge_split(split, &mam_dir, &mask_dir, &config.output_dir)?;
            report.unjoined_masks += outcome.unjoined_masks;
            report.label_conflicts += outcome.label_conflicts;
            match split {
                Split::Training => report.training_rows = outcome.rows_written,
                Split::Test => report.test_rows = outcome.rows_written,
            }
        }

        if !config.keep_temp {
            for dir in [&mam_dir, &mask_dir] {
                if let Err(e) = fs::remove_dir_all(dir) {
                    warn!("Failed to remove {}: {}", dir.display(), e);
                }
            }
        }

        info!(
            "Dataset build complete: {} training rows, {} test rows, {} dropped",
            report.training_rows,
            report.test_rows,
            report.dropped()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::dataset_csv_path;
    use crate::testing::write_test_dicom;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADER: &str = "pathology,image file path,ROI mask file path\n";

    fn write_case_csvs(csv_root: &Path, train_calc_body: &str) {
        fs::create_dir_all(csv_root).unwrap();
        for name in [
            "calc_case_description_train_set.csv",
            "calc_case_description_test_set.csv",
            "mass_case_description_train_set.csv",
            "mass_case_description_test_set.csv",
        ] {
            let body = if name == "calc_case_description_train_set.csv" {
                train_calc_body
            } else {
                ""
            };
            File::create(csv_root.join(name))
                .unwrap()
                .write_all(format!("{}{}", HEADER, body).as_bytes())
                .unwrap();
        }
    }

    #[test]
    fn test_build_end_to_end_single_exam() {
        let tmp = TempDir::new().unwrap();
        let png_root = tmp.path().join("png");
        let dicom_root = tmp.path().join("dcm");
        let csv_root = tmp.path().join("csv");
        let output_dir = tmp.path().join("out");

        // One converted mammogram
        let mam_folder = png_root.join("Calc-Training_P1_LEFT_CC/1");
        fs::create_dir_all(&mam_folder).unwrap();
        File::create(mam_folder.join("img.png")).unwrap();

        // One 16-bit ROI mask
        let mask_folder = dicom_root.join("Calc-Training_P1_LEFT_CC_1/1");
        fs::create_dir_all(&mask_folder).unwrap();
        write_test_dicom(&mask_folder.join("mask.dcm"), 2, 2, 16, &[0, 1, 1, 0], None);

        write_case_csvs(
            &csv_root,
            "MALIGNANT,Calc-Training_P1_LEFT_CC/1/img.dcm,Calc-Training_P1_LEFT_CC_1/1/mask.dcm\n",
        );

        let report = DatasetBuilder::new(BuildConfig {
            png_root,
            dicom_root,
            csv_root,
            output_dir: output_dir.clone(),
            temp_dir: Some(tmp.path().join("tmp")),
            keep_temp: false,
        })
        .build()
        .unwrap();

        assert_eq!(report.mammogram_folders, 1);
        assert_eq!(report.mask_folders, 1);
        assert_eq!(report.training_rows, 1);
        assert_eq!(report.test_rows, 0);
        assert_eq!(report.dropped(), 0);

        // Exactly one row, malignant calcification = label 1
        let mut reader =
            csv::Reader::from_path(dataset_csv_path(&output_dir, Split::Training)).unwrap();
        let rows: Vec<(String, String, u8)> = reader
            .deserialize()
            .map(|r: std::result::Result<(String, String, u8), _>| r.unwrap())
            .collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].0.ends_with("img.png"));
        assert!(rows[0].1.ends_with("mask.dcm"));
        assert_eq!(rows[0].2, 1);

        // Temp folders were cleaned up
        assert!(!tmp.path().join("tmp/temp_mammograms_csv").exists());
        assert!(!tmp.path().join("tmp/temp_masks_csv").exists());
    }

    #[test]
    fn test_build_keep_temp_preserves_intermediates() {
        let tmp = TempDir::new().unwrap();
        let png_root = tmp.path().join("png");
        let dicom_root = tmp.path().join("dcm");
        let csv_root = tmp.path().join("csv");
        fs::create_dir_all(&png_root).unwrap();
        fs::create_dir_all(&dicom_root).unwrap();
        write_case_csvs(&csv_root, "");

        let report = DatasetBuilder::new(BuildConfig {
            png_root,
            dicom_root,
            csv_root,
            output_dir: tmp.path().join("out"),
            temp_dir: Some(tmp.path().join("tmp")),
            keep_temp: true,
        })
        .build()
        .unwrap();

        assert_eq!(report.training_rows, 0);
        assert!(tmp
            .path()
            .join("tmp/temp_mammograms_csv/calc-training.csv")
            .exists());
        assert!(tmp
            .path()
            .join("tmp/temp_masks_csv/mass-test.csv")
            .exists());
    }

    #[test]
    fn test_build_missing_csv_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let png_root = tmp.path().join("png");
        let dicom_root = tmp.path().join("dcm");
        fs::create_dir_all(&png_root).unwrap();
        fs::create_dir_all(&dicom_root).unwrap();

        let result = DatasetBuilder::new(BuildConfig {
            png_root,
            dicom_root,
            csv_root: tmp.path().join("absent"),
            output_dir: tmp.path().join("out"),
            temp_dir: None,
            keep_temp: false,
        })
        .build();

        assert!(matches!(result, Err(DdsmError::MissingInput(_))));
    }
}
