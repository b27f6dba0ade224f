//! Staging and merging of dataset metadata
//!
//! The pipeline runs in two stages, mirrored by one intermediate CSV
//! per `<Lesion>-<Split>` subset: inventories are first joined against
//! the official case CSVs, then the mammogram and mask sides are
//! joined on the derived merge key and emitted as
//! `training_dataset.csv` / `test_dataset.csv`.

pub mod merge;
pub mod report;
pub mod stage;

pub use merge::{dataset_csv_path, merge_split, FinalRow, MergeOutcome};
pub use report::BuildReport;
pub use stage::{read_staged, stage_csv_name, stage_inventory, StageCounts, StagedRow};
