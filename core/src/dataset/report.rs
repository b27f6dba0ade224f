use std::fmt;

/// Aggregate counters for one dataset build
///
/// Recoverable conditions (unjoinable records, decode failures) are
/// reported here instead of failing the run or disappearing silently.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BuildReport {
    /// Mammogram (`_CC`/`_MLO`) folders visited
    pub mammogram_folders: usize,

    /// Mammogram folders skipped: no file after conversion
    pub empty_mammogram_folders: usize,

    /// Mammogram folders holding more than one file
    pub multi_file_mammogram_folders: usize,

    /// Mask folders visited
    pub mask_folders: usize,

    /// DICOM files that failed to decode during the mask scan
    pub mask_decode_failures: usize,

    /// Mask folders with no 16-bit unsigned image
    pub mask_folders_without_mask: usize,

    /// Mammograms with no matching official case row
    pub unmatched_mammograms: usize,

    /// Masks with no matching official case row
    pub unmatched_masks: usize,

    /// Mask rows whose merge key matched no mammogram
    pub unjoined_masks: usize,

    /// Joined rows dropped because the two sides disagreed on the label
    pub label_conflicts: usize,

    /// Rows written to training_dataset.csv
    pub training_rows: usize,

    /// Rows written to test_dataset.csv
    pub test_rows: usize,
}

impl BuildReport {
    /// Total records dropped for any recoverable reason
    pub fn dropped(&self) -> usize {
        self.empty_mammogram_folders
            + self.mask_folders_without_mask
            + self.unmatched_mammograms
            + self.unmatched_masks
            + self.unjoined_masks
            + self.label_conflicts
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Build Report")?;
        writeln!(f, "====================")?;
        writeln!(f)?;
        writeln!(f, "Mammogram folders:   {}", self.mammogram_folders)?;
        writeln!(f, "  empty:             {}", self.empty_mammogram_folders)?;
        writeln!(
            f,
            "  multiple files:    {}",
            self.multi_file_mammogram_folders
        )?;
        writeln!(f, "  no case row:       {}", self.unmatched_mammograms)?;
        writeln!(f, "Mask folders:        {}", self.mask_folders)?;
        writeln!(f, "  decode failures:   {}", self.mask_decode_failures)?;
        writeln!(f, "  no 16-bit image:   {}", self.mask_folders_without_mask)?;
        writeln!(f, "  no case row:       {}", self.unmatched_masks)?;
        writeln!(f, "Merge:")?;
        writeln!(f, "  unjoined masks:    {}", self.unjoined_masks)?;
        writeln!(f, "  label conflicts:   {}", self.label_conflicts)?;
        writeln!(f)?;
        writeln!(f, "training_dataset.csv: {} rows", self.training_rows)?;
        writeln!(f, "test_dataset.csv:     {} rows", self.test_rows)?;

        Ok(())
    }
}
