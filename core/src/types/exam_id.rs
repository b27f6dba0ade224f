use crate::types::{Laterality, LesionKind, Split, ViewPosition};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Parsed CBIS-DDSM exam identifier
///
/// Folder names follow the convention
/// `<Lesion>-<Split>_<PatientID>_<LATERALITY>_<VIEW>[_<index>]`,
/// e.g. `Calc-Training_P_00001_LEFT_CC` for a mammogram and
/// `Calc-Training_P_00001_LEFT_CC_1` for the ROI mask of its first
/// abnormality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamId {
    pub lesion: LesionKind,
    pub split: Split,
    pub patient: String,
    pub laterality: Laterality,
    pub view: ViewPosition,
    /// Abnormality index, present on mask folders only
    pub index: Option<u32>,
}

fn exam_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(Calc|Mass)-(Training|Test)_(.+?)_(LEFT|RIGHT)_(CC|MLO)(?:_(\d+))?$")
            .expect("Failed to compile regex")
    })
}

impl ExamId {
    /// Parses an exam identifier from a folder name
    ///
    /// Returns `None` for names outside the CBIS-DDSM convention.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = exam_id_regex().captures(s)?;

        Some(ExamId {
            lesion: LesionKind::parse_prefix(caps.get(1)?.as_str())?,
            split: Split::parse_prefix(caps.get(2)?.as_str())?,
            patient: caps.get(3)?.as_str().to_string(),
            laterality: Laterality::parse(caps.get(4)?.as_str())?,
            view: ViewPosition::parse(caps.get(5)?.as_str())?,
            index: caps.get(6).and_then(|m| m.as_str().parse().ok()),
        })
    }

    /// Returns the `<Lesion>-<Split>` grouping prefix, e.g. `Calc-Training`
    pub fn prefix(&self) -> String {
        format!("{}-{}", self.lesion.prefix_name(), self.split.prefix_name())
    }

    /// Returns true when this identifies a standalone mammogram folder
    pub fn is_mammogram(&self) -> bool {
        self.index.is_none()
    }

    /// Returns true when this identifies an ROI mask folder
    pub fn is_mask(&self) -> bool {
        self.index.is_some()
    }
}

impl fmt::Display for ExamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.prefix(),
            self.patient,
            self.laterality,
            self.view
        )?;
        if let Some(index) = self.index {
            write!(f, "_{}", index)?;
        }
        Ok(())
    }
}

/// Derives the merge key for a mask identifier
///
/// Strips a trailing `_<digits>` abnormality suffix so the result
/// matches the corresponding mammogram identifier. For the one-digit
/// indices used by CBIS-DDSM this removes exactly two characters; the
/// suffix is validated instead of blindly truncated so multi-digit
/// indices stay correct. Identifiers without the suffix are returned
/// unchanged.
pub fn merge_key(id: &str) -> &str {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(r"^(.*?)_\d+$").expect("Failed to compile regex"));

    match re.captures(id) {
        Some(caps) => caps.get(1).map_or(id, |m| m.as_str()),
        None => id,
    }
}
