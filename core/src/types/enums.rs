use crate::error::{DdsmError, Result};
use std::fmt;

/// Lesion kind encoded in CBIS-DDSM exam identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LesionKind {
    Calc,
    Mass,
}

impl LesionKind {
    /// All lesion kinds, in the order the official CSVs are named
    pub const ALL: [LesionKind; 2] = [LesionKind::Calc, LesionKind::Mass];

    /// Returns lowercase name for file naming
    pub fn simple_name(&self) -> &'static str {
        match self {
            LesionKind::Calc => "calc",
            LesionKind::Mass => "mass",
        }
    }

    /// Returns the capitalized form used in exam identifier prefixes
    pub fn prefix_name(&self) -> &'static str {
        match self {
            LesionKind::Calc => "Calc",
            LesionKind::Mass => "Mass",
        }
    }

    /// Parses the capitalized identifier form
    pub fn parse_prefix(s: &str) -> Option<Self> {
        match s {
            "Calc" => Some(LesionKind::Calc),
            "Mass" => Some(LesionKind::Mass),
            _ => None,
        }
    }
}

impl fmt::Display for LesionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Official train/test split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Training,
    Test,
}

impl Split {
    /// Both splits, training first
    pub const ALL: [Split; 2] = [Split::Training, Split::Test];

    /// Returns lowercase name for file naming
    pub fn simple_name(&self) -> &'static str {
        match self {
            Split::Training => "training",
            Split::Test => "test",
        }
    }

    /// Returns the capitalized form used in exam identifier prefixes
    pub fn prefix_name(&self) -> &'static str {
        match self {
            Split::Training => "Training",
            Split::Test => "Test",
        }
    }

    /// Returns the stem used in the official case CSV filenames
    ///
    /// Note the official files say "train", not "training".
    pub fn csv_stem(&self) -> &'static str {
        match self {
            Split::Training => "train",
            Split::Test => "test",
        }
    }

    /// Parses the capitalized identifier form
    pub fn parse_prefix(s: &str) -> Option<Self> {
        match s {
            "Training" => Some(Split::Training),
            "Test" => Some(Split::Test),
            _ => None,
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Breast laterality as spelled in exam identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Laterality {
    Left,
    Right,
}

impl Laterality {
    pub fn simple_name(&self) -> &'static str {
        match self {
            Laterality::Left => "LEFT",
            Laterality::Right => "RIGHT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LEFT" => Some(Laterality::Left),
            "RIGHT" => Some(Laterality::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Standard view position (CC or MLO)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPosition {
    Cc,
    Mlo,
}

impl ViewPosition {
    pub fn simple_name(&self) -> &'static str {
        match self {
            ViewPosition::Cc => "CC",
            ViewPosition::Mlo => "MLO",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CC" => Some(ViewPosition::Cc),
            "MLO" => Some(ViewPosition::Mlo),
            _ => None,
        }
    }
}

impl fmt::Display for ViewPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Ground-truth pathology after normalization
///
/// The raw string `BENIGN_WITHOUT_CALLBACK` normalizes to `BENIGN`
/// before parsing. Any other unknown string is an error, never a
/// silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pathology {
    Malignant,
    Benign,
}

impl Pathology {
    /// Parses a raw pathology string from the official CSVs
    pub fn from_raw(s: &str) -> Result<Self> {
        match normalize_pathology(s) {
            "MALIGNANT" => Ok(Pathology::Malignant),
            "BENIGN" => Ok(Pathology::Benign),
            other => Err(DdsmError::InvalidValue(format!(
                "unknown pathology: {}",
                other
            ))),
        }
    }

    pub fn simple_name(&self) -> &'static str {
        match self {
            Pathology::Malignant => "MALIGNANT",
            Pathology::Benign => "BENIGN",
        }
    }
}

impl fmt::Display for Pathology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Maps pathology synonyms to their canonical form
///
/// `BENIGN_WITHOUT_CALLBACK` becomes `BENIGN`; every other string
/// passes through unchanged.
pub fn normalize_pathology(s: &str) -> &str {
    if s == "BENIGN_WITHOUT_CALLBACK" {
        "BENIGN"
    } else {
        s
    }
}

/// Four-class dataset label
///
/// Total over the (lesion kind x pathology) product:
/// Malignant-Calcification=1, Benign-Calcification=2,
/// Malignant-Mass=3, Benign-Mass=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Label {
    MalignantCalcification,
    BenignCalcification,
    MalignantMass,
    BenignMass,
}

impl Label {
    /// Derives the label from lesion kind and pathology
    pub fn from_parts(kind: LesionKind, pathology: Pathology) -> Self {
        match (kind, pathology) {
            (LesionKind::Calc, Pathology::Malignant) => Label::MalignantCalcification,
            (LesionKind::Calc, Pathology::Benign) => Label::BenignCalcification,
            (LesionKind::Mass, Pathology::Malignant) => Label::MalignantMass,
            (LesionKind::Mass, Pathology::Benign) => Label::BenignMass,
        }
    }

    /// Returns the integer code written to the final CSVs
    pub fn code(&self) -> u8 {
        match self {
            Label::MalignantCalcification => 1,
            Label::BenignCalcification => 2,
            Label::MalignantMass => 3,
            Label::BenignMass => 4,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Output bit depth for converted PNGs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    Eight,
    Sixteen,
}

impl BitDepth {
    /// Maximum representable pixel value at this depth
    pub fn max_value(&self) -> f32 {
        match self {
            BitDepth::Eight => 255.0,
            BitDepth::Sixteen => 65535.0,
        }
    }

    /// Parses a numeric bit depth (8 or 16)
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            other => Err(DdsmError::InvalidValue(format!(
                "unsupported bit depth: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LesionKind::Calc, Pathology::Malignant, 1)]
    #[case(LesionKind::Calc, Pathology::Benign, 2)]
    #[case(LesionKind::Mass, Pathology::Malignant, 3)]
    #[case(LesionKind::Mass, Pathology::Benign, 4)]
    fn test_label_mapping_total(
        #[case] kind: LesionKind,
        #[case] pathology: Pathology,
        #[case] code: u8,
    ) {
        assert_eq!(Label::from_parts(kind, pathology).code(), code);
    }

    #[test]
    fn test_normalize_pathology() {
        assert_eq!(normalize_pathology("BENIGN_WITHOUT_CALLBACK"), "BENIGN");
        assert_eq!(normalize_pathology("BENIGN"), "BENIGN");
        assert_eq!(normalize_pathology("MALIGNANT"), "MALIGNANT");
        // Unknown strings pass through unchanged (rejection happens at parse)
        assert_eq!(normalize_pathology("SUSPICIOUS"), "SUSPICIOUS");
    }

    #[rstest]
    #[case("MALIGNANT", Pathology::Malignant)]
    #[case("BENIGN", Pathology::Benign)]
    #[case("BENIGN_WITHOUT_CALLBACK", Pathology::Benign)]
    fn test_pathology_from_raw(#[case] raw: &str, #[case] expected: Pathology) {
        assert_eq!(Pathology::from_raw(raw).unwrap(), expected);
    }

    #[test]
    fn test_pathology_unknown_is_error() {
        assert!(Pathology::from_raw("SUSPICIOUS").is_err());
        assert!(Pathology::from_raw("").is_err());
        // Lowercase is not the official spelling and must not be accepted
        assert!(Pathology::from_raw("malignant").is_err());
    }

    #[test]
    fn test_split_csv_stem() {
        assert_eq!(Split::Training.csv_stem(), "train");
        assert_eq!(Split::Test.csv_stem(), "test");
    }

    #[test]
    fn test_bit_depth() {
        assert_eq!(BitDepth::from_bits(8).unwrap(), BitDepth::Eight);
        assert_eq!(BitDepth::from_bits(16).unwrap(), BitDepth::Sixteen);
        assert!(BitDepth::from_bits(12).is_err());
        assert_eq!(BitDepth::Sixteen.max_value(), 65535.0);
    }
}
