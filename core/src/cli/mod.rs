use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for ddsmprep
#[derive(Parser, Debug)]
#[command(name = "ddsmprep")]
#[command(about = "Build CBIS-DDSM training/test dataset CSVs from converted images")]
#[command(version)]
pub struct Cli {
    /// Root of converted PNG images (one subfolder per exam)
    #[arg(value_name = "PNG_ROOT")]
    pub png_root: PathBuf,

    /// Root of original DICOM files (scanned for ROI masks)
    #[arg(value_name = "DICOM_ROOT")]
    pub dicom_root: PathBuf,

    /// Directory with the four official case description CSVs
    #[arg(value_name = "CSV_ROOT")]
    pub csv_root: PathBuf,

    /// Output directory for the final dataset CSVs
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Base directory for intermediate CSV folders
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// Keep the intermediate CSV folders after the merge
    #[arg(long)]
    pub keep_temp: bool,

    /// Report format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report
    Text,
    /// JSON report
    Json,
}
