use clap::Parser;
use ddsmprep_core::{
    convert_file, convert_tree, BatchOptions, BitDepth, ConvertOptions, DdsmError,
};
use log::{error, info};
use std::path::PathBuf;
use std::process;

/// CLI tool for converting DICOM mammograms to greyscale PNG
#[derive(Parser, Debug)]
#[command(name = "ddsmconvert")]
#[command(about = "Convert DICOM mammograms to normalized greyscale PNG")]
#[command(version)]
struct Cli {
    /// DICOM file or directory tree to convert
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output PNG file (for a single input file) or root directory
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Target width in pixels
    #[arg(long, default_value_t = 896)]
    width: u32,

    /// Target height in pixels
    #[arg(long, default_value_t = 1152)]
    height: u32,

    /// Keep the source resolution instead of resizing
    #[arg(long)]
    no_resize: bool,

    /// Output bit depth (8 or 16)
    #[arg(long, default_value_t = 16)]
    bit_depth: u8,

    /// Abort batch conversion after this many output bytes
    #[arg(long)]
    max_output_bytes: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let bit_depth = match BitDepth::from_bits(cli.bit_depth) {
        Ok(depth) => depth,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let convert = ConvertOptions {
        target_size: if cli.no_resize {
            None
        } else {
            Some((cli.width, cli.height))
        },
        bit_depth,
    };

    if cli.input.is_file() {
        if let Err(e) = convert_file(&cli.input, &cli.output, &convert) {
            error!("Conversion failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        info!("Saved: {}", cli.output.display());
        return;
    }

    let options = BatchOptions {
        convert,
        max_output_bytes: cli.max_output_bytes,
    };

    match convert_tree(&cli.input, &cli.output, &options) {
        Ok(report) => {
            println!("{}", report);
        }
        Err(e @ DdsmError::QuotaExceeded { .. }) => {
            error!("Batch aborted: {}", e);
            eprintln!("Error: {}", e);
            process::exit(2);
        }
        Err(e) => {
            error!("Batch conversion failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
