use clap::Parser;
use ddsmprep_core::cli::{Cli, OutputFormat};
use ddsmprep_core::{BuildConfig, BuildReport, DatasetBuilder};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!("Building datasets from {}", cli.png_root.display());

    let config = BuildConfig {
        png_root: cli.png_root,
        dicom_root: cli.dicom_root,
        csv_root: cli.csv_root,
        output_dir: cli.output_dir,
        temp_dir: cli.temp_dir,
        keep_temp: cli.keep_temp,
    };

    match DatasetBuilder::new(config).build() {
        Ok(report) => output_report(&report, cli.format),
        Err(e) => {
            error!("Dataset build failed: {}", e);
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

fn output_report(report: &BuildReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", report);
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
