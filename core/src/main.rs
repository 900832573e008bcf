use clap::Parser;
use log::{error, info};
use mammoprep_core::cli::report::TextReport;
use mammoprep_core::cli::{load_image, write_outputs, Cli, OutputFormat};
use mammoprep_core::{load_chain_code, MammogramPreprocessor, PreprocessSummary};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    #[cfg(not(feature = "json"))]
    if matches!(cli.format, OutputFormat::Json) {
        eprintln!("Error: JSON output requires the 'json' feature");
        eprintln!("Rebuild with: cargo build --features json");
        process::exit(1);
    }

    // Load image and chain code
    let inputs = load_image(&cli.image)
        .and_then(|image| load_chain_code(&cli.chaincode).map(|code| (image, code)));
    let (image, chain_code) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => {
            error!("Failed to load inputs: {}", e);
            eprintln!("Error loading inputs: {}", e);
            process::exit(1);
        }
    };

    let output = match MammogramPreprocessor::new(config)
        .and_then(|preprocessor| preprocessor.preprocess(&image, &chain_code))
    {
        Ok(output) => output,
        Err(e) => {
            error!("Preprocessing failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let stem = cli
        .image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    match write_outputs(
        &cli.output_dir,
        &stem,
        &image,
        &chain_code,
        &output,
        cli.save_steps,
    ) {
        Ok(paths) => info!("Wrote {} files to {}", paths.len(), cli.output_dir.display()),
        Err(e) => {
            error!("Failed to write outputs: {}", e);
            eprintln!("Error: Failed to write outputs: {}", e);
            process::exit(1);
        }
    }

    print_summary(&output.summary(), cli.format);
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

fn print_summary(summary: &PreprocessSummary, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", TextReport::new(summary));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(summary) {
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
                // Rejected before any processing
                let _ = summary;
            }
        }
    }
}
