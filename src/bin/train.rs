use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cifar_neurons::config::{load_config, DriverConfig};
use cifar_neurons::driver::Driver;
use cifar_neurons::ppm::FileNaming;

/// Reads CIFAR records, writes each image as a PPM and runs a training step.
#[derive(Debug, Parser)]
#[command(name = "train")]
struct Args {
    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// CIFAR binary input file.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory for the PPM images.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Number of records to process.
    #[arg(long)]
    count: Option<usize>,
    /// Seed for weight initialization.
    #[arg(long)]
    seed: Option<u64>,
    /// Include the record index in image file names.
    #[arg(long)]
    unique_names: bool,
}

fn build_config(args: Args) -> cifar_neurons::Result<DriverConfig> {
    let mut config = match args.config {
        Some(path) => load_config(path)?,
        None => DriverConfig::default(),
    };
    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(count) = args.count {
        config.record_count = count;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.unique_names {
        config.file_naming = FileNaming::IndexedLabel;
    }
    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match build_config(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };

    let seed = config.seed.unwrap_or_else(clock_seed);
    info!("weight seed: {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    if let Err(e) = Driver::new(config).run(&mut rng) {
        error!("{}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            error!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}
