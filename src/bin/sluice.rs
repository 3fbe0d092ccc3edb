//! sluice: extract car listing records from raw JSON dumps into CSV.
//!
//! Usage:
//!   # Extract every *.txt and *.tx dump in the working directory
//!   sluice
//!
//!   # Explicit inputs, custom output path
//!   sluice dump1.txt dump2.txt -o data/cars.csv

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sluice")]
#[command(about = "Extract car listings from raw JSON dumps into CSV", long_about = None)]
struct Args {
    /// Input dump files (defaults to *.txt and *.tx in the current directory)
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Output CSV path
    #[arg(long, short = 'o', default_value = "data/cars.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "warn");
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    let args = Args::parse();

    let inputs = if args.inputs.is_empty() {
        sluice::discover_inputs(&std::env::current_dir()?)?
    } else {
        args.inputs
    };

    let count = sluice::extract_to_csv(&inputs, &args.output)?;
    println!("Wrote {} rows to {}", count, args.output.display());
    Ok(())
}
