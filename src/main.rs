use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bikeshare::{config::Catalog, shell::Shell};

/// Explore US bike-share data interactively.
#[derive(Parser, Debug)]
#[command(name = "bikeshare")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".", value_name = "DIR")]
    data_dir: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    let catalog = Catalog::default_in(&args.data_dir);
    let stdin = io::stdin();
    let mut shell = Shell::new(&catalog, stdin.lock(), io::stdout());

    shell
        .run()
        .with_context(|| format!("Failed to analyse trip data in {}", args.data_dir.display()))
}
