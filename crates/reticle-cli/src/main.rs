mod commands;
mod imageio;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reticle", about = "Optical target-centering tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the target in a frame and report its deviation
    Find(commands::find::FindArgs),
    /// Crop a physical-unit window out of a frame
    Crop(commands::crop::CropArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Find(args) => commands::find::run(args),
        Commands::Crop(args) => commands::crop::run(args),
    }
}
