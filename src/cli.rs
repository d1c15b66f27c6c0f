use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropwise",
    version,
    about = "Weather-driven crop advisories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an advisory from current weather or an input file
    Advise {
        /// Crop type (defaults to the configured farm crop)
        #[arg(long)]
        crop: Option<String>,

        /// JSON or YAML file with `current` and `forecast`; skips the provider
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print insights as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the crop profile table
    Crops,
    /// Show recorded daily history
    History {
        /// Number of days to show
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Validate config and test the weather provider
    Check,
    /// Re-run interactive setup
    Init,
}
