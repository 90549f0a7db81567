pub mod setup;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gregorender")]
#[command(about = "Parallel Gregorian chant SVG renderer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every chant in the collection to SVG
    Render {
        /// Source JSON collection
        #[arg(short, long, default_value = "data/chants.json")]
        input: PathBuf,

        /// Directory receiving the rendered images
        #[arg(short, long, default_value = "images")]
        output_dir: PathBuf,

        /// Root directory for per-chant build workspaces
        #[arg(long, default_value = "temp_build")]
        temp_dir: PathBuf,

        /// Process only the first N chants, for testing
        #[arg(long)]
        limit: Option<usize>,

        /// Do not delete temporary build files, for debugging
        #[arg(long)]
        keep_temp: bool,

        /// Number of parallel workers (0 = all cores)
        #[arg(short, long, default_value = "0")]
        jobs: usize,

        /// Suppress progress output
        #[arg(short, long, env = "GREGORENDER_QUIET")]
        quiet: bool,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,

        /// Path to the gregorio notation compiler
        #[arg(long, default_value = "gregorio", hide_short_help = true)]
        gregorio: String,

        /// Path to the lualatex typesetter
        #[arg(long, default_value = "lualatex", hide_short_help = true)]
        lualatex: String,

        /// Path to the dvisvgm converter
        #[arg(long, default_value = "dvisvgm", hide_short_help = true)]
        dvisvgm: String,
    },

    /// Check which chants are renderable without invoking any tools
    Check {
        /// Source JSON collection
        #[arg(short, long, default_value = "data/chants.json")]
        input: PathBuf,

        /// Check only the first N chants
        #[arg(long)]
        limit: Option<usize>,
    },
}
