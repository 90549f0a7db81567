//! The `render` subcommand: directory setup, collection load, batch run and
//! final summary.

use crate::batch::{self, BatchSummary};
use crate::cli::setup;
use crate::config::RenderConfig;
use crate::io;
use crate::progress::{ProgressConfig, ProgressManager};
use anyhow::Result;
use colored::Colorize;

/// Run the full batch conversion.
///
/// Per-item failures are reported along the way and in the summary; they
/// never affect the process exit status.
pub fn handle_render(config: RenderConfig) -> Result<()> {
    preflight_tools(&config);

    io::ensure_dir(&config.output_dir)?;
    io::ensure_dir(&config.temp_dir)?;

    log::info!("loading chant data from {}", config.source.display());
    let mut chants = io::load_chants(&config.source)?;

    if let Some(limit) = config.limit {
        chants.truncate(limit);
        println!("Processing a limited set of {} chants.", chants.len());
    }

    if chants.is_empty() {
        println!("No chants to process.");
        return Ok(());
    }

    setup::configure_thread_pool(config.jobs);
    let workers = setup::get_worker_count(config.jobs);
    println!(
        "Found {} chants to process. Starting parallel rendering with {} workers.",
        chants.len(),
        workers
    );

    let progress = ProgressManager::new(ProgressConfig::from_env(config.quiet, config.verbosity));
    let summary = batch::run_batch(&chants, &config, &progress);
    progress.clear()?;

    print_summary(&summary, &config);
    Ok(())
}

/// Warn early about tools that are not on PATH. A missing tool is still a
/// per-item failure, so this never aborts the run.
fn preflight_tools(config: &RenderConfig) {
    for tool in config.tools.all() {
        if which::which(tool).is_err() {
            log::warn!("{} not found on PATH; chants will fail at that stage", tool);
        }
    }
}

fn print_summary(summary: &BatchSummary, config: &RenderConfig) {
    println!("\n--- Rendering Complete ---");
    println!("Total time: {:.2} seconds", summary.elapsed.as_secs_f64());
    println!(
        "Successfully rendered: {}",
        summary.success.to_string().green()
    );
    println!("Skipped: {}", summary.skipped.to_string().yellow());
    println!("Errors: {}", summary.failed.to_string().red());

    if config.keep_temp {
        println!(
            "Temporary build files kept in '{}'.",
            config.temp_dir.display()
        );
    } else if summary.failed > 0 {
        println!(
            "Errors occurred. Temporary files for failed chants kept in '{}'.",
            config.temp_dir.display()
        );
    } else {
        println!("All temporary build files cleaned up.");
    }
}
