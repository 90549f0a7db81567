//! Batch scheduler: fans the chant collection out across the rayon pool and
//! drains per-chant outcomes in completion order.
//!
//! Workers share nothing mutable; each sends one immutable [`Outcome`] over
//! an mpsc channel. The calling thread is the only consumer and the only
//! mutator of the tallies and the progress bar, so the counters need no
//! synchronization.

use crate::chant::Chant;
use crate::config::RenderConfig;
use crate::pipeline::{self, Outcome, Status};
use crate::progress::{ProgressManager, TEMPLATE_RENDER};
use colored::Colorize;
use rayon::prelude::*;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Final tallies for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome.status {
            Status::Success => self.success += 1,
            Status::Skipped => self.skipped += 1,
            Status::Failed(_) => self.failed += 1,
        }
    }
}

/// Render every chant in the collection on the current rayon pool.
///
/// Results arrive in completion order; ordering between chants is not
/// guaranteed and the final tallies do not depend on it. One chant's failure
/// never aborts the others.
///
/// The fan-out runs on the calling thread, so a pool installed with
/// `ThreadPool::install` is honored; otherwise the global pool is used.
pub fn run_batch(
    chants: &[Chant],
    config: &RenderConfig,
    progress: &ProgressManager,
) -> BatchSummary {
    let started = Instant::now();
    let bar = progress.create_bar(chants.len() as u64, TEMPLATE_RENDER);
    bar.set_message("Rendering");

    let (tx, rx) = mpsc::channel::<Outcome>();

    let mut summary = std::thread::scope(|scope| {
        // sole consumer: tallies and progress live on this thread only
        let consumer = scope.spawn(|| {
            let mut summary = BatchSummary::default();
            for outcome in rx {
                if let Status::Failed(ref err) = outcome.status {
                    let line = format_failure(&outcome, err);
                    // println through a hidden bar is a no-op; fall back to
                    // stderr so failures still surface when piped
                    if bar.is_hidden() {
                        eprintln!("{}", line);
                    } else {
                        bar.println(line);
                    }
                }
                summary.record(&outcome);
                bar.inc(1);
            }
            summary
        });

        chants.par_iter().for_each_with(tx, |tx, chant| {
            let outcome = pipeline::process_chant(chant, config);
            // a closed channel means the consumer is gone; nothing to do
            let _ = tx.send(outcome);
        });
        // tx is consumed above; the closed channel ends the consumer loop

        consumer.join().expect("outcome consumer panicked")
    });

    summary.elapsed = started.elapsed();
    bar.finish_and_clear();

    cleanup_temp_root(config, &summary);
    summary
}

/// One diagnostic line per failure, interleaved with the progress bar.
fn format_failure(outcome: &Outcome, err: &crate::errors::RenderError) -> String {
    let id = outcome
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "?".to_string());
    let incipit: String = outcome
        .incipit
        .as_deref()
        .unwrap_or("N/A")
        .chars()
        .take(40)
        .collect();
    format!("{} chant {} ('{}'): {}", "error:".red().bold(), id, incipit, err)
}

/// Coarse post-batch cleanup of the shared temp root.
///
/// Failed chants keep their workspaces, so the root is only removed when the
/// whole batch came back clean and keep-temp is off.
fn cleanup_temp_root(config: &RenderConfig, summary: &BatchSummary) {
    if config.keep_temp {
        log::info!("temp root kept at {}", config.temp_dir.display());
        return;
    }
    if summary.failed > 0 {
        log::info!(
            "failures occurred; workspaces kept under {}",
            config.temp_dir.display()
        );
        return;
    }
    if config.temp_dir.exists() {
        if let Err(e) = std::fs::remove_dir_all(&config.temp_dir) {
            log::warn!(
                "could not remove temp root {}: {}",
                config.temp_dir.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RenderError;
    use crate::progress::ProgressConfig;

    fn outcome(status: Status) -> Outcome {
        Outcome {
            id: Some(1.into()),
            incipit: Some("In principio erat Verbum et Verbum erat apud Deum".to_string()),
            status,
        }
    }

    #[test]
    fn test_summary_tally() {
        let mut summary = BatchSummary::default();
        summary.record(&outcome(Status::Success));
        summary.record(&outcome(Status::Skipped));
        summary.record(&outcome(Status::Failed(RenderError::MissingScore)));
        summary.record(&outcome(Status::Success));

        assert_eq!(summary.success, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_failure_line_truncates_incipit_to_40_chars() {
        let out = outcome(Status::Failed(RenderError::MissingScore));
        let line = format_failure(
            &out,
            &RenderError::MissingScore,
        );
        assert!(line.contains("In principio erat Verbum et Verbum erat "));
        assert!(!line.contains("apud Deum"));
        assert!(line.contains("missing or invalid gabc score data"));
    }

    #[test]
    fn test_failure_line_placeholder_id() {
        let out = Outcome {
            id: None,
            incipit: None,
            status: Status::Failed(RenderError::MissingId),
        };
        let line = format_failure(&out, &RenderError::MissingId);
        assert!(line.contains("chant ?"));
        assert!(line.contains("'N/A'"));
    }

    #[test]
    fn test_empty_batch_runs_to_completion() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = RenderConfig::default().with_dirs(
            &dir.path().join("chants.json"),
            &dir.path().join("images"),
            &dir.path().join("temp_build"),
        );
        let progress = ProgressManager::new(ProgressConfig {
            quiet_mode: true,
            verbosity: 0,
        });

        let summary = run_batch(&[], &config, &progress);
        assert_eq!(summary.total(), 0);
    }
}
