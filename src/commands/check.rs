//! The `check` subcommand: report which chants are renderable without
//! touching the filesystem or invoking any external tool.

use crate::chant::Chant;
use crate::errors::RenderError;
use crate::io;
use crate::transform;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub renderable: usize,
    pub missing_id: usize,
    pub missing_score: usize,
}

impl CheckReport {
    pub fn total(&self) -> usize {
        self.renderable + self.missing_id + self.missing_score
    }
}

/// Classify every record with the transformer alone.
pub fn check_chants(chants: &[Chant]) -> CheckReport {
    let mut report = CheckReport::default();
    for chant in chants {
        if chant.id.is_none() {
            report.missing_id += 1;
        } else {
            match transform::gabc_source(chant) {
                Ok(_) => report.renderable += 1,
                Err(RenderError::MissingScore) => report.missing_score += 1,
                // the transformer only produces MissingScore, but stay total
                Err(_) => report.missing_score += 1,
            }
        }
    }
    report
}

pub fn handle_check(input: &Path, limit: Option<usize>) -> Result<()> {
    let mut chants = io::load_chants(input)?;
    if let Some(limit) = limit {
        chants.truncate(limit);
    }

    let report = check_chants(&chants);

    println!("Checked {} chants:", report.total());
    println!("  renderable:    {}", report.renderable.to_string().green());
    println!("  missing id:    {}", report.missing_id.to_string().red());
    println!(
        "  missing score: {}",
        report.missing_score.to_string().red()
    );
    Ok(())
}
