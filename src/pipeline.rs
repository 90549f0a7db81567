//! Per-chant rendering pipeline: an isolated workspace and three external
//! tool invocations in strict sequence (gregorio → lualatex → dvisvgm).
//!
//! Every code path returns an [`Outcome`]; nothing in here panics or
//! propagates an error across the worker boundary.

use crate::chant::{Chant, ChantId};
use crate::config::RenderConfig;
use crate::errors::RenderError;
use crate::transform;
use std::fmt;
use std::fs;
use std::process::{Command, Stdio};

pub const GABC_FILE: &str = "chant.gabc";
pub const GTEX_FILE: &str = "chant.gtex";
pub const TEX_FILE: &str = "render.tex";
pub const DVI_FILE: &str = "render.dvi";

/// Document wrapper written into every workspace. The preview package crops
/// the page to the score; the fixed text width forces consistent line breaks.
pub const LATEX_TEMPLATE: &str = r"\documentclass[12pt]{article}
\usepackage{gregoriotex}

% preview crops the output page to the content bounds
\usepackage[active,tightpage]{preview}

% fixed score width so line wrapping is consistent across chants
\setlength{\textwidth}{15cm}

\begin{document}
\begin{preview}
\gregorioscore{chant.gtex}
\end{preview}
\end{document}
";

/// One of the three sequential external-tool invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Compile,
    Typeset,
    Vectorize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // conventional tool names; diagnostics read the same as upstream gregorio tooling
        let name = match self {
            Stage::Compile => "gregorio",
            Stage::Typeset => "lualatex",
            Stage::Vectorize => "dvisvgm",
        };
        write!(f, "{}", name)
    }
}

/// Terminal classification of one chant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success,
    Skipped,
    Failed(RenderError),
}

/// Per-chant result sent over the batch result channel. Immutable once
/// produced; exactly one per record.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub id: Option<ChantId>,
    pub incipit: Option<String>,
    pub status: Status,
}

impl Outcome {
    fn new(chant: &Chant, status: Status) -> Self {
        Self {
            id: chant.id.clone(),
            incipit: chant.incipit.clone(),
            status,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, Status::Failed(_))
    }
}

/// Run one chant through the full pipeline.
///
/// Order of checks matters: the id and score checks happen before any I/O,
/// and the resumability check happens before any filesystem mutation, so the
/// common "already done" path is side-effect free.
pub fn process_chant(chant: &Chant, config: &RenderConfig) -> Outcome {
    let id = match &chant.id {
        Some(id) => id.clone(),
        None => return Outcome::new(chant, Status::Failed(RenderError::MissingId)),
    };

    let source = match transform::gabc_source(chant) {
        Ok(source) => source,
        Err(err) => return Outcome::new(chant, Status::Failed(err)),
    };

    let output_path = config.output_path(&id);
    if crate::io::file_exists(&output_path) {
        return Outcome::new(chant, Status::Skipped);
    }

    match run_stages(&id, &source, config) {
        Ok(()) => {
            if !config.keep_temp {
                remove_workspace(&id, config);
            }
            Outcome::new(chant, Status::Success)
        }
        // workspace deliberately left intact for post-mortem inspection
        Err(err) => Outcome::new(chant, Status::Failed(err)),
    }
}

fn run_stages(id: &ChantId, source: &str, config: &RenderConfig) -> Result<(), RenderError> {
    let workspace = config.workspace_dir(id);
    fs::create_dir_all(&workspace)?;

    fs::write(workspace.join(GABC_FILE), source)?;
    fs::write(workspace.join(TEX_FILE), LATEX_TEMPLATE)?;

    // Stage 1: gabc -> gtex, stderr surfaced on failure
    let compile = Command::new(&config.tools.gregorio)
        .arg("-o")
        .arg(GTEX_FILE)
        .arg(GABC_FILE)
        .current_dir(&workspace)
        .stdout(Stdio::null())
        .output()
        .map_err(|e| spawn_error(Stage::Compile, &config.tools.gregorio, &e))?;
    if !compile.status.success() {
        let diagnostic = String::from_utf8_lossy(&compile.stderr).trim().to_string();
        return Err(RenderError::tool(Stage::Compile, diagnostic));
    }

    // Stage 2: gtex -> dvi; the template references chant.gtex by name, so
    // lualatex must run inside the workspace
    run_silent(
        Stage::Typeset,
        Command::new(&config.tools.lualatex)
            .args(["--output-format=dvi", "--interaction=batchmode", TEX_FILE])
            .current_dir(&workspace),
        &config.tools.lualatex,
    )?;

    // Stage 3: dvi -> svg, written straight to the canonical output path.
    // The path must be absolute since dvisvgm runs inside the workspace.
    let final_path = std::path::absolute(config.output_path(id))?;
    run_silent(
        Stage::Vectorize,
        Command::new(&config.tools.dvisvgm)
            .arg("--no-fonts")
            .arg("--exact")
            .arg(format!("--output={}", final_path.display()))
            .arg(DVI_FILE)
            .current_dir(&workspace),
        &config.tools.dvisvgm,
    )?;

    Ok(())
}

/// Run a stage whose output is discarded; failures get a generic diagnostic.
fn run_silent(stage: Stage, command: &mut Command, program: &str) -> Result<(), RenderError> {
    let status = command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| spawn_error(stage, program, &e))?;

    if status.success() {
        Ok(())
    } else {
        Err(RenderError::tool(stage, format!("exited with {}", status)))
    }
}

fn spawn_error(stage: Stage, program: &str, err: &std::io::Error) -> RenderError {
    RenderError::tool(stage, format!("failed to invoke {}: {}", program, err))
}

fn remove_workspace(id: &ChantId, config: &RenderConfig) {
    let workspace = config.workspace_dir(id);
    if let Err(e) = fs::remove_dir_all(&workspace) {
        log::warn!(
            "could not remove workspace {}: {}",
            workspace.display(),
            e
        );
    }
}
