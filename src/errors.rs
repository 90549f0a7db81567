//! Shared error types for the renderer.

use crate::pipeline::Stage;
use thiserror::Error;

/// Per-record failure taxonomy.
///
/// These never cross the worker boundary as `Err` values; the pipeline
/// converts every one of them into a `Failed` outcome and the batch
/// continues. Only the initial collection load is process-fatal, and that
/// path uses `anyhow` at the application boundary instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The record has no `id`; rejected before any I/O.
    #[error("missing id")]
    MissingId,

    /// The `gabc` field is absent, unparsable, or has no score entry.
    #[error("missing or invalid gabc score data")]
    MissingScore,

    /// An external tool exited non-zero or could not be invoked.
    #[error("{stage} failed: {diagnostic}")]
    Tool { stage: Stage, diagnostic: String },

    /// A local filesystem operation failed inside the pipeline.
    #[error("i/o error: {message}")]
    Io { message: String },
}

impl RenderError {
    pub fn tool(stage: Stage, diagnostic: impl Into<String>) -> Self {
        RenderError::Tool {
            stage,
            diagnostic: diagnostic.into(),
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_names_the_stage() {
        let err = RenderError::tool(Stage::Compile, "unexpected character '!'");
        assert_eq!(err.to_string(), "gregorio failed: unexpected character '!'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: RenderError = io.into();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
