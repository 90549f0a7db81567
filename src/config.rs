//! Runtime configuration, built once from the CLI and passed by reference
//! into the scheduler and pipeline.

use std::path::{Path, PathBuf};

/// External tool program names or paths.
///
/// Defaults assume the tools are on PATH; overrides exist for exotic TeX
/// installs and for the integration tests, which substitute stub scripts.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub gregorio: String,
    pub lualatex: String,
    pub dvisvgm: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            gregorio: "gregorio".to_string(),
            lualatex: "lualatex".to_string(),
            dvisvgm: "dvisvgm".to_string(),
        }
    }
}

impl ToolPaths {
    /// Tool names in stage order, for the preflight check.
    pub fn all(&self) -> [&str; 3] {
        [&self.gregorio, &self.lualatex, &self.dvisvgm]
    }
}

/// Configuration for a render run.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Source JSON collection.
    pub source: PathBuf,
    /// Directory receiving `<id>.svg` files.
    pub output_dir: PathBuf,
    /// Root under which per-chant workspaces are created.
    pub temp_dir: PathBuf,
    /// Worker count; 0 means use available parallelism.
    pub jobs: usize,
    /// Process only the first N records.
    pub limit: Option<usize>,
    /// Never delete workspaces or the temp root.
    pub keep_temp: bool,
    /// Suppress progress output.
    pub quiet: bool,
    /// Verbosity level from repeated -v flags.
    pub verbosity: u8,
    pub tools: ToolPaths,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/chants.json"),
            output_dir: PathBuf::from("images"),
            temp_dir: PathBuf::from("temp_build"),
            jobs: 0,
            limit: None,
            keep_temp: false,
            quiet: false,
            verbosity: 0,
            tools: ToolPaths::default(),
        }
    }
}

impl RenderConfig {
    /// Canonical final image path for a chant id.
    pub fn output_path(&self, id: &crate::chant::ChantId) -> PathBuf {
        self.output_dir.join(format!("{}.svg", id))
    }

    /// Workspace directory for a chant id.
    pub fn workspace_dir(&self, id: &crate::chant::ChantId) -> PathBuf {
        self.temp_dir.join(id.to_string())
    }

    pub fn with_dirs(mut self, source: &Path, output_dir: &Path, temp_dir: &Path) -> Self {
        self.source = source.to_path_buf();
        self.output_dir = output_dir.to_path_buf();
        self.temp_dir = temp_dir.to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chant::ChantId;

    #[test]
    fn test_output_path_keyed_by_id() {
        let config = RenderConfig::default();
        assert_eq!(
            config.output_path(&ChantId::Number(1329)),
            PathBuf::from("images/1329.svg")
        );
        assert_eq!(
            config.output_path(&ChantId::from("kyrie-xi")),
            PathBuf::from("images/kyrie-xi.svg")
        );
    }

    #[test]
    fn test_workspace_dir_namespaced_by_id() {
        let config = RenderConfig::default();
        assert_eq!(
            config.workspace_dir(&ChantId::Number(7)),
            PathBuf::from("temp_build/7")
        );
    }

    #[test]
    fn test_default_tools_on_path() {
        let tools = ToolPaths::default();
        assert_eq!(tools.all(), ["gregorio", "lualatex", "dvisvgm"]);
    }
}
