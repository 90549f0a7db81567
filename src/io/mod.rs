//! Filesystem helpers and the record loader.

use crate::chant::Chant;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Load the full chant collection into memory.
///
/// This is the only process-fatal error path in the system: a missing or
/// malformed collection aborts before any work begins.
pub fn load_chants(path: &Path) -> Result<Vec<Chant>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read chant collection at {}", path.display()))?;
    let chants: Vec<Chant> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse chant collection at {}", path.display()))?;
    Ok(chants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_chants_parses_collection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chants.json");
        fs::write(
            &path,
            r#"[{"id": 1, "incipit": "Ave Maria"}, {"incipit": "no id here"}]"#,
        )
        .unwrap();

        let chants = load_chants(&path).unwrap();
        assert_eq!(chants.len(), 2);
        assert!(chants[0].id.is_some());
        assert!(chants[1].id.is_none());
    }

    #[test]
    fn test_load_chants_missing_file_is_fatal() {
        let err = load_chants(Path::new("/nonexistent/chants.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_load_chants_malformed_json_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chants.json");
        fs::write(&path, "{not an array").unwrap();
        assert!(load_chants(&path).is_err());
    }

    #[test]
    fn test_ensure_dir_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
