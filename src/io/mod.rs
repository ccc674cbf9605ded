pub mod output;
pub mod writers;

pub use output::{create_writer, OutputFormat, OutputWriter};

use crate::core::{ConflictError, Result};
use std::fs;
use std::path::Path;

/// Read an export file as text, naming the path on failure.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ConflictError::io(path, e))
}

pub fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.csv");
        let err = read_file(&path).unwrap_err();
        assert!(err.to_string().contains("export.csv"));
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        write_file(&path, "Story,Component\n").unwrap();
        assert!(path.is_file());
        assert_eq!(read_file(&path).unwrap(), "Story,Component\n");
    }
}
