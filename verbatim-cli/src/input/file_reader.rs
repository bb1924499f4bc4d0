//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use verbatim_engine::Input;

/// Reads line-oriented UTF-8 input
pub struct FileReader;

impl FileReader {
    /// Read a file as lines without terminators
    pub fn read_lines(path: &Path) -> Result<Vec<String>> {
        Input::from_file(path)
            .into_lines()
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read standard input as lines
    pub fn read_stdin() -> Result<Vec<String>> {
        Input::from_reader(std::io::stdin())
            .into_lines()
            .context("Failed to read standard input")
    }

    /// Get file size in bytes
    pub fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;
        Ok(metadata.len())
    }
}
