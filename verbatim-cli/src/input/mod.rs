//! Input handling module

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

use crate::progress::ProgressReporter;
use anyhow::Result;

/// Read every line of the given files, or of stdin when there are none.
///
/// Files are concatenated in resolution order.
pub fn read_input(patterns: &[String], progress: &mut ProgressReporter) -> Result<Vec<String>> {
    if patterns.is_empty() {
        log::debug!("reading standard input");
        return FileReader::read_stdin();
    }

    let files = resolve_patterns(patterns)?;
    progress.init_files(files.len() as u64);
    let mut lines = Vec::new();
    for path in &files {
        log::debug!("reading {} ({} bytes)", path.display(), FileReader::file_size(path)?);
        lines.extend(FileReader::read_lines(path)?);
        progress.file_completed(&path.display().to_string());
    }
    progress.finish();
    log::info!("read {} lines from {} files", lines.len(), files.len());
    Ok(lines)
}
