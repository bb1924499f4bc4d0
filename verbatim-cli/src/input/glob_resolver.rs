//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::Result;
use glob::glob;
use std::path::PathBuf;

/// Resolve file patterns to actual file paths.
///
/// Files keep the order of their patterns; within one pattern they are
/// sorted. A file matched twice is read once.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern}: {e}")))?;

        let mut matched: Vec<PathBuf> = paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    log::warn!("Error resolving pattern {pattern}: {e}");
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        matched.sort();

        if matched.is_empty() {
            return Err(CliError::FileNotFound(pattern.clone()).into());
        }
        for path in matched {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_glob_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        for name in ["b.tsv", "a.tsv", "notes.txt"] {
            fs::write(dir.path().join(name), "x\ty\n").unwrap();
        }
        let pattern = dir.path().join("*.tsv").display().to_string();
        let exact = dir.path().join("a.tsv").display().to_string();

        let files = resolve_patterns(&[pattern, exact]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.tsv", "b.tsv"]);
    }

    #[test]
    fn test_no_match_is_an_error() {
        let dir = TempDir::new().unwrap();
        let pattern = dir.path().join("*.tsv").display().to_string();
        let err = resolve_patterns(&[pattern]).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_patterns(&["[".to_string()]).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::InvalidPattern(_))));
    }
}
