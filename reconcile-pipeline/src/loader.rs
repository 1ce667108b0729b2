//! Corpus list loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{PipelineError, PipelineResult};

/// Read a corpus list: one document directory per line.
///
/// Blank lines and `#` comments are skipped. Relative entries resolve against
/// the directory holding the list.
pub fn load_corpus(list_file: &Path) -> PipelineResult<Vec<PathBuf>> {
    let content = fs::read_to_string(list_file).map_err(|source| PipelineError::Io {
        path: list_file.display().to_string(),
        source,
    })?;
    let base = list_file.parent().unwrap_or_else(|| Path::new(""));
    let documents: Vec<PathBuf> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let path = Path::new(line);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base.join(path)
            }
        })
        .collect();
    debug!(list = %list_file.display(), documents = documents.len(), "loaded corpus list");
    Ok(documents)
}
