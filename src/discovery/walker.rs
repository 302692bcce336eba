use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use super::RecursionPolicy;
use crate::error::ResolutionError;

/// Regular files under `root`, in file-name order within each directory.
///
/// `Direct` lists only the root's own children. Symlinks are followed, so a
/// linked library is listed under its link name. Unreadable entries below
/// the root are logged and skipped; an unreadable root fails the pass.
pub fn enumerate_files(
    root: &Path,
    recursion: RecursionPolicy,
) -> Result<Vec<PathBuf>, ResolutionError> {
    if !root.exists() {
        return Err(ResolutionError::root_not_found(root));
    }

    if !root.is_dir() {
        return Err(ResolutionError::root_not_directory(root));
    }

    let max_depth = if recursion.is_recursive() { usize::MAX } else { 1 };

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ResolutionError::Walk {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(
                    path = %e.path().unwrap_or(root).display(),
                    error = %e,
                    "skipping unreadable entry"
                );
                continue;
            }
        };

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
