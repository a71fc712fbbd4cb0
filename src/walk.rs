//! Deterministic traversal of a SIP content subtree.
//!
//! Entries in each directory are visited in byte-wise name order and
//! directories are descended in place, so the output order is a stable
//! depth-first listing independent of the host's `read_dir` order.
use crate::error::{StageError, StageResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// A regular file found under the content subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path as reached from the content root (root-joined, not canonicalized).
    pub path: PathBuf,
    /// Path relative to the content root.
    pub content_rel: PathBuf,
}

impl DiscoveredFile {
    pub fn base_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Walk `content_root` and return every regular file in traversal order.
///
/// Symlinks are not followed into directories, but a link that resolves to a
/// regular file is listed like one, so it gets its own record. Dangling links
/// are skipped. Directories listed in `excluded` are skipped along with
/// everything under them. `cancel` is polled before each entry.
pub fn walk_content(
    content_root: &Path,
    excluded: &[PathBuf],
    cancel: Option<&AtomicBool>,
) -> StageResult<Vec<DiscoveredFile>> {
    let mut files = Vec::new();
    walk_dir(content_root, content_root, excluded, cancel, &mut files)?;
    Ok(files)
}

fn walk_dir(
    dir: &Path,
    content_root: &Path,
    excluded: &[PathBuf],
    cancel: Option<&AtomicBool>,
    out: &mut Vec<DiscoveredFile>,
) -> StageResult<()> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|error| traversal(dir, error))? {
        entries.push(entry.map_err(|error| traversal(dir, error))?);
    }
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(StageError::Cancelled);
        }
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|error| traversal(&path, error))?;

        if file_type.is_dir() {
            if excluded.iter().any(|skip| skip == &path) {
                tracing::debug!(dir = %path.display(), "skipping excluded directory");
                continue;
            }
            walk_dir(&path, content_root, excluded, cancel, out)?;
        } else if file_type.is_file() || (file_type.is_symlink() && points_to_file(&path)) {
            let content_rel = path
                .strip_prefix(content_root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
            out.push(DiscoveredFile { path, content_rel });
        }
    }
    Ok(())
}

// Links to directories and dangling links are not content.
fn points_to_file(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "skipping dangling link");
            false
        }
    }
}

fn traversal(path: &Path, error: std::io::Error) -> StageError {
    StageError::Traversal {
        path: path.to_path_buf(),
        error,
    }
}
