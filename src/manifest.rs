//! Descriptive manifest precondition.
use crate::error::{StageError, StageResult};
use std::fs::File;
use std::path::Path;

/// Confirm the manifest at `path` can be opened for reading.
///
/// The handle is dropped before returning; the stage never reads the
/// manifest's content.
pub fn ensure_manifest(path: &Path) -> StageResult<()> {
    let file = File::open(path).map_err(|error| StageError::Manifest {
        path: path.to_path_buf(),
        error,
    })?;
    drop(file);
    tracing::debug!(manifest = %path.display(), "manifest readable");
    Ok(())
}
