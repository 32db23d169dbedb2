use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::ArchiveError;

/// Fail with `ArtifactMissing` unless `final_path` is a regular file.
pub fn verify(final_path: &Path) -> Result<()> {
    match fs::metadata(final_path) {
        Ok(meta) if meta.is_file() => {
            debug!(path = %final_path.display(), bytes = meta.len(), "Verified archive artifact");
            Ok(())
        }
        _ => Err(ArchiveError::ArtifactMissing(final_path.to_path_buf()).into()),
    }
}
