//! File move implementation.
//! Refuses to overwrite; attempts a rename and falls back to copy+remove when
//! the destination is on another filesystem.

use anyhow::Result;
use std::fs::{self, Metadata};
use std::path::Path;
use tracing::{debug, info, warn};

use super::atomic::rename_into_place;
use super::copy::copy_then_remove;
use super::helpers::io_error_with_help;
use super::util::{is_cross_device, path_occupied};
use crate::errors::ArchiveError;

/// Input must exist and be a regular file (symlinks are followed).
pub fn validate_input(input: &Path) -> Result<Metadata> {
    match fs::metadata(input) {
        Ok(meta) if meta.is_file() => Ok(meta),
        Ok(_) => Err(ArchiveError::NotAFile(input.to_path_buf()).into()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ArchiveError::SourceNotFound(input.to_path_buf()).into())
        }
        Err(e) => Err(io_error_with_help("stat input file", input)(e)),
    }
}

/// Fail with `AlreadyExists` if anything sits at `target`.
/// Under dry-run an occupied target is only reported; returns whether it was free.
pub fn ensure_vacant(target: &Path, dry_run: bool) -> Result<bool> {
    if !path_occupied(target) {
        return Ok(true);
    }
    if dry_run {
        warn!(dest = %target.display(), "dry-run: target already exists; a real run would fail");
        return Ok(false);
    }
    Err(ArchiveError::AlreadyExists(target.to_path_buf()).into())
}

/// Move `input` to `archive_path`, never overwriting. No-op under dry-run.
pub fn move_file(input: &Path, archive_path: &Path, dry_run: bool) -> Result<()> {
    ensure_vacant(archive_path, dry_run)?;

    if dry_run {
        info!(src = %input.display(), dest = %archive_path.display(), "dry-run: would move file");
        return Ok(());
    }

    match rename_into_place(input, archive_path) {
        Ok(()) => {
            debug!(src = %input.display(), dest = %archive_path.display(), "Renamed file");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(error = %e, "Rename crosses filesystems, copying instead");
            copy_then_remove(input, archive_path)
        }
        Err(e) => Err(io_error_with_help("move file to", archive_path)(e)),
    }
}
