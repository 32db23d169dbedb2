//! Destination directory handling.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::helpers::io_error_with_help;
use crate::errors::ArchiveError;

/// What `ensure_destination` found (or did).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationStatus {
    /// Directory was already there
    Existing,
    /// Directory (and any missing parents) was created
    Created,
    /// Directory is missing; dry-run left it alone
    WouldCreate,
}

/// Make sure `dir` exists as a directory. Under dry-run only reports intent.
pub fn ensure_destination(dir: &Path, dry_run: bool) -> Result<DestinationStatus> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            debug!(path = %dir.display(), "Destination directory exists");
            return Ok(DestinationStatus::Existing);
        }
        Ok(_) => return Err(ArchiveError::NotADirectory(dir.to_path_buf()).into()),
        Err(_) => {}
    }

    if dry_run {
        info!(action = "mkdir -p", path = %dir.display(), "dry-run");
        return Ok(DestinationStatus::WouldCreate);
    }

    // create_dir_all tolerates a concurrent creator; anything else is fatal.
    fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;
    info!(path = %dir.display(), "Created destination directory");
    Ok(DestinationStatus::Created)
}
