//! Metadata carry-over.
//! A cross-filesystem move and the gzip step both create a new file; these
//! helpers copy the source's timestamps (and mode on Unix) onto it.

use anyhow::{Context, Result};
use filetime::{FileTime, set_file_mtime, set_file_times};
use std::fs::{self, Metadata};
use std::path::Path;

/// Copy access/modification times and permissions from `src_meta` to `dest`.
pub(super) fn preserve_times_and_mode(src_meta: &Metadata, dest: &Path) -> Result<()> {
    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    set_file_times(dest, atime, mtime)
        .with_context(|| format!("set timestamps on {}", dest.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        fs::set_permissions(dest, fs::Permissions::from_mode(mode))
            .with_context(|| format!("set permissions on {}", dest.display()))?;
    }
    #[cfg(not(unix))]
    {
        fs::set_permissions(dest, src_meta.permissions())
            .with_context(|| format!("set permissions on {}", dest.display()))?;
    }

    Ok(())
}

/// Stamp `dest` with the modification time recorded in `src_meta`.
pub(super) fn preserve_mtime(src_meta: &Metadata, dest: &Path) -> Result<()> {
    set_file_mtime(dest, FileTime::from_last_modification_time(src_meta))
        .with_context(|| format!("set modification time on {}", dest.display()))
}
