//! Rename helper.
//! - Returns the raw io::Error so callers can detect cross-device renames.
//! - On Unix, best-effort fsync of the destination directory after rename.
//!
//! Callers are responsible for checking that `dst` is free first: rename
//! replaces an existing file on Unix and fails on Windows.

use std::fs;
use std::io;
use std::path::Path;

pub(super) fn rename_into_place(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let dir = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = super::util::fsync_dir(dir);
    }

    Ok(())
}
