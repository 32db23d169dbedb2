//! I/O helper utilities.
//!
//! Enrich io::Error with the operation, the path and an actionable hint,
//! for use with map_err in anyhow::Result code paths.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

fn hint_for(e: &io::Error) -> Option<&'static str> {
    use io::ErrorKind::*;
    let hint = match e.kind() {
        PermissionDenied => "permission denied; check ownership and write permissions",
        NotFound => "path not found; verify it exists",
        AlreadyExists => "already exists; remove the target or archive later",
        CrossesDevices => "cross-filesystem; rename not possible",
        StorageFull => "insufficient space on device",
        ReadOnlyFilesystem => "read-only filesystem; cannot write here",
        NotADirectory => "a path component is not a directory",
        IsADirectory => "expected a file but found a directory",
        ResourceBusy => "resource busy; ensure no other process holds the file",
        InvalidFilename => "filename or path too long or invalid",
        _ => return None,
    };
    Some(hint)
}

/// Format a human-friendly message with op/path plus a hint and the OS code.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = hint_for(e) {
        msg.push_str("; ");
        msg.push_str(hint);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for anyhow::Result code: io::Error -> anyhow::Error with context.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
