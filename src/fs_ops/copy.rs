//! Cross-filesystem fallback for the move step:
//! - Copies to a temp file in the destination directory (fsynced)
//! - Carries over timestamps and permissions
//! - Renames temp -> dest, then removes the source
//!
//! The temp file is removed on any failure; the source is only removed once
//! the destination is complete.

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::atomic::rename_into_place;
use super::helpers::io_error_with_help;
use super::{io_copy, meta, util};

/// Copy `src` to `dest` via a temp sibling, then delete `src`.
pub(super) fn copy_then_remove(src: &Path, dest: &Path) -> Result<()> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;
    let dest_dir = if dest_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dest_dir
    };

    let src_meta = fs::metadata(src).map_err(io_error_with_help("stat source", src))?;
    let tmp_path = util::unique_temp_path(dest_dir);

    let placed = (|| -> Result<()> {
        let bytes = io_copy::copy_streaming(src, &tmp_path)
            .map_err(io_error_with_help("copy to temporary file", &tmp_path))?;
        debug!(src = %src.display(), tmp = %tmp_path.display(), bytes, "Copied to temp file");
        meta::preserve_times_and_mode(&src_meta, &tmp_path)?;
        rename_into_place(&tmp_path, dest).with_context(|| {
            format!(
                "rename temporary file '{}' -> '{}'",
                tmp_path.display(),
                dest.display()
            )
        })
    })();

    if let Err(e) = placed {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
    Ok(())
}
