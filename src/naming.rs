//! Archive naming.
//! Turns `dir/report.txt` with a 2023-03-01 14:05 mtime into `report__20230301T1405.txt`.
//!
//! Notes:
//! - The timestamp is rendered in local time, minute resolution.
//! - Base/extension split at the last dot; a dotfile's leading dot is not an extension.
//! - Names are built as OsString so non-UTF8 file names survive untouched.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::errors::ArchiveError;

/// strftime pattern for the archive timestamp (fixed width: YYYYMMDDThhmm).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M";

/// Separator between the original base name and the timestamp.
pub const NAME_SEPARATOR: &str = "__";

/// The pieces of a computed archive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    /// Directory part of the input path (may be empty)
    pub file_dir: PathBuf,
    /// File name without extension
    pub base: OsString,
    /// Extension including its leading dot, or empty
    pub ext: OsString,
    /// Formatted mtime
    pub timestamp: String,
    /// `{base}__{timestamp}{ext}`
    pub file_name: OsString,
}

impl ArchiveName {
    /// Full archive path inside `dir`.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

/// Format a modification time the way archive names embed it.
pub fn format_timestamp(mtime: SystemTime) -> String {
    DateTime::<Local>::from(mtime)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Build the archive name for `input` as if it had been modified at `mtime`.
pub fn archive_name_for(input: &Path, mtime: SystemTime) -> Result<ArchiveName> {
    let file_name = input
        .file_name()
        .ok_or_else(|| anyhow!("Input path has no file name: {}", input.display()))?;

    let base = input
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| file_name.to_os_string());
    let mut ext = OsString::new();
    if let Some(e) = input.extension() {
        ext.push(".");
        ext.push(e);
    }
    let timestamp = format_timestamp(mtime);

    let mut archive = OsString::with_capacity(base.len() + ext.len() + 16);
    archive.push(&base);
    archive.push(NAME_SEPARATOR);
    archive.push(&timestamp);
    archive.push(&ext);

    Ok(ArchiveName {
        file_dir: input.parent().map(Path::to_path_buf).unwrap_or_default(),
        base,
        ext,
        timestamp,
        file_name: archive,
    })
}

/// Compute the archive name for `input` from its filesystem mtime.
/// Deterministic for an unchanged mtime.
pub fn compute_archive_name(input: &Path) -> Result<ArchiveName> {
    let meta = fs::metadata(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            anyhow::Error::from(ArchiveError::SourceNotFound(input.to_path_buf()))
        }
        _ => anyhow::Error::new(e).context(format!("stat '{}'", input.display())),
    })?;
    let mtime = meta
        .modified()
        .with_context(|| format!("read modification time of '{}'", input.display()))?;
    archive_name_for(input, mtime)
}
