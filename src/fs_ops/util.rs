//! Small filesystem utilities shared by the move and compress steps.

use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Hidden temp path in `dst_dir`, unique per process and instant.
pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dst_dir.join(format!(".archive_file.{pid}.{nanos}.tmp"))
}

/// `path` with `suffix` appended to its final component (`a.txt` -> `a.txt.gz`).
pub(crate) fn with_appended_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// True if `path` names anything at all, including a dangling symlink.
pub(super) fn path_occupied(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Rename failed because source and destination live on different filesystems.
pub(super) fn is_cross_device(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::CrossesDevices
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_appended_to_full_name() {
        assert_eq!(
            with_appended_suffix(Path::new("dir/report__20230301T1405.txt"), ".gz"),
            PathBuf::from("dir/report__20230301T1405.txt.gz")
        );
        assert_eq!(with_appended_suffix(Path::new("noext"), ".gz"), PathBuf::from("noext.gz"));
    }

    #[test]
    fn temp_paths_are_hidden_siblings() {
        let p = unique_temp_path(Path::new("archive"));
        assert_eq!(p.parent(), Some(Path::new("archive")));
        let name = p.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".archive_file.") && name.ends_with(".tmp"), "{name}");
    }
}
