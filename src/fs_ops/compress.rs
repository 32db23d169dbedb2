//! gzip step.
//! Streams the archived file into `<name>.gz`, keeps its mtime, then removes
//! the uncompressed copy.
//!
//! Notes:
//! - The `.gz` file is created with create_new; an existing one is never replaced.
//! - On a failed write the partial `.gz` is removed and the input is left alone.
//! - The gzip header records the original file name and mtime, like `gzip -N`.

use anyhow::Result;
use flate2::{Compression, GzBuilder};
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::{debug, info};

use super::helpers::io_error_with_help;
use super::io_copy::BUF_SIZE;
use super::meta::preserve_mtime;
use super::util::{path_occupied, with_appended_suffix};
use crate::errors::ArchiveError;

/// Suffix appended to compressed archives.
pub const GZIP_SUFFIX: &str = ".gz";

/// Where `compress` will write for a given archive path.
pub fn compressed_path(archive_path: &Path) -> PathBuf {
    with_appended_suffix(archive_path, GZIP_SUFFIX)
}

fn header_mtime(meta: &Metadata) -> u32 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| u32::try_from(d.as_secs()).ok())
        .unwrap_or(0)
}

fn write_gzip(src: &Path, out: File, level: u32, src_meta: &Metadata) -> io::Result<u64> {
    let input = File::open(src)?;
    let mut builder = GzBuilder::new().mtime(header_mtime(src_meta));
    if let Some(name) = src.file_name() {
        builder = builder.filename(name.as_encoded_bytes());
    }

    let mut reader = BufReader::with_capacity(BUF_SIZE, input);
    let mut encoder = builder.write(
        BufWriter::with_capacity(BUF_SIZE, out),
        Compression::new(level),
    );
    let bytes = io::copy(&mut reader, &mut encoder)?;
    let file = encoder.finish()?.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(bytes)
}

/// Compress `archive_path` to `archive_path.gz` and delete the original.
/// Returns the path of the compressed file.
pub fn compress(archive_path: &Path, level: u32) -> Result<PathBuf> {
    let gz_path = compressed_path(archive_path);
    if path_occupied(&gz_path) {
        return Err(ArchiveError::AlreadyExists(gz_path).into());
    }

    let src_meta =
        fs::metadata(archive_path).map_err(io_error_with_help("stat archive file", archive_path))?;

    let out = match OpenOptions::new().write(true).create_new(true).open(&gz_path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(ArchiveError::AlreadyExists(gz_path).into());
        }
        Err(e) => return Err(io_error_with_help("create compressed file", &gz_path)(e)),
    };

    let level = level.min(9);
    match write_gzip(archive_path, out, level, &src_meta) {
        Ok(bytes) => {
            debug!(src = %archive_path.display(), dest = %gz_path.display(), bytes, level, "Wrote gzip stream");
        }
        Err(source) => {
            let _ = fs::remove_file(&gz_path);
            return Err(ArchiveError::Compression {
                path: archive_path.to_path_buf(),
                source,
            }
            .into());
        }
    }

    preserve_mtime(&src_meta, &gz_path)?;
    fs::remove_file(archive_path)
        .map_err(io_error_with_help("remove uncompressed archive", archive_path))?;
    info!(path = %gz_path.display(), "Compressed archive file");
    Ok(gz_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn compresses_and_removes_original() {
        let td = tempdir().unwrap();
        let archive = td.path().join("notes__20230301T1405.txt");
        let body = "line\n".repeat(1000);
        fs::write(&archive, &body).unwrap();

        let gz = compress(&archive, 6).unwrap();
        assert_eq!(gz, td.path().join("notes__20230301T1405.txt.gz"));
        assert!(!archive.exists());

        let mut decoder = GzDecoder::new(File::open(&gz).unwrap());
        let mut out = String::new();
        decoder.read_to_string(&mut out).unwrap();
        assert_eq!(out, body);
        let header = decoder.header().expect("gzip header");
        assert_eq!(header.filename(), Some(&b"notes__20230301T1405.txt"[..]));
    }

    #[test]
    fn existing_gz_is_not_replaced() {
        let td = tempdir().unwrap();
        let archive = td.path().join("a.log");
        fs::write(&archive, "fresh").unwrap();
        fs::write(td.path().join("a.log.gz"), "old").unwrap();

        let err = compress(&archive, 6).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArchiveError>(),
            Some(ArchiveError::AlreadyExists(_))
        ));
        assert_eq!(fs::read_to_string(&archive).unwrap(), "fresh");
        assert_eq!(fs::read_to_string(td.path().join("a.log.gz")).unwrap(), "old");
    }

    #[test]
    fn failed_write_removes_partial_gz_and_keeps_source() {
        let td = tempdir().unwrap();
        // A directory stats fine but cannot be read as a byte stream.
        let archive = td.path().join("logs__20230301T1405");
        fs::create_dir(&archive).unwrap();

        let err = compress(&archive, 6).unwrap_err();
        let ae = err.downcast_ref::<ArchiveError>().expect("typed error");
        assert!(matches!(ae, ArchiveError::Compression { path, .. } if path == &archive));
        assert_eq!(ae.code(), 30);
        assert!(!td.path().join("logs__20230301T1405.gz").exists());
        assert!(archive.is_dir());

        // The io cause appears once in the rendered chain.
        let cause = std::error::Error::source(ae).expect("io source").to_string();
        let rendered = format!("{err:#}");
        assert_eq!(rendered.matches(cause.as_str()).count(), 1, "{rendered}");
    }

    #[test]
    fn level_zero_still_produces_valid_gzip() {
        let td = tempdir().unwrap();
        let archive = td.path().join("empty.bin");
        fs::write(&archive, b"").unwrap();

        let gz = compress(&archive, 0).unwrap();
        let mut out = Vec::new();
        GzDecoder::new(File::open(&gz).unwrap())
            .read_to_end(&mut out)
            .unwrap();
        assert!(out.is_empty());
    }
}
