//! Typed error definitions for archive_file.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Input file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Input is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Destination exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Archive file {0} already exists!")]
    AlreadyExists(PathBuf),

    #[error("Failed to archive the file! Expected {0} after the move, found nothing")]
    ArtifactMissing(PathBuf),

    #[error("Failed to compress {path}")]
    Compression {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveError {
    /// Stable numeric code, emitted as a structured field in error logs.
    pub fn code(&self) -> u16 {
        match self {
            ArchiveError::SourceNotFound(_) => 2,
            ArchiveError::NotAFile(_) => 3,
            ArchiveError::NotADirectory(_) => 4,
            ArchiveError::AlreadyExists(_) => 17,
            ArchiveError::ArtifactMissing(_) => 20,
            ArchiveError::Compression { .. } => 30,
        }
    }

    /// Short snake_case label used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ArchiveError::SourceNotFound(_) => "source_not_found",
            ArchiveError::NotAFile(_) => "not_a_file",
            ArchiveError::NotADirectory(_) => "not_a_directory",
            ArchiveError::AlreadyExists(_) => "already_exists",
            ArchiveError::ArtifactMissing(_) => "artifact_missing",
            ArchiveError::Compression { .. } => "compression",
        }
    }
}
