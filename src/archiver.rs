//! The archive pipeline.
//!
//! `plan` validates the input and works out every path without touching the
//! filesystem; `execute` then runs the mutating steps in order:
//! ensure destination -> collision checks -> move -> gzip -> verify.
//! Dry-run skips every mutating step. Any failure aborts; nothing is rolled back.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::{ARCHIVE_DIR_DEFAULT, COMPRESSION_LEVEL_DEFAULT};
use crate::fs_ops::{
    DestinationStatus, compress, compressed_path, ensure_destination, ensure_vacant, move_file,
    validate_input, verify,
};
use crate::naming::{ArchiveName, compute_archive_name};

/// One invocation's worth of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    pub input_path: PathBuf,
    pub destination_dir: PathBuf,
    /// Number of `-v` flags; only affects reporting
    pub verbosity: u8,
    pub dry_run: bool,
    pub compress: bool,
    pub compression_level: u32,
}

impl ArchiveRequest {
    /// Request for `input_path` archived into the current directory, no gzip.
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            destination_dir: PathBuf::from(ARCHIVE_DIR_DEFAULT),
            verbosity: 0,
            dry_run: false,
            compress: false,
            compression_level: COMPRESSION_LEVEL_DEFAULT,
        }
    }

    pub fn destination(mut self, dir: impl Into<PathBuf>) -> Self {
        self.destination_dir = dir.into();
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn gzip(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Everything worked out before the first mutation.
#[derive(Debug, Clone)]
pub struct ArchivePlan {
    pub request: ArchiveRequest,
    pub name: ArchiveName,
    /// `<destination_dir>/<base>__<timestamp><ext>`
    pub archive_path: PathBuf,
    /// `archive_path`, or `archive_path.gz` when compressing
    pub final_path: PathBuf,
    /// Nothing exists at `destination_dir` yet, so `execute` will create it
    pub creates_destination: bool,
}

/// Result of a completed (or dry-run) archive.
#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    pub plan: ArchivePlan,
    pub destination: DestinationStatus,
}

impl ArchiveOutcome {
    pub fn final_path(&self) -> &std::path::Path {
        &self.plan.final_path
    }
}

/// Validate the input and compute the archive paths. Read-only.
pub fn plan(request: &ArchiveRequest) -> Result<ArchivePlan> {
    validate_input(&request.input_path)?;
    let name = compute_archive_name(&request.input_path)?;
    let archive_path = name.path_in(&request.destination_dir);
    let final_path = if request.compress {
        compressed_path(&archive_path)
    } else {
        archive_path.clone()
    };
    debug!(
        input = %request.input_path.display(),
        archive = %archive_path.display(),
        final_path = %final_path.display(),
        timestamp = %name.timestamp,
        "Planned archive"
    );
    let creates_destination = fs::symlink_metadata(&request.destination_dir).is_err();
    Ok(ArchivePlan {
        request: request.clone(),
        name,
        archive_path,
        final_path,
        creates_destination,
    })
}

/// Run the mutating steps of `plan`.
pub fn execute(plan: &ArchivePlan) -> Result<ArchiveOutcome> {
    let req = &plan.request;
    let destination = ensure_destination(&req.destination_dir, req.dry_run)?;

    // move_file checks archive_path; the .gz target is checked first so a
    // collision there cannot strand a moved, uncompressed file.
    if req.compress {
        ensure_vacant(&plan.final_path, req.dry_run)?;
    }

    move_file(&req.input_path, &plan.archive_path, req.dry_run)?;

    if !req.dry_run {
        if req.compress {
            compress(&plan.archive_path, req.compression_level)?;
        }
        verify(&plan.final_path)?;
    }

    info!(
        input = %req.input_path.display(),
        dest = %plan.final_path.display(),
        compressed = req.compress,
        dry_run = req.dry_run,
        "Archive completed"
    );
    Ok(ArchiveOutcome {
        plan: plan.clone(),
        destination,
    })
}

/// `plan` followed by `execute`.
pub fn archive(request: &ArchiveRequest) -> Result<ArchiveOutcome> {
    let plan = plan(request)?;
    execute(&plan)
}
