//! Core library for `archive_file`.
//!
//! Archives a file by renaming it `{base}__{YYYYMMDDThhmm}{ext}` from its
//! modification time, moving it into an archive directory and optionally
//! gzipping it. The binary is a thin layer over [`archiver::archive`].

pub mod archiver;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod logging;
pub mod naming;
pub mod output;
pub mod platform;

pub use archiver::{ArchiveOutcome, ArchivePlan, ArchiveRequest, archive, execute, plan};
pub use config::{
    Config, LogLevel, create_template_config, default_config_path, default_log_path, load_config,
    load_config_from_xml_path, path_has_symlink_ancestor,
};
pub use errors::ArchiveError;
pub use fs_ops::{DestinationStatus, compress, ensure_destination, move_file, verify};
pub use naming::{ArchiveName, archive_name_for, compute_archive_name};
