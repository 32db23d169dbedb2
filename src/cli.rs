//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags left unset fall back to the config file, then to built-in defaults.
//! - `-v` may be repeated; each step prints more and raises the log level.

use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

use crate::archiver::ArchiveRequest;
use crate::config::types::{Config, LogLevel};

/// Archive a file by appending a time stamp (from its modification time) to
/// its name and moving it to an archive directory.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// The file to archive.
    #[arg(
        value_name = "INPUT_FILE",
        value_hint = ValueHint::FilePath,
        required_unless_present_any = ["print_config", "init_config"]
    )]
    pub input_file: Option<PathBuf>,

    /// Directory to move the archive file to (created if missing).
    #[arg(long = "da", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub da: Option<PathBuf>,

    /// Increase output detail; repeat for more (-vv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Show what would be done, but do not create, move or delete anything.
    #[arg(long)]
    pub dry_run: bool,

    /// gzip the archive file after moving it.
    #[arg(short = 'z', long, overrides_with = "no_gzip")]
    pub gzip: bool,

    /// Do not gzip, even if the config file enables it.
    #[arg(long, overrides_with = "gzip")]
    pub no_gzip: bool,

    /// gzip compression level (0 = store, 9 = best).
    #[arg(long, value_name = "0-9", value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: Option<u32>,

    /// Set log level: quiet, normal, info, debug (overrides -v).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Append logs to this file as well as stderr.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location used by archive_file and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Write a template config file to the config location and exit.
    #[arg(long, conflicts_with = "print_config")]
    pub init_config: bool,
}

impl Args {
    /// Effective log level.
    /// Precedence: --log-level > -v count > config value.
    pub fn effective_log_level(&self, cfg: &Config) -> LogLevel {
        self.log_level
            .or_else(|| LogLevel::from_verbosity(self.verbose))
            .unwrap_or(cfg.log_level)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.da {
            cfg.archive_dir = dir.clone();
        }
        cfg.log_level = self.effective_log_level(cfg);
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        if self.gzip {
            cfg.gzip = true;
        } else if self.no_gzip {
            cfg.gzip = false;
        }
        if let Some(level) = self.level {
            cfg.compression_level = level;
        }
    }

    /// Build the archive request from these args and the merged config.
    /// None when no input file was given (only valid with --print-config/--init-config).
    pub fn to_request(&self, cfg: &Config) -> Option<ArchiveRequest> {
        let input = self.input_file.clone()?;
        Some(ArchiveRequest {
            input_path: input,
            destination_dir: cfg.archive_dir.clone(),
            verbosity: self.verbose,
            dry_run: self.dry_run,
            compress: cfg.gzip,
            compression_level: cfg.compression_level,
        })
    }
}

pub fn parse() -> Args {
    Args::parse()
}
