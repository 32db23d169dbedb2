//! Core configuration types.
//! - Config holds user defaults with sensible fallbacks.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{ARCHIVE_DIR_DEFAULT, COMPRESSION_LEVEL_DEFAULT};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default)
    #[default]
    Normal,
    /// Step-level progress
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Level implied by a repeated `-v` count; `None` for zero.
    pub fn from_verbosity(count: u8) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(LogLevel::Info),
            _ => Some(LogLevel::Debug),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// User defaults, loaded from XML and overridden by CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory archived files are moved into
    pub archive_dir: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Compress archived files unless told otherwise
    pub gzip: bool,
    /// gzip level, 0 (store) to 9 (best)
    pub compression_level: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_dir: PathBuf::from(ARCHIVE_DIR_DEFAULT),
            log_level: LogLevel::Normal,
            log_file: None,
            gzip: false,
            compression_level: COMPRESSION_LEVEL_DEFAULT,
        }
    }
}
