//! Config module.
//! Provides configuration types, default paths and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ARCHIVE_FILE_CONFIG";
/// Archive into the current directory unless told otherwise.
pub const ARCHIVE_DIR_DEFAULT: &str = ".";
/// flate2's default trade-off between speed and size.
pub const COMPRESSION_LEVEL_DEFAULT: u32 = 6;
