//! XML configuration support.
//! - Loads defaults from config.xml (quick_xml).
//! - Writes a commented template on request.
//!
//! Notes:
//! - A missing file is not an error: callers fall back to built-in defaults.
//! - Unknown XML fields are rejected to surface misconfigurations early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{ARCHIVE_DIR_DEFAULT, COMPRESSION_LEVEL_DEFAULT};
use crate::platform::{set_dir_mode_0700, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    archive_dir: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    gzip: Option<bool>,
    #[serde(default, deserialize_with = "de_u32_trimmed_opt")]
    compression_level: Option<u32>,
}

// Custom deserializers that trim surrounding whitespace
fn de_u32_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u32>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<bool>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn non_empty_trimmed(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}

// Map XmlConfig -> Config, defaults for anything unset
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(dir) = non_empty_trimmed(parsed.archive_dir.as_deref()) {
        cfg.archive_dir = PathBuf::from(dir);
    }
    if let Some(file) = non_empty_trimmed(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(file));
    }
    if let Some(s) = non_empty_trimmed(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(gzip) = parsed.gzip {
        cfg.gzip = gzip;
    }
    if let Some(level) = parsed.compression_level {
        if level > 9 {
            bail!("compression_level must be between 0 and 9, got {level}");
        }
        cfg.compression_level = level;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config xml '{}'", path.display()))
}

/// Load the config from `$ARCHIVE_FILE_CONFIG` or the default location.
/// Returns Ok(None) when no config file exists there.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = default_config_path() else {
        debug!("No config location could be determined; using defaults");
        return Ok(None);
    };
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), ?cfg, "Loaded config");
    Ok(Some(cfg))
}

/// Write a commented template config to `path` (parent created with 0700 on Unix).
/// Refuses symlinked ancestors and never overwrites an existing file.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/archive_file.log".into());

    let content = format!(
        "<!--\n  archive_file configuration (XML)\n\n  Fields:\n    archive_dir        -> directory archived files are moved into (--da overrides)\n    log_level          -> quiet | normal | info | debug\n    log_file           -> path to a log file (optional; leave empty for none)\n    gzip               -> true/false, compress archived files by default\n    compression_level  -> gzip level 0-9\n\n  Suggested log file: {suggested_log}\n  CLI flags override XML values.\n-->\n<config>\n  <archive_dir>{ARCHIVE_DIR_DEFAULT}</archive_dir>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n  <gzip>false</gzip>\n  <compression_level>{COMPRESSION_LEVEL_DEFAULT}</compression_level>\n</config>\n"
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_parses_back_to_defaults() {
        let td = tempdir().unwrap();
        let path = fs::canonicalize(td.path()).unwrap().join("cfg").join("config.xml");
        create_template_config(&path).unwrap();

        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn template_is_never_overwritten() {
        let td = tempdir().unwrap();
        let path = fs::canonicalize(td.path()).unwrap().join("config.xml");
        fs::write(&path, "<config/>").unwrap();
        assert!(create_template_config(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<config/>");
    }
}
