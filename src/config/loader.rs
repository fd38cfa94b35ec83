//! Configuration file discovery and loading.
//!
//! An explicit `--config` path wins; otherwise `confreport.yml` in the
//! project root is used when present. Running without any config file is
//! normal and yields the defaults.

use crate::config::schema::AppConfig;
use crate::error::{ConfReportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "confreport.yml";

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `confreport.yml` (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfReportError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfReportError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into AppConfig.
///
/// An empty document is the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<AppConfig> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ConfReportError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the config for a project.
///
/// An explicit path must exist. Without one, `confreport.yml` in the
/// project root is loaded if present, else the defaults are returned.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        tracing::debug!("Loading config from {}", path.display());
        return load_config_file(path);
    }

    let path = project_root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        tracing::debug!("Loading config from {}", path.display());
        load_config_file(&path)
    } else {
        tracing::debug!("No {} found; using defaults", CONFIG_FILE_NAME);
        Ok(AppConfig::default())
    }
}

/// Resolve a configured path against the project root.
pub fn project_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
