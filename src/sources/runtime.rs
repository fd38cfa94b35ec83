//! Interpreter runtime introspection.
//!
//! The report needs the interpreter's current settings, its loaded optional
//! modules, and whether a handful of capability functions exist. Those are
//! exposed through [`RuntimeIntrospection`]. [`RuntimeSnapshot`] is the
//! recorded form (loadable from JSON or YAML, and the fixture used in tests);
//! [`PhpBinary`] produces one by running the interpreter once.
//!
//! # Example
//!
//! ```
//! use confreport::sources::{RuntimeIntrospection, RuntimeSnapshot};
//!
//! let runtime: RuntimeSnapshot = serde_json::from_str(
//!     r#"{"version": "8.2.7", "modules": ["curl", "gd"], "settings": {"memory_limit": "512M"}}"#,
//! ).unwrap();
//! assert!(runtime.modules().contains(&"gd".to_string()));
//! assert_eq!(runtime.facts().version, "8.2.7");
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ConfReportError, Result};
use crate::value::RawMap;

/// Facts about the interpreter itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeFacts {
    /// Interpreter version string.
    pub version: String,
    /// Execution mode identifier (e.g. `fpm-fcgi`, `cli`).
    pub sapi: String,
    /// Loaded configuration file.
    pub ini_file: Option<String>,
    /// Additional scanned configuration files.
    pub scanned_ini_files: Option<String>,
}

/// Runtime introspection capability.
pub trait RuntimeIntrospection {
    /// All current settings as name → local value.
    fn settings(&self) -> RawMap;

    /// Currently loaded optional modules.
    fn modules(&self) -> Vec<String>;

    /// Whether a named optional capability function is available.
    fn function_exists(&self, name: &str) -> bool;

    /// Version, execution mode and configuration files.
    fn facts(&self) -> RuntimeFacts;
}

/// A recorded reading of the interpreter runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSnapshot {
    pub version: String,
    pub sapi: String,
    pub ini_file: Option<String>,
    pub scanned_ini_files: Option<String>,
    pub settings: RawMap,
    pub modules: Vec<String>,
    /// Capability functions known to exist.
    pub functions: Vec<String>,
}

impl RuntimeSnapshot {
    /// Load a recorded snapshot; `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfReportError::SnapshotParseError {
            path: path.to_path_buf(),
            message,
        })
    }
}

impl RuntimeIntrospection for RuntimeSnapshot {
    fn settings(&self) -> RawMap {
        self.settings.clone()
    }

    fn modules(&self) -> Vec<String> {
        self.modules.clone()
    }

    fn function_exists(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f.eq_ignore_ascii_case(name))
    }

    fn facts(&self) -> RuntimeFacts {
        RuntimeFacts {
            version: self.version.clone(),
            sapi: self.sapi.clone(),
            ini_file: self.ini_file.clone(),
            scanned_ini_files: self.scanned_ini_files.clone(),
        }
    }
}

/// Inline script printing the runtime reading as one JSON document.
///
/// Function names to test are passed as script arguments.
const PROBE_SCRIPT: &str = r#"
$functions = array_slice($argv, 1);
echo json_encode([
    'version' => PHP_VERSION,
    'sapi' => PHP_SAPI,
    'ini_file' => php_ini_loaded_file() ?: null,
    'scanned_ini_files' => php_ini_scanned_files() ?: null,
    'settings' => ini_get_all(null, false),
    'modules' => get_loaded_extensions(),
    'functions' => array_values(array_filter($functions, 'function_exists')),
]);
"#;

/// Probes a live interpreter binary.
#[derive(Debug, Clone)]
pub struct PhpBinary {
    binary: PathBuf,
}

impl PhpBinary {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The interpreter binary that will be run.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Run the interpreter once and capture a snapshot.
    pub fn probe(&self, functions: &[&str]) -> Result<RuntimeSnapshot> {
        tracing::debug!("Probing runtime via {}", self.binary.display());

        let output = Command::new(&self.binary)
            .arg("-r")
            .arg(PROBE_SCRIPT)
            .arg("--")
            .args(functions)
            .output()
            .map_err(|e| ConfReportError::RuntimeProbeFailed {
                message: format!("{}: {}", self.binary.display(), e),
            })?;

        if !output.status.success() {
            return Err(ConfReportError::RuntimeProbeFailed {
                message: format!(
                    "{} exited with {:?}: {}",
                    self.binary.display(),
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        parse_probe_output(&String::from_utf8_lossy(&output.stdout))
    }
}

impl Default for PhpBinary {
    fn default() -> Self {
        Self::new("php")
    }
}

/// Parse the JSON document printed by the probe script.
pub fn parse_probe_output(stdout: &str) -> Result<RuntimeSnapshot> {
    serde_json::from_str(stdout.trim()).map_err(|e| ConfReportError::RuntimeProbeFailed {
        message: format!("unreadable probe output: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::RawValue;
    use tempfile::TempDir;

    const PROBE_OUTPUT: &str = r#"{
        "version": "7.2.10",
        "sapi": "cli",
        "ini_file": "/etc/php/7.2/cli/php.ini",
        "scanned_ini_files": null,
        "settings": {"memory_limit": "-1", "display_errors": "", "max_execution_time": "0"},
        "modules": ["Core", "date", "json"],
        "functions": []
    }"#;

    #[test]
    fn parses_probe_output() {
        let snapshot = parse_probe_output(PROBE_OUTPUT).unwrap();
        assert_eq!(snapshot.version, "7.2.10");
        assert_eq!(snapshot.sapi, "cli");
        assert_eq!(snapshot.settings["memory_limit"], RawValue::from("-1"));
        assert_eq!(snapshot.modules.len(), 3);
        assert!(!snapshot.function_exists("opcache_get_configuration"));
    }

    #[test]
    fn garbage_probe_output_is_probe_failure() {
        let err = parse_probe_output("PHP Warning: something").unwrap_err();
        assert!(matches!(err, ConfReportError::RuntimeProbeFailed { .. }));
    }

    #[test]
    fn missing_binary_is_probe_failure() {
        let php = PhpBinary::new("/nonexistent/bin/php-does-not-exist");
        let err = php.probe(&[]).unwrap_err();
        assert!(matches!(err, ConfReportError::RuntimeProbeFailed { .. }));
        assert!(err.to_string().contains("php-does-not-exist"));
    }

    #[test]
    fn default_binary_is_php() {
        assert_eq!(PhpBinary::default().binary(), Path::new("php"));
    }

    #[test]
    fn function_lookup_is_case_insensitive() {
        let snapshot = RuntimeSnapshot {
            functions: vec!["opcache_get_configuration".into()],
            ..Default::default()
        };
        assert!(snapshot.function_exists("OPcache_Get_Configuration"));
    }

    #[test]
    fn facts_mirror_snapshot_fields() {
        let snapshot = parse_probe_output(PROBE_OUTPUT).unwrap();
        let facts = snapshot.facts();
        assert_eq!(facts.ini_file.as_deref(), Some("/etc/php/7.2/cli/php.ini"));
        assert!(facts.scanned_ini_files.is_none());
    }

    #[test]
    fn loads_yaml_snapshot() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("runtime.yml");
        fs::write(
            &path,
            "version: 8.1.2\nsapi: fpm-fcgi\nmodules: [curl]\nsettings:\n  memory_limit: 512M\n",
        )
        .unwrap();

        let snapshot = RuntimeSnapshot::load(&path).unwrap();
        assert_eq!(snapshot.sapi, "fpm-fcgi");
        assert_eq!(snapshot.settings["memory_limit"], RawValue::from("512M"));
    }

    #[test]
    fn loads_json_snapshot() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("runtime.json");
        fs::write(&path, PROBE_OUTPUT).unwrap();

        let snapshot = RuntimeSnapshot::load(&path).unwrap();
        assert_eq!(snapshot.version, "7.2.10");
    }

    #[test]
    fn malformed_snapshot_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("runtime.json");
        fs::write(&path, "{not json").unwrap();

        let err = RuntimeSnapshot::load(&path).unwrap_err();
        assert!(matches!(err, ConfReportError::SnapshotParseError { .. }));
    }
}
