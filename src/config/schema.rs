//! Configuration schema for `confreport.yml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::context::DEFAULT_SNAPSHOT_PATH;

/// Root configuration structure for confreport.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application base URL; probed for response headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,

    /// Application mode: prod, demo or test
    pub system_mode: SystemMode,

    /// Whether the application regenerates session ids on login
    #[serde(default = "default_true")]
    pub session_regenerate_id: bool,

    /// Whether the public document root is isolated from the application tree
    #[serde(skip_serializing_if = "is_false")]
    pub public_dir_isolated: bool,

    /// Force the secure-transport fact instead of reading `HTTPS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,

    /// Serving software instead of reading `SERVER_SOFTWARE`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_software: Option<String>,

    /// `.htaccess` marker instead of reading `HTACCESS_TEST`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub htaccess_active: Option<bool>,

    /// Interpreter binary probed for live runtime data
    #[serde(default = "default_php_binary")]
    pub php_binary: PathBuf,

    /// Recorded runtime snapshot used instead of probing the binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_snapshot: Option<PathBuf>,

    /// Recorded database variables (YAML)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_snapshot: Option<PathBuf>,

    /// Persisted background snapshot, relative to the project root
    #[serde(default = "default_background_snapshot")]
    pub background_snapshot: PathBuf,

    /// Header probe timeout in milliseconds
    #[serde(default = "default_header_timeout_ms")]
    pub header_timeout_ms: u64,

    /// Label overrides, key → text
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_url: None,
            system_mode: SystemMode::default(),
            session_regenerate_id: default_true(),
            public_dir_isolated: false,
            https: None,
            server_software: None,
            htaccess_active: None,
            php_binary: default_php_binary(),
            runtime_snapshot: None,
            database_snapshot: None,
            background_snapshot: default_background_snapshot(),
            header_timeout_ms: default_header_timeout_ms(),
            labels: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// The configured site URL, ignoring empty values.
    pub fn site_url(&self) -> Option<&str> {
        self.site_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn is_demo(&self) -> bool {
        self.system_mode == SystemMode::Demo
    }

    pub fn header_timeout(&self) -> Duration {
        Duration::from_millis(self.header_timeout_ms)
    }
}

fn default_true() -> bool {
    true
}

fn is_false(v: &bool) -> bool {
    !v
}

fn default_php_binary() -> PathBuf {
    PathBuf::from("php")
}

fn default_background_snapshot() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}

fn default_header_timeout_ms() -> u64 {
    1000
}

/// Application mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemMode {
    #[default]
    Prod,
    Demo,
    Test,
}
