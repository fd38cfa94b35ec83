//! Environment and platform facts.
//!
//! Facts about the serving environment: interpreter version and mode,
//! configuration files, whether the request arrived over TLS, whether the
//! public document root is isolated, and which server software is in front.
//! Explicit configuration wins over the CGI-style environment variables the
//! web server exports.

use std::env::VarError;

use crate::config::AppConfig;
use crate::sources::runtime::RuntimeFacts;
use crate::value::{RawMap, RawValue};

/// Facts about the serving environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerEnvironment {
    /// The current request arrived over a secure transport.
    pub https: bool,
    /// The public document root is isolated from the application tree.
    pub public_dir_isolated: bool,
    /// Serving software (e.g. `Apache/2.4.41`, `nginx/1.18.0`).
    pub server_software: Option<String>,
    /// The `.htaccess` mechanism reported itself active.
    pub htaccess_active: bool,
}

impl ServerEnvironment {
    /// Detect from configuration and the process environment.
    pub fn detect(config: &AppConfig) -> Self {
        Self::detect_with_env(config, |key| std::env::var(key))
    }

    /// Detect with a custom env var lookup (for testing).
    pub fn detect_with_env<F>(config: &AppConfig, env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let https = config.https.unwrap_or_else(|| {
            env_fn("HTTPS")
                .map(|v| !v.is_empty() && !v.eq_ignore_ascii_case("off"))
                .unwrap_or(false)
        });

        let server_software = config
            .server_software
            .clone()
            .or_else(|| env_fn("SERVER_SOFTWARE").ok())
            .filter(|s| !s.is_empty());

        let htaccess_active = config
            .htaccess_active
            .unwrap_or_else(|| env_fn("HTACCESS_TEST").is_ok());

        Self {
            https,
            public_dir_isolated: config.public_dir_isolated,
            server_software,
            htaccess_active,
        }
    }

    /// Whether the serving software needs no `.htaccess` mechanism (or is
    /// unknown, in which case it cannot be assessed).
    pub fn htaccess_not_applicable(&self) -> bool {
        match &self.server_software {
            Some(software) => software.to_lowercase().contains("nginx"),
            None => true,
        }
    }

    /// The environment container's flat mapping.
    pub fn facts(&self, runtime: &RuntimeFacts) -> RawMap {
        let mut map = RawMap::new();
        map.insert("phpVersion".into(), RawValue::from(runtime.version.clone()));
        map.insert("sapi".into(), RawValue::from(runtime.sapi.clone()));
        map.insert(
            "phpIni".into(),
            runtime
                .ini_file
                .clone()
                .map(RawValue::from)
                .unwrap_or(RawValue::Null),
        );
        map.insert(
            "phpIniAll".into(),
            runtime
                .scanned_ini_files
                .clone()
                .map(RawValue::from)
                .unwrap_or(RawValue::Null),
        );
        map.insert("https".into(), on_off(self.https));
        map.insert("public_html".into(), on_off(self.public_dir_isolated));
        map
    }
}

fn on_off(flag: bool) -> RawValue {
    RawValue::from(if flag { "On" } else { "Off" })
}
