//! Value sources.
//!
//! Five independent raw-data providers feed the report:
//!
//! - [`runtime`] - interpreter settings, loaded modules, capability functions
//! - [`environment`] - environment and platform facts
//! - [`headers`] - response headers of the application's own base URL
//! - [`database`] - database engine variables
//!
//! [`SourceSnapshots`] holds what was loaded for one report run. Only the
//! containers a run references are loaded, each at most once, and a source
//! that is unavailable contributes an empty mapping instead of an error.

pub mod database;
pub mod environment;
pub mod headers;
pub mod runtime;

pub use database::{
    database_variables, DatabaseCapability, DatabaseHandle, NoDatabase, RecordedDatabase,
};
pub use environment::ServerEnvironment;
pub use headers::{HeaderFetcher, HttpHeaderFetcher, NoHeaders};
pub use runtime::{PhpBinary, RuntimeFacts, RuntimeIntrospection, RuntimeSnapshot};

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::Container;
use crate::value::{lookup, RawMap, RawValue};

/// The collaborators a report run reads from.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    pub runtime: &'a dyn RuntimeIntrospection,
    pub server: &'a ServerEnvironment,
    pub headers: &'a dyn HeaderFetcher,
    pub database: &'a dyn DatabaseCapability,
    /// Base URL probed by the header source.
    pub site_url: Option<&'a str>,
}

/// Raw data captured once for one report run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSnapshots {
    maps: BTreeMap<Container, RawMap>,
    modules: Vec<String>,
}

impl SourceSnapshots {
    /// Load the given containers from their sources.
    pub fn load(containers: &BTreeSet<Container>, sources: &Sources<'_>) -> Self {
        let mut snapshots = Self::default();

        for container in containers {
            tracing::debug!("Loading {} container", container);
            match container {
                Container::Php => {
                    snapshots
                        .maps
                        .insert(Container::Php, sources.runtime.settings());
                }
                Container::Env => {
                    let facts = sources.server.facts(&sources.runtime.facts());
                    snapshots.maps.insert(Container::Env, facts);
                }
                Container::Ext => {
                    snapshots.modules = sources.runtime.modules();
                }
                Container::Headers => {
                    let headers = fetch_headers(sources.headers, sources.site_url);
                    snapshots.maps.insert(Container::Headers, headers);
                }
                Container::Db => {
                    snapshots
                        .maps
                        .insert(Container::Db, database_variables(sources.database));
                }
            }
        }

        snapshots
    }

    /// Inject a container mapping (for fixtures).
    pub fn with_container(mut self, container: Container, map: RawMap) -> Self {
        self.maps.insert(container, map);
        self
    }

    /// Inject the loaded module list (for fixtures).
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// The mapping captured for a container, if it was loaded.
    pub fn container(&self, container: Container) -> Option<&RawMap> {
        self.maps.get(&container)
    }

    /// Raw value of `name` in a container, with case-insensitive fallback.
    ///
    /// The module list is not a mapping, so [`Container::Ext`] never
    /// yields a value here.
    pub fn raw(&self, container: Container, name: &str) -> Option<&RawValue> {
        lookup(self.maps.get(&container)?, name)
    }

    /// Loaded optional modules.
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Whether a module is loaded.
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }

    /// Observed response header by lower-cased name.
    pub fn header(&self, name: &str) -> Option<&RawValue> {
        self.maps.get(&Container::Headers)?.get(name)
    }
}

/// Fetch the application's own response headers; failures yield no headers.
pub fn fetch_headers(fetcher: &dyn HeaderFetcher, site_url: Option<&str>) -> RawMap {
    let Some(url) = site_url.filter(|u| !u.is_empty()) else {
        tracing::debug!("No site URL configured; skipping header probe");
        return RawMap::new();
    };

    match fetcher.fetch(url) {
        Ok(headers) => headers,
        Err(e) => {
            tracing::warn!("Header probe of {} failed: {:#}", url, e);
            RawMap::new()
        }
    }
}
