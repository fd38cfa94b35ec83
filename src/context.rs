//! Invocation context and the persisted background snapshot.
//!
//! A report is evaluated either for an interactive web request or for a
//! scheduled background job. Background jobs cannot observe everything a
//! web request can (response headers, the request's transport), so the
//! scheduled job records its own readings into a [`BackgroundSnapshot`]
//! file; later interactive reports load it and show both readings side by
//! side. A missing snapshot file is normal and yields an empty snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Category;
use crate::error::{ConfReportError, Result};
use crate::value::{RawMap, RawValue};

/// Default location of the background snapshot, relative to the project root.
pub const DEFAULT_SNAPSHOT_PATH: &str = "user_privileges/cron.json";

/// Which execution context a value was observed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextTag {
    /// Live web request.
    #[default]
    Interactive,
    /// Scheduled (cron) execution.
    Background,
}

impl fmt::Display for ContextTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextTag::Interactive => f.write_str("interactive"),
            ContextTag::Background => f.write_str("background"),
        }
    }
}

/// Background-context readings, per category, per check name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackgroundSnapshot {
    categories: BTreeMap<Category, RawMap>,
}

impl BackgroundSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the readings of one category.
    pub fn insert(&mut self, category: Category, values: RawMap) {
        self.categories.insert(category, values);
    }

    /// Readings of a category, if any were recorded.
    pub fn category(&self, category: Category) -> Option<&RawMap> {
        self.categories.get(&category)
    }

    /// Single reading.
    pub fn value(&self, category: Category, name: &str) -> Option<&RawValue> {
        self.category(category)?.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(|m| m.is_empty())
    }

    /// Iterate categories in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &RawMap)> {
        self.categories.iter()
    }

    /// Read a snapshot file. `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ConfReportError::SnapshotParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Write the snapshot as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Resolves the background overrides available to a report run.
#[derive(Debug, Clone, Default)]
pub struct ContextResolver {
    snapshot_path: Option<PathBuf>,
}

impl ContextResolver {
    /// Resolver reading the snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: Some(path.into()),
        }
    }

    /// Resolver with no persisted snapshot.
    pub fn without_snapshot() -> Self {
        Self::default()
    }

    /// Resolver for a project root, using the default snapshot location.
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(DEFAULT_SNAPSHOT_PATH))
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Load the persisted overrides.
    ///
    /// Absent and unreadable files both yield an empty snapshot; the latter
    /// is logged.
    pub fn overrides(&self) -> BackgroundSnapshot {
        let Some(path) = &self.snapshot_path else {
            return BackgroundSnapshot::new();
        };

        match BackgroundSnapshot::read(path) {
            Ok(Some(snapshot)) => {
                tracing::debug!("Loaded background snapshot from {}", path.display());
                snapshot
            }
            Ok(None) => BackgroundSnapshot::new(),
            Err(e) => {
                tracing::warn!("Ignoring background snapshot: {}", e);
                BackgroundSnapshot::new()
            }
        }
    }
}
