//! Wiring of the report's collaborators from configuration.
//!
//! Commands build a [`ReportSetup`] once and borrow a
//! [`ReportAssembler`] from it.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::config::{load_config, project_path, AppConfig};
use crate::context::ContextResolver;
use crate::error::{ConfReportError, Result};
use crate::locale::Labels;
use crate::report::ReportAssembler;
use crate::sources::{
    DatabaseCapability, HeaderFetcher, HttpHeaderFetcher, NoDatabase, NoHeaders, PhpBinary,
    RecordedDatabase, RuntimeSnapshot, ServerEnvironment,
};
use crate::ui::UserInterface;

/// Everything a report run needs, owned.
pub struct ReportSetup {
    config: AppConfig,
    runtime: RuntimeSnapshot,
    server: ServerEnvironment,
    headers: Option<HttpHeaderFetcher>,
    database: Option<RecordedDatabase>,
    labels: Labels,
    snapshot_path: PathBuf,
}

impl ReportSetup {
    /// Load configuration and the value sources it points at.
    ///
    /// Fails when the configuration or a configured recording cannot be
    /// read, or when the runtime cannot be probed. A header client that
    /// cannot be built only disables the header checks.
    pub fn load(project_root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(project_root, config_path)?;
        Self::from_config(project_root, config)
    }

    /// Build from an already loaded configuration.
    pub fn from_config(project_root: &Path, config: AppConfig) -> Result<Self> {
        let runtime = match &config.runtime_snapshot {
            Some(path) => {
                let path = project_path(project_root, path);
                tracing::debug!("Using recorded runtime {}", path.display());
                RuntimeSnapshot::load(&path)?
            }
            None => PhpBinary::new(&config.php_binary).probe(&Catalog::builtin().functions())?,
        };

        let database = match &config.database_snapshot {
            Some(path) => Some(RecordedDatabase::load(&project_path(project_root, path))?),
            None => None,
        };

        let headers = match config.site_url() {
            Some(_) => match HttpHeaderFetcher::with_timeout(config.header_timeout()) {
                Ok(fetcher) => Some(fetcher),
                Err(e) => {
                    tracing::warn!("Header checks disabled: {:#}", e);
                    None
                }
            },
            None => None,
        };

        let server = ServerEnvironment::detect(&config);
        let labels = Labels::with_overrides(config.labels.clone());
        let snapshot_path = project_path(project_root, &config.background_snapshot);

        Ok(Self {
            config,
            runtime,
            server,
            headers,
            database,
            labels,
            snapshot_path,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Where the background snapshot is persisted.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// An assembler over the loaded sources.
    pub fn assembler(&self) -> ReportAssembler<'_> {
        let headers: &dyn HeaderFetcher = match &self.headers {
            Some(fetcher) => fetcher,
            None => &NoHeaders,
        };
        let database: &dyn DatabaseCapability = match &self.database {
            Some(recorded) => recorded,
            None => &NoDatabase,
        };

        ReportAssembler::new(&self.runtime, &self.config)
            .with_server(self.server.clone())
            .with_headers(headers)
            .with_database(database)
            .with_translator(&self.labels)
            .with_resolver(ContextResolver::new(&self.snapshot_path))
    }
}

/// Load a setup for a command, reporting the failures a user can fix.
///
/// `Ok(None)` means the problem was already shown and the command should
/// exit with status 2.
pub fn load_for_command(
    project_root: &Path,
    config_path: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<Option<ReportSetup>> {
    match ReportSetup::load(project_root, config_path) {
        Ok(setup) => Ok(Some(setup)),
        Err(ConfReportError::ConfigNotFound { path }) => {
            ui.error(&format!("No configuration found at {}", path.display()));
            Ok(None)
        }
        Err(e @ ConfReportError::RuntimeProbeFailed { .. }) => {
            ui.error(&e.to_string());
            ui.message("Set `runtime_snapshot` or `php_binary` in confreport.yml.");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
