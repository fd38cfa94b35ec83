//! Database engine variables.
//!
//! The driver layer is a collaborator: anything implementing
//! [`DatabaseCapability`] can hand out a [`DatabaseHandle`]. The report
//! merges the handle's connection metadata with the full server variable
//! listing. [`RecordedDatabase`] is a recorded reading usable offline and in
//! tests; [`NoDatabase`] stands for "no database configured".

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfReportError;
use crate::value::{RawMap, RawValue};

/// Query listing every server variable.
pub const SHOW_VARIABLES: &str = "SHOW VARIABLES";

/// An open database connection.
pub trait DatabaseHandle {
    fn driver_name(&self) -> String;
    fn server_version(&self) -> String;
    fn client_version(&self) -> String;
    fn connection_status(&self) -> String;
    fn server_info(&self) -> String;

    /// Run a key/value query (two columns: name, value).
    fn query(&self, sql: &str) -> Result<RawMap>;
}

/// Database capability: hands out a connection when one is configured.
pub trait DatabaseCapability {
    fn connection(&self) -> Option<&dyn DatabaseHandle>;
}

/// No database configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDatabase;

impl DatabaseCapability for NoDatabase {
    fn connection(&self) -> Option<&dyn DatabaseHandle> {
        None
    }
}

/// A recorded reading of a database server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordedDatabase {
    pub driver: String,
    pub server_version: String,
    pub client_version: String,
    pub connection_status: String,
    pub server_info: String,
    pub variables: RawMap,
}

impl RecordedDatabase {
    /// Load a recorded reading from a JSON or YAML file.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| ConfReportError::SnapshotParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl DatabaseHandle for RecordedDatabase {
    fn driver_name(&self) -> String {
        self.driver.clone()
    }

    fn server_version(&self) -> String {
        self.server_version.clone()
    }

    fn client_version(&self) -> String {
        self.client_version.clone()
    }

    fn connection_status(&self) -> String {
        self.connection_status.clone()
    }

    fn server_info(&self) -> String {
        self.server_info.clone()
    }

    fn query(&self, sql: &str) -> Result<RawMap> {
        if !sql.trim().eq_ignore_ascii_case(SHOW_VARIABLES) {
            bail!("recorded database only answers '{}'", SHOW_VARIABLES);
        }
        Ok(self.variables.clone())
    }
}

impl DatabaseCapability for RecordedDatabase {
    fn connection(&self) -> Option<&dyn DatabaseHandle> {
        Some(self)
    }
}

/// Build the database container: connection metadata merged with the
/// server variables. Empty when no database is configured.
pub fn database_variables(database: &dyn DatabaseCapability) -> RawMap {
    let Some(handle) = database.connection() else {
        tracing::debug!("No database configured; database checks will be omitted");
        return RawMap::new();
    };

    let mut map = RawMap::new();
    map.insert("driver".into(), RawValue::from(handle.driver_name()));
    map.insert("serverVersion".into(), RawValue::from(handle.server_version()));
    map.insert("clientVersion".into(), RawValue::from(handle.client_version()));
    map.insert(
        "connectionStatus".into(),
        RawValue::from(handle.connection_status()),
    );
    map.insert("serverInfo".into(), RawValue::from(handle.server_info()));

    match handle.query(SHOW_VARIABLES) {
        Ok(variables) => map.extend(variables),
        Err(e) => tracing::warn!("Database variable query failed: {:#}", e),
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn recorded() -> RecordedDatabase {
        let mut variables = RawMap::new();
        variables.insert("wait_timeout".into(), RawValue::from("28800"));
        variables.insert("sql_mode".into(), RawValue::from("NO_ZERO_DATE"));
        RecordedDatabase {
            driver: "mysql".into(),
            server_version: "10.3.22-MariaDB".into(),
            client_version: "mysqlnd 7.2".into(),
            connection_status: "127.0.0.1 via TCP/IP".into(),
            server_info: "Uptime: 100".into(),
            variables,
        }
    }

    #[test]
    fn no_database_gives_empty_map() {
        assert!(database_variables(&NoDatabase).is_empty());
    }

    #[test]
    fn merges_metadata_and_variables() {
        let map = database_variables(&recorded());
        assert_eq!(map["driver"], RawValue::from("mysql"));
        assert_eq!(map["serverVersion"], RawValue::from("10.3.22-MariaDB"));
        assert_eq!(map["wait_timeout"], RawValue::from("28800"));
        assert_eq!(map.len(), 7);
    }

    #[test]
    fn recorded_database_rejects_other_queries() {
        assert!(recorded().query("SELECT 1").is_err());
        assert!(recorded().query("show variables").is_ok());
    }

    struct FailingHandle;

    impl DatabaseHandle for FailingHandle {
        fn driver_name(&self) -> String {
            "mysql".into()
        }
        fn server_version(&self) -> String {
            "8.0".into()
        }
        fn client_version(&self) -> String {
            "8.0".into()
        }
        fn connection_status(&self) -> String {
            "ok".into()
        }
        fn server_info(&self) -> String {
            String::new()
        }
        fn query(&self, _sql: &str) -> Result<RawMap> {
            bail!("lost connection")
        }
    }

    impl DatabaseCapability for FailingHandle {
        fn connection(&self) -> Option<&dyn DatabaseHandle> {
            Some(self)
        }
    }

    #[test]
    fn failed_query_keeps_metadata() {
        let map = database_variables(&FailingHandle);
        assert_eq!(map["driver"], RawValue::from("mysql"));
        assert!(!map.contains_key("wait_timeout"));
    }

    #[test]
    fn loads_recorded_reading() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db.yml");
        fs::write(
            &path,
            "driver: mysql\nserver_version: '8.0.21'\nvariables:\n  wait_timeout: '600'\n",
        )
        .unwrap();

        let db = RecordedDatabase::load(&path).unwrap();
        assert_eq!(db.server_version, "8.0.21");
        assert_eq!(db.variables["wait_timeout"], RawValue::from("600"));
    }
}
