//! Configuration loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use confreport::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("confreport.yml"), "site_url: https://crm.example.com").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.site_url(), Some("https://crm.example.com"));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    find_project_root, load_config, load_config_file, parse_config, project_path,
    CONFIG_FILE_NAME,
};
pub use schema::{AppConfig, SystemMode};
