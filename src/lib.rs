//! confreport - Server environment diagnostics.
//!
//! confreport evaluates the runtime a web application is deployed on
//! against a built-in catalog of recommendations: interpreter settings,
//! loaded modules, database variables, response headers and environment
//! facts. Each check is judged for the interactive run and, where it
//! applies, for the values a scheduled background job recorded earlier.
//!
//! # Modules
//!
//! - [`catalog`] - The built-in check tables
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and schema
//! - [`context`] - Execution contexts and the persisted background snapshot
//! - [`error`] - Error types and result aliases
//! - [`locale`] - User-facing labels
//! - [`report`] - Report assembly
//! - [`sources`] - Value sources (runtime, environment, headers, database)
//! - [`ui`] - Terminal output
//! - [`validate`] - Validators and parsers
//! - [`value`] - Raw observed values
//!
//! # Example
//!
//! ```
//! use confreport::catalog::Category;
//! use confreport::config::AppConfig;
//! use confreport::report::{all_passed, ReportAssembler};
//! use confreport::sources::RuntimeSnapshot;
//!
//! let mut runtime = RuntimeSnapshot::default();
//! runtime
//!     .settings
//!     .insert("memory_limit".into(), "128M".into());
//! let config = AppConfig::default();
//!
//! let report = ReportAssembler::new(&runtime, &config).get_all();
//! let memory = report[&Category::Stability]
//!     .iter()
//!     .find(|r| r.name == "memory_limit")
//!     .unwrap();
//! assert!(!memory.status);
//! assert!(!all_passed(&report));
//! ```
//!
//! For file-based config loading, see the integration tests.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod locale;
pub mod report;
pub mod sources;
pub mod ui;
pub mod validate;
pub mod value;

pub use error::{ConfReportError, Result};
pub use report::{Report, ReportAssembler};
