//! Integration tests for report assembly against recorded sources.

use confreport::catalog::Category;
use confreport::cli::ReportSetup;
use confreport::config::AppConfig;
use confreport::context::{BackgroundSnapshot, ContextResolver};
use confreport::report::{all_passed, ReportAssembler};
use confreport::sources::{HeaderFetcher, RuntimeSnapshot};
use confreport::value::{RawMap, RawValue};
use httpmock::prelude::*;
use std::fs;
use tempfile::TempDir;

const RUNTIME: &str = r#"
version: 8.1.2
sapi: fpm-fcgi
modules: [curl, gd, mbstring, pdo_mysql]
settings:
  memory_limit: 512M
  max_execution_time: "30"
  log_errors: "1"
  display_errors: "0"
  date.timezone: Europe/Warsaw
"#;

fn runtime() -> RuntimeSnapshot {
    serde_yaml::from_str(RUNTIME).unwrap()
}

struct FailingHeaders;

impl HeaderFetcher for FailingHeaders {
    fn fetch(&self, url: &str) -> anyhow::Result<RawMap> {
        anyhow::bail!("connection refused: {}", url)
    }
}

#[test]
fn header_failure_still_yields_every_category() {
    let runtime = runtime();
    let config = AppConfig {
        site_url: Some("https://crm.example.test".into()),
        ..Default::default()
    };

    let report = ReportAssembler::new(&runtime, &config)
        .with_headers(&FailingHeaders)
        .get_all();

    assert_eq!(report.len(), Category::ALL.len());
    let security = &report[&Category::Security];
    let frame = security
        .iter()
        .find(|r| r.name == "Header: X-Frame-Options")
        .unwrap();
    assert!(frame.status);
    assert!(frame.interactive.is_none());
}

#[test]
fn background_values_round_trip_through_the_snapshot() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("user_privileges/cron.json");
    let runtime = runtime();
    let config = AppConfig::default();

    let recorded = ReportAssembler::new(&runtime, &config).get_for_background_snapshot();
    recorded.save(&path).unwrap();

    let report = ReportAssembler::new(&runtime, &config)
        .with_resolver(ContextResolver::new(&path))
        .get(Category::Stability);

    let memory = report.iter().find(|r| r.name == "memory_limit").unwrap();
    assert_eq!(memory.override_value, Some(RawValue::from("512M")));
    assert_eq!(memory.interactive, memory.background);
}

#[test]
fn background_reading_can_fail_a_passing_check() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cron.json");
    let mut snapshot = BackgroundSnapshot::new();
    snapshot.insert(
        Category::Stability,
        RawMap::from([("log_errors".to_string(), RawValue::from("Off"))]),
    );
    snapshot.save(&path).unwrap();

    let runtime = runtime();
    let config = AppConfig::default();
    let report = ReportAssembler::new(&runtime, &config)
        .with_resolver(ContextResolver::new(&path))
        .get(Category::Stability);

    let log_errors = report.iter().find(|r| r.name == "log_errors").unwrap();
    assert_eq!(log_errors.interactive, Some(RawValue::from("On")));
    assert_eq!(log_errors.background, Some(RawValue::from("Off")));
    assert!(!log_errors.status);
}

#[test]
fn corrupt_snapshot_is_ignored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cron.json");
    fs::write(&path, "{ not json").unwrap();

    let runtime = runtime();
    let config = AppConfig::default();
    let report = ReportAssembler::new(&runtime, &config)
        .with_resolver(ContextResolver::new(&path))
        .get(Category::Stability);

    assert!(report.iter().all(|r| r.override_value.is_none()));
}

#[test]
fn live_headers_are_judged() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("X-Frame-Options", "DENY")
            .header("X-Content-Type-Options", "nosniff")
            .body("ok");
    });

    let temp = TempDir::new().unwrap();
    let runtime_path = temp.path().join("runtime.yml");
    fs::write(&runtime_path, RUNTIME).unwrap();
    let config = AppConfig {
        site_url: Some(server.url("/")),
        runtime_snapshot: Some(runtime_path),
        ..Default::default()
    };

    let setup = ReportSetup::from_config(temp.path(), config).unwrap();
    let security = setup.assembler().get(Category::Security);

    let frame = security
        .iter()
        .find(|r| r.name == "Header: X-Frame-Options")
        .unwrap();
    assert!(!frame.status);
    assert_eq!(frame.interactive, Some(RawValue::from("DENY")));

    let sniff = security
        .iter()
        .find(|r| r.name == "Header: X-Content-Type-Options")
        .unwrap();
    assert!(sniff.status);
}

#[test]
fn short_execution_time_fails_the_report() {
    let runtime = runtime();
    let config = AppConfig::default();

    let report = ReportAssembler::new(&runtime, &config).get_all();

    let stability = &report[&Category::Stability];
    let timeout = stability
        .iter()
        .find(|r| r.name == "max_execution_time")
        .unwrap();
    assert!(!timeout.status);
    assert!(!all_passed(&report));
}
