//! Validator and parser functions, one per kind.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::FixedOffset;
use chrono_tz::Tz;

use super::bytes::{parse_bytes, show_bytes};
use super::flags::{self, E_ALL, E_NOTICE, RECOMMENDED_LEVEL};
use super::version::{compare_parts, minimum_version, version_parts};
use super::{normalize_on_off, EvaluationResult, ValidationEnv};
use crate::catalog::CheckEntry;
use crate::context::ContextTag;
use crate::locale::{
    LBL_INVALID_BYTE_SIZE, LBL_INVALID_TIME_ZONE, LBL_NO, LBL_YES, NAMESPACE,
};
use crate::sources::SourceSnapshots;
use crate::value::RawValue;

/// Text of the value observed in `context`, if any.
fn current(result: &EvaluationResult, context: ContextTag) -> Option<String> {
    result.value(context).map(RawValue::as_text)
}

fn yes_no(env: &ValidationEnv<'_>, yes: bool) -> String {
    let key = if yes { LBL_YES } else { LBL_NO };
    env.translator.translate(key, NAMESPACE)
}

fn on_off_label(on: bool) -> &'static str {
    if on {
        "On"
    } else {
        "Off"
    }
}

pub(super) fn version(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    _env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(value) = current(&result, context) else {
        return result;
    };
    let (Some(current), Some(minimum)) = (
        version_parts(&value),
        entry.recommended.and_then(minimum_version),
    ) else {
        return result;
    };

    result.require(compare_parts(&current, &minimum) != Ordering::Less);
    result
}

pub(super) fn error_reporting(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    _env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(value) = current(&result, context) else {
        return result;
    };
    let recommended = entry.recommended.unwrap_or_default();

    // Some hosts report the level symbolically instead of as a mask.
    if value.contains('_') {
        let squash = |s: &str| s.split_whitespace().collect::<String>();
        result.require(squash(&value) == squash(recommended));
        return result;
    }

    let mask = value.trim().parse::<i64>().unwrap_or(0);
    if recommended == RECOMMENDED_LEVEL && mask == E_ALL & !E_NOTICE {
        result.set_value(context, recommended);
    } else {
        result.fail();
        result.set_value(context, flags::describe(mask, &value));
    }
    result
}

pub(super) fn on_off_int(
    _entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    _env: &ValidationEnv<'_>,
) -> EvaluationResult {
    // Background readings of output settings differ by nature; only the
    // interactive value is judged.
    if context == ContextTag::Background {
        return result;
    }
    if let Some(value) = current(&result, context) {
        result.require(value.to_lowercase() == "on");
    }
    result
}

pub(super) fn greater(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    _env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(value) = result.value(context).map(RawValue::to_int) else {
        return result;
    };
    let Some(recommended) = entry.recommended else {
        return result;
    };

    // Zero and negative values mean "no limit".
    if value > 0 {
        result.require(value >= RawValue::from(recommended).to_int());
    }
    result
}

pub(super) fn greater_mb(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(value) = current(&result, context) else {
        return result;
    };
    let recommended = entry.recommended.and_then(parse_bytes);
    if let Some(bytes) = recommended {
        result.recommended = Some(show_bytes(bytes));
    }

    if value.trim() == "-1" {
        result.set_value(context, "-1");
        return result;
    }

    match parse_bytes(&value) {
        Some(bytes) => {
            if let Some(minimum) = recommended {
                result.require(bytes >= minimum);
            }
            result.set_value(context, show_bytes(bytes));
        }
        None => {
            result.fail();
            let message = env.translator.translate(LBL_INVALID_BYTE_SIZE, NAMESPACE);
            result.set_value(context, format!("{}{}", message, value));
        }
    }
    result
}

pub(super) fn equal(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    _env: &ValidationEnv<'_>,
) -> EvaluationResult {
    if let (Some(value), Some(recommended)) = (current(&result, context), entry.recommended) {
        result.require(value.to_lowercase() == recommended.to_lowercase());
    }
    result
}

/// Accepts IANA names (`Europe/Warsaw`, `UTC`) and fixed offsets (`+02:00`).
fn is_time_zone(value: &str) -> bool {
    let value = value.trim();
    // Zone names resolve regardless of case, as the interpreter does.
    !value.is_empty()
        && (Tz::from_str_insensitive(value).is_ok() || FixedOffset::from_str(value).is_ok())
}

pub(super) fn time_zone(
    _entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(value) = current(&result, context) else {
        return result;
    };
    if !is_time_zone(&value) {
        result.fail();
        let message = env.translator.translate(LBL_INVALID_TIME_ZONE, NAMESPACE);
        result.set_value(context, format!("{}{}", message, value));
    }
    result
}

pub(super) fn on_off(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(value) = current(&result, context) else {
        return result;
    };
    if entry.demo_exempt && env.config.is_demo() {
        return result;
    }
    if let Some(recommended) = entry.recommended {
        result.require(value == recommended);
    }
    result
}

pub(super) fn fn_exist(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(function) = entry.function else {
        return result;
    };
    let exists = env.runtime.function_exists(function);
    result.require(exists);
    result.set_value(context, yes_no(env, exists));
    result
}

pub(super) fn ext_exist(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(module) = entry.module else {
        return result;
    };
    let loaded = env.sources.has_module(module);
    result.require(loaded);
    result.set_value(context, yes_no(env, loaded));
    result
}

pub(super) fn ext_not_exist(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(module) = entry.module else {
        return result;
    };
    // The value answers "is the module on?", so a loaded module reads "On"
    // and fails while an absent one reads "Off" and passes.
    let loaded = env.sources.has_module(module);
    result.require(!loaded);
    result.set_value(context, on_off_label(loaded));
    result
}

pub(super) fn htaccess(
    _entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    if env.server.htaccess_not_applicable() {
        tracing::debug!("Skipping .htaccess check for this server software");
        result.skip = true;
        return result;
    }
    let active = env.server.htaccess_active;
    result.require(active);
    result.set_value(context, on_off_label(active));
    result
}

pub(super) fn cookie_secure(
    _entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let recommended = on_off_label(env.server.https);
    result.recommended = Some(recommended.to_string());

    let Some(value) = result.value(context).map(normalize_on_off) else {
        return result;
    };
    result.require(value == recommended);
    result.set_value(context, value);
    result
}

pub(super) fn session_regenerate(
    _entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    if env.config.site_url().is_none() {
        tracing::debug!("Skipping session_regenerate_id check without a site URL");
        result.skip = true;
        return result;
    }
    let enabled = env.config.session_regenerate_id;
    result.require(enabled);
    result.set_value(context, on_off_label(enabled));
    result
}

pub(super) fn header(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let name = entry
        .name
        .strip_prefix("Header: ")
        .unwrap_or(entry.name)
        .to_lowercase();
    let Some(observed) = env.sources.header(&name) else {
        return result;
    };
    let recommended = entry.recommended.unwrap_or_default();
    result.require(observed.as_text().to_lowercase() == recommended.to_lowercase());
    result.set_value(context, observed.clone());
    result
}

pub(super) fn not_in(
    entry: &CheckEntry,
    mut result: EvaluationResult,
    context: ContextTag,
    _env: &ValidationEnv<'_>,
) -> EvaluationResult {
    let Some(values) = result.value(context).map(RawValue::to_list) else {
        return result;
    };
    let forbidden = entry
        .forbidden
        .iter()
        .any(|f| values.iter().any(|v| v == f));
    result.require(!forbidden);
    result
}

/// Normalize a boolean-like container value to `On` / `Off`.
pub(super) fn parse_on_off(entry: &CheckEntry, sources: &SourceSnapshots) -> Option<RawValue> {
    let raw = sources.raw(entry.container?, entry.name)?;
    Some(RawValue::from(normalize_on_off(raw)))
}

/// Every loaded module, comma-joined.
pub(super) fn parse_all_ext(_entry: &CheckEntry, sources: &SourceSnapshots) -> Option<RawValue> {
    Some(RawValue::from(sources.modules().join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Container, ValidatorKind};
    use crate::config::AppConfig;
    use crate::locale::Labels;
    use crate::sources::{RuntimeSnapshot, ServerEnvironment};
    use crate::value::RawMap;

    fn env<'a>(
        sources: &'a SourceSnapshots,
        runtime: &'a RuntimeSnapshot,
        server: &'a ServerEnvironment,
        config: &'a AppConfig,
        labels: &'a Labels,
    ) -> ValidationEnv<'a> {
        ValidationEnv {
            sources,
            runtime,
            server,
            config,
            translator: labels,
        }
    }

    const DATE_TIMEZONE: CheckEntry =
        CheckEntry::new("date.timezone", Container::Php).kind(ValidatorKind::TimeZone);
    const COOKIE_SECURE: CheckEntry = CheckEntry::new("session.cookie_secure", Container::Php)
        .recommended("?")
        .kind(ValidatorKind::CookieSecure);
    const HTACCESS: CheckEntry = CheckEntry::new(".htaccess", Container::Php)
        .recommended("On")
        .kind(ValidatorKind::Htaccess);
    const REGENERATE: CheckEntry = CheckEntry::detached("session_regenerate_id")
        .recommended("On")
        .kind(ValidatorKind::SessionRegenerate);
    const XDEBUG: CheckEntry = CheckEntry::new("xdebug", Container::Ext)
        .recommended("Off")
        .kind(ValidatorKind::ExtNotExist)
        .module("xdebug", false);
    const IMAP: CheckEntry = CheckEntry::new("imap", Container::Ext)
        .kind(ValidatorKind::ExtExist)
        .module("imap", true);
    const OPCACHE: CheckEntry = CheckEntry::new("OPcache", Container::Ext)
        .kind(ValidatorKind::FnExist)
        .function("opcache_get_configuration", false);
    const DRIVER: CheckEntry = CheckEntry::new("driver", Container::Db)
        .recommended("mysql")
        .kind(ValidatorKind::Equal);
    const LOG_ERRORS: CheckEntry = CheckEntry::new("log_errors", Container::Php)
        .recommended("On")
        .kind(ValidatorKind::OnOff);

    fn with_value(entry: &CheckEntry, value: &str) -> EvaluationResult {
        let mut result = EvaluationResult::from_entry(entry);
        result.interactive = Some(RawValue::from(value));
        result
    }

    #[test]
    fn time_zone_accepts_names_and_offsets() {
        assert!(is_time_zone("Europe/Warsaw"));
        assert!(is_time_zone("UTC"));
        assert!(is_time_zone("+02:00"));
        assert!(is_time_zone("europe/warsaw"));
        assert!(is_time_zone("utc"));
        assert!(is_time_zone("America/new_york"));
        assert!(!is_time_zone("Mars/Olympus"));
        assert!(!is_time_zone(""));
    }

    #[test]
    fn invalid_time_zone_is_reported_with_value() {
        let (sources, runtime, server, config, labels): (
            SourceSnapshots,
            RuntimeSnapshot,
            ServerEnvironment,
            AppConfig,
            Labels,
        ) = Default::default();
        let env = env(&sources, &runtime, &server, &config, &labels);

        let result = time_zone(
            &DATE_TIMEZONE,
            with_value(&DATE_TIMEZONE, "Mars/Olympus"),
            ContextTag::Interactive,
            &env,
        );
        assert!(!result.status);
        assert_eq!(
            result.interactive,
            Some(RawValue::from("Invalid time zone: Mars/Olympus"))
        );
    }

    #[test]
    fn cookie_secure_follows_transport() {
        let (sources, runtime, mut server, config, labels): (
            SourceSnapshots,
            RuntimeSnapshot,
            ServerEnvironment,
            AppConfig,
            Labels,
        ) = Default::default();

        {
            let env = env(&sources, &runtime, &server, &config, &labels);
            let result = cookie_secure(
                &COOKIE_SECURE,
                with_value(&COOKIE_SECURE, "0"),
                ContextTag::Interactive,
                &env,
            );
            assert!(result.status);
            assert_eq!(result.recommended.as_deref(), Some("Off"));
            assert_eq!(result.interactive, Some(RawValue::from("Off")));
        }

        server.https = true;
        let env = env(&sources, &runtime, &server, &config, &labels);
        let result = cookie_secure(
            &COOKIE_SECURE,
            with_value(&COOKIE_SECURE, "0"),
            ContextTag::Interactive,
            &env,
        );
        assert!(!result.status);
        assert_eq!(result.recommended.as_deref(), Some("On"));
    }

    #[test]
    fn htaccess_skipped_for_nginx_and_unknown_servers() {
        let (sources, runtime, mut server, config, labels): (
            SourceSnapshots,
            RuntimeSnapshot,
            ServerEnvironment,
            AppConfig,
            Labels,
        ) = Default::default();

        {
            let env = env(&sources, &runtime, &server, &config, &labels);
            let result = htaccess(
                &HTACCESS,
                EvaluationResult::from_entry(&HTACCESS),
                ContextTag::Interactive,
                &env,
            );
            assert!(result.skip);
        }

        server.server_software = Some("nginx/1.18.0".into());
        {
            let env = env(&sources, &runtime, &server, &config, &labels);
            let result = htaccess(
                &HTACCESS,
                EvaluationResult::from_entry(&HTACCESS),
                ContextTag::Interactive,
                &env,
            );
            assert!(result.skip);
        }

        server.server_software = Some("Apache/2.4.41".into());
        let env = env(&sources, &runtime, &server, &config, &labels);
        let result = htaccess(
            &HTACCESS,
            EvaluationResult::from_entry(&HTACCESS),
            ContextTag::Interactive,
            &env,
        );
        assert!(!result.skip);
        assert!(!result.status);
        assert_eq!(result.interactive, Some(RawValue::from("Off")));
    }

    #[test]
    fn session_regenerate_needs_site_url() {
        let (sources, runtime, server, mut config, labels): (
            SourceSnapshots,
            RuntimeSnapshot,
            ServerEnvironment,
            AppConfig,
            Labels,
        ) = Default::default();

        {
            let env = env(&sources, &runtime, &server, &config, &labels);
            let result = session_regenerate(
                &REGENERATE,
                EvaluationResult::from_entry(&REGENERATE),
                ContextTag::Interactive,
                &env,
            );
            assert!(result.skip);
        }

        config.site_url = Some("https://crm.example.com".into());
        config.session_regenerate_id = false;
        let env = env(&sources, &runtime, &server, &config, &labels);
        let result = session_regenerate(
            &REGENERATE,
            EvaluationResult::from_entry(&REGENERATE),
            ContextTag::Interactive,
            &env,
        );
        assert!(!result.skip);
        assert!(!result.status);
        assert_eq!(result.interactive, Some(RawValue::from("Off")));
    }

    #[test]
    fn module_checks_render_labels() {
        let sources = SourceSnapshots::default().with_modules(["xdebug", "curl"]);
        let runtime = RuntimeSnapshot {
            functions: vec!["opcache_get_configuration".into()],
            ..Default::default()
        };
        let (server, config, labels): (ServerEnvironment, AppConfig, Labels) = Default::default();
        let env = env(&sources, &runtime, &server, &config, &labels);

        let xdebug = ext_not_exist(
            &XDEBUG,
            EvaluationResult::from_entry(&XDEBUG),
            ContextTag::Interactive,
            &env,
        );
        assert!(!xdebug.status);
        assert_eq!(xdebug.interactive, Some(RawValue::from("On")));

        let imap = ext_exist(
            &IMAP,
            EvaluationResult::from_entry(&IMAP),
            ContextTag::Interactive,
            &env,
        );
        assert!(!imap.status);
        assert_eq!(imap.interactive, Some(RawValue::from("No")));

        let opcache = fn_exist(
            &OPCACHE,
            EvaluationResult::from_entry(&OPCACHE),
            ContextTag::Interactive,
            &env,
        );
        assert!(opcache.status);
        assert_eq!(opcache.interactive, Some(RawValue::from("Yes")));
    }

    #[test]
    fn absent_debugger_reads_off() {
        let (sources, runtime, server, config, labels): (
            SourceSnapshots,
            RuntimeSnapshot,
            ServerEnvironment,
            AppConfig,
            Labels,
        ) = Default::default();
        let env = env(&sources, &runtime, &server, &config, &labels);
        let result = ext_not_exist(
            &XDEBUG,
            EvaluationResult::from_entry(&XDEBUG),
            ContextTag::Interactive,
            &env,
        );
        assert!(result.status);
        assert_eq!(result.interactive, Some(RawValue::from("Off")));
    }

    #[test]
    fn equal_ignores_case() {
        let (sources, runtime, server, config, labels): (
            SourceSnapshots,
            RuntimeSnapshot,
            ServerEnvironment,
            AppConfig,
            Labels,
        ) = Default::default();
        let env = env(&sources, &runtime, &server, &config, &labels);
        let result = equal(&DRIVER, with_value(&DRIVER, "MySQL"), ContextTag::Interactive, &env);
        assert!(result.status);
        let result = equal(&DRIVER, with_value(&DRIVER, "pgsql"), ContextTag::Interactive, &env);
        assert!(!result.status);
    }

    #[test]
    fn on_off_parser_normalizes_container_value() {
        let mut php = RawMap::new();
        php.insert("log_errors".into(), RawValue::from("1"));
        let sources = SourceSnapshots::default().with_container(Container::Php, php);
        assert_eq!(parse_on_off(&LOG_ERRORS, &sources), Some(RawValue::from("On")));
    }

    #[test]
    fn on_off_parser_omits_missing_values() {
        let sources = SourceSnapshots::default();
        assert_eq!(parse_on_off(&LOG_ERRORS, &sources), None);
    }

    #[test]
    fn all_ext_joins_modules() {
        let sources = SourceSnapshots::default().with_modules(["Core", "curl", "gd"]);
        let entry = CheckEntry::new("allExt", Container::Ext).kind(ValidatorKind::AllExt);
        assert_eq!(
            parse_all_ext(&entry, &sources),
            Some(RawValue::from("Core, curl, gd"))
        );
    }
}
