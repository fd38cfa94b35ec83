//! Validator dispatch.
//!
//! Each [`ValidatorKind`] maps to a plain function that takes the catalog
//! entry, the result so far, the context being judged and the run's
//! read-only [`ValidationEnv`], and returns the updated result. Validators
//! never fail: missing data leaves the result untouched, unparseable data
//! becomes a failed check with a descriptive value.
//!
//! Two kinds also act as parsers (see [`parser`]): they turn the raw
//! container value into the value shown in the report before any
//! validation runs.

mod bytes;
mod checks;
mod flags;
mod version;

pub use bytes::{parse_bytes, show_bytes};
pub use flags::{level_names, E_ALL, E_NOTICE};
pub use version::{compare_parts, version_parts};

use serde::{Deserialize, Serialize};

use crate::catalog::{CheckEntry, ValidatorKind};
use crate::config::AppConfig;
use crate::context::ContextTag;
use crate::locale::Translator;
use crate::sources::{RuntimeIntrospection, ServerEnvironment, SourceSnapshots};
use crate::value::RawValue;

/// The evaluated projection of one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ValidatorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<bool>,
    pub status: bool,
    /// Value observed by the interactive run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<RawValue>,
    /// Value recorded by the background job, normalized by the background pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<RawValue>,
    /// The persisted background reading, exactly as it was recorded.
    #[serde(default, rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_value: Option<RawValue>,
    /// Not applicable to this environment; dropped from the report.
    #[serde(skip)]
    pub skip: bool,
}

impl EvaluationResult {
    /// Fresh result for an entry: passing, with no values attached.
    pub fn from_entry(entry: &CheckEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            label: entry.label.map(str::to_string),
            recommended: entry.recommended.map(str::to_string),
            kind: entry.kind,
            mandatory: entry.mandatory,
            status: true,
            interactive: None,
            background: None,
            override_value: None,
            skip: false,
        }
    }

    /// Name shown to users.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// The value observed in a context.
    pub fn value(&self, context: ContextTag) -> Option<&RawValue> {
        match context {
            ContextTag::Interactive => self.interactive.as_ref(),
            ContextTag::Background => self.background.as_ref(),
        }
    }

    pub fn set_value(&mut self, context: ContextTag, value: impl Into<RawValue>) {
        let value = Some(value.into());
        match context {
            ContextTag::Interactive => self.interactive = value,
            ContextTag::Background => self.background = value,
        }
    }

    /// Mark the check failed. Failures are never undone by a later pass.
    pub fn fail(&mut self) {
        self.status = false;
    }

    /// Fold a verdict into the status.
    pub fn require(&mut self, passed: bool) {
        self.status &= passed;
    }
}

/// Read-only inputs shared by every validator of one report run.
#[derive(Clone, Copy)]
pub struct ValidationEnv<'a> {
    pub sources: &'a SourceSnapshots,
    pub runtime: &'a dyn RuntimeIntrospection,
    pub server: &'a ServerEnvironment,
    pub config: &'a AppConfig,
    pub translator: &'a dyn Translator,
}

/// Validator function: entry, result so far, context, environment.
pub type ValidatorFn =
    fn(&CheckEntry, EvaluationResult, ContextTag, &ValidationEnv<'_>) -> EvaluationResult;

/// Parser function: entry and the loaded containers to the displayed value.
pub type ParserFn = fn(&CheckEntry, &SourceSnapshots) -> Option<RawValue>;

/// Dispatch table from validator kind to its function.
///
/// `AllExt` is informational and has no validator.
pub fn validator(kind: ValidatorKind) -> Option<ValidatorFn> {
    let f: ValidatorFn = match kind {
        ValidatorKind::Version => checks::version,
        ValidatorKind::ErrorReporting => checks::error_reporting,
        ValidatorKind::OnOffInt => checks::on_off_int,
        ValidatorKind::Greater => checks::greater,
        ValidatorKind::GreaterMb => checks::greater_mb,
        ValidatorKind::Equal => checks::equal,
        ValidatorKind::TimeZone => checks::time_zone,
        ValidatorKind::OnOff => checks::on_off,
        ValidatorKind::FnExist => checks::fn_exist,
        ValidatorKind::ExtExist => checks::ext_exist,
        ValidatorKind::ExtNotExist => checks::ext_not_exist,
        ValidatorKind::Htaccess => checks::htaccess,
        ValidatorKind::CookieSecure => checks::cookie_secure,
        ValidatorKind::SessionRegenerate => checks::session_regenerate,
        ValidatorKind::Header => checks::header,
        ValidatorKind::NotIn => checks::not_in,
        ValidatorKind::AllExt => return None,
    };
    Some(f)
}

/// Parser for kinds that normalize their raw value before validation.
pub fn parser(kind: ValidatorKind) -> Option<ParserFn> {
    match kind {
        ValidatorKind::OnOff => Some(checks::parse_on_off),
        ValidatorKind::AllExt => Some(checks::parse_all_ext),
        _ => None,
    }
}

/// Run the entry's validator for one context.
///
/// Entries without a kind, or whose kind has no validator, come back
/// unchanged.
pub fn validate(
    entry: &CheckEntry,
    result: EvaluationResult,
    context: ContextTag,
    env: &ValidationEnv<'_>,
) -> EvaluationResult {
    match entry.kind.and_then(validator) {
        Some(f) => f(entry, result, context, env),
        None => result,
    }
}

/// Map boolean-like raw values onto `On` / `Off`.
///
/// `on`/`true` and `off`/`false` in any case are recognized; anything else
/// is judged by truthiness.
pub fn normalize_on_off(raw: &RawValue) -> &'static str {
    let text = raw.as_text().to_lowercase();
    match text.as_str() {
        "on" | "true" => "On",
        "off" | "false" => "Off",
        _ if raw.is_truthy() => "On",
        _ => "Off",
    }
}
