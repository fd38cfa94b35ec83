//! User-facing labels.
//!
//! Validators produce a few human-readable values (`Yes`/`No`, invalid time
//! zone messages). They go through a [`Translator`] so embedding
//! applications can supply their own language packs.

use std::collections::BTreeMap;

/// Namespace the report's labels are looked up in.
pub const NAMESPACE: &str = "Settings::ConfReport";

pub const LBL_YES: &str = "LBL_YES";
pub const LBL_NO: &str = "LBL_NO";
pub const LBL_INVALID_TIME_ZONE: &str = "LBL_INVALID_TIME_ZONE";
pub const LBL_INVALID_BYTE_SIZE: &str = "LBL_INVALID_BYTE_SIZE";

/// Translation capability.
pub trait Translator {
    /// Translate a label key; unknown keys come back unchanged.
    fn translate(&self, key: &str, namespace: &str) -> String;
}

/// Built-in English labels with optional overrides.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    overrides: BTreeMap<String, String>,
}

impl Labels {
    pub const fn new() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Labels with per-key overrides (e.g. from the `labels:` config section).
    pub fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }

    fn builtin(key: &str) -> Option<&'static str> {
        match key {
            LBL_YES => Some("Yes"),
            LBL_NO => Some("No"),
            LBL_INVALID_TIME_ZONE => Some("Invalid time zone: "),
            LBL_INVALID_BYTE_SIZE => Some("Invalid byte size: "),
            _ => None,
        }
    }
}

impl Translator for Labels {
    fn translate(&self, key: &str, _namespace: &str) -> String {
        if let Some(text) = self.overrides.get(key) {
            return text.clone();
        }
        Self::builtin(key).unwrap_or(key).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_labels() {
        let labels = Labels::new();
        assert_eq!(labels.translate(LBL_YES, NAMESPACE), "Yes");
        assert_eq!(labels.translate(LBL_NO, NAMESPACE), "No");
        assert_eq!(
            labels.translate(LBL_INVALID_TIME_ZONE, NAMESPACE),
            "Invalid time zone: "
        );
    }

    #[test]
    fn unknown_key_is_returned_unchanged() {
        let labels = Labels::new();
        assert_eq!(labels.translate("LBL_SOMETHING", NAMESPACE), "LBL_SOMETHING");
    }

    #[test]
    fn overrides_win() {
        let mut overrides = BTreeMap::new();
        overrides.insert(LBL_YES.to_string(), "Oui".to_string());
        let labels = Labels::with_overrides(overrides);
        assert_eq!(labels.translate(LBL_YES, NAMESPACE), "Oui");
        assert_eq!(labels.translate(LBL_NO, NAMESPACE), "No");
    }
}
