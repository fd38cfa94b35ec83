//! The rule catalog.
//!
//! Five fixed categories of check definitions. Each [`CheckEntry`] names the
//! value source it reads from, the recommended value, and the validator kind
//! that judges it. The catalog is immutable data; evaluation results live in
//! [`crate::validate::EvaluationResult`].
//!
//! # Example
//!
//! ```
//! use confreport::catalog::{Catalog, Category, Container};
//!
//! let catalog = Catalog::builtin();
//! let entry = catalog.find(Category::Stability, "memory_limit").unwrap();
//! assert_eq!(entry.container, Some(Container::Php));
//! assert_eq!(entry.recommended, Some("1 GB"));
//! ```

mod tables;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfReportError;

pub use tables::{DATABASE, LIBRARIES, PERFORMANCE, SECURITY, STABILITY};

/// Report category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Stability,
    Security,
    Libraries,
    Database,
    Performance,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 5] = [
        Category::Stability,
        Category::Security,
        Category::Libraries,
        Category::Database,
        Category::Performance,
    ];

    /// Category name as used in reports and snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Stability => "stability",
            Category::Security => "security",
            Category::Libraries => "libraries",
            Category::Database => "database",
            Category::Performance => "performance",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConfReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfReportError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// Value source a check reads its raw value from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// Interpreter settings.
    Php,
    /// Environment and platform facts.
    Env,
    /// Loaded optional modules.
    Ext,
    /// Response headers of the application's own base URL.
    Headers,
    /// Database engine variables.
    Db,
}

impl Container {
    pub const ALL: [Container; 5] = [
        Container::Php,
        Container::Env,
        Container::Ext,
        Container::Headers,
        Container::Db,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Container::Php => "php",
            Container::Env => "env",
            Container::Ext => "ext",
            Container::Headers => "headers",
            Container::Db => "db",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy used to judge a raw value against its recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidatorKind {
    Version,
    ErrorReporting,
    OnOffInt,
    Greater,
    GreaterMb,
    Equal,
    TimeZone,
    OnOff,
    FnExist,
    ExtExist,
    ExtNotExist,
    Htaccess,
    CookieSecure,
    SessionRegenerate,
    Header,
    NotIn,
    AllExt,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 17] = [
        ValidatorKind::Version,
        ValidatorKind::ErrorReporting,
        ValidatorKind::OnOffInt,
        ValidatorKind::Greater,
        ValidatorKind::GreaterMb,
        ValidatorKind::Equal,
        ValidatorKind::TimeZone,
        ValidatorKind::OnOff,
        ValidatorKind::FnExist,
        ValidatorKind::ExtExist,
        ValidatorKind::ExtNotExist,
        ValidatorKind::Htaccess,
        ValidatorKind::CookieSecure,
        ValidatorKind::SessionRegenerate,
        ValidatorKind::Header,
        ValidatorKind::NotIn,
        ValidatorKind::AllExt,
    ];

    /// Whether the kind judges a raw value read from the entry's container.
    ///
    /// The others derive their verdict from module lists, functions, headers
    /// or application settings.
    pub fn reads_container(&self) -> bool {
        !matches!(
            self,
            ValidatorKind::FnExist
                | ValidatorKind::ExtExist
                | ValidatorKind::ExtNotExist
                | ValidatorKind::Htaccess
                | ValidatorKind::SessionRegenerate
        )
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One declarative rule in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckEntry {
    /// Unique key within the category; also the lookup key in the container.
    pub name: &'static str,
    /// Display label, when it differs from the name.
    pub label: Option<&'static str>,
    /// Recommended value; `None` means informational only.
    pub recommended: Option<&'static str>,
    /// Validator kind; `None` means display only.
    pub kind: Option<ValidatorKind>,
    /// Value source the raw value comes from.
    pub container: Option<Container>,
    /// Whether the check also applies to background (scheduled) execution.
    pub background: bool,
    /// Whether a missing module is an installation blocker.
    pub mandatory: Option<bool>,
    /// Passes regardless of value while the application runs in demo mode.
    pub demo_exempt: bool,
    /// Module looked up by ExtExist / ExtNotExist.
    pub module: Option<&'static str>,
    /// Function looked up by FnExist.
    pub function: Option<&'static str>,
    /// Values that must not appear (NotIn).
    pub forbidden: &'static [&'static str],
}

impl CheckEntry {
    /// An entry reading `name` from `container`, with nothing else set.
    pub const fn new(name: &'static str, container: Container) -> Self {
        Self {
            name,
            label: None,
            recommended: None,
            kind: None,
            container: Some(container),
            background: false,
            mandatory: None,
            demo_exempt: false,
            module: None,
            function: None,
            forbidden: &[],
        }
    }

    /// An entry that reads no container (judged from application settings).
    pub const fn detached(name: &'static str) -> Self {
        Self {
            container: None,
            ..Self::new(name, Container::Env)
        }
    }

    pub const fn recommended(self, value: &'static str) -> Self {
        Self {
            recommended: Some(value),
            ..self
        }
    }

    pub const fn kind(self, kind: ValidatorKind) -> Self {
        Self {
            kind: Some(kind),
            ..self
        }
    }

    pub const fn label(self, label: &'static str) -> Self {
        Self {
            label: Some(label),
            ..self
        }
    }

    pub const fn background(self) -> Self {
        Self {
            background: true,
            ..self
        }
    }

    pub const fn demo_exempt(self) -> Self {
        Self {
            demo_exempt: true,
            ..self
        }
    }

    pub const fn module(self, module: &'static str, mandatory: bool) -> Self {
        Self {
            module: Some(module),
            mandatory: Some(mandatory),
            ..self
        }
    }

    pub const fn function(self, function: &'static str, mandatory: bool) -> Self {
        Self {
            function: Some(function),
            mandatory: Some(mandatory),
            ..self
        }
    }

    pub const fn forbidden(self, values: &'static [&'static str]) -> Self {
        Self {
            forbidden: values,
            ..self
        }
    }

    /// Name shown to users.
    pub fn display_name(&self) -> &'static str {
        self.label.unwrap_or(self.name)
    }
}

/// Read-only registry of the five category tables.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    tables: [&'static [CheckEntry]; 5],
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            tables: [STABILITY, SECURITY, LIBRARIES, DATABASE, PERFORMANCE],
        }
    }

    /// Replace one category's table.
    pub fn with_table(mut self, category: Category, entries: &'static [CheckEntry]) -> Self {
        self.tables[category.index()] = entries;
        self
    }

    /// Entries of a category, in report order.
    pub fn entries(&self, category: Category) -> &'static [CheckEntry] {
        self.tables[category.index()]
    }

    /// Find an entry by name within a category.
    pub fn find(&self, category: Category, name: &str) -> Option<&'static CheckEntry> {
        self.entries(category).iter().find(|e| e.name == name)
    }

    /// Containers referenced by the given categories.
    ///
    /// With `background_only`, entries that do not apply to background
    /// execution are ignored, so their sources are never loaded.
    pub fn containers(&self, categories: &[Category], background_only: bool) -> BTreeSet<Container> {
        categories
            .iter()
            .flat_map(|c| self.entries(*c))
            .filter(|e| !background_only || e.background)
            .filter_map(|e| e.container)
            .collect()
    }

    /// Function names probed by FnExist entries.
    pub fn functions(&self) -> Vec<&'static str> {
        Category::ALL
            .iter()
            .flat_map(|c| self.entries(*c))
            .filter_map(|e| e.function)
            .collect()
    }

    /// Run the consistency check over every table.
    pub fn check(&self) -> Vec<CatalogIssue> {
        Category::ALL
            .iter()
            .flat_map(|c| check_table(*c, self.entries(*c)))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A consistency problem in a catalog table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    pub category: Category,
    pub name: String,
    pub message: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.category, self.name, self.message)
    }
}

/// Consistency check of the shipped catalog.
pub fn check_catalog() -> Vec<CatalogIssue> {
    Catalog::builtin().check()
}

/// Check one table for duplicate names and kinds missing their parameters.
pub fn check_table(category: Category, entries: &[CheckEntry]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for entry in entries {
        let mut issue = |message: String| {
            issues.push(CatalogIssue {
                category,
                name: entry.name.to_string(),
                message,
            })
        };

        if !seen.insert(entry.name) {
            issue("duplicate name".to_string());
        }

        let Some(kind) = entry.kind else {
            if entry.container.is_none() {
                issue("no validator and no container".to_string());
            }
            continue;
        };

        if kind.reads_container() && entry.container.is_none() {
            issue(format!("{} needs a container", kind));
        }

        match kind {
            ValidatorKind::ExtExist | ValidatorKind::ExtNotExist if entry.module.is_none() => {
                issue(format!("{} needs a module name", kind));
            }
            ValidatorKind::FnExist if entry.function.is_none() => {
                issue("FnExist needs a function name".to_string());
            }
            ValidatorKind::NotIn if entry.forbidden.is_empty() => {
                issue("NotIn needs forbidden values".to_string());
            }
            ValidatorKind::Header => {
                if !entry.name.starts_with("Header: ") {
                    issue("Header entries must be named 'Header: <name>'".to_string());
                }
                if entry.container != Some(Container::Headers) {
                    issue("Header entries must read the headers container".to_string());
                }
            }
            ValidatorKind::Version
            | ValidatorKind::Greater
            | ValidatorKind::GreaterMb
            | ValidatorKind::OnOff
            | ValidatorKind::ErrorReporting
                if entry.recommended.is_none() =>
            {
                issue(format!("{} needs a recommended value", kind));
            }
            _ => {}
        }
    }

    issues
}
