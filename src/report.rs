//! Report assembly.
//!
//! [`ReportAssembler`] runs one report: it loads only the value sources the
//! requested categories reference, parses every entry's raw value, merges
//! in the persisted background readings, validates each entry once per
//! applicable context and drops the entries that do not apply here.
//!
//! Report generation never fails. Unavailable sources contribute no data
//! and broken values surface as failed checks.
//!
//! # Example
//!
//! ```
//! use confreport::catalog::Category;
//! use confreport::config::AppConfig;
//! use confreport::report::ReportAssembler;
//! use confreport::sources::RuntimeSnapshot;
//!
//! let runtime = RuntimeSnapshot {
//!     modules: vec!["curl".into(), "gd".into()],
//!     ..Default::default()
//! };
//! let config = AppConfig::default();
//!
//! let report = ReportAssembler::new(&runtime, &config).get(Category::Libraries);
//! let gd = report.iter().find(|r| r.name == "gd").unwrap();
//! assert!(gd.status);
//! ```

use std::collections::BTreeMap;

use crate::catalog::{Catalog, Category, CheckEntry};
use crate::config::AppConfig;
use crate::context::{BackgroundSnapshot, ContextResolver, ContextTag};
use crate::locale::{Labels, Translator};
use crate::sources::{
    DatabaseCapability, HeaderFetcher, NoDatabase, NoHeaders, RuntimeIntrospection,
    ServerEnvironment, SourceSnapshots, Sources,
};
use crate::validate::{parser, validate, EvaluationResult, ValidationEnv};
use crate::value::{RawMap, RawValue};

static ENGLISH: Labels = Labels::new();

/// Evaluated report, in category order.
pub type Report = BTreeMap<Category, Vec<EvaluationResult>>;

/// Builds reports from the catalog and the injected collaborators.
pub struct ReportAssembler<'a> {
    catalog: Catalog,
    runtime: &'a dyn RuntimeIntrospection,
    config: &'a AppConfig,
    server: ServerEnvironment,
    headers: &'a dyn HeaderFetcher,
    database: &'a dyn DatabaseCapability,
    translator: &'a dyn Translator,
    resolver: ContextResolver,
}

impl<'a> ReportAssembler<'a> {
    /// Assembler over the built-in catalog with no headers, no database and
    /// no persisted background snapshot.
    pub fn new(runtime: &'a dyn RuntimeIntrospection, config: &'a AppConfig) -> Self {
        Self {
            catalog: Catalog::builtin(),
            runtime,
            config,
            server: ServerEnvironment::default(),
            headers: &NoHeaders,
            database: &NoDatabase,
            translator: &ENGLISH,
            resolver: ContextResolver::without_snapshot(),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_server(mut self, server: ServerEnvironment) -> Self {
        self.server = server;
        self
    }

    pub fn with_headers(mut self, headers: &'a dyn HeaderFetcher) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_database(mut self, database: &'a dyn DatabaseCapability) -> Self {
        self.database = database;
        self
    }

    pub fn with_translator(mut self, translator: &'a dyn Translator) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_resolver(mut self, resolver: ContextResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Evaluate every category.
    pub fn get_all(&self) -> Report {
        let snapshots = self.load(&Category::ALL, false);
        let overrides = self.resolver.overrides();

        Category::ALL
            .into_iter()
            .map(|category| (category, self.evaluate(category, &snapshots, &overrides)))
            .collect()
    }

    /// Evaluate a single category.
    pub fn get(&self, category: Category) -> Vec<EvaluationResult> {
        let snapshots = self.load(&[category], false);
        let overrides = self.resolver.overrides();
        self.evaluate(category, &snapshots, &overrides)
    }

    /// Background readings of every category, parsed but not validated.
    ///
    /// This is what the scheduled job persists for later interactive runs.
    pub fn get_for_background_snapshot(&self) -> BackgroundSnapshot {
        let snapshots = self.load(&Category::ALL, true);

        let mut snapshot = BackgroundSnapshot::new();
        for category in Category::ALL {
            snapshot.insert(
                category,
                self.parse(category, &snapshots, ContextTag::Background),
            );
        }
        snapshot
    }

    fn load(&self, categories: &[Category], background_only: bool) -> SourceSnapshots {
        let containers = self.catalog.containers(categories, background_only);
        let sources = Sources {
            runtime: self.runtime,
            server: &self.server,
            headers: self.headers,
            database: self.database,
            site_url: self.config.site_url(),
        };
        SourceSnapshots::load(&containers, &sources)
    }

    /// Raw value of every entry that has one.
    fn parse(&self, category: Category, snapshots: &SourceSnapshots, context: ContextTag) -> RawMap {
        self.catalog
            .entries(category)
            .iter()
            .filter(|entry| context == ContextTag::Interactive || entry.background)
            .filter_map(|entry| {
                parse_entry(entry, snapshots).map(|value| (entry.name.to_string(), value))
            })
            .collect()
    }

    fn evaluate(
        &self,
        category: Category,
        snapshots: &SourceSnapshots,
        overrides: &BackgroundSnapshot,
    ) -> Vec<EvaluationResult> {
        let parsed = self.parse(category, snapshots, ContextTag::Interactive);
        let recorded = overrides.category(category);
        let env = ValidationEnv {
            sources: snapshots,
            runtime: self.runtime,
            server: &self.server,
            config: self.config,
            translator: self.translator,
        };

        let mut results = Vec::new();
        for entry in self.catalog.entries(category) {
            let mut result = EvaluationResult::from_entry(entry);
            result.interactive = parsed.get(entry.name).cloned();
            if let Some(value) = recorded.and_then(|values| values.get(entry.name)) {
                result.override_value = Some(value.clone());
                result.background = Some(value.clone());
            }

            let judge_background = entry.background && result.background.is_some();
            result = validate(entry, result, ContextTag::Interactive, &env);
            if judge_background && !result.skip {
                result = validate(entry, result, ContextTag::Background, &env);
            }

            if result.skip {
                tracing::debug!("Skipping {}.{}: not applicable", category, entry.name);
                continue;
            }
            results.push(result);
        }
        results
    }
}

fn parse_entry(entry: &CheckEntry, snapshots: &SourceSnapshots) -> Option<RawValue> {
    match entry.kind.and_then(parser) {
        Some(parse) => parse(entry, snapshots),
        None => snapshots.raw(entry.container?, entry.name).cloned(),
    }
}

/// Whether every evaluated entry passed.
pub fn all_passed(report: &Report) -> bool {
    report.values().flatten().all(|r| r.status)
}
