//! Catalog command implementation.
//!
//! The `confreport catalog` command lists the built-in checks and verifies
//! the tables are consistent.

use serde::Serialize;

use crate::catalog::{Catalog, Category, CheckEntry};
use crate::cli::args::CatalogArgs;
use crate::error::Result;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The catalog command implementation.
pub struct CatalogCommand {
    args: CatalogArgs,
    catalog: Catalog,
}

impl CatalogCommand {
    /// Create a new catalog command over the built-in catalog.
    pub fn new(args: CatalogArgs) -> Self {
        Self {
            args,
            catalog: Catalog::builtin(),
        }
    }

    /// List a different catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }
}

#[derive(Serialize)]
struct CategoryListing {
    category: Category,
    entries: &'static [CheckEntry],
}

impl Command for CatalogCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.json {
            let listing: Vec<CategoryListing> = Category::ALL
                .into_iter()
                .map(|category| CategoryListing {
                    category,
                    entries: self.catalog.entries(category),
                })
                .collect();
            ui.message(&serde_json::to_string_pretty(&listing)?);
        } else {
            for category in Category::ALL {
                ui.show_header(category.name());
                let mut table = Table::new(&["Name", "Source", "Kind", "Recommended", "Bg"]);
                for entry in self.catalog.entries(category) {
                    table.add_row(vec![
                        entry.display_name().to_string(),
                        entry.container.map(|c| c.to_string()).unwrap_or_default(),
                        entry.kind.map(|k| k.to_string()).unwrap_or_default(),
                        entry.recommended.unwrap_or_default().to_string(),
                        if entry.background { "yes" } else { "" }.to_string(),
                    ]);
                }
                ui.message(&table.render());
            }
        }

        let issues = self.catalog.check();
        if issues.is_empty() {
            return Ok(CommandResult::success());
        }

        for issue in &issues {
            ui.warning(&issue.to_string());
        }
        Ok(CommandResult::failure(1))
    }
}
