//! Search command implementation.

use crate::catalog::CatalogView;
use crate::cli::args::SearchArgs;
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

pub struct SearchCommand<'a> {
    engine: &'a Engine,
    args: SearchArgs,
}

impl<'a> SearchCommand<'a> {
    pub fn new(engine: &'a Engine, args: SearchArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for SearchCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let view = if self.args.full {
            CatalogView::Full
        } else {
            CatalogView::Curated
        };
        let matches = self.engine.search_catalog(view, &self.args.query)?;

        if matches.is_empty() {
            ui.message(&format!("No modules match '{}'", self.args.query.trim()));
            return Ok(CommandResult::success());
        }

        for module in &matches {
            ui.message(module);
        }
        Ok(CommandResult::success())
    }
}
