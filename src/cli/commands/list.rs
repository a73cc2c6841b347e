//! List command implementation.
//!
//! `superpip list` prints catalog modules alongside the package that
//! provides each one.

use crate::catalog::CatalogView;
use crate::cli::args::ListArgs;
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

pub struct ListCommand<'a> {
    engine: &'a Engine,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    pub fn new(engine: &'a Engine, args: ListArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let view = if self.args.full {
            CatalogView::Full
        } else {
            CatalogView::Curated
        };
        let modules = self.engine.list_catalog(view);

        if modules.is_empty() {
            ui.warning("Catalog is empty");
            return Ok(CommandResult::success());
        }

        let width = modules.iter().map(|m| m.len()).max().unwrap_or(0);
        ui.show_header(&format!("{} module(s)", modules.len()));
        for module in &modules {
            ui.show_row(module, &self.engine.resolve(module), width);
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::empty_engine;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;

    #[test]
    fn curated_rows_pair_module_and_package() {
        let (engine, _) = empty_engine(MockRunner::new());
        let mut ui = MockUI::new();

        let result = ListCommand::new(&engine, ListArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui
            .rows()
            .contains(&("sklearn".to_string(), "scikit-learn".to_string())));
        assert_eq!(ui.rows().len(), engine.list_catalog(CatalogView::Curated).len());
    }

    #[test]
    fn offline_full_view_is_empty() {
        let (engine, _) = empty_engine(MockRunner::new());
        let mut ui = MockUI::new();

        ListCommand::new(&engine, ListArgs { full: true })
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_warning("Catalog is empty"));
    }
}
