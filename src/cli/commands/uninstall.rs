//! Uninstall command implementation.

use crate::cli::args::UninstallArgs;
use crate::engine::Engine;
use crate::error::Result;
use crate::orchestrator::{BatchReport, InstallTarget};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::install::{print_json, show_report};
use super::{follow_batch, select_interpreter};

pub struct UninstallCommand<'a> {
    engine: &'a Engine,
    args: UninstallArgs,
}

impl<'a> UninstallCommand<'a> {
    pub fn new(engine: &'a Engine, args: UninstallArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for UninstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let interpreter = select_interpreter(self.engine, self.args.python.as_deref())?;

        let question = format!(
            "Uninstall {} from {}?",
            self.args.package,
            interpreter.executable().display()
        );
        if !self.args.yes && !ui.confirm("uninstall", &question, false)? {
            ui.message("Uninstall cancelled");
            return Ok(CommandResult::success());
        }

        let target = InstallTarget::SpecificInterpreter(interpreter);
        let handle = self
            .engine
            .spawn_uninstall_batch(&target, &self.args.package)?;
        let report = follow_batch(
            ui,
            handle,
            &format!("Uninstalling {}", self.args.package),
            1,
            BatchReport::is_complete_success,
        )?;

        if self.args.json {
            print_json(ui, &report)?;
        } else {
            show_report(ui, &report);
        }
        Ok(CommandResult::from_success(report.is_complete_success()))
    }
}
