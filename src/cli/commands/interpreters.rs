//! Interpreters command implementation.
//!
//! `superpip interpreters` prints every discovered Python as a
//! version → path table.

use crate::cli::args::InterpretersArgs;
use crate::engine::Engine;
use crate::error::{Result, SuperpipError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

pub struct InterpretersCommand<'a> {
    engine: &'a Engine,
    args: InterpretersArgs,
}

impl<'a> InterpretersCommand<'a> {
    pub fn new(engine: &'a Engine, args: InterpretersArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for InterpretersCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let interpreters = self.engine.discover_interpreters();

        if self.args.json {
            let json = serde_json::to_string_pretty(interpreters.as_ref())
                .map_err(|e| SuperpipError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if interpreters.is_empty() {
            ui.warning("No Python installations detected");
            return Ok(CommandResult::success());
        }

        let width = interpreters
            .iter()
            .map(|i| i.version().len())
            .max()
            .unwrap_or(0);

        ui.show_header(&format!("{} interpreter(s)", interpreters.len()));
        for interpreter in interpreters.iter() {
            ui.show_row(
                interpreter.version(),
                &interpreter.executable().display().to_string(),
                width,
            );
        }
        Ok(CommandResult::success())
    }
}
