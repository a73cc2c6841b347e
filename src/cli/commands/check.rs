//! Check command implementation.
//!
//! `superpip check` scans a source file for imports, probes each module in
//! one interpreter and reports the packages that provide the missing ones.
//! With `--install` it offers to install them.

use std::io::Read;
use std::path::Path;

use crate::cli::args::CheckArgs;
use crate::engine::Engine;
use crate::error::{Result, SuperpipError};
use crate::interpreter::Interpreter;
use crate::orchestrator::{BatchReport, InstallTarget, ProbeReport};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{follow_batch, select_interpreter};

pub struct CheckCommand<'a> {
    engine: &'a Engine,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    pub fn new(engine: &'a Engine, args: CheckArgs) -> Self {
        Self { engine, args }
    }

    fn read_source(&self) -> Result<String> {
        match self.args.file.as_deref() {
            Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
            _ => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }

    fn report_missing(&self, ui: &mut dyn UserInterface, report: &ProbeReport) -> Vec<String> {
        let width = report.missing.iter().map(|m| m.len()).max().unwrap_or(0);
        let mut packages: Vec<String> = Vec::new();

        ui.show_header("Missing modules");
        for module in &report.missing {
            let package = self.engine.resolve(module);
            ui.show_row(module, &package, width);
            if !packages.contains(&package) {
                packages.push(package);
            }
        }
        packages
    }

    fn install_missing(
        &self,
        ui: &mut dyn UserInterface,
        interpreter: &Interpreter,
        packages: &[String],
    ) -> Result<bool> {
        let verbose = ui.output_mode().shows_command_output();
        let target = [InstallTarget::SpecificInterpreter(interpreter.clone())];
        let mut all_ok = true;

        for package in packages {
            let handle = self.engine.spawn_install_batch(&target, package)?;
            let report = follow_batch(
                ui,
                handle,
                &format!("Installing {}", package),
                1,
                BatchReport::is_complete_success,
            )?;
            for outcome in &report.outcomes {
                if outcome.success {
                    ui.success(&outcome.summary_line());
                } else {
                    ui.error(&outcome.summary_line());
                }
                if verbose && !outcome.detail.is_empty() {
                    ui.message(&outcome.detail);
                }
            }
            all_ok &= report.is_complete_success();
        }
        Ok(all_ok)
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let interpreter = select_interpreter(self.engine, self.args.python.as_deref())?;
        let source = self.read_source()?;
        let modules: Vec<String> = self.engine.extract_modules(&source).into_iter().collect();

        let total = modules.len();
        let handle = self.engine.spawn_probe_batch(interpreter.clone(), modules);
        let report = follow_batch(
            ui,
            handle,
            "Checking imports",
            total,
            ProbeReport::all_present,
        )?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| SuperpipError::Other(e.into()))?;
            ui.message(&json);
        }

        if report.all_present() {
            if !self.args.json {
                ui.success(&report.summary());
            }
            return Ok(CommandResult::success());
        }

        if self.args.json {
            return Ok(CommandResult::failure(1));
        }

        ui.warning(&format!("{} in {}", report.summary(), interpreter));
        let packages = self.report_missing(ui, &report);

        if !self.args.install || packages.is_empty() {
            return Ok(CommandResult::failure(1));
        }

        let question = format!(
            "Install {} package(s) into {}?",
            packages.len(),
            interpreter.executable().display()
        );
        if !self.args.yes && !ui.confirm("install_missing", &question, true)? {
            ui.message("Skipped installation");
            return Ok(CommandResult::failure(1));
        }

        let all_ok = self.install_missing(ui, &interpreter, &packages)?;
        Ok(CommandResult::from_success(all_ok))
    }
}
