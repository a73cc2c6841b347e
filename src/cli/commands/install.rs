//! Install command implementation.
//!
//! `superpip install PKG` installs into one interpreter (`--python`), every
//! discovered interpreter (`--all`) or a directory (`--target`).

use crate::cli::args::InstallArgs;
use crate::engine::Engine;
use crate::error::{Result, SuperpipError};
use crate::orchestrator::{BatchReport, InstallTarget};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{follow_batch, select_interpreter};

pub struct InstallCommand<'a> {
    engine: &'a Engine,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    pub fn new(engine: &'a Engine, args: InstallArgs) -> Self {
        Self { engine, args }
    }

    fn target(&self) -> Result<InstallTarget> {
        if self.args.all {
            return Ok(InstallTarget::AllInterpreters);
        }
        if let Some(dir) = &self.args.target {
            return Ok(InstallTarget::CustomDirectory(dir.clone()));
        }
        match self.args.python.as_deref() {
            Some(selector) => Ok(InstallTarget::SpecificInterpreter(select_interpreter(
                self.engine,
                Some(selector),
            )?)),
            None => Err(SuperpipError::InvalidSelection {
                message: "choose one of --python, --all or --target".to_string(),
            }),
        }
    }
}

/// Print one line per outcome; details follow in verbose mode.
pub(super) fn show_report(ui: &mut dyn UserInterface, report: &BatchReport) {
    let verbose = ui.output_mode().shows_command_output();
    for outcome in &report.outcomes {
        if outcome.success {
            ui.success(&outcome.summary_line());
        } else {
            ui.error(&outcome.summary_line());
        }
        if (verbose || !outcome.success) && !outcome.detail.is_empty() {
            ui.message(&outcome.detail);
        }
    }
    if report.cancelled {
        ui.warning(&format!(
            "Cancelled after {} of {} operations",
            report.completed, report.total
        ));
    }
}

pub(super) fn print_json(ui: &mut dyn UserInterface, report: &BatchReport) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).map_err(|e| SuperpipError::Other(e.into()))?;
    ui.message(&json);
    Ok(())
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = self.target()?;
        let handle = self
            .engine
            .spawn_install_batch(std::slice::from_ref(&target), &self.args.package)?;

        let total = match &target {
            InstallTarget::AllInterpreters => self.engine.discover_interpreters().len(),
            _ => 1,
        };
        let report = follow_batch(
            ui,
            handle,
            &format!("Installing {}", self.args.package),
            total,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{empty_engine, engine_with_python};
    use crate::shell::{MockResponse, MockRunner};
    use crate::ui::MockUI;

    fn args(package: &str) -> InstallArgs {
        InstallArgs {
            package: package.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn installs_into_selected_interpreter() {
        let runner = MockRunner::new().when_arg("install", MockResponse::ok("Successfully installed rich"));
        let (_temp, engine, runner, launcher) = engine_with_python(runner);
        let mut ui = MockUI::new();
        let args = InstallArgs {
            python: Some(launcher.display().to_string()),
            ..args("rich")
        };

        let result = InstallCommand::new(&engine, args).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("rich installed in"));
        assert_eq!(
            ui.progress_log().finished,
            vec![(true, "Installing rich".to_string())]
        );
        let install = runner.calls().into_iter().find(|c| c.has_arg("install")).unwrap();
        assert_eq!(install.program, launcher);
        assert_eq!(install.args, vec!["-m", "pip", "install", "rich"]);
    }

    #[test]
    fn module_name_installs_providing_package() {
        let runner = MockRunner::new().when_arg("install", MockResponse::ok(""));
        let (_temp, engine, runner, _) = engine_with_python(runner);
        let mut ui = MockUI::new();
        let args = InstallArgs {
            all: true,
            ..args("sklearn")
        };

        let result = InstallCommand::new(&engine, args).execute(&mut ui).unwrap();

        assert!(result.success);
        let install = runner.calls().into_iter().find(|c| c.has_arg("install")).unwrap();
        assert_eq!(install.args, vec!["-m", "pip", "install", "scikit-learn"]);
        assert!(ui.has_success("scikit-learn (sklearn) installed in"));
    }

    #[test]
    fn version_selector_finds_interpreter() {
        let runner = MockRunner::new().when_arg("install", MockResponse::ok(""));
        let (_temp, engine, _runner, _) = engine_with_python(runner);
        let mut ui = MockUI::new();
        let args = InstallArgs {
            python: Some("3.11".to_string()),
            ..args("rich")
        };

        let result = InstallCommand::new(&engine, args).execute(&mut ui).unwrap();
        assert!(result.success);
    }

    #[test]
    fn failed_install_exits_one_and_shows_detail() {
        let runner = MockRunner::new().when_arg(
            "install",
            MockResponse::fail(1, "ERROR: No matching distribution found for nopkg"),
        );
        let (_temp, engine, _runner, _) = engine_with_python(runner);
        let mut ui = MockUI::new();
        let args = InstallArgs {
            all: true,
            ..args("nopkg")
        };

        let result = InstallCommand::new(&engine, args).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("nopkg failed to install in"));
        assert!(ui.has_message("No matching distribution"));
        assert_eq!(
            ui.progress_log().finished,
            vec![(false, "Installing nopkg".to_string())]
        );
    }

    #[test]
    fn target_directory_uses_host_pip() {
        let runner = MockRunner::new().when_arg("--target", MockResponse::ok(""));
        let (temp, engine, runner, launcher) = engine_with_python(runner);
        let dir = temp.path().join("vendor");
        let mut ui = MockUI::new();
        let args = InstallArgs {
            target: Some(dir.clone()),
            ..args("attrs")
        };

        let result = InstallCommand::new(&engine, args).execute(&mut ui).unwrap();

        assert!(result.success);
        let install = runner.calls().into_iter().find(|c| c.has_arg("--target")).unwrap();
        assert_eq!(install.program, launcher);
        assert!(install.has_arg(&dir.display().to_string()));
    }

    #[test]
    fn json_output_is_batch_report() {
        let runner = MockRunner::new().when_arg("install", MockResponse::ok(""));
        let (_temp, engine, _runner, _) = engine_with_python(runner);
        let mut ui = MockUI::new();
        let args = InstallArgs {
            all: true,
            json: true,
            ..args("rich")
        };

        InstallCommand::new(&engine, args).execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["outcomes"][0]["success"], true);
    }

    #[test]
    fn all_without_interpreters_is_preflight_error() {
        let (engine, _) = empty_engine(MockRunner::new());
        let mut ui = MockUI::new();
        let args = InstallArgs {
            all: true,
            ..args("rich")
        };

        let err = InstallCommand::new(&engine, args).execute(&mut ui).unwrap_err();
        assert!(err.is_preflight());
    }

    #[test]
    fn unknown_selector_is_invalid_selection() {
        let (_temp, engine, _runner, _) = engine_with_python(MockRunner::new());
        let mut ui = MockUI::new();
        let args = InstallArgs {
            python: Some("2.7".to_string()),
            ..args("rich")
        };

        let err = InstallCommand::new(&engine, args).execute(&mut ui).unwrap_err();
        assert!(matches!(err, SuperpipError::InvalidSelection { .. }));
    }
}
