//! Installed command implementation.
//!
//! `superpip installed` lists the packages pip reports for one interpreter.

use crate::cli::args::InstalledArgs;
use crate::engine::Engine;
use crate::error::{Result, SuperpipError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::select_interpreter;

pub struct InstalledCommand<'a> {
    engine: &'a Engine,
    args: InstalledArgs,
}

impl<'a> InstalledCommand<'a> {
    pub fn new(engine: &'a Engine, args: InstalledArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for InstalledCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let interpreter = select_interpreter(self.engine, self.args.python.as_deref())?;
        let packages = self.engine.list_installed(&interpreter)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&packages)
                .map_err(|e| SuperpipError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let width = packages.iter().map(|p| p.name.len()).max().unwrap_or(0);
        ui.show_header(&format!(
            "{} package(s) in {}",
            packages.len(),
            interpreter.executable().display()
        ));
        for package in &packages {
            ui.show_row(&package.name, &package.version, width);
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::engine_with_python;
    use crate::shell::{MockResponse, MockRunner};
    use crate::ui::MockUI;

    const PIP_LIST: &str = r#"[{"name":"pip","version":"24.0"},{"name":"rich","version":"13.7.1"}]"#;

    #[test]
    fn rows_show_name_and_version() {
        let runner = MockRunner::new().when_arg("list", MockResponse::ok(PIP_LIST));
        let (_temp, engine, _runner, _) = engine_with_python(runner);
        let mut ui = MockUI::new();

        let result = InstalledCommand::new(&engine, InstalledArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.headers()[0].starts_with("2 package(s) in"));
        assert_eq!(
            ui.rows(),
            &[
                ("pip".to_string(), "24.0".to_string()),
                ("rich".to_string(), "13.7.1".to_string()),
            ]
        );
    }

    #[test]
    fn json_passes_rows_through() {
        let runner = MockRunner::new().when_arg("list", MockResponse::ok(PIP_LIST));
        let (_temp, engine, _runner, _) = engine_with_python(runner);
        let mut ui = MockUI::new();
        let args = InstalledArgs {
            python: None,
            json: true,
        };

        InstalledCommand::new(&engine, args).execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(json[1]["name"], "rich");
    }

    #[test]
    fn pip_failure_is_operation_error() {
        let runner = MockRunner::new().when_arg("list", MockResponse::fail(1, "No module named pip"));
        let (_temp, engine, _runner, _) = engine_with_python(runner);
        let mut ui = MockUI::new();

        let err = InstalledCommand::new(&engine, InstalledArgs::default())
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, SuperpipError::OperationFailed { .. }));
        assert!(!err.is_preflight());
    }
}
