//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// Pre-flight problems (empty query, unknown interpreter) are returned
    /// as errors; a batch with failed units is an `Ok` failure result.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Success when `ok`, exit code 1 otherwise.
    pub fn from_success(ok: bool) -> Self {
        if ok {
            Self::success()
        } else {
            Self::failure(1)
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    engine: Engine,
}

impl CommandDispatcher {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Route the parsed subcommand to its implementation.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let engine = &self.engine;
        match &cli.command {
            Commands::Interpreters(args) => {
                super::interpreters::InterpretersCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::Check(args) => super::check::CheckCommand::new(engine, args.clone()).execute(ui),
            Commands::Install(args) => {
                super::install::InstallCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::Uninstall(args) => {
                super::uninstall::UninstallCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::Search(args) => {
                super::search::SearchCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::List(args) => super::list::ListCommand::new(engine, args.clone()).execute(ui),
            Commands::Resolve(args) => {
                super::resolve::ResolveCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::Installed(args) => {
                super::installed::InstalledCommand::new(engine, args.clone()).execute(ui)
            }
        }
    }
}
