//! Command-line interface for superpip.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CheckArgs, Cli, Commands, InstallArgs, InstalledArgs, InterpretersArgs, ListArgs,
    ResolveArgs, SearchArgs, UninstallArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
