//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// superpip - find every Python on this machine and manage its packages.
#[derive(Debug, Parser)]
#[command(name = "superpip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config file merged over ~/.superpip and ./.superpip
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show process output for every operation
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Do not contact the package index; use curated data only
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List discovered Python interpreters
    Interpreters(InterpretersArgs),

    /// Check which imports of a script are missing from an interpreter
    Check(CheckArgs),

    /// Install a package into one interpreter, all interpreters, or a directory
    Install(InstallArgs),

    /// Uninstall a package from one interpreter
    Uninstall(UninstallArgs),

    /// Search module names in the catalog
    Search(SearchArgs),

    /// List catalog modules and the packages that provide them
    List(ListArgs),

    /// Show the package that provides a module
    Resolve(ResolveArgs),

    /// List packages installed in an interpreter
    Installed(InstalledArgs),
}

/// Arguments for the `interpreters` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InterpretersArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Source file to scan; `-` or nothing reads stdin
    pub file: Option<PathBuf>,

    /// Interpreter path or version (defaults to the first discovered)
    #[arg(long, value_name = "PATH|VERSION")]
    pub python: Option<String>,

    /// Offer to install missing packages
    #[arg(long)]
    pub install: bool,

    /// Install without asking
    #[arg(short, long, requires = "install")]
    pub yes: bool,

    /// Print the probe report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
#[command(group(
    ArgGroup::new("destination")
        .required(true)
        .args(["python", "all", "target"])
))]
pub struct InstallArgs {
    /// Package to install
    pub package: String,

    /// Interpreter path or version
    #[arg(long, value_name = "PATH|VERSION")]
    pub python: Option<String>,

    /// Install into every discovered interpreter
    #[arg(long)]
    pub all: bool,

    /// Install into a directory using the host interpreter's pip
    #[arg(long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UninstallArgs {
    /// Package to uninstall
    pub package: String,

    /// Interpreter path or version
    #[arg(long, value_name = "PATH|VERSION", required = true)]
    pub python: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `search` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SearchArgs {
    /// Text to look for in module names
    pub query: String,

    /// Search every known module instead of the curated list
    #[arg(long)]
    pub full: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// List every known module instead of the curated list
    #[arg(long)]
    pub full: bool,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolveArgs {
    /// Module name as written in an import
    pub module: String,
}

/// Arguments for the `installed` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstalledArgs {
    /// Interpreter path or version
    #[arg(long, value_name = "PATH|VERSION")]
    pub python: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
