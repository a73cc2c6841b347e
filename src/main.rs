//! superpip CLI entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use superpip::cli::{Cli, CommandDispatcher};
use superpip::config::load_config;
use superpip::engine::Engine;
use superpip::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("superpip=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("superpip=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("superpip starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);
    let is_interactive = std::io::stdin().is_terminal();
    let mut ui = create_ui(is_interactive, output_mode, cli.no_color);

    let working_dir = std::env::current_dir().unwrap_or_default();
    let mut config = match load_config(&working_dir, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };
    if cli.offline {
        config.settings.offline = true;
    }

    let dispatcher = CommandDispatcher::new(Engine::new(config));

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(if e.is_preflight() { 2 } else { 1 })
        }
    }
}
