//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands borrow a shared [`Engine`], so discovery
//! and the catalog are computed at most once per run.
//!
//! [`Engine`]: crate::engine::Engine

pub mod check;
pub mod dispatcher;
pub mod install;
pub mod installed;
pub mod interpreters;
pub mod list;
pub mod resolve;
pub mod search;
pub mod uninstall;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::Path;

use crate::engine::Engine;
use crate::error::{Result, SuperpipError};
use crate::interpreter::{is_executable, Interpreter};
use crate::orchestrator::BatchHandle;
use crate::ui::{apply_event, UserInterface};

/// Pick the interpreter named by `--python`, or the first discovered one.
///
/// A selector may be an executable path or a version (`3.11`, `Python
/// 3.11.4`). A path outside the discovered set is accepted when it points
/// at an executable.
pub fn select_interpreter(engine: &Engine, selector: Option<&str>) -> Result<Interpreter> {
    let interpreters = engine.discover_interpreters();

    let Some(selector) = selector else {
        return interpreters
            .first()
            .cloned()
            .ok_or(SuperpipError::NoInterpreters);
    };

    if let Some(found) = interpreters.find(selector) {
        return Ok(found.clone());
    }

    let path = Path::new(selector);
    if is_executable(path) {
        tracing::debug!("Using undiscovered interpreter {}", path.display());
        return Ok(Interpreter::new("unknown", path));
    }

    Err(SuperpipError::InvalidSelection {
        message: format!("no interpreter matches '{}'", selector),
    })
}

/// Drain a spawned batch into a progress display and return its report.
///
/// The bar finishes as an error when `succeeded` rejects the report.
pub fn follow_batch<R>(
    ui: &mut dyn UserInterface,
    handle: BatchHandle<R>,
    message: &str,
    total: usize,
    succeeded: impl Fn(&R) -> bool,
) -> Result<R> {
    let mut progress = ui.start_progress(message, total as u64);
    let verbose = ui.output_mode().shows_command_output();

    for event in handle.events().iter() {
        if let Some(line) = apply_event(progress.as_mut(), &event) {
            if verbose {
                progress.set_message(&line);
            }
        }
    }

    let report = match handle.wait() {
        Ok(report) => report,
        Err(e) => {
            progress.finish_error(message);
            return Err(e);
        }
    };
    if succeeded(&report) {
        progress.finish_success(message);
    } else {
        progress.finish_error(message);
    }
    Ok(report)
}
