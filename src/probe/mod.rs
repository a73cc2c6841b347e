//! Installation prober.
//!
//! A module counts as installed in an interpreter's environment when
//! `<python> -c "import <module>"` exits with code 0. Every other outcome
//! (non-zero exit, launch failure, timeout, a name that is not a plain
//! identifier) counts as not installed. The prober never returns an error.

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::imports::is_valid_module_name;
use crate::interpreter::Interpreter;
use crate::shell::{Invocation, ProcessRunner};

/// Default upper bound on one import probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of probing one module in one interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// Module that was imported.
    pub module: String,
    /// Whether the import succeeded.
    pub installed: bool,
}

/// Checks module availability through a [`ProcessRunner`].
pub struct Prober<'a> {
    runner: &'a dyn ProcessRunner,
    timeout: Duration,
}

impl<'a> Prober<'a> {
    /// Create a prober with the default timeout.
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self {
            runner,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Override the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether `module` can be imported by `interpreter`.
    pub fn is_installed(&self, interpreter: &Interpreter, module: &str) -> bool {
        self.probe(interpreter, module).installed
    }

    /// Probe `module` and return the full result.
    pub fn probe(&self, interpreter: &Interpreter, module: &str) -> ProbeResult {
        let installed = if !is_valid_module_name(module) {
            debug!("Refusing to probe invalid module name '{}'", module);
            false
        } else {
            let invocation = probe_invocation(interpreter, module).timeout(self.timeout);
            match self.runner.run(&invocation) {
                Ok(result) if result.success => true,
                Ok(result) => {
                    if result.timed_out {
                        debug!("Probe for '{}' timed out", module);
                    }
                    false
                }
                Err(e) => {
                    debug!("Probe for '{}' could not start: {}", module, e);
                    false
                }
            }
        };

        debug!(
            "Probe {} in {}: {}",
            module,
            interpreter.executable().display(),
            if installed { "installed" } else { "missing" }
        );

        ProbeResult {
            module: module.to_string(),
            installed,
        }
    }
}

/// `<python> -c "import <module>"`.
pub fn probe_invocation(interpreter: &Interpreter, module: &str) -> Invocation {
    Invocation::new(interpreter.executable())
        .arg("-c")
        .arg(format!("import {}", module))
}

/// Whether `module` can be imported by `interpreter`, with the default timeout.
pub fn is_installed(runner: &dyn ProcessRunner, interpreter: &Interpreter, module: &str) -> bool {
    Prober::new(runner).is_installed(interpreter, module)
}
