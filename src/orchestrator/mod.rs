//! Batch operation orchestration.
//!
//! An [`Orchestrator`] turns a request (probe these modules, install this
//! package into these targets) into a sequence of units, runs them one at a
//! time, and collects one outcome per unit. A failed unit never stops the
//! batch. Progress is streamed through a caller-supplied sink, or over a
//! channel when the batch is spawned on a worker thread.
//!
//! - [`target`] - install targets, actions, and unit construction
//! - [`report`] - outcomes, batch and probe reports
//! - [`batch`] - progress tracking, events, and worker handles
//! - [`cancel`] - cooperative cancellation token

pub mod batch;
pub mod cancel;
pub mod report;
pub mod target;

pub use batch::{percent, BatchHandle, BatchState, ProgressEvent, ProgressTracker};
pub use cancel::CancellationToken;
pub use report::{BatchReport, InstalledPackage, OperationOutcome, ProbeReport, CANCELLED_DETAIL};
pub use target::{Action, InstallTarget, OperationUnit};

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{Result, SuperpipError};
use crate::interpreter::{Interpreter, InterpreterSet};
use crate::probe::{Prober, DEFAULT_PROBE_TIMEOUT};
use crate::shell::ProcessRunner;

/// Runs probe, install and uninstall batches.
///
/// Cloning is cheap: the runner and interpreter set are shared.
#[derive(Clone)]
pub struct Orchestrator {
    runner: Arc<dyn ProcessRunner>,
    interpreters: Arc<InterpreterSet>,
    host_interpreter: Option<PathBuf>,
    probe_timeout: Duration,
    catalog: Option<Arc<Catalog>>,
}

impl Orchestrator {
    /// Create an orchestrator over a discovered interpreter set.
    pub fn new(runner: Arc<dyn ProcessRunner>, interpreters: Arc<InterpreterSet>) -> Self {
        Self {
            runner,
            interpreters,
            host_interpreter: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            catalog: None,
        }
    }

    /// Interpreter used for directory installs instead of the first
    /// discovered one.
    pub fn with_host_interpreter(mut self, host: Option<PathBuf>) -> Self {
        self.host_interpreter = host;
        self
    }

    /// Per-probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Catalog used to turn module names into install packages.
    pub fn with_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Package to install for `name`, which may be a module name.
    ///
    /// Without a catalog, or for an unmapped name, this is `name` itself.
    pub fn resolve_package(&self, name: &str) -> String {
        match &self.catalog {
            Some(catalog) => catalog.resolve(name).to_string(),
            None => name.to_string(),
        }
    }

    pub fn interpreters(&self) -> &InterpreterSet {
        &self.interpreters
    }

    /// Interpreter that runs pip for directory installs.
    pub fn host_interpreter(&self) -> Option<Interpreter> {
        match &self.host_interpreter {
            Some(path) => Some(
                self.interpreters
                    .get(path)
                    .cloned()
                    .unwrap_or_else(|| Interpreter::new("host", path.clone())),
            ),
            None => self.interpreters.first().cloned(),
        }
    }

    /// Expand install targets into units, in caller order.
    ///
    /// `package` may be a module name such as `sklearn`; it is resolved
    /// through the catalog and each unit keeps the name as given.
    ///
    /// # Errors
    ///
    /// `InvalidSelection` for an empty package name or target list;
    /// `NoInterpreters` when `AllInterpreters` or a directory install has no
    /// interpreter to run.
    pub fn plan_install(&self, targets: &[InstallTarget], package: &str) -> Result<Vec<OperationUnit>> {
        let requested = validate_package(package)?;
        if targets.is_empty() {
            return Err(SuperpipError::InvalidSelection {
                message: "no install target given".to_string(),
            });
        }

        let resolved = self.resolve_package(requested);
        let package = resolved.as_str();
        if package != requested {
            debug!("Resolved '{}' to package '{}'", requested, package);
        }

        let mut units = Vec::new();
        for target in targets {
            match target {
                InstallTarget::SpecificInterpreter(interp) => {
                    units.push(OperationUnit::install(interp, package));
                }
                InstallTarget::AllInterpreters => {
                    if self.interpreters.is_empty() {
                        return Err(SuperpipError::NoInterpreters);
                    }
                    units.extend(
                        self.interpreters
                            .iter()
                            .map(|interp| OperationUnit::install(interp, package)),
                    );
                }
                InstallTarget::CustomDirectory(dir) => {
                    let host = self.host_interpreter().ok_or(SuperpipError::NoInterpreters)?;
                    units.push(OperationUnit::install_into(&host, package, dir));
                }
            }
        }
        Ok(units
            .into_iter()
            .map(|unit| unit.requested_as(requested))
            .collect())
    }

    /// Build the single uninstall unit.
    ///
    /// # Errors
    ///
    /// `InvalidSelection` unless `target` names exactly one interpreter.
    pub fn plan_uninstall(&self, target: &InstallTarget, package: &str) -> Result<OperationUnit> {
        let package = validate_package(package)?;
        match target {
            InstallTarget::SpecificInterpreter(interp) => {
                Ok(OperationUnit::uninstall(interp, package))
            }
            InstallTarget::AllInterpreters | InstallTarget::CustomDirectory(_) => {
                Err(SuperpipError::InvalidSelection {
                    message: format!("uninstall needs exactly one interpreter, got {}", target),
                })
            }
        }
    }

    /// Probe each module in `interpreter`, streaming progress to `sink`.
    pub fn run_probe_batch(
        &self,
        interpreter: &Interpreter,
        modules: &[String],
        token: &CancellationToken,
        mut sink: impl FnMut(ProgressEvent),
    ) -> ProbeReport {
        let prober = Prober::new(self.runner.as_ref()).with_timeout(self.probe_timeout);
        let mut report = ProbeReport::new(interpreter.clone());
        let mut tracker = ProgressTracker::new(modules.len(), &mut sink);
        tracker.start();

        info!(
            "Checking {} modules in {}",
            modules.len(),
            interpreter.executable().display()
        );

        for module in modules {
            if token.is_cancelled() {
                report.cancelled = true;
                report.skipped.push(module.clone());
                tracker.advance();
                continue;
            }
            let result = prober.probe(interpreter, module);
            report.record(result.clone());
            tracker.unit_finished(ProgressEvent::ProbeFinished(result));
        }

        tracker.finish();
        info!("{}", report.summary());
        report
    }

    /// Install `package` into each target, streaming progress to `sink`.
    ///
    /// Validation problems are returned before any unit runs. After that,
    /// every unit yields an outcome.
    pub fn run_install_batch(
        &self,
        targets: &[InstallTarget],
        package: &str,
        token: &CancellationToken,
        sink: impl FnMut(ProgressEvent),
    ) -> Result<BatchReport> {
        let units = self.plan_install(targets, package)?;
        Ok(self.run_units(&units, token, sink))
    }

    /// Uninstall `package` from one interpreter.
    pub fn run_uninstall_batch(
        &self,
        target: &InstallTarget,
        package: &str,
        token: &CancellationToken,
        sink: impl FnMut(ProgressEvent),
    ) -> Result<BatchReport> {
        let unit = self.plan_uninstall(target, package)?;
        Ok(self.run_units(std::slice::from_ref(&unit), token, sink))
    }

    /// Run prepared units sequentially.
    pub fn run_units(
        &self,
        units: &[OperationUnit],
        token: &CancellationToken,
        mut sink: impl FnMut(ProgressEvent),
    ) -> BatchReport {
        let mut report = BatchReport::new(units.len());
        let mut tracker = ProgressTracker::new(units.len(), &mut sink);
        tracker.start();

        for unit in units {
            let outcome = if token.is_cancelled() {
                report.cancelled = true;
                debug!("Skipping {} {} on {}: cancelled", unit.action, unit.package, unit.target);
                OperationOutcome::cancelled(unit)
            } else {
                self.run_unit(unit)
            };

            report.record(outcome.clone());
            tracker.unit_finished(ProgressEvent::OperationFinished(outcome));
        }

        tracker.finish();
        info!(
            "Batch finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        report
    }

    fn run_unit(&self, unit: &OperationUnit) -> OperationOutcome {
        info!("Running {}", unit.invocation.display());
        let outcome = match self.runner.run(&unit.invocation) {
            Ok(result) => OperationOutcome::from_result(unit, &result),
            Err(e) => OperationOutcome::launch_failed(unit, e.to_string()),
        };
        if !outcome.success {
            warn!("{}: {}", outcome.summary_line(), outcome.detail);
        }
        outcome
    }

    /// Run a probe batch on a worker thread.
    pub fn spawn_probe_batch(&self, interpreter: Interpreter, modules: Vec<String>) -> BatchHandle<ProbeReport> {
        let (tx, rx) = mpsc::channel();
        let token = CancellationToken::new();
        let worker_token = token.clone();
        let this = self.clone();

        let worker = thread::spawn(move || {
            this.run_probe_batch(&interpreter, &modules, &worker_token, |event| {
                let _ = tx.send(event);
            })
        });

        BatchHandle::new(rx, worker, token)
    }

    /// Run an install batch on a worker thread.
    ///
    /// Targets are validated before the thread starts.
    pub fn spawn_install_batch(
        &self,
        targets: &[InstallTarget],
        package: &str,
    ) -> Result<BatchHandle<BatchReport>> {
        let units = self.plan_install(targets, package)?;
        Ok(self.spawn_units(units))
    }

    /// Run an uninstall on a worker thread.
    pub fn spawn_uninstall_batch(
        &self,
        target: &InstallTarget,
        package: &str,
    ) -> Result<BatchHandle<BatchReport>> {
        let unit = self.plan_uninstall(target, package)?;
        Ok(self.spawn_units(vec![unit]))
    }

    fn spawn_units(&self, units: Vec<OperationUnit>) -> BatchHandle<BatchReport> {
        let (tx, rx) = mpsc::channel();
        let token = CancellationToken::new();
        let worker_token = token.clone();
        let this = self.clone();

        let worker = thread::spawn(move || {
            this.run_units(&units, &worker_token, |event| {
                let _ = tx.send(event);
            })
        });

        BatchHandle::new(rx, worker, token)
    }

    /// Packages installed in `interpreter`, via `pip list --format=json`.
    ///
    /// # Errors
    ///
    /// `OperationFailed` when pip exits non-zero or prints something that is
    /// not a package list.
    pub fn list_installed(&self, interpreter: &Interpreter) -> Result<Vec<InstalledPackage>> {
        let invocation = target::pip(interpreter).args(["list", "--format=json"]);
        let result = self.runner.run(&invocation)?;
        let target = interpreter.executable().display().to_string();

        if !result.success {
            return Err(SuperpipError::OperationFailed {
                target,
                message: result.combined_output(),
            });
        }

        serde_json::from_str(result.stdout.trim()).map_err(|e| SuperpipError::OperationFailed {
            target,
            message: format!("unexpected pip list output: {}", e),
        })
    }
}

fn validate_package(package: &str) -> Result<&str> {
    let package = package.trim();
    if package.is_empty() {
        return Err(SuperpipError::InvalidSelection {
            message: "package name must not be empty".to_string(),
        });
    }
    Ok(package)
}
