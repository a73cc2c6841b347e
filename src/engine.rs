//! Engine facade.
//!
//! [`Engine`] bundles the loaded configuration, the process runner and the
//! index source, and exposes every operation the CLI needs. Interpreter
//! discovery and the catalog are computed on first use and then reused, so
//! one engine never scans or fetches twice.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use superpip::config::SuperpipConfig;
//! use superpip::engine::Engine;
//! use superpip::shell::MockRunner;
//!
//! let mut config = SuperpipConfig::default();
//! config.settings.offline = true;
//!
//! let engine = Engine::with_runner(config, Arc::new(MockRunner::new())).with_roots(Vec::new());
//! assert!(engine.discover_interpreters().is_empty());
//! assert_eq!(engine.resolve("bs4"), "beautifulsoup4");
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::catalog::{Catalog, CatalogView, HttpIndex, IndexSource, OfflineIndex};
use crate::config::SuperpipConfig;
use crate::error::Result;
use crate::imports;
use crate::interpreter::{Interpreter, InterpreterLocator, InterpreterSet};
use crate::orchestrator::{
    BatchHandle, BatchReport, CancellationToken, InstallTarget, InstalledPackage, Orchestrator,
    ProbeReport, ProgressEvent,
};
use crate::probe::Prober;
use crate::shell::{ProcessRunner, SystemRunner};

/// Entry point for discovery, catalog and batch operations.
pub struct Engine {
    config: SuperpipConfig,
    runner: Arc<dyn ProcessRunner>,
    index: Box<dyn IndexSource>,
    roots: Option<Vec<PathBuf>>,
    interpreters: OnceLock<Arc<InterpreterSet>>,
    catalog: OnceLock<Arc<Catalog>>,
}

impl Engine {
    /// Engine that runs real processes.
    pub fn new(config: SuperpipConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner))
    }

    /// Engine over a custom runner.
    ///
    /// The index source follows `settings.offline` and `settings.index_url`.
    pub fn with_runner(config: SuperpipConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        let index: Box<dyn IndexSource> = if config.settings.offline {
            Box::new(OfflineIndex)
        } else {
            Box::new(HttpIndex::with_timeout(
                config.settings.index_url.clone(),
                Duration::from_secs(config.settings.fetch_timeout_secs),
            ))
        };
        Self {
            config,
            runner,
            index,
            roots: None,
            interpreters: OnceLock::new(),
            catalog: OnceLock::new(),
        }
    }

    /// Replace the index source.
    pub fn with_index(mut self, index: Box<dyn IndexSource>) -> Self {
        self.index = index;
        self
    }

    /// Scan exactly `roots` (plus configured extras) instead of the
    /// platform defaults.
    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.roots = Some(roots);
        self
    }

    pub fn config(&self) -> &SuperpipConfig {
        &self.config
    }

    /// Interpreters found by one discovery pass, cached after the first call.
    pub fn discover_interpreters(&self) -> Arc<InterpreterSet> {
        self.interpreters
            .get_or_init(|| {
                let locator = match &self.roots {
                    Some(roots) => InterpreterLocator::with_roots(self.runner.as_ref(), roots.clone()),
                    None => InterpreterLocator::new(self.runner.as_ref()),
                };
                Arc::new(
                    locator
                        .extra_roots(&self.config.settings.install_roots)
                        .discover(),
                )
            })
            .clone()
    }

    /// Build a fresh catalog from the curated table and the index.
    ///
    /// An unreachable index yields a curated-only catalog.
    pub fn build_catalog(&self) -> Catalog {
        Catalog::build(self.index.as_ref(), &self.config.curated)
    }

    /// Catalog built on first use.
    pub fn catalog(&self) -> &Catalog {
        self.shared_catalog()
    }

    fn shared_catalog(&self) -> &Arc<Catalog> {
        self.catalog.get_or_init(|| Arc::new(self.build_catalog()))
    }

    /// Top-level modules imported by `text`.
    pub fn extract_modules(&self, text: &str) -> BTreeSet<String> {
        imports::extract(text)
    }

    /// Whether `module` imports cleanly in `interpreter`.
    pub fn probe_module(&self, interpreter: &Interpreter, module: &str) -> bool {
        Prober::new(self.runner.as_ref())
            .with_timeout(self.probe_timeout())
            .is_installed(interpreter, module)
    }

    /// Package that provides `module`.
    pub fn resolve(&self, module: &str) -> String {
        self.catalog().resolve(module).to_string()
    }

    /// Module names in `view`.
    pub fn list_catalog(&self, view: CatalogView) -> Vec<String> {
        self.catalog().list_all(view).to_vec()
    }

    /// Case-insensitive substring search over `view`.
    pub fn search_catalog(&self, view: CatalogView, query: &str) -> Result<Vec<String>> {
        self.catalog().search(view, query)
    }

    /// Orchestrator over the discovered interpreters.
    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.runner.clone(), self.discover_interpreters())
            .with_host_interpreter(self.config.settings.host_interpreter.clone())
            .with_probe_timeout(self.probe_timeout())
            .with_catalog(self.shared_catalog().clone())
    }

    /// Probe `modules` in `interpreter`.
    pub fn run_probe_batch(
        &self,
        interpreter: &Interpreter,
        modules: &[String],
        token: &CancellationToken,
        sink: impl FnMut(ProgressEvent),
    ) -> ProbeReport {
        self.orchestrator()
            .run_probe_batch(interpreter, modules, token, sink)
    }

    /// Install `package` into `targets`.
    ///
    /// `package` may be a module name; it is resolved through the catalog.
    pub fn run_install_batch(
        &self,
        targets: &[InstallTarget],
        package: &str,
        token: &CancellationToken,
        sink: impl FnMut(ProgressEvent),
    ) -> Result<BatchReport> {
        self.orchestrator()
            .run_install_batch(targets, package, token, sink)
    }

    /// Uninstall `package` from a single interpreter.
    pub fn run_uninstall_batch(
        &self,
        target: &InstallTarget,
        package: &str,
        token: &CancellationToken,
        sink: impl FnMut(ProgressEvent),
    ) -> Result<BatchReport> {
        self.orchestrator()
            .run_uninstall_batch(target, package, token, sink)
    }

    /// Start an install batch on a worker thread.
    pub fn spawn_install_batch(
        &self,
        targets: &[InstallTarget],
        package: &str,
    ) -> Result<BatchHandle<BatchReport>> {
        self.orchestrator().spawn_install_batch(targets, package)
    }

    /// Start an uninstall on a worker thread.
    pub fn spawn_uninstall_batch(
        &self,
        target: &InstallTarget,
        package: &str,
    ) -> Result<BatchHandle<BatchReport>> {
        self.orchestrator().spawn_uninstall_batch(target, package)
    }

    /// Start a probe batch on a worker thread.
    pub fn spawn_probe_batch(
        &self,
        interpreter: Interpreter,
        modules: Vec<String>,
    ) -> BatchHandle<ProbeReport> {
        self.orchestrator().spawn_probe_batch(interpreter, modules)
    }

    /// Packages installed in `interpreter`.
    pub fn list_installed(&self, interpreter: &Interpreter) -> Result<Vec<InstalledPackage>> {
        self.orchestrator().list_installed(interpreter)
    }

    fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.config.settings.probe_timeout_secs)
    }
}
