//! Batch outcomes and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interpreter::Interpreter;
use crate::probe::ProbeResult;
use crate::shell::CommandResult;

use super::target::{Action, OperationUnit};

/// Detail recorded for units skipped after cancellation.
pub const CANCELLED_DETAIL: &str = "cancelled";

/// Result of one unit of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    /// Interpreter path or directory the unit ran against.
    pub target: String,
    pub action: Action,
    /// Module or package name as the caller gave it.
    pub requested: String,
    pub package: String,
    pub success: bool,
    /// Combined process output, or the reason the process never ran.
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub finished_at: DateTime<Utc>,
}

impl OperationOutcome {
    /// Outcome of a process that ran to completion (or timed out).
    pub fn from_result(unit: &OperationUnit, result: &CommandResult) -> Self {
        let mut detail = result.combined_output();
        if detail.is_empty() && !result.success {
            detail = match result.exit_code {
                Some(code) => format!("exited with code {}", code),
                None => "terminated".to_string(),
            };
        }
        Self {
            target: unit.target.clone(),
            action: unit.action,
            requested: unit.requested.clone(),
            package: unit.package.clone(),
            success: result.success,
            detail,
            exit_code: result.exit_code,
            finished_at: Utc::now(),
        }
    }

    /// Outcome of a process that could not be launched.
    pub fn launch_failed(unit: &OperationUnit, reason: impl Into<String>) -> Self {
        Self {
            target: unit.target.clone(),
            action: unit.action,
            requested: unit.requested.clone(),
            package: unit.package.clone(),
            success: false,
            detail: reason.into(),
            exit_code: None,
            finished_at: Utc::now(),
        }
    }

    /// Outcome of a unit never started because the batch was cancelled.
    pub fn cancelled(unit: &OperationUnit) -> Self {
        Self::launch_failed(unit, CANCELLED_DETAIL)
    }

    /// One-line summary for terminal output.
    pub fn summary_line(&self) -> String {
        let verb = match (self.action, self.success) {
            (Action::Install, true) => "installed in",
            (Action::Install, false) => "failed to install in",
            (Action::Uninstall, true) => "uninstalled from",
            (Action::Uninstall, false) => "failed to uninstall from",
            (Action::Probe, true) => "found in",
            (Action::Probe, false) => "missing from",
        };
        if self.requested == self.package {
            format!("{} {} {}", self.package, verb, self.target)
        } else {
            format!("{} ({}) {} {}", self.package, self.requested, verb, self.target)
        }
    }
}

/// Ordered outcomes of an install or uninstall batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<OperationOutcome>,
    pub completed: usize,
    pub total: usize,
    pub cancelled: bool,
}

impl BatchReport {
    /// Empty report expecting `total` units.
    pub fn new(total: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(total),
            completed: 0,
            total,
            cancelled: false,
        }
    }

    /// Append an outcome and advance the counter.
    pub fn record(&mut self, outcome: OperationOutcome) {
        self.outcomes.push(outcome);
        self.completed += 1;
    }

    /// Number of successful outcomes.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    /// Number of failed outcomes, cancelled units included.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Failed outcomes in batch order.
    pub fn failures(&self) -> impl Iterator<Item = &OperationOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    /// Every unit ran and succeeded.
    pub fn is_complete_success(&self) -> bool {
        !self.cancelled && self.completed == self.total && self.failed() == 0
    }
}

/// Result of probing a set of modules in one interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub interpreter: Interpreter,
    /// Results in probe order.
    pub results: Vec<ProbeResult>,
    /// Modules whose import failed.
    pub missing: Vec<String>,
    /// Modules never probed because the batch was cancelled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    pub cancelled: bool,
}

impl ProbeReport {
    /// Empty report for `interpreter`.
    pub fn new(interpreter: Interpreter) -> Self {
        Self {
            interpreter,
            results: Vec::new(),
            missing: Vec::new(),
            skipped: Vec::new(),
            cancelled: false,
        }
    }

    /// Append a probe result.
    pub fn record(&mut self, result: ProbeResult) {
        if !result.installed {
            self.missing.push(result.module.clone());
        }
        self.results.push(result);
    }

    /// Every probed module imported and nothing was skipped.
    pub fn all_present(&self) -> bool {
        self.missing.is_empty() && self.skipped.is_empty()
    }

    /// Human summary, e.g. `All packages are installed` or `2 missing`.
    pub fn summary(&self) -> String {
        if self.cancelled {
            let total = self.results.len() + self.skipped.len();
            format!("Cancelled after {} of {} modules", self.results.len(), total)
        } else if self.missing.is_empty() {
            "All packages are installed".to_string()
        } else {
            format!("{} missing", self.missing.len())
        }
    }
}

/// One row of `pip list --format=json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}
