//! Operation targets and actions.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::interpreter::Interpreter;
use crate::shell::Invocation;

/// Where an install or uninstall applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallTarget {
    /// One interpreter's environment.
    SpecificInterpreter(Interpreter),
    /// Every discovered interpreter, in discovery order.
    AllInterpreters,
    /// A plain directory, populated by the host interpreter's pip.
    CustomDirectory(PathBuf),
}

impl fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpecificInterpreter(interp) => write!(f, "{}", interp.executable().display()),
            Self::AllInterpreters => write!(f, "all interpreters"),
            Self::CustomDirectory(dir) => write!(f, "directory {}", dir.display()),
        }
    }
}

/// What a unit of work does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Install,
    Uninstall,
    Probe,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Install => "install",
            Self::Uninstall => "uninstall",
            Self::Probe => "probe",
        };
        write!(f, "{}", s)
    }
}

/// A single process to run as part of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationUnit {
    /// Label recorded in the outcome: interpreter path or directory.
    pub target: String,
    pub action: Action,
    /// Name the caller asked for: a module or a package.
    pub requested: String,
    /// Package handed to pip.
    pub package: String,
    pub invocation: Invocation,
}

impl OperationUnit {
    /// `<python> -m pip install <package>`.
    pub fn install(interpreter: &Interpreter, package: &str) -> Self {
        Self {
            target: interpreter.executable().display().to_string(),
            action: Action::Install,
            requested: package.to_string(),
            package: package.to_string(),
            invocation: pip(interpreter).args(["install", package]),
        }
    }

    /// `<host> -m pip install <package> --target <dir>`.
    pub fn install_into(host: &Interpreter, package: &str, dir: &std::path::Path) -> Self {
        Self {
            target: dir.display().to_string(),
            action: Action::Install,
            requested: package.to_string(),
            package: package.to_string(),
            invocation: pip(host)
                .args(["install", package, "--target"])
                .arg(dir.display().to_string()),
        }
    }

    /// Record the name the caller used when it differs from the package.
    pub fn requested_as(mut self, requested: &str) -> Self {
        self.requested = requested.to_string();
        self
    }

    /// `<python> -m pip uninstall -y <package>`.
    pub fn uninstall(interpreter: &Interpreter, package: &str) -> Self {
        Self {
            target: interpreter.executable().display().to_string(),
            action: Action::Uninstall,
            requested: package.to_string(),
            package: package.to_string(),
            invocation: pip(interpreter).args(["uninstall", "-y", package]),
        }
    }
}

/// `<python> -m pip`.
pub(crate) fn pip(interpreter: &Interpreter) -> Invocation {
    Invocation::new(interpreter.executable()).args(["-m", "pip"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn python() -> Interpreter {
        Interpreter::new("Python 3.12.1", "/opt/py312/bin/python3")
    }

    #[test]
    fn install_unit_invocation() {
        let unit = OperationUnit::install(&python(), "requests");
        assert_eq!(unit.target, "/opt/py312/bin/python3");
        assert_eq!(unit.action, Action::Install);
        assert_eq!(unit.invocation.args, vec!["-m", "pip", "install", "requests"]);
    }

    #[test]
    fn directory_unit_uses_host_and_target_flag() {
        let unit = OperationUnit::install_into(&python(), "requests", Path::new("/tmp/vendor"));
        assert_eq!(unit.target, "/tmp/vendor");
        assert_eq!(unit.invocation.program, PathBuf::from("/opt/py312/bin/python3"));
        assert_eq!(
            unit.invocation.args,
            vec!["-m", "pip", "install", "requests", "--target", "/tmp/vendor"]
        );
    }

    #[test]
    fn requested_name_is_kept_beside_package() {
        let unit = OperationUnit::install(&python(), "scikit-learn").requested_as("sklearn");
        assert_eq!(unit.requested, "sklearn");
        assert_eq!(unit.package, "scikit-learn");
        assert_eq!(unit.invocation.args, vec!["-m", "pip", "install", "scikit-learn"]);
    }

    #[test]
    fn uninstall_unit_is_non_interactive() {
        let unit = OperationUnit::uninstall(&python(), "requests");
        assert_eq!(unit.action, Action::Uninstall);
        assert_eq!(unit.invocation.args, vec!["-m", "pip", "uninstall", "-y", "requests"]);
    }

    #[test]
    fn target_display() {
        assert_eq!(InstallTarget::AllInterpreters.to_string(), "all interpreters");
        assert_eq!(
            InstallTarget::SpecificInterpreter(python()).to_string(),
            "/opt/py312/bin/python3"
        );
        assert_eq!(
            InstallTarget::CustomDirectory(PathBuf::from("/srv/libs")).to_string(),
            "directory /srv/libs"
        );
    }

    #[test]
    fn action_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Action::Uninstall).unwrap(), "\"uninstall\"");
        assert_eq!(Action::Probe.to_string(), "probe");
    }
}
