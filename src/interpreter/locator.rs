//! Interpreter locator.
//!
//! Python installs land in a handful of conventional roots, one
//! subdirectory per install (`C:/Python/Python311/python.exe`,
//! `/usr/local/bin/<dir>/python3`). The locator walks the immediate
//! subdirectories of each root, checks for the platform's launcher, and
//! asks each candidate for its version.
//!
//! A missing root or launcher is not an error, and neither is a candidate
//! that fails to report a version: it is simply left out of the result.
//!
//! # Example
//!
//! ```no_run
//! use superpip::interpreter::InterpreterLocator;
//! use superpip::shell::SystemRunner;
//!
//! let interpreters = InterpreterLocator::new(&SystemRunner).discover();
//! for interp in &interpreters {
//!     println!("{}", interp);
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::shell::{Invocation, ProcessRunner};

use super::{Interpreter, InterpreterSet};

/// Roots relative to the user's home directory on Windows.
const WINDOWS_HOME_ROOTS: &[&str] = &["AppData/Local/Programs/Python"];

/// Absolute roots on Windows.
const WINDOWS_ROOTS: &[&str] = &[
    "C:/Python",
    "C:/Program Files/Python",
    "C:/Program Files (x86)/Python",
];

/// Absolute roots everywhere else.
const UNIX_ROOTS: &[&str] = &["/usr/bin", "/usr/local/bin"];

/// Upper bound on a single `--version` query.
const VERSION_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Platform family, which decides the launcher name and default roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Windows,
    Unix,
}

impl PlatformFamily {
    /// Family of the host platform.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// File name of the interpreter launcher inside an install directory.
    pub fn launcher_name(self) -> &'static str {
        match self {
            Self::Windows => "python.exe",
            Self::Unix => "python3",
        }
    }
}

/// Built-in install roots for `family`, in scan order.
pub fn default_roots(family: PlatformFamily, home: Option<&Path>) -> Vec<PathBuf> {
    match family {
        PlatformFamily::Windows => {
            let mut roots: Vec<PathBuf> = WINDOWS_ROOTS.iter().map(PathBuf::from).collect();
            if let Some(home) = home {
                roots.extend(WINDOWS_HOME_ROOTS.iter().map(|sub| home.join(sub)));
            }
            roots
        }
        PlatformFamily::Unix => UNIX_ROOTS.iter().map(PathBuf::from).collect(),
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Scans install roots for interpreters.
pub struct InterpreterLocator<'a> {
    runner: &'a dyn ProcessRunner,
    roots: Vec<PathBuf>,
    family: PlatformFamily,
}

impl<'a> InterpreterLocator<'a> {
    /// Locator over the host platform's built-in roots.
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        let family = PlatformFamily::current();
        let home = dirs::home_dir();
        Self {
            runner,
            roots: default_roots(family, home.as_deref()),
            family,
        }
    }

    /// Locator over exactly `roots`.
    pub fn with_roots(runner: &'a dyn ProcessRunner, roots: Vec<PathBuf>) -> Self {
        Self {
            runner,
            roots,
            family: PlatformFamily::current(),
        }
    }

    /// Scan `extra` after the current roots.
    pub fn extra_roots(mut self, extra: &[PathBuf]) -> Self {
        for root in extra {
            if !self.roots.contains(root) {
                self.roots.push(root.clone());
            }
        }
        self
    }

    /// Override the platform family (launcher name).
    pub fn family(mut self, family: PlatformFamily) -> Self {
        self.family = family;
        self
    }

    /// Roots in scan order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Run one discovery pass.
    pub fn discover(&self) -> InterpreterSet {
        info!("Detecting Python installations...");
        let mut found = InterpreterSet::new();

        for root in &self.roots {
            for candidate in self.candidates(root) {
                let Some(version) = self.query_version(&candidate) else {
                    continue;
                };
                info!("Detected Python: {} at {}", version, candidate.display());
                found.insert(Interpreter::new(version, candidate));
            }
        }

        if found.is_empty() {
            warn!("No Python installations detected");
        }
        found
    }

    /// Launchers present under the immediate subdirectories of `root`.
    fn candidates(&self, root: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(_) => {
                debug!("Install root {} not present", root.display());
                return Vec::new();
            }
        };

        let mut subdirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        subdirs.sort();

        subdirs
            .into_iter()
            .map(|dir| dir.join(self.family.launcher_name()))
            .filter(|launcher| is_executable(launcher))
            .collect()
    }

    /// Ask `launcher` for its version; `None` excludes the candidate.
    fn query_version(&self, launcher: &Path) -> Option<String> {
        let invocation = Invocation::new(launcher)
            .arg("--version")
            .timeout(VERSION_QUERY_TIMEOUT);

        match self.runner.run(&invocation) {
            Ok(result) if result.success => {
                let version = result.combined_output();
                if version.is_empty() {
                    warn!("{} reported an empty version", launcher.display());
                    None
                } else {
                    Some(version)
                }
            }
            Ok(result) => {
                warn!(
                    "Error checking version for {}: exit code {:?}",
                    launcher.display(),
                    result.exit_code
                );
                None
            }
            Err(e) => {
                warn!("Error checking version for {}: {}", launcher.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockResponse, MockRunner};
    use tempfile::TempDir;

    /// Create a fake launcher at a path (creates parent dirs as needed).
    fn create_fake_binary(path: &Path, script: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, script).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    fn launcher_in(root: &Path, subdir: &str) -> PathBuf {
        root.join(subdir)
            .join(PlatformFamily::current().launcher_name())
    }

    #[test]
    fn launcher_names_per_family() {
        assert_eq!(PlatformFamily::Windows.launcher_name(), "python.exe");
        assert_eq!(PlatformFamily::Unix.launcher_name(), "python3");
    }

    #[test]
    fn windows_roots_include_home_programs_dir() {
        let roots = default_roots(PlatformFamily::Windows, Some(Path::new("/home/u")));
        assert!(roots.contains(&PathBuf::from("C:/Python")));
        assert!(roots.contains(&PathBuf::from("/home/u/AppData/Local/Programs/Python")));
    }

    #[test]
    fn unix_roots() {
        let roots = default_roots(PlatformFamily::Unix, None);
        assert_eq!(
            roots,
            vec![PathBuf::from("/usr/bin"), PathBuf::from("/usr/local/bin")]
        );
    }

    #[test]
    fn missing_roots_yield_empty_set() {
        let runner = MockRunner::new().otherwise(MockResponse::ok("Python 3.11.0"));
        let locator = InterpreterLocator::with_roots(
            &runner,
            vec![PathBuf::from("/nonexistent/root/a"), PathBuf::from("/nonexistent/b")],
        );

        let found = locator.discover();
        assert!(found.is_empty());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn discovers_launchers_in_subdirectories() {
        let temp = TempDir::new().unwrap();
        let py311 = launcher_in(temp.path(), "Python311");
        let py312 = launcher_in(temp.path(), "Python312");
        create_fake_binary(&py311, "#!/bin/sh\n");
        create_fake_binary(&py312, "#!/bin/sh\n");
        fs::create_dir_all(temp.path().join("empty-dir")).unwrap();

        let runner = MockRunner::new()
            .when_program(&py311, MockResponse::ok("Python 3.11.4\n"))
            .when_program(&py312, MockResponse::ok("Python 3.12.1\n"));
        let found = InterpreterLocator::with_roots(&runner, vec![temp.path().to_path_buf()])
            .discover();

        assert_eq!(found.len(), 2);
        let versions: Vec<&str> = found.iter().map(|i| i.version()).collect();
        assert_eq!(versions, vec!["Python 3.11.4", "Python 3.12.1"]);
    }

    #[test]
    fn failing_version_query_excludes_candidate_only() {
        let temp = TempDir::new().unwrap();
        let broken = launcher_in(temp.path(), "a-broken");
        let healthy = launcher_in(temp.path(), "b-healthy");
        let unlaunchable = launcher_in(temp.path(), "c-unlaunchable");
        create_fake_binary(&broken, "#!/bin/sh\n");
        create_fake_binary(&healthy, "#!/bin/sh\n");
        create_fake_binary(&unlaunchable, "#!/bin/sh\n");

        let runner = MockRunner::new()
            .when_program(&broken, MockResponse::fail(1, "fatal error"))
            .when_program(&healthy, MockResponse::ok("Python 3.10.0"));
        let found = InterpreterLocator::with_roots(&runner, vec![temp.path().to_path_buf()])
            .discover();

        assert_eq!(found.len(), 1);
        assert_eq!(found.first().unwrap().executable(), healthy.as_path());
        assert_eq!(runner.calls().len(), 3);
    }

    #[test]
    fn same_version_from_two_roots_keeps_both_paths() {
        let root_a = TempDir::new().unwrap();
        let root_b = TempDir::new().unwrap();
        let first = launcher_in(root_a.path(), "py");
        let second = launcher_in(root_b.path(), "py");
        create_fake_binary(&first, "#!/bin/sh\n");
        create_fake_binary(&second, "#!/bin/sh\n");

        let runner = MockRunner::new().otherwise(MockResponse::ok("Python 3.11.4"));
        let found = InterpreterLocator::with_roots(&runner, vec![root_a.path().to_path_buf()])
            .extra_roots(&[root_b.path().to_path_buf()])
            .discover();

        assert_eq!(found.len(), 2);
        assert_eq!(found.by_version()["Python 3.11.4"], second);
    }

    #[test]
    fn extra_roots_are_deduplicated() {
        let runner = MockRunner::new();
        let locator = InterpreterLocator::with_roots(&runner, vec![PathBuf::from("/a")])
            .extra_roots(&[PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(locator.roots(), &[PathBuf::from("/a"), PathBuf::from("/b")]);
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_launcher_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let launcher = launcher_in(temp.path(), "py");
        fs::create_dir_all(launcher.parent().unwrap()).unwrap();
        fs::write(&launcher, "not executable").unwrap();
        fs::set_permissions(&launcher, fs::Permissions::from_mode(0o644)).unwrap();

        let runner = MockRunner::new().otherwise(MockResponse::ok("Python 3.11.4"));
        let found = InterpreterLocator::with_roots(&runner, vec![temp.path().to_path_buf()])
            .discover();
        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn queries_real_launcher_scripts() {
        use crate::shell::SystemRunner;

        let temp = TempDir::new().unwrap();
        let launcher = launcher_in(temp.path(), "py39");
        create_fake_binary(&launcher, "#!/bin/sh\necho 'Python 3.9.18'\n");

        let found =
            InterpreterLocator::with_roots(&SystemRunner, vec![temp.path().to_path_buf()])
                .discover();

        assert_eq!(found.len(), 1);
        assert_eq!(found.first().unwrap().version(), "Python 3.9.18");
    }
}
