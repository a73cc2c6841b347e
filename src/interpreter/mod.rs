//! Python interpreter discovery.
//!
//! - [`locator`] - scans install roots and queries candidate versions
//!
//! An [`Interpreter`] is identified by its executable path. Several installs
//! may report the same version string; [`InterpreterSet`] keeps all of them
//! and only collapses duplicates in the [`InterpreterSet::by_version`] view.

pub mod locator;

pub use locator::{default_roots, is_executable, InterpreterLocator, PlatformFamily};

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)+").unwrap());

/// A discovered interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpreter {
    version: String,
    executable: PathBuf,
}

impl Interpreter {
    /// Create an interpreter record.
    ///
    /// `version` is the trimmed output of `--version`, e.g. `Python 3.11.4`.
    pub fn new(version: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
        Self {
            version: version.into().trim().to_string(),
            executable: executable.into(),
        }
    }

    /// Version string as reported by the interpreter.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Path of the launcher.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Dotted numeric version, e.g. `3.11.4`.
    pub fn version_number(&self) -> Option<&str> {
        VERSION_RE.find(&self.version).map(|m| m.as_str())
    }
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.executable.display())
    }
}

/// Interpreters from one discovery pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InterpreterSet {
    items: Vec<Interpreter>,
}

impl InterpreterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interpreter; returns `false` if its path was already present.
    pub fn insert(&mut self, interpreter: Interpreter) -> bool {
        if self.get(interpreter.executable()).is_some() {
            return false;
        }
        self.items.push(interpreter);
        true
    }

    /// Look up by executable path.
    pub fn get(&self, executable: &Path) -> Option<&Interpreter> {
        self.items.iter().find(|i| i.executable() == executable)
    }

    /// Find an interpreter by path, exact version string, or version number.
    ///
    /// Version matches pick the last discovered interpreter, consistent with
    /// [`Self::by_version`]. A version prefix such as `3.11` matches
    /// `3.11.4`.
    pub fn find(&self, selector: &str) -> Option<&Interpreter> {
        if let Some(found) = self.get(Path::new(selector)) {
            return Some(found);
        }
        self.items.iter().rev().find(|i| {
            i.version() == selector
                || i.version_number().is_some_and(|n| {
                    n == selector || n.starts_with(&format!("{}.", selector))
                })
        })
    }

    /// Display mapping keyed by version string.
    ///
    /// When two installs report the same version string the one discovered
    /// later wins.
    pub fn by_version(&self) -> BTreeMap<String, PathBuf> {
        let mut map = BTreeMap::new();
        for interpreter in &self.items {
            map.insert(
                interpreter.version().to_string(),
                interpreter.executable().to_path_buf(),
            );
        }
        map
    }

    /// First discovered interpreter.
    pub fn first(&self) -> Option<&Interpreter> {
        self.items.first()
    }

    /// Iterate in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interpreter> {
        self.items.iter()
    }

    /// Number of interpreters.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether discovery found nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Interpreter> for InterpreterSet {
    fn from_iter<T: IntoIterator<Item = Interpreter>>(iter: T) -> Self {
        let mut set = Self::new();
        for interpreter in iter {
            set.insert(interpreter);
        }
        set
    }
}

impl<'a> IntoIterator for &'a InterpreterSet {
    type Item = &'a Interpreter;
    type IntoIter = std::slice::Iter<'a, Interpreter>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InterpreterSet {
        [
            Interpreter::new("Python 3.11.4", "/usr/bin/py311/python3"),
            Interpreter::new("Python 3.12.1", "/usr/local/bin/py312/python3"),
            Interpreter::new("Python 3.11.4", "/opt/py311/python3"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn version_is_trimmed() {
        let interp = Interpreter::new("  Python 3.10.2\n", "/x/python3");
        assert_eq!(interp.version(), "Python 3.10.2");
    }

    #[test]
    fn version_number_extracts_dotted_digits() {
        let interp = Interpreter::new("Python 3.11.4", "/x/python3");
        assert_eq!(interp.version_number(), Some("3.11.4"));

        let odd = Interpreter::new("unknown build", "/x/python3");
        assert_eq!(odd.version_number(), None);
    }

    #[test]
    fn identity_is_the_executable_path() {
        let mut set = InterpreterSet::new();
        assert!(set.insert(Interpreter::new("Python 3.11.4", "/a/python3")));
        assert!(set.insert(Interpreter::new("Python 3.11.4", "/b/python3")));
        assert!(!set.insert(Interpreter::new("Python 3.12.0", "/a/python3")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn by_version_is_last_write_wins() {
        let set = sample();
        let map = set.by_version();

        assert_eq!(map.len(), 2);
        assert_eq!(map["Python 3.11.4"], PathBuf::from("/opt/py311/python3"));
        assert_eq!(
            map["Python 3.12.1"],
            PathBuf::from("/usr/local/bin/py312/python3")
        );
    }

    #[test]
    fn find_by_path_version_and_prefix() {
        let set = sample();

        let by_path = set.find("/usr/bin/py311/python3").unwrap();
        assert_eq!(by_path.executable(), Path::new("/usr/bin/py311/python3"));

        let by_version = set.find("Python 3.11.4").unwrap();
        assert_eq!(by_version.executable(), Path::new("/opt/py311/python3"));

        let by_prefix = set.find("3.12").unwrap();
        assert_eq!(by_prefix.version(), "Python 3.12.1");

        assert!(set.find("3.1").is_none());
        assert!(set.find("2.7").is_none());
    }

    #[test]
    fn display_shows_version_and_path() {
        let interp = Interpreter::new("Python 3.9.0", "/x/python3");
        let shown = interp.to_string();
        assert!(shown.contains("Python 3.9.0"));
        assert!(shown.contains("/x/python3"));
    }

    #[test]
    fn empty_set() {
        let set = InterpreterSet::new();
        assert!(set.is_empty());
        assert!(set.first().is_none());
        assert!(set.by_version().is_empty());
    }
}
