//! Module → package catalog.
//!
//! The catalog answers "which distribution provides this import?". It is
//! built once from two layers:
//!
//! 1. the curated table shipped in [`curated`] (plus any configured extras)
//! 2. the full project list from a remote index ([`index`])
//!
//! Curated entries win on key collision, and every key is lowercase. A
//! failed index fetch leaves a curated-only catalog.
//!
//! # Example
//!
//! ```
//! use superpip::catalog::{Catalog, CatalogView, OfflineIndex};
//! use std::collections::BTreeMap;
//!
//! let catalog = Catalog::build(&OfflineIndex, &BTreeMap::new());
//! assert_eq!(catalog.resolve("sklearn"), "scikit-learn");
//! assert_eq!(catalog.resolve("SomethingElse"), "SomethingElse");
//! assert!(catalog.search(CatalogView::Curated, "zzz_nonexistent").unwrap().is_empty());
//! ```

pub mod curated;
pub mod index;
pub mod query;

pub use curated::CURATED;
pub use index::{parse_html_index, parse_json_index, HttpIndex, IndexSource, OfflineIndex};
pub use query::search;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Which enumerable list of the catalog to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogView {
    /// Curated modules, in shipped order.
    #[default]
    Curated,
    /// Every module key, sorted.
    Full,
}

/// Merged module → package lookup plus curated and full views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
    curated: Vec<String>,
    full: Vec<String>,
    fetched: usize,
}

impl Catalog {
    /// Build a catalog from the shipped curated table, `extra_curated`, and
    /// whatever `source` returns.
    ///
    /// A fetch error is logged and treated as an empty index.
    pub fn build(source: &dyn IndexSource, extra_curated: &BTreeMap<String, String>) -> Self {
        info!("Loading curated package list...");
        let projects = match source.fetch() {
            Ok(projects) => {
                info!("Retrieved {} packages from the index", projects.len());
                projects
            }
            Err(e) => {
                warn!("Error fetching package index: {:#}", e);
                Vec::new()
            }
        };

        let curated = CURATED
            .iter()
            .map(|(m, p)| (m.to_string(), p.to_string()))
            .chain(extra_curated.iter().map(|(m, p)| (m.clone(), p.clone())));

        Self::from_parts(curated, projects)
    }

    /// Catalog with the shipped curated table only.
    pub fn curated_only() -> Self {
        Self::build(&OfflineIndex, &BTreeMap::new())
    }

    /// Merge curated `(module, package)` pairs with index project names.
    ///
    /// Later curated pairs override earlier ones for the same module. A
    /// project's module key is its name up to the first `.`, lowercased;
    /// when several projects share a key the last one listed wins.
    pub fn from_parts<C, P>(curated: C, projects: P) -> Self
    where
        C: IntoIterator<Item = (String, String)>,
        P: IntoIterator<Item = String>,
    {
        let mut fetched_entries: HashMap<String, String> = HashMap::new();
        for project in projects {
            let key = module_key(&project);
            if key.is_empty() {
                continue;
            }
            fetched_entries.insert(key, project);
        }
        let fetched = fetched_entries.len();

        let mut curated_order = Vec::new();
        let mut curated_entries: HashMap<String, String> = HashMap::new();
        for (module, package) in curated {
            let key = module.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            if !curated_entries.contains_key(&key) {
                curated_order.push(key.clone());
            }
            curated_entries.insert(key, package);
        }

        let mut entries = fetched_entries;
        entries.extend(curated_entries);

        let mut full: Vec<String> = entries.keys().cloned().collect();
        full.sort();

        Self {
            entries,
            curated: curated_order,
            full,
            fetched,
        }
    }

    /// Package providing `module`, or `module` itself if unmapped.
    pub fn resolve<'a>(&'a self, module: &'a str) -> &'a str {
        self.get(module).unwrap_or(module)
    }

    /// Package providing `module`, if the catalog knows it.
    pub fn get(&self, module: &str) -> Option<&str> {
        self.entries
            .get(&module.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Module names in `view`.
    pub fn list_all(&self, view: CatalogView) -> &[String] {
        match view {
            CatalogView::Curated => &self.curated,
            CatalogView::Full => &self.full,
        }
    }

    /// Case-insensitive substring search over `view`.
    pub fn search(&self, view: CatalogView, query: &str) -> Result<Vec<String>> {
        search(self.list_all(view), query)
    }

    /// Number of distinct module keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of module keys that came from the index.
    pub fn fetched_count(&self) -> usize {
        self.fetched
    }
}

/// Module key for an index project name.
fn module_key(project: &str) -> String {
    project
        .trim()
        .split('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SuperpipError;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(m, p)| (m.to_string(), p.to_string()))
            .collect()
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn curated_wins_on_collision() {
        let catalog = Catalog::from_parts(
            pairs(&[("yaml", "pyyaml"), ("bs4", "beautifulsoup4")]),
            names(&["yaml", "bs4", "requests"]),
        );

        assert_eq!(catalog.resolve("yaml"), "pyyaml");
        assert_eq!(catalog.resolve("bs4"), "beautifulsoup4");
        assert_eq!(catalog.resolve("requests"), "requests");
    }

    #[test]
    fn shipped_curated_values_survive_conflicting_index() {
        let conflicting: Vec<String> = CURATED
            .iter()
            .map(|(module, _)| format!("{}.conflict", module))
            .collect();
        let source = move || -> anyhow::Result<Vec<String>> { Ok(conflicting.clone()) };
        let catalog = Catalog::build(&source, &BTreeMap::new());

        for (module, package) in CURATED {
            assert_eq!(catalog.resolve(module), *package);
        }
    }

    #[test]
    fn keys_are_lowercased() {
        let catalog = Catalog::from_parts(pairs(&[("PIL", "pillow")]), names(&["Flask"]));

        assert_eq!(catalog.get("pil"), Some("pillow"));
        assert_eq!(catalog.get("PIL"), Some("pillow"));
        assert_eq!(catalog.get("flask"), Some("Flask"));
        assert!(catalog.list_all(CatalogView::Full).iter().all(|k| *k == k.to_lowercase()));
    }

    #[test]
    fn differently_cased_curated_keys_collapse() {
        let catalog = Catalog::from_parts(pairs(&[("Foo", "foo-a"), ("foo", "foo-b")]), names(&[]));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.list_all(CatalogView::Curated), &["foo".to_string()]);
        assert_eq!(catalog.resolve("FOO"), "foo-b");
    }

    #[test]
    fn project_keys_truncate_at_dot() {
        let catalog = Catalog::from_parts(pairs(&[]), names(&["zope.interface", "ruamel.yaml"]));

        assert_eq!(catalog.get("zope"), Some("zope.interface"));
        assert_eq!(catalog.get("ruamel"), Some("ruamel.yaml"));
    }

    #[test]
    fn unmapped_module_resolves_to_itself_case_preserved() {
        let catalog = Catalog::from_parts(pairs(&[]), names(&[]));
        assert_eq!(catalog.resolve("MyModule"), "MyModule");
    }

    #[test]
    fn fetch_failure_degrades_to_curated_only() {
        let failing = || -> anyhow::Result<Vec<String>> { anyhow::bail!("network unreachable") };
        let catalog = Catalog::build(&failing, &BTreeMap::new());

        assert_eq!(catalog.fetched_count(), 0);
        assert_eq!(catalog.len(), CURATED.len());
        assert_eq!(catalog.list_all(CatalogView::Curated).len(), CURATED.len());
        assert_eq!(catalog.list_all(CatalogView::Full).len(), CURATED.len());
    }

    #[test]
    fn rebuilding_offline_is_idempotent() {
        let first = Catalog::curated_only();
        let second = Catalog::curated_only();
        assert_eq!(first, second);
    }

    #[test]
    fn curated_view_keeps_shipped_order_full_view_is_sorted() {
        let catalog = Catalog::curated_only();
        let curated = catalog.list_all(CatalogView::Curated);
        assert_eq!(curated[0], "numpy");
        assert_eq!(curated[1], "pandas");

        let full = catalog.list_all(CatalogView::Full);
        let mut sorted = full.to_vec();
        sorted.sort();
        assert_eq!(full, sorted.as_slice());
    }

    #[test]
    fn extra_curated_overrides_shipped_entry() {
        let mut extra = BTreeMap::new();
        extra.insert("cv2".to_string(), "opencv-python-headless".to_string());
        extra.insert("MyLib".to_string(), "my-lib".to_string());

        let catalog = Catalog::build(&OfflineIndex, &extra);

        assert_eq!(catalog.resolve("cv2"), "opencv-python-headless");
        assert_eq!(catalog.resolve("mylib"), "my-lib");
        let curated = catalog.list_all(CatalogView::Curated);
        assert_eq!(curated.last().map(String::as_str), Some("mylib"));
    }

    #[test]
    fn search_uses_selected_view() {
        let catalog = Catalog::from_parts(pairs(&[("numpy", "numpy")]), names(&["numpyro"]));

        assert_eq!(catalog.search(CatalogView::Curated, "num").unwrap(), vec!["numpy"]);
        assert_eq!(
            catalog.search(CatalogView::Full, "num").unwrap(),
            vec!["numpy", "numpyro"]
        );
        assert!(matches!(
            catalog.search(CatalogView::Full, ""),
            Err(SuperpipError::InvalidQuery)
        ));
    }
}
