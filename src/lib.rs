//! superpip - find every Python on this machine and manage its packages.
//!
//! superpip discovers installed Python interpreters, maps import names to
//! the packages that provide them, checks which imports of a script are
//! missing, and runs pip install/uninstall batches with progress reporting
//! and cooperative cancellation.
//!
//! # Modules
//!
//! - [`catalog`] - Curated module → package table merged with the package index
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and merging
//! - [`engine`] - Facade tying discovery, catalog and batches together
//! - [`error`] - Error types and result aliases
//! - [`imports`] - Import statement extraction
//! - [`interpreter`] - Python interpreter discovery
//! - [`orchestrator`] - Probe, install and uninstall batches
//! - [`probe`] - Per-module installation probes
//! - [`shell`] - Process execution
//! - [`ui`] - Prompts, progress bars and terminal output
//!
//! # Example
//!
//! ```
//! use superpip::catalog::{Catalog, CatalogView};
//! use superpip::imports;
//!
//! let modules = imports::extract("import numpy as np\nfrom sklearn import svm\n");
//! let catalog = Catalog::curated_only();
//!
//! let packages: Vec<&str> = modules.iter().map(|m| catalog.resolve(m)).collect();
//! assert_eq!(packages, vec!["numpy", "scikit-learn"]);
//! assert!(catalog.search(CatalogView::Curated, "").is_err());
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod imports;
pub mod interpreter;
pub mod orchestrator;
pub mod probe;
pub mod shell;
pub mod ui;

pub use error::{Result, SuperpipError};
