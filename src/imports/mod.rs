//! Import statement extraction.
//!
//! A line-based scan that recognizes two statement shapes:
//!
//! - `import a[.b] [as x][, c[.d] [as y]]...`
//! - `from <module> import ...`
//!
//! Only the top-level package of each import is kept. Lines that match
//! neither shape are skipped. This is a heuristic, not a parser: imports
//! inside strings, continuation lines and conditional blocks are handled
//! only as far as the line shape allows.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Collect the top-level module names imported by `text`.
///
/// Case is preserved; duplicates collapse.
///
/// # Example
///
/// ```
/// let modules = superpip::imports::extract("import os\nfrom collections import OrderedDict\n");
/// assert!(modules.contains("os"));
/// assert!(modules.contains("collections"));
/// ```
pub fn extract(text: &str) -> BTreeSet<String> {
    let mut modules = BTreeSet::new();

    for raw in text.lines() {
        let line = strip_trailing(raw);
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("import ") {
            for clause in rest.split(',') {
                let dotted = clause.split_whitespace().next().unwrap_or_default();
                push_head(&mut modules, dotted);
            }
        } else if let Some(rest) = line.strip_prefix("from ") {
            let dotted = rest.split_whitespace().next().unwrap_or_default();
            push_head(&mut modules, dotted);
        }
    }

    tracing::debug!("Extracted {} modules", modules.len());
    modules
}

/// Read `path` and extract its imports.
pub fn extract_file(path: &Path) -> Result<BTreeSet<String>> {
    let text = fs::read_to_string(path)?;
    Ok(extract(&text))
}

/// Whether `name` is a plain identifier: a letter or `_` followed by
/// letters, digits or `_`.
pub fn is_valid_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Trim whitespace, a trailing `# comment`, and trailing `;`.
fn strip_trailing(line: &str) -> &str {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    line.trim().trim_end_matches(';').trim_end()
}

fn push_head(modules: &mut BTreeSet<String>, dotted: &str) {
    let head = dotted.split('.').next().unwrap_or_default();
    if is_valid_module_name(head) {
        modules.insert(head.to_string());
    }
}
