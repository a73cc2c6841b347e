//! Catalog search.
//!
//! Case-insensitive substring match over module names. Ranking and
//! pagination are left to the caller.

use crate::error::{Result, SuperpipError};

/// Return every name in `names` containing `query`, preserving order.
///
/// # Errors
///
/// Returns `InvalidQuery` when `query` is empty or whitespace only.
pub fn search(names: &[String], query: &str) -> Result<Vec<String>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(SuperpipError::InvalidQuery);
    }

    let results: Vec<String> = names
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    tracing::debug!("Search for '{}' matched {} names", needle, results.len());
    Ok(results)
}
