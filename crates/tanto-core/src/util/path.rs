//! Path-segment utilities for resource tree paths.
//!
//! Tree paths use `/` as the separator regardless of platform. A node's
//! name is always the final segment of its path; the parent is re-derived
//! by splitting, never stored.

use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Splits a tree path into `(parent, leaf)`.
///
/// The parent of a single-segment path is the empty string. Trailing
/// slashes are ignored.
#[must_use]
pub fn split(path: &str) -> (&str, &str) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((parent, leaf)) => (parent, leaf),
        None => ("", trimmed),
    }
}

/// ## Summary
/// Returns the final segment of a tree path.
#[must_use]
pub fn leaf(path: &str) -> &str {
    split(path).1
}

/// ## Summary
/// Joins a parent path and a leaf segment.
///
/// An empty parent yields the bare leaf, so joining stays the inverse
/// of [`split`].
#[must_use]
pub fn join(parent: &str, leaf: &str) -> String {
    if parent.is_empty() {
        leaf.to_string()
    } else {
        format!("{}/{leaf}", parent.trim_end_matches('/'))
    }
}

/// ## Summary
/// Validates a single node name.
///
/// A name must be non-empty, must not contain a path separator, and must
/// not be one of the dot segments.
///
/// ## Errors
/// Returns [`CoreError::InvalidPath`] for names that would escape or
/// corrupt the tree structure.
pub fn validate_name(name: &str) -> CoreResult<()> {
    if name.is_empty() {
        return Err(CoreError::InvalidPath("empty node name".to_string()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CoreError::InvalidPath(format!(
            "node name contains a path separator: {name}"
        )));
    }
    if name == "." || name == ".." {
        return Err(CoreError::InvalidPath(format!(
            "dot segment is not a valid node name: {name}"
        )));
    }
    Ok(())
}

/// ## Summary
/// Splits a tree path into its non-empty segments.
///
/// Leading, trailing, and doubled slashes are collapsed.
#[must_use]
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
