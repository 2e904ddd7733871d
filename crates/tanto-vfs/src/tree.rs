//! Chained path resolution over a resource tree.
//!
//! The transport layer resolves a request path by walking `child` calls
//! from a root collection down to the target node. This module holds
//! that walk so every consumer normalizes paths the same way.

use tanto_core::util::path;

use crate::error::{TreeError, TreeResult};
use crate::node::{Collection, Node};

/// A resource tree rooted at one collection.
pub struct Tree<C: Collection> {
    root: C,
}

impl<C: Collection> Tree<C> {
    /// Creates a tree over the given root collection.
    #[must_use]
    pub fn new(root: C) -> Self {
        Self { root }
    }

    /// Returns the root collection.
    #[must_use]
    pub fn root(&self) -> &C {
        &self.root
    }

    /// Resolves a slash-separated path to a node.
    ///
    /// See [`resolve`].
    ///
    /// ## Errors
    /// Fails with [`TreeError::NotFound`] if any segment is absent and
    /// with [`TreeError::InvalidName`] for empty or dot-segment paths.
    pub fn node_for_path(&self, target: &str) -> TreeResult<Box<dyn Node>> {
        resolve(&self.root, target)
    }
}

/// ## Summary
/// Walks `target` from `root` by chained child lookups.
///
/// Empty segments (leading, trailing, doubled slashes) are collapsed.
/// Dot segments are refused rather than interpreted, so a path can never
/// escape the root. The root itself is not addressable here - the caller
/// already holds it, and an empty path is refused as invalid.
///
/// ## Errors
/// Fails with [`TreeError::InvalidName`] for empty or dot-segment paths,
/// with [`TreeError::NotFound`] if a segment is absent, and with
/// [`TreeError::NotFound`] if an intermediate segment is not a
/// collection.
pub fn resolve(root: &dyn Collection, target: &str) -> TreeResult<Box<dyn Node>> {
    let segments = path::segments(target);

    let Some((first, rest)) = segments.split_first() else {
        return Err(TreeError::InvalidName(
            "cannot resolve the empty path".to_string(),
        ));
    };
    for segment in &segments {
        path::validate_name(segment)?;
    }

    let mut node = root.child(first)?;
    for segment in rest {
        let Some(collection) = node.as_collection() else {
            return Err(TreeError::NotFound(path::join(node.path(), segment)));
        };
        node = collection.child(segment)?;
    }
    Ok(node)
}
