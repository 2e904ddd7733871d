//! Capability traits for resource tree nodes.
//!
//! A node is anything addressable by a tree path. Capabilities are
//! independent traits rather than an inheritance chain: a concrete type
//! implements [`Node`] plus whichever of [`Collection`], [`File`], and
//! [`crate::lock::Lockable`] it supports, and callers discover
//! capabilities at runtime through the `as_*` accessors.
//!
//! Nodes are constructed on demand from backing-store queries and are
//! never persisted themselves. All operations are synchronous wrappers
//! over backing I/O: a call may block indefinitely, and callers own any
//! timeout or cancellation policy.

use chrono::{DateTime, Utc};

use tanto_core::util::path;

use crate::error::{TreeError, TreeResult};
use crate::lock::Lockable;

/// Base operations available on every resource.
///
/// A node's name is the final segment of its path and never contains a
/// path separator. The parent is re-derived by splitting the path; a
/// node holds no reference to its parent.
pub trait Node {
    /// Returns the node's name (final path segment).
    fn name(&self) -> &str;

    /// Returns the node's full tree path.
    fn path(&self) -> &str;

    /// Renames the node within the same parent.
    ///
    /// Splits the current path into parent and leaf, renames the backing
    /// resource to `parent/new_name`, then updates internal path state.
    /// Cross-collection moves are a distinct operation and not part of
    /// this contract.
    ///
    /// ## Errors
    /// Fails with [`TreeError::InvalidName`] if `new_name` contains a
    /// separator, or with a backing error if the rename fails.
    fn set_name(&mut self, new_name: &str) -> TreeResult<()>;

    /// Returns the last modification time of the backing resource.
    ///
    /// ## Errors
    /// Fails if the backing store cannot be queried.
    fn last_modified(&self) -> TreeResult<DateTime<Utc>>;

    /// Deletes the backing resource.
    ///
    /// ## Errors
    /// Fails if the backing store refuses the deletion.
    fn delete(&self) -> TreeResult<()>;

    /// Returns the collection capability of this node, if any.
    fn as_collection(&self) -> Option<&dyn Collection> {
        None
    }

    /// Returns the file capability of this node, if any.
    fn as_file(&self) -> Option<&dyn File> {
        None
    }

    /// Returns the locking capability of this node, if any.
    fn as_lockable(&self) -> Option<&dyn Lockable> {
        None
    }
}

/// Capability for nodes that contain named children.
pub trait Collection: Node {
    /// Enumerates the children of this collection.
    ///
    /// Enumeration followed by per-child resolution is not
    /// transactionally consistent: concurrent mutation of the backing
    /// store can yield stale or missing entries.
    ///
    /// ## Errors
    /// Fails if the backing store cannot be enumerated.
    fn children(&self) -> TreeResult<Vec<Box<dyn Node>>>;

    /// Looks up a child by name.
    ///
    /// The provided default is a linear scan: it enumerates
    /// [`Collection::children`] and compares each child's name. Correct
    /// but O(n) - adapters with a native indexed lookup must override it.
    ///
    /// ## Errors
    /// Fails with [`TreeError::NotFound`] if no child has that name.
    fn child(&self, name: &str) -> TreeResult<Box<dyn Node>> {
        for child in self.children()? {
            if child.name() == name {
                return Ok(child);
            }
        }
        Err(TreeError::NotFound(path::join(self.path(), name)))
    }

    /// Returns whether a child with the given name exists.
    ///
    /// Never propagates an error: the default treats any failed lookup
    /// as absence. Adapters should override this with a direct existence
    /// probe instead of mirroring [`Collection::child`]'s failure path.
    fn child_exists(&self, name: &str) -> bool {
        self.child(name).is_ok()
    }

    /// Creates a file child with the given initial payload.
    ///
    /// Returns an ETag only when the stored bytes are guaranteed
    /// identical to `data` and cheap to hash; `None` otherwise. An ETag
    /// that might not match a subsequent read must never be returned.
    ///
    /// Mutation is opt-in: the default fails with
    /// [`TreeError::PermissionDenied`].
    ///
    /// ## Errors
    /// Fails with [`TreeError::PermissionDenied`] unless overridden.
    fn create_file(&self, name: &str, data: &[u8]) -> TreeResult<Option<String>> {
        let _ = data;
        Err(TreeError::PermissionDenied(format!(
            "{} does not allow creating file {name}",
            self.path()
        )))
    }

    /// Creates a directory child.
    ///
    /// Mutation is opt-in: the default fails with
    /// [`TreeError::PermissionDenied`].
    ///
    /// ## Errors
    /// Fails with [`TreeError::PermissionDenied`] unless overridden, or
    /// with [`TreeError::AlreadyExists`] if a child of that name exists.
    fn create_directory(&self, name: &str) -> TreeResult<()> {
        Err(TreeError::PermissionDenied(format!(
            "{} does not allow creating directory {name}",
            self.path()
        )))
    }
}

/// Capability for nodes with readable and writable content.
pub trait File: Node {
    /// Reads the full content of the backing object.
    ///
    /// ## Errors
    /// Fails if the backing store cannot be read.
    fn get(&self) -> TreeResult<Vec<u8>>;

    /// Replaces the content of the backing object.
    ///
    /// Same ETag policy as [`Collection::create_file`].
    ///
    /// ## Errors
    /// Fails if the backing store cannot be written.
    fn put(&self, data: &[u8]) -> TreeResult<Option<String>>;

    /// Returns the content size in bytes.
    ///
    /// ## Errors
    /// Fails if the backing store cannot be queried.
    fn size(&self) -> TreeResult<u64>;

    /// Returns the media type, if one can be derived.
    fn content_type(&self) -> Option<String> {
        None
    }
}
