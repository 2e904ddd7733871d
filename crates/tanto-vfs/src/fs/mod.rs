//! Filesystem-backed reference implementation of the resource tree.
//!
//! [`FsDirectory`] and [`FsFile`] map tree nodes onto a real hierarchical
//! store. Paths use `/` separators and are handed to the platform as-is.
//! These nodes are Collection/File-capable but not lockable; lock support
//! is layered on by whoever composes the tree.

mod directory;
mod etag;
mod file;

pub use directory::FsDirectory;
pub use etag::generate_etag;
pub use file::FsFile;

use chrono::{DateTime, Utc};

use tanto_core::util::path;

use crate::error::TreeResult;

/// Renames the leaf segment of `path` in the backing store and updates
/// the stored path, keeping the same parent.
///
/// A path-shaped new name is reduced to its final segment: renaming is
/// always within the current parent, never a move.
pub(crate) fn rename_leaf(path: &mut String, new_name: &str) -> TreeResult<()> {
    let leaf = path::leaf(new_name);
    path::validate_name(leaf)?;
    let (parent, _) = path::split(path);
    let new_path = path::join(parent, leaf);
    std::fs::rename(&*path, &new_path)?;
    tracing::debug!(from = %path, to = %new_path, "Renamed");
    *path = new_path;
    Ok(())
}

/// Reads the backing modification time as a UTC timestamp.
pub(crate) fn modified_time(path: &str) -> TreeResult<DateTime<Utc>> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}
