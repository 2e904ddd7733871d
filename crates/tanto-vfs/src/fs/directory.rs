//! Directory node backed by the real filesystem.

use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};

use tanto_core::config::Settings;
use tanto_core::util::path;

use crate::error::{TreeError, TreeResult};
use crate::node::{Collection, Node};

use super::file::FsFile;
use super::{generate_etag, modified_time, rename_leaf};

/// A directory in the backing filesystem, exposed as a collection node.
#[derive(Debug, Clone)]
pub struct FsDirectory {
    path: String,
}

impl FsDirectory {
    /// Creates a directory node for an existing backing path.
    ///
    /// The path is not probed here; nodes are built on demand from
    /// backing-store queries that already saw the entry.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the storage root named by the settings, creating it if it
    /// does not exist yet.
    ///
    /// ## Errors
    /// Fails if the root directory cannot be created.
    pub fn from_settings(settings: &Settings) -> TreeResult<Self> {
        let root = settings.storage.root.to_string_lossy().into_owned();
        std::fs::create_dir_all(&root)?;
        Ok(Self::new(root))
    }

    /// ## Summary
    /// Returns `(used, free)` bytes for the filesystem backing this
    /// directory, with `used = total - free`.
    ///
    /// Both figures are read fresh from the backing store on every call
    /// rather than tracked incrementally, so they are approximate under
    /// concurrent writers.
    ///
    /// ## Errors
    /// Fails if the backing store cannot report space usage.
    pub fn quota_info(&self) -> TreeResult<(u64, u64)> {
        let total = fs2::total_space(&self.path)?;
        let free = fs2::available_space(&self.path)?;
        Ok((total.saturating_sub(free), free))
    }

    /// Builds the node for one backing entry.
    fn node_for(child_path: String, is_dir: bool) -> Box<dyn Node> {
        if is_dir {
            Box::new(Self::new(child_path))
        } else {
            Box::new(FsFile::new(child_path))
        }
    }
}

impl Node for FsDirectory {
    fn name(&self) -> &str {
        path::leaf(&self.path)
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn set_name(&mut self, new_name: &str) -> TreeResult<()> {
        rename_leaf(&mut self.path, new_name)
    }

    fn last_modified(&self) -> TreeResult<DateTime<Utc>> {
        modified_time(&self.path)
    }

    /// Depth-first: all children are deleted before the directory
    /// itself, because the backing store refuses to remove a non-empty
    /// directory.
    fn delete(&self) -> TreeResult<()> {
        for child in self.children()? {
            child.delete()?;
        }
        std::fs::remove_dir(&self.path)?;
        tracing::debug!(path = %self.path, "Directory deleted");
        Ok(())
    }

    fn as_collection(&self) -> Option<&dyn Collection> {
        Some(self)
    }
}

impl Collection for FsDirectory {
    fn children(&self) -> TreeResult<Vec<Box<dyn Node>>> {
        // read_dir already excludes the self/parent markers
        let mut nodes: Vec<Box<dyn Node>> = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let child_path = path::join(&self.path, &name);
            nodes.push(Self::node_for(child_path, entry.file_type()?.is_dir()));
        }
        Ok(nodes)
    }

    /// Single stat on the joined path instead of the linear-scan default.
    fn child(&self, name: &str) -> TreeResult<Box<dyn Node>> {
        path::validate_name(name)?;
        let child_path = path::join(&self.path, name);
        match std::fs::metadata(&child_path) {
            Ok(meta) => Ok(Self::node_for(child_path, meta.is_dir())),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(TreeError::NotFound(child_path)),
            Err(err) => Err(err.into()),
        }
    }

    /// Direct existence probe; no lookup error path involved.
    fn child_exists(&self, name: &str) -> bool {
        if path::validate_name(name).is_err() {
            return false;
        }
        Path::new(&path::join(&self.path, name))
            .try_exists()
            .unwrap_or(false)
    }

    fn create_file(&self, name: &str, data: &[u8]) -> TreeResult<Option<String>> {
        path::validate_name(name)?;
        let child_path = path::join(&self.path, name);
        std::fs::write(&child_path, data)?;
        tracing::debug!(path = %child_path, bytes = data.len(), "File created");
        // The whole buffer went down in one write, so the stored bytes
        // are exactly `data` and the hash is safe to hand out.
        Ok(Some(generate_etag(data)))
    }

    fn create_directory(&self, name: &str) -> TreeResult<()> {
        path::validate_name(name)?;
        let child_path = path::join(&self.path, name);
        match std::fs::create_dir(&child_path) {
            Ok(()) => {
                tracing::debug!(path = %child_path, "Directory created");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                Err(TreeError::AlreadyExists(child_path))
            }
            Err(err) => Err(err.into()),
        }
    }
}
