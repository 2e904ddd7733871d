//! File node backed by the real filesystem.

use chrono::{DateTime, Utc};

use tanto_core::util::path;

use crate::error::TreeResult;
use crate::node::{File, Node};

use super::{generate_etag, modified_time, rename_leaf};

/// A regular file in the backing filesystem.
#[derive(Debug, Clone)]
pub struct FsFile {
    path: String,
}

impl FsFile {
    /// Creates a file node for an existing backing path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Node for FsFile {
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

    fn delete(&self) -> TreeResult<()> {
        std::fs::remove_file(&self.path)?;
        tracing::debug!(path = %self.path, "File deleted");
        Ok(())
    }

    fn as_file(&self) -> Option<&dyn File> {
        Some(self)
    }
}

impl File for FsFile {
    fn get(&self) -> TreeResult<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }

    fn put(&self, data: &[u8]) -> TreeResult<Option<String>> {
        std::fs::write(&self.path, data)?;
        tracing::debug!(path = %self.path, bytes = data.len(), "File updated");
        // Whole-buffer replace; stored bytes equal `data`.
        Ok(Some(generate_etag(data)))
    }

    fn size(&self) -> TreeResult<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    fn content_type(&self) -> Option<String> {
        let extension = self.name().rsplit_once('.').map(|(_, ext)| ext)?;
        match extension {
            "ics" => Some("text/calendar".to_string()),
            "vcf" => Some("text/vcard".to_string()),
            _ => None,
        }
    }
}
