//! Local filesystem storage backend.

use std::fs;
use std::path::{Path, PathBuf};

use crate::index::Index;
use crate::storage::{StorageBackend, StorageError};

/// File name of the persisted index within the catalog root.
const INDEX_FILE: &str = "index.json";

/// Storage backend for local filesystem operations.
pub struct LocalStorageBackend {
    root: PathBuf,
}

impl LocalStorageBackend {
    /// Create a new local storage backend rooted at the given path.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read_index(&self) -> Result<Index, StorageError> {
        let path = self.index_path();

        if !path.exists() {
            return Ok(Index::new());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| StorageError::Read(format!("{}: {e}", path.display())))?;

        if contents.trim().is_empty() {
            return Ok(Index::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::CorruptIndex {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn write_index(&self, index: &Index) -> Result<(), StorageError> {
        let path = self.index_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Write(format!("create dir {}: {e}", parent.display()))
            })?;
        }

        let contents = serde_json::to_string_pretty(index)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        // Write to a sibling temp file and rename so a crash mid-write never
        // leaves a truncated index behind.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .map_err(|e| StorageError::Write(format!("{}: {e}", tmp_path.display())))?;

        fs::rename(&tmp_path, &path)
            .map_err(|e| StorageError::Write(format!("{}: {e}", path.display())))
    }

    fn write_document(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        let full_path = self.root.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Write(format!("create dir {}: {e}", parent.display()))
            })?;
        }

        fs::write(&full_path, content)
            .map_err(|e| StorageError::Write(format!("{}: {e}", full_path.display())))
    }

    fn document_exists(&self, path: &Path) -> bool {
        self.root.join(path).exists()
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
