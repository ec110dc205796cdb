//! Storage backend trait and implementations.
//!
//! This module provides an abstraction for persisting the catalog index and
//! document content files, allowing docdex to work with different storage
//! backends (local filesystem today, remote stores later).

pub mod local;

use std::path::Path;

use crate::index::Index;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read: {0}")]
    Read(String),

    #[error("Failed to write: {0}")]
    Write(String),

    #[error("Corrupt index at {path}: {reason}")]
    CorruptIndex { path: String, reason: String },

    #[error("Failed to serialize index: {0}")]
    Serialize(String),
}

/// Trait for storage backends (local filesystem, S3, database, etc.).
pub trait StorageBackend: Send + Sync {
    /// Read the persisted index from the storage root.
    ///
    /// A missing or empty store yields an empty [`Index`], not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the index file exists but cannot be
    /// read, or [`StorageError::CorruptIndex`] if its contents are not a
    /// valid index.
    fn read_index(&self) -> Result<Index, StorageError>;

    /// Persist the index durably.
    ///
    /// Implementations must be atomic with respect to process crash: a
    /// failed write leaves the previously persisted index intact.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the index cannot be serialized or written.
    fn write_index(&self, index: &Index) -> Result<(), StorageError>;

    /// Write a document's content, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    fn write_document(&self, path: &Path, content: &str) -> Result<(), StorageError>;

    /// Check if a document exists in storage.
    fn document_exists(&self, path: &Path) -> bool;

    /// Get the root path/identifier for this storage backend.
    fn root(&self) -> &Path;
}
