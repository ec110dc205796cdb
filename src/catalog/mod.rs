//! Catalog service composing the index, storage, and fuzzy matching.
//!
//! A [`Catalog`] owns one [`Index`] instance loaded from its storage backend
//! at construction time. All mutation goes through [`Catalog::add`], which
//! persists the index before the in-memory copy is committed, so the two
//! never diverge on failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::index::{Audience, Detail, DocRecord, Index, Style};
use crate::matcher::{self, DEFAULT_FUZZY_THRESHOLD};
use crate::storage::{StorageBackend, StorageError};
use crate::version::{MalformedVersion, VersionKey};

/// Maximum length for user-provided strings (file name, title, etc.).
const MAX_INPUT_LENGTH: usize = 200;

/// Errors surfaced by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Version(#[from] MalformedVersion),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{0}")]
    InvalidInput(String),
}

/// Inputs for [`Catalog::add`].
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub file_name: String,
    pub version: String,
    pub language: String,
    pub content: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub audience: Option<Audience>,
    pub detail: Option<Detail>,
    pub style: Option<Style>,
    pub tags: Vec<String>,
}

/// The catalog: an index plus the storage backend it is persisted through.
pub struct Catalog<S: StorageBackend> {
    storage: S,
    index: Index,
}

impl<S: StorageBackend> Catalog<S> {
    /// Load the persisted index and wrap it with its storage backend.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the persisted index exists but cannot be
    /// read or parsed. A missing index is an empty catalog.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let index = storage.read_index()?;
        Ok(Self { storage, index })
    }

    /// Record a new documentation artifact.
    ///
    /// Writes the content file, then persists the updated index atomically
    /// before committing it in memory. Re-adding the same (file name,
    /// version, language) overwrites the content file and appends another
    /// index record.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Version` on a malformed version string,
    /// `CatalogError::InvalidInput` on empty or unsafe fields, and
    /// `CatalogError::Storage` if writing the content or index fails; in
    /// every case the in-memory and persisted index keep their prior state.
    pub fn add(&mut self, request: AddRequest) -> Result<DocRecord, CatalogError> {
        let version: VersionKey = request.version.parse()?;

        // Validate everything before touching the filesystem.
        if request.file_name.is_empty() {
            return Err(CatalogError::InvalidInput(
                "File name cannot be empty".to_string(),
            ));
        }
        if request.file_name.len() > MAX_INPUT_LENGTH {
            return Err(CatalogError::InvalidInput(format!(
                "File name too long: {} chars (max {MAX_INPUT_LENGTH})",
                request.file_name.len()
            )));
        }

        let slug = slugify(&request.file_name);
        if slug.is_empty() {
            return Err(CatalogError::InvalidInput(format!(
                "File name '{}' has no usable characters",
                request.file_name
            )));
        }

        let language = request.language.to_lowercase();
        validate_identifier(&language, "Language")?;

        for tag in &request.tags {
            validate_identifier(tag, "Tag")?;
        }

        if request.content.trim().is_empty() {
            return Err(CatalogError::InvalidInput(
                "Content cannot be empty".to_string(),
            ));
        }

        let file_path = PathBuf::from("docs")
            .join(&language)
            .join(format!("{slug}-{version}.md"));

        let record = DocRecord {
            file_name: request.file_name,
            version,
            language,
            file_path: file_path.clone(),
            title: request.title,
            author: request.author,
            audience: request.audience,
            detail: request.detail,
            style: request.style,
            tags: request.tags,
        };

        self.storage.write_document(&file_path, &request.content)?;

        // Stage the insert, persist, then commit. A failed persist leaves
        // the in-memory index matching the on-disk one.
        let mut staged = self.index.clone();
        staged.insert(record.clone());
        self.storage.write_index(&staged)?;
        self.index = staged;

        Ok(record)
    }

    /// Exact (language, version) lookup filtered by file name.
    ///
    /// A record matches when its stored file name equals `file_name` or its
    /// content path stem contains it. An empty result is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Version` on a malformed version string.
    pub fn search(
        &self,
        file_name: &str,
        version: &str,
        language: &str,
        title: Option<&str>,
    ) -> Result<Vec<&DocRecord>, CatalogError> {
        let version: VersionKey = version.parse()?;
        let needle = file_name.to_lowercase();

        let results = self
            .index
            .lookup_exact(language, &version)
            .iter()
            .filter(|record| {
                record.file_name == file_name || record.path_stem().contains(&needle)
            })
            .filter(|record| title.is_none_or(|query| title_matches(record, query)))
            .collect();

        Ok(results)
    }

    /// Every record for `language` with version strictly below `max_version`,
    /// ascending by version then insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Version` on a malformed version string.
    pub fn search_range(
        &self,
        language: &str,
        max_version: &str,
        title: Option<&str>,
    ) -> Result<Vec<(&VersionKey, &DocRecord)>, CatalogError> {
        let bound: VersionKey = max_version.parse()?;

        let results = self
            .index
            .lookup_below(language, &bound)
            .into_iter()
            .filter(|(_, record)| title.is_none_or(|query| title_matches(record, query)))
            .collect();

        Ok(results)
    }

    /// Iterate every record: language ascending, version ascending, then
    /// insertion order.
    pub fn list(&self) -> impl Iterator<Item = (&str, &VersionKey, &DocRecord)> {
        self.index.iter()
    }
}

/// Fuzzy-match a record's title, falling back to its content path stem for
/// untitled records.
fn title_matches(record: &DocRecord, query: &str) -> bool {
    match &record.title {
        Some(title) => matcher::matches(title, query, DEFAULT_FUZZY_THRESHOLD),
        None => matcher::matches(&record.path_stem(), query, DEFAULT_FUZZY_THRESHOLD),
    }
}

/// Validate a user-provided identifier (language, tag).
///
/// Allows alphanumerics, hyphens, underscores, and the `+`/`#` that appear
/// in language names like `c++` and `c#`.
fn validate_identifier(value: &str, field_name: &str) -> Result<(), CatalogError> {
    if value.is_empty() {
        return Err(CatalogError::InvalidInput(format!(
            "{field_name} cannot be empty"
        )));
    }

    if value.len() > MAX_INPUT_LENGTH {
        return Err(CatalogError::InvalidInput(format!(
            "{field_name} too long: {} chars (max {MAX_INPUT_LENGTH})",
            value.len()
        )));
    }

    if !value.chars().next().is_some_and(char::is_alphanumeric) {
        return Err(CatalogError::InvalidInput(format!(
            "{field_name} must start with a letter or number"
        )));
    }

    for c in value.chars() {
        if !c.is_alphanumeric() && c != '-' && c != '_' && c != '+' && c != '#' {
            return Err(CatalogError::InvalidInput(format!(
                "{field_name} contains invalid character: '{c}' \
                (only letters, numbers, hyphens, underscores, '+' and '#' allowed)"
            )));
        }
    }

    Ok(())
}

/// Convert a file name to a path-safe slug.
fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
