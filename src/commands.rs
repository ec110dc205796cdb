//! Command implementations backing the CLI.
//!
//! Each command loads the configuration, opens the catalog at the configured
//! root, and delegates to [`Catalog`]. Results come back as owned
//! [`RecordInfo`] values with absolute content paths, ready for display.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;

use crate::catalog::{AddRequest, Catalog};
use crate::config::Config;
use crate::index::DocRecord;
use crate::storage::StorageBackend;
use crate::storage::local::LocalStorageBackend;

/// Information about a catalog record with its resolved content path.
#[derive(Debug, Clone)]
pub struct RecordInfo {
    pub file_name: String,
    pub language: String,
    pub version: String,
    pub title: Option<String>,
    pub tags: Vec<String>,
    /// Absolute path to the content file.
    pub path: PathBuf,
}

impl RecordInfo {
    fn from_record(root: &std::path::Path, record: &DocRecord) -> Self {
        Self {
            file_name: record.file_name.clone(),
            language: record.language.clone(),
            version: record.version.to_string(),
            title: record.title.clone(),
            tags: record.tags.clone(),
            path: root.join(&record.file_path),
        }
    }
}

fn open_catalog() -> anyhow::Result<(Catalog<LocalStorageBackend>, PathBuf)> {
    let config = Config::load()?;
    let storage = LocalStorageBackend::new(config.catalog_root());
    let root = storage.root().to_path_buf();

    let catalog = Catalog::open(storage)
        .with_context(|| format!("Failed to open catalog at {}", root.display()))?;

    Ok((catalog, root))
}

/// Resolve document content from an inline argument, a file, or stdin.
///
/// # Errors
///
/// Returns an error if the content file cannot be read or stdin fails.
pub fn read_content(content: Option<String>, file: Option<String>) -> anyhow::Result<String> {
    if let Some(content) = content {
        return Ok(content);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {path}"));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read content from stdin")?;
    Ok(buffer)
}

/// Parse comma-separated tags into a vector.
///
/// Splits the input on commas, trims whitespace, and filters out empty
/// strings. Does not validate tag format - the catalog validates on add.
#[must_use]
pub fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Record a new documentation artifact in the catalog.
///
/// # Errors
///
/// Returns an error if config loading fails, the version or metadata is
/// invalid, or the content/index writes fail. Nothing is partially applied.
pub fn add(request: AddRequest) -> anyhow::Result<RecordInfo> {
    let (mut catalog, root) = open_catalog()?;

    let record = catalog.add(request)?;
    Ok(RecordInfo::from_record(&root, &record))
}

/// Exact (language, version) lookup filtered by file name, with an optional
/// fuzzy title filter.
///
/// # Errors
///
/// Returns an error if config loading fails, the catalog cannot be opened,
/// or the version string is malformed.
pub fn search(
    file_name: &str,
    version: &str,
    language: &str,
    title: Option<&str>,
) -> anyhow::Result<Vec<RecordInfo>> {
    let (catalog, root) = open_catalog()?;

    let results = catalog
        .search(file_name, version, language, title)?
        .into_iter()
        .map(|record| RecordInfo::from_record(&root, record))
        .collect();

    Ok(results)
}

/// All records for a language strictly below a version bound, with an
/// optional fuzzy title filter.
///
/// # Errors
///
/// Returns an error if config loading fails, the catalog cannot be opened,
/// or the bound is malformed.
pub fn search_range(
    language: &str,
    max_version: &str,
    title: Option<&str>,
) -> anyhow::Result<Vec<RecordInfo>> {
    let (catalog, root) = open_catalog()?;

    let results = catalog
        .search_range(language, max_version, title)?
        .into_iter()
        .map(|(_, record)| RecordInfo::from_record(&root, record))
        .collect();

    Ok(results)
}

/// List every record in the catalog in deterministic order.
///
/// # Errors
///
/// Returns an error if config loading fails or the catalog cannot be opened.
pub fn list() -> anyhow::Result<Vec<RecordInfo>> {
    let (catalog, root) = open_catalog()?;

    let records = catalog
        .list()
        .map(|(_, _, record)| RecordInfo::from_record(&root, record))
        .collect();

    Ok(records)
}
