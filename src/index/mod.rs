//! Catalog index: language → version → documentation records.
//!
//! The index is a nested ordered map, so exact lookups, range queries, and
//! ordered listing all come from `BTreeMap` traversal rather than any custom
//! tree plumbing. The index exclusively owns its records; it is rebuilt
//! wholesale on load and mutated only by inserts.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::version::VersionKey;

/// Intended reader experience level for a documentation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Newbie,
    Professional,
    Expert,
    Researcher,
    Contributor,
}

/// How deep the documentation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    Basic,
    Medium,
    High,
}

/// Explanation style of the documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Historical,
    Logical,
    General,
}

/// One documentation artifact's metadata.
///
/// The `file_path` references externally stored content, relative to the
/// catalog root; the record owns the path string, not the file's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRecord {
    /// User-supplied identifier; not unique on its own.
    pub file_name: String,
    pub version: VersionKey,
    /// Lower-cased when inserted into the index.
    pub language: String,
    /// Content file location relative to the catalog root.
    pub file_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Detail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl DocRecord {
    /// The stem of the content file name, used for file-name search.
    #[must_use]
    pub fn path_stem(&self) -> String {
        self.file_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Ordered mapping of language → version → insertion-ordered records.
///
/// Serialized transparently, so the persisted form is exactly the nested map
/// with version keys rendered as dotted strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    languages: BTreeMap<String, BTreeMap<VersionKey, Vec<DocRecord>>>,
}

impl Index {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its (language, version) key.
    ///
    /// The language is normalized to lower-case. Duplicate (file_name,
    /// version) pairs are permitted; records under one version keep
    /// insertion order.
    pub fn insert(&mut self, mut record: DocRecord) {
        record.language = record.language.to_lowercase();

        self.languages
            .entry(record.language.clone())
            .or_default()
            .entry(record.version)
            .or_default()
            .push(record);
    }

    /// Records stored under exactly (language, version).
    ///
    /// An unknown language or version yields an empty slice, not an error.
    #[must_use]
    pub fn lookup_exact(&self, language: &str, version: &VersionKey) -> &[DocRecord] {
        self.languages
            .get(&language.to_lowercase())
            .and_then(|versions| versions.get(version))
            .map_or(&[], Vec::as_slice)
    }

    /// Every record whose version is strictly below `max_version`, ascending
    /// by version and then insertion order.
    #[must_use]
    pub fn lookup_below<'a>(
        &'a self,
        language: &str,
        max_version: &VersionKey,
    ) -> Vec<(&'a VersionKey, &'a DocRecord)> {
        let Some(versions) = self.languages.get(&language.to_lowercase()) else {
            return Vec::new();
        };

        versions
            .range(..max_version)
            .flat_map(|(version, records)| records.iter().map(move |r| (version, r)))
            .collect()
    }

    /// Iterate every record: language ascending, then version ascending,
    /// then insertion order. Recomputed fresh on each call.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionKey, &DocRecord)> {
        self.languages.iter().flat_map(|(language, versions)| {
            versions.iter().flat_map(move |(version, records)| {
                records
                    .iter()
                    .map(move |record| (language.as_str(), version, record))
            })
        })
    }

    /// Total number of records across all languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file_name: &str, version: &str, language: &str) -> DocRecord {
        DocRecord {
            file_name: file_name.to_string(),
            version: version.parse().unwrap(),
            language: language.to_string(),
            file_path: PathBuf::from(format!("docs/{language}/{file_name}-{version}.md")),
            title: None,
            author: None,
            audience: None,
            detail: None,
            style: None,
            tags: vec![],
        }
    }

    #[test]
    fn insert_and_exact_lookup() {
        let mut index = Index::new();
        index.insert(record("guide", "1.0.0", "python"));

        let found = index.lookup_exact("python", &"1.0.0".parse().unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name, "guide");
    }

    #[test]
    fn lookup_normalizes_language_case() {
        let mut index = Index::new();
        index.insert(record("guide", "1.0.0", "Python"));

        assert_eq!(index.lookup_exact("python", &"1.0.0".parse().unwrap()).len(), 1);
        assert_eq!(index.lookup_exact("PYTHON", &"1.0.0".parse().unwrap()).len(), 1);
        assert_eq!(index.iter().next().unwrap().0, "python");
    }

    #[test]
    fn unknown_language_is_empty_not_error() {
        let index = Index::new();
        let bound = "1.0.0".parse().unwrap();

        assert!(index.lookup_exact("go", &bound).is_empty());
        assert!(index.lookup_below("go", &bound).is_empty());
    }

    #[test]
    fn duplicates_within_a_version_keep_insertion_order() {
        let mut index = Index::new();
        let mut first = record("guide", "1.0.0", "python");
        first.title = Some("first".to_string());
        let mut second = record("guide", "1.0.0", "python");
        second.title = Some("second".to_string());

        index.insert(first);
        index.insert(second);

        let found = index.lookup_exact("python", &"1.0.0".parse().unwrap());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].title.as_deref(), Some("first"));
        assert_eq!(found[1].title.as_deref(), Some("second"));
    }

    #[test]
    fn versions_listed_ascending_regardless_of_insertion_order() {
        let mut index = Index::new();
        index.insert(record("guide", "2.0.0", "python"));
        index.insert(record("guide", "1.0.0", "python"));
        index.insert(record("guide", "1.5.0", "python"));

        let versions: Vec<String> = index.iter().map(|(_, v, _)| v.to_string()).collect();
        assert_eq!(versions, ["1.0.0", "1.5.0", "2.0.0"]);
    }

    #[test]
    fn listing_orders_languages_then_versions() {
        let mut index = Index::new();
        index.insert(record("b", "1.0.0", "rust"));
        index.insert(record("a", "2.0.0", "python"));
        index.insert(record("a", "1.0.0", "python"));

        let keys: Vec<(String, String)> = index
            .iter()
            .map(|(l, v, _)| (l.to_string(), v.to_string()))
            .collect();
        assert_eq!(
            keys,
            [
                ("python".to_string(), "1.0.0".to_string()),
                ("python".to_string(), "2.0.0".to_string()),
                ("rust".to_string(), "1.0.0".to_string()),
            ]
        );
    }

    #[test]
    fn listing_twice_is_identical() {
        let mut index = Index::new();
        index.insert(record("guide", "2.0.0", "python"));
        index.insert(record("guide", "1.0.0", "python"));

        let first: Vec<_> = index.iter().map(|(l, v, r)| (l.to_string(), *v, r.clone())).collect();
        let second: Vec<_> = index.iter().map(|(l, v, r)| (l.to_string(), *v, r.clone())).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn lookup_below_is_strict() {
        let mut index = Index::new();
        index.insert(record("guide", "1.0.0", "python"));
        index.insert(record("guide", "2.0.0", "python"));
        index.insert(record("other", "1.5.0", "java"));

        let below: Vec<String> = index
            .lookup_below("python", &"2.0.0".parse().unwrap())
            .iter()
            .map(|(v, _)| v.to_string())
            .collect();
        assert_eq!(below, ["1.0.0"]);

        let java: Vec<String> = index
            .lookup_below("java", &"2.0.0".parse().unwrap())
            .iter()
            .map(|(v, _)| v.to_string())
            .collect();
        assert_eq!(java, ["1.5.0"]);

        assert!(index.lookup_below("go", &"1.0.0".parse().unwrap()).is_empty());
    }

    #[test]
    fn lookup_below_orders_ascending() {
        let mut index = Index::new();
        index.insert(record("guide", "0.3.0", "rust"));
        index.insert(record("guide", "0.1.0", "rust"));
        index.insert(record("guide", "0.2.0", "rust"));

        let versions: Vec<String> = index
            .lookup_below("rust", &"9.0.0".parse().unwrap())
            .iter()
            .map(|(v, _)| v.to_string())
            .collect();
        assert_eq!(versions, ["0.1.0", "0.2.0", "0.3.0"]);
    }

    #[test]
    fn len_counts_all_records() {
        let mut index = Index::new();
        assert!(index.is_empty());

        index.insert(record("a", "1.0.0", "python"));
        index.insert(record("b", "1.0.0", "python"));
        index.insert(record("c", "2.0.0", "java"));

        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }

    #[test]
    fn serializes_as_nested_map_with_version_strings() {
        let mut index = Index::new();
        index.insert(record("guide", "1.0.0", "python"));

        let json = serde_json::to_value(&index).unwrap();
        assert!(json.get("python").is_some());
        assert!(json["python"].get("1.0.0").is_some());
        assert_eq!(json["python"]["1.0.0"][0]["file_name"], "guide");
    }
}
