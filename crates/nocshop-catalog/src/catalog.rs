//! Ordered scan results.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::RepoInfo;

/// Scan results: repository identifier to [`RepoInfo`], in document order.
///
/// Entries that cannot be read as a [`RepoInfo`] do not fail the whole
/// document; they are kept aside as [`RejectedRepo`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    repos: Vec<(String, RepoInfo)>,
    rejected: Vec<RejectedRepo>,
}

/// A scan result entry that could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRepo {
    pub id: String,
    /// Why the entry was rejected (e.g. "invalid author format").
    pub reason: String,
}

/// Error type for loading scan results.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The scan result file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The scan result document is malformed.
    #[error("{0}")]
    Parse(String),
}

impl Catalog {
    /// Parse scan results from YAML content.
    ///
    /// Empty content returns an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or not a mapping. A
    /// malformed repository entry, such as an `authors` value that is
    /// neither a string nor a list of strings, only rejects that entry.
    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| CatalogError::Parse(format!("Invalid scan results YAML: {e}")))
    }

    /// Parse scan results from JSON content.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(content)
            .map_err(|e| CatalogError::Parse(format!("Invalid scan results JSON: {e}")))
    }

    /// Load scan results from a `.json`, `.yml` or `.yaml` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            repos = catalog.len(),
            rejected = catalog.rejected.len(),
            "Loaded scan results"
        );
        Ok(catalog)
    }

    /// Insert a repository, replacing an existing entry in place.
    pub fn insert(&mut self, id: impl Into<String>, info: RepoInfo) {
        let id = id.into();
        self.rejected.retain(|r| r.id != id);
        if let Some(slot) = self.repos.iter_mut().find(|(existing, _)| *existing == id) {
            slot.1 = info;
        } else {
            self.repos.push((id, info));
        }
    }

    /// Record an entry that could not be read, dropping any earlier value.
    pub fn reject(&mut self, id: impl Into<String>, reason: impl Into<String>) {
        let id = id.into();
        self.repos.retain(|(existing, _)| *existing != id);
        let reason = reason.into();
        if let Some(slot) = self.rejected.iter_mut().find(|r| r.id == id) {
            slot.reason = reason;
        } else {
            self.rejected.push(RejectedRepo { id, reason });
        }
    }

    /// Entries that could not be read, in document order.
    #[must_use]
    pub fn rejected(&self) -> &[RejectedRepo] {
        &self.rejected
    }

    /// Look up a repository by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RepoInfo> {
        self.repos
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, info)| info)
    }

    /// Iterate repositories in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RepoInfo)> {
        self.repos.iter().map(|(id, info)| (id.as_str(), info))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

impl FromIterator<(String, RepoInfo)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, RepoInfo)>>(iter: I) -> Self {
        let mut catalog = Self::default();
        for (id, info) in iter {
            catalog.insert(id, info);
        }
        catalog
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping of repository identifier to scan result")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Catalog, E> {
        Ok(Catalog::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Catalog, A::Error> {
        let mut catalog = Catalog {
            repos: Vec::with_capacity(map.size_hint().unwrap_or(0)),
            rejected: Vec::new(),
        };
        // Each entry is buffered first so one bad repository cannot abort
        // the rest of the document.
        while let Some((id, value)) = map.next_entry::<String, serde_yaml::Value>()? {
            match serde_yaml::from_value::<Option<RepoInfo>>(value) {
                Ok(info) => catalog.insert(id, info.unwrap_or_default()),
                Err(e) => {
                    tracing::warn!(repo = %id, error = %e, "Rejecting malformed scan result");
                    catalog.reject(id, e.to_string());
                }
            }
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(catalog: &Catalog) -> Vec<&str> {
        catalog.iter().map(|(id, _)| id).collect()
    }

    #[test]
    fn test_from_yaml_preserves_order() {
        let catalog = Catalog::from_yaml(
            r"
zeta: {}
alpha:
  manifest: {title: Alpha}
mid: ~
",
        )
        .unwrap();

        assert_eq!(ids(&catalog), vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            catalog.get("alpha").unwrap().manifest().title(),
            Some("Alpha")
        );
        assert_eq!(catalog.get("mid"), Some(&RepoInfo::default()));
    }

    #[test]
    fn test_from_json_preserves_order() {
        let catalog = Catalog::from_json(
            r#"{"uhd": {"manifest": {"title": "UHD Blocks"}}, "gr": {"manifest": null}}"#,
        )
        .unwrap();

        assert_eq!(ids(&catalog), vec!["uhd", "gr"]);
        assert!(catalog.get("gr").unwrap().manifest.is_none());
    }

    #[test]
    fn test_empty_documents() {
        assert!(Catalog::from_yaml("").unwrap().is_empty());
        assert!(Catalog::from_yaml("~").unwrap().is_empty());
        assert!(Catalog::from_json("  ").unwrap().is_empty());
        assert!(Catalog::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_authors_rejects_only_that_repo() {
        let catalog = Catalog::from_yaml(
            "good:\n  manifest: {title: Good}\nbad:\n  manifest: {authors: 42}\nlast: {}\n",
        )
        .unwrap();

        assert_eq!(ids(&catalog), vec!["good", "last"]);
        assert_eq!(catalog.get("good").unwrap().manifest().title(), Some("Good"));
        assert_eq!(catalog.get("bad"), None);
        assert_eq!(catalog.rejected().len(), 1);
        assert_eq!(catalog.rejected()[0].id, "bad");
        assert!(catalog.rejected()[0].reason.contains("invalid author format"));
    }

    #[test]
    fn test_invalid_authors_rejected_in_json() {
        let catalog = Catalog::from_json(
            r#"{"bad": {"manifest": {"authors": {"name": "A"}}}, "good": {}}"#,
        )
        .unwrap();

        assert_eq!(ids(&catalog), vec!["good"]);
        assert_eq!(catalog.rejected()[0].id, "bad");
        assert!(catalog.rejected()[0].reason.contains("invalid author format"));
    }

    #[test]
    fn test_numeric_scalars_read_as_text() {
        let catalog = Catalog::from_yaml(
            r"
uhd:
  manifest: {title: 2024, license: 3.0}
  rfnoc_blocks:
    - name: fft
      config: {brief: 1.5, hdl_license: true}
",
        )
        .unwrap();

        let repo = catalog.get("uhd").unwrap();
        assert_eq!(repo.manifest().title(), Some("2024"));
        assert_eq!(repo.manifest().license.as_deref(), Some("3.0"));
        let block = &repo.rfnoc_blocks[0];
        assert_eq!(block.description(), Some("1.5"));
        assert_eq!(block.hdl_license(repo.manifest()), Some("true"));
        assert!(catalog.rejected().is_empty());
    }

    #[test]
    fn test_reject_and_insert_replace_each_other() {
        let mut catalog = Catalog::default();
        catalog.insert("a", RepoInfo::default());
        catalog.reject("a", "broken");
        assert!(catalog.get("a").is_none());
        assert_eq!(catalog.rejected()[0].reason, "broken");

        catalog.insert("a", RepoInfo::default());
        assert!(catalog.get("a").is_some());
        assert!(catalog.rejected().is_empty());
    }

    #[test]
    fn test_not_a_mapping() {
        let err = Catalog::from_yaml("- uhd\n- gr\n").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut catalog: Catalog = [
            ("a".to_owned(), RepoInfo::default()),
            ("b".to_owned(), RepoInfo::default()),
        ]
        .into_iter()
        .collect();
        let replaced = RepoInfo {
            has_rfnoc: true,
            ..RepoInfo::default()
        };
        catalog.insert("a", replaced.clone());

        assert_eq!(ids(&catalog), vec!["a", "b"]);
        assert_eq!(catalog.get("a"), Some(&replaced));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("scan.json");
        std::fs::write(&json, r#"{"uhd": {}}"#).unwrap();
        let yaml = dir.path().join("scan.yml");
        std::fs::write(&yaml, "gr: {}\n").unwrap();

        assert_eq!(ids(&Catalog::load(&json).unwrap()), vec!["uhd"]);
        assert_eq!(ids(&Catalog::load(&yaml).unwrap()), vec!["gr"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/scan.yml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/scan.yml"));
    }
}
