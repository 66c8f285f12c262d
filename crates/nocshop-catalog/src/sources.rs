//! Per-repository source descriptors (`sources/<repo>.yml`).
//!
//! A source descriptor names the git URL to scan and may carry the same
//! metadata fields as a manifest. Those fields back-fill whatever the
//! repository's own manifest leaves blank.

use std::collections::BTreeMap;
use std::path::Path;

use crate::{Catalog, CatalogError, Manifest, RepoInfo};

/// Source descriptors keyed by repository identifier.
///
/// A descriptor that failed to parse is kept as `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sources {
    entries: BTreeMap<String, Option<Manifest>>,
}

impl Sources {
    /// Read every `*.yml` / `*.yaml` file in `dir`.
    ///
    /// The file stem is the repository identifier. Files that fail to parse
    /// are logged and recorded as absent. A missing directory yields an
    /// empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or one of its files cannot be read.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let io_err = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "No sources directory");
            return Ok(Self::default());
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml");
            if is_yaml && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut sources = Self::default();
        for path in paths {
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            let manifest = match parse_descriptor(&content) {
                Ok(manifest) => Some(manifest),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping invalid source descriptor");
                    None
                }
            };
            sources.entries.insert(id.to_owned(), manifest);
        }

        tracing::debug!(dir = %dir.display(), count = sources.len(), "Loaded source descriptors");
        Ok(sources)
    }

    /// Add or replace a descriptor.
    pub fn insert(&mut self, id: impl Into<String>, manifest: Option<Manifest>) {
        self.entries.insert(id.into(), manifest);
    }

    /// Descriptor for `id`, if present and valid.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Manifest> {
        self.entries.get(id).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return a copy of `catalog` with each manifest back-filled from the
    /// matching descriptor. Repository order is unchanged and rejected
    /// entries stay rejected.
    #[must_use]
    pub fn merge_into(&self, catalog: &Catalog) -> Catalog {
        for id in self.entries.keys() {
            if catalog.get(id).is_none() {
                tracing::debug!(repo = %id, "Source descriptor has no scan result");
            }
        }

        let mut merged: Catalog = catalog
            .iter()
            .map(|(id, info)| {
                let info = match self.get(id) {
                    Some(source) => RepoInfo {
                        manifest: Some(info.manifest().merged_with(source)),
                        ..info.clone()
                    },
                    None => info.clone(),
                };
                (id.to_owned(), info)
            })
            .collect();
        for rejected in catalog.rejected() {
            merged.reject(rejected.id.clone(), rejected.reason.clone());
        }
        merged
    }
}

/// Parse a descriptor; an empty file is an empty descriptor.
fn parse_descriptor(content: &str) -> Result<Manifest, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Manifest::default());
    }
    serde_yaml::from_str(content)
}
