//! Writes the index page and per-repository pages to disk.

use std::path::{Path, PathBuf};

use nocshop_catalog::{Catalog, RejectedRepo};

use crate::{DEFAULT_AUTOGEN_DIR, MarkdownUrlSanitizer, UrlSanitizer, render_index, render_repo_page};

/// Configuration for site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// File name of the index page inside the output directory.
    pub index_file: String,
    /// Sub-directory of the output directory holding repository pages.
    pub autogen_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            index_file: "index.md".to_owned(),
            autogen_dir: DEFAULT_AUTOGEN_DIR.to_owned(),
        }
    }
}

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Repository identifier {0:?} cannot be used as a page name")]
    InvalidRepoId(String),
}

/// Files written by a build.
#[derive(Debug)]
pub struct BuildSummary {
    pub index_path: PathBuf,
    /// Repository pages in catalog order.
    pub pages: Vec<PathBuf>,
    /// Scan results that could not be read and were left out.
    pub rejected: Vec<RejectedRepo>,
}

/// Renders a catalog into an output directory.
pub struct ShopBuilder {
    catalog: Catalog,
    config: BuildConfig,
    sanitizer: Box<dyn UrlSanitizer + Send + Sync>,
}

impl ShopBuilder {
    /// Create a builder using [`MarkdownUrlSanitizer`] for link labels.
    #[must_use]
    pub fn new(catalog: Catalog, config: BuildConfig) -> Self {
        Self {
            catalog,
            config,
            sanitizer: Box::new(MarkdownUrlSanitizer),
        }
    }

    /// Replace the link label sanitizer.
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: impl UrlSanitizer + Send + Sync + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    /// Write `<output_dir>/<index_file>` and `<output_dir>/<autogen_dir>/<id>.md`.
    ///
    /// All repository identifiers are checked before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an error on an unusable repository identifier or a failed write.
    pub fn build(&self, output_dir: &Path) -> Result<BuildSummary, BuildError> {
        if let Some((id, _)) = self.catalog.iter().find(|(id, _)| !is_valid_page_name(id)) {
            return Err(BuildError::InvalidRepoId(id.to_owned()));
        }

        for rejected in self.catalog.rejected() {
            tracing::warn!(repo = %rejected.id, reason = %rejected.reason, "Skipping repository");
        }

        let pages_dir = output_dir.join(&self.config.autogen_dir);
        create_dir_all(&pages_dir)?;

        let mut pages = Vec::with_capacity(self.catalog.len());
        for (id, repo) in self.catalog.iter() {
            if let Some(error) = &repo.error {
                tracing::warn!(repo = %id, %error, "Scanner reported an error");
            }
            let path = pages_dir.join(format!("{id}.md"));
            write(&path, &render_repo_page(repo, self.sanitizer.as_ref()))?;
            tracing::debug!(repo = %id, path = %path.display(), "Wrote repository page");
            pages.push(path);
        }

        let index_path = output_dir.join(&self.config.index_file);
        write(
            &index_path,
            &render_index(&self.catalog, &self.config.autogen_dir),
        )?;

        tracing::info!(
            pages = pages.len(),
            skipped = self.catalog.rejected().len(),
            index = %index_path.display(),
            "Generated NoC Shop pages"
        );

        Ok(BuildSummary {
            index_path,
            pages,
            rejected: self.catalog.rejected().to_vec(),
        })
    }
}

/// A repository identifier must be a single, non-empty path component.
fn is_valid_page_name(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

fn create_dir_all(path: &Path) -> Result<(), BuildError> {
    std::fs::create_dir_all(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<(), BuildError> {
    std::fs::write(path, content).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}
