//! CLI error types.

use nocshop_catalog::CatalogError;
use nocshop_config::ConfigError;
use nocshop_render::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Build(#[from] BuildError),
}
