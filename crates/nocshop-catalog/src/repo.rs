//! Per-repository scan result.

use std::path::PathBuf;

use serde::Deserialize;

use crate::Manifest;
use crate::serde_util::{null_as_default, optional_scalar, present_scalar, scalar};

/// Description shown for a block whose config has no `brief` key.
pub const DEFAULT_BLOCK_BRIEF: &str = "No description available";

/// Everything the scanner found in one repository.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RepoInfo {
    /// Parsed `manifest.yml`, if the repository has one.
    #[serde(default)]
    pub manifest: Option<Manifest>,
    /// RFNoC blocks in scan order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rfnoc_blocks: Vec<Block>,
    /// RFNoC modules in scan order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rfnoc_modules: Vec<Component>,
    /// RFNoC transport adapters in scan order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rfnoc_transport_adapters: Vec<Component>,
    /// Checkout location used by the scanner.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Leading part of the repository README.
    #[serde(default, deserialize_with = "optional_scalar")]
    pub readme: Option<String>,
    /// Whether the repository has an `rfnoc/` directory.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_rfnoc: bool,
    /// Error reported by the scanner for this repository.
    #[serde(default, deserialize_with = "optional_scalar")]
    pub error: Option<String>,
}

impl RepoInfo {
    /// The manifest, or an empty one.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        static EMPTY: Manifest = Manifest {
            title: None,
            brief: None,
            authors: None,
            license: None,
            hdl_license: None,
            url: None,
            source: None,
        };
        self.manifest.as_ref().unwrap_or(&EMPTY)
    }
}

/// An RFNoC block descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Block {
    /// Block identifier (descriptor file stem).
    #[serde(deserialize_with = "scalar")]
    pub name: String,
    /// Descriptor file.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Parsed descriptor.
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: BlockConfig,
}

/// The fields of a block descriptor used for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BlockConfig {
    #[serde(default, deserialize_with = "optional_scalar")]
    pub name: Option<String>,
    /// `None` when the key is missing, `Some(None)` when it is `null`.
    #[serde(default, deserialize_with = "present_scalar")]
    pub brief: Option<Option<String>>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub license: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub hdl_license: Option<String>,
}

impl Block {
    /// Display name: `config.name`, else the block identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.config.name.as_deref().unwrap_or(&self.name)
    }

    /// Description to append after the name.
    ///
    /// A missing `brief` key yields [`DEFAULT_BLOCK_BRIEF`]. A `brief` key
    /// that is present but `null` or empty yields no description at all.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match &self.config.brief {
            None => Some(DEFAULT_BLOCK_BRIEF),
            Some(brief) => brief.as_deref().filter(|s| !s.is_empty()),
        }
    }

    /// Software license: the block's own, else the manifest's.
    #[must_use]
    pub fn license<'a>(&'a self, manifest: &'a Manifest) -> Option<&'a str> {
        self.config
            .license
            .as_deref()
            .or(manifest.license.as_deref())
    }

    /// HDL license: the block's own, else the manifest's.
    #[must_use]
    pub fn hdl_license<'a>(&'a self, manifest: &'a Manifest) -> Option<&'a str> {
        self.config
            .hdl_license
            .as_deref()
            .or(manifest.hdl_license.as_deref())
    }
}

/// An RFNoC module or transport adapter.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Component {
    #[serde(deserialize_with = "scalar")]
    pub name: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Parsed descriptor, kept opaque.
    #[serde(default)]
    pub config: Option<serde_yaml::Value>,
}
