//! Scan result and manifest model for the NoC Shop generator.
//!
//! This crate provides:
//! - [`Catalog`]: ordered mapping of repository identifier to [`RepoInfo`],
//!   as produced by the external repository scanner
//! - [`Manifest`] and [`Authors`]: repository metadata
//! - [`Sources`]: per-repository source descriptors used to back-fill
//!   manifest fields
//!
//! Every manifest field is optional. The model distinguishes two notions of
//! missing data:
//! - *absent*: key missing or `null`; defaults and fallbacks apply
//! - *blank*: absent or an empty string; conditional output is skipped

mod catalog;
mod manifest;
mod repo;
mod serde_util;
mod sources;

pub use catalog::{Catalog, CatalogError, RejectedRepo};
pub use manifest::{Authors, Manifest};
pub use repo::{Block, BlockConfig, Component, DEFAULT_BLOCK_BRIEF, RepoInfo};
pub use sources::Sources;

/// Return `value` unless it is absent or empty.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
