//! Markdown page rendering and site building for the NoC Shop.
//!
//! Renderers are pure functions of their input:
//! - [`render_index`]: the landing page listing every repository
//! - [`render_repo_page`]: the detail page of one repository
//!
//! [`ShopBuilder`] writes both kinds of pages to an output directory laid
//! out for a Sphinx/MyST documentation site.

mod builder;
mod index;
mod repo_page;
mod sanitize;

pub use builder::{BuildConfig, BuildError, BuildSummary, ShopBuilder};
pub use index::{DEFAULT_AUTOGEN_DIR, INDEX_TITLE, render_index};
pub use repo_page::render_repo_page;
pub use sanitize::{IdentitySanitizer, MarkdownUrlSanitizer, UrlSanitizer};
