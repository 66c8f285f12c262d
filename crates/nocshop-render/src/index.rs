//! Landing page listing every repository.

use std::fmt::Write;

use nocshop_catalog::Catalog;

/// Heading of the landing page.
pub const INDEX_TITLE: &str = "The NoC Shop";

/// Directory, relative to the index page, holding repository pages.
pub const DEFAULT_AUTOGEN_DIR: &str = "autogen";

/// Render the landing page.
///
/// One list entry per repository in catalog order, linking to
/// `<autogen_dir>/<id>`, followed by a hidden MyST `toctree` directive so
/// Sphinx picks up the generated pages.
pub fn render_index(catalog: &Catalog, autogen_dir: &str) -> String {
    let mut md = String::with_capacity(256 + catalog.len() * 96);

    let _ = writeln!(md, "# {INDEX_TITLE}\n");
    md.push_str("Browse the RFNoC components published by the community.\n");
    md.push_str("Each entry links to a page describing the repository and its contents.\n\n");

    if catalog.is_empty() {
        md.push_str("No repositories found or scanned.\n");
    }

    for (id, repo) in catalog.iter() {
        let manifest = repo.manifest();
        let title = manifest.title().unwrap_or(id);
        let _ = write!(md, "-  [{title}]({autogen_dir}/{id})");
        if let Some(brief) = manifest.brief() {
            let _ = write!(md, ": {brief}");
        }
        md.push('\n');
    }

    md.push_str("\n```{toctree}\n:hidden:\n\n");
    for (id, _) in catalog.iter() {
        let _ = writeln!(md, "{autogen_dir}/{id}");
    }
    md.push_str("```\n");

    md
}
