//! Detail page of a single repository.

use std::fmt::Write;

use nocshop_catalog::{Block, Component, Manifest, RepoInfo};

use crate::UrlSanitizer;

/// Render the detail page of one repository.
///
/// Every manifest field is optional. The heading and the git repository
/// line are always present; everything else is emitted only when set.
pub fn render_repo_page(repo: &RepoInfo, sanitizer: &dyn UrlSanitizer) -> String {
    let manifest = repo.manifest();
    let mut md = String::with_capacity(1024);

    let _ = writeln!(md, "# {}", manifest.title.as_deref().unwrap_or_default());

    if let Some(brief) = manifest.brief() {
        let _ = writeln!(md, "\n{brief}");
    }

    if let Some(url) = manifest.url() {
        let _ = writeln!(md, "\n**Home page:** [{}]({url})", sanitizer.sanitize(url));
    }

    // Always present, even with an empty target.
    let source = manifest.source();
    let _ = writeln!(
        md,
        "\n**Git repository:** [{}]({source})",
        sanitizer.sanitize(source)
    );

    if let Some(authors) = manifest.authors() {
        let _ = writeln!(md, "\n**Authors:** {}", authors.joined());
    }

    render_blocks(&mut md, &repo.rfnoc_blocks, manifest);
    render_components(&mut md, "RFNoC Modules", &repo.rfnoc_modules);
    render_components(&mut md, "RFNoC Transport Adapters", &repo.rfnoc_transport_adapters);

    md
}

fn render_blocks(md: &mut String, blocks: &[Block], manifest: &Manifest) {
    if blocks.is_empty() {
        return;
    }
    md.push_str("\n## RFNoC Blocks\n\n");
    for block in blocks {
        let _ = write!(md, "- **{}**", block.display_name());
        if let Some(description) = block.description() {
            let _ = write!(md, ": {description}");
        }
        md.push('\n');
        let _ = writeln!(
            md,
            "  - Software license: {}",
            block.license(manifest).unwrap_or_default()
        );
        let _ = writeln!(
            md,
            "  - HDL license: {}",
            block.hdl_license(manifest).unwrap_or_default()
        );
    }
}

fn render_components(md: &mut String, heading: &str, components: &[Component]) {
    if components.is_empty() {
        return;
    }
    let _ = writeln!(md, "\n## {heading}\n");
    for component in components {
        let _ = writeln!(md, "- **{}**", component.name);
    }
}
