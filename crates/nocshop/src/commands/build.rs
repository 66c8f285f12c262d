//! `nocshop build` command implementation.

use std::path::PathBuf;

use clap::Args;
use nocshop_catalog::{Catalog, Sources};
use nocshop_config::{CliSettings, Config};
use nocshop_render::{BuildConfig, BuildSummary, ShopBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Scan results document, YAML or JSON (overrides config).
    #[arg(short, long, env = "NOCSHOP_SCAN_RESULTS")]
    scan_results: Option<PathBuf>,

    /// Directory of `<repo>.yml` source descriptors (overrides config).
    #[arg(long)]
    sources_dir: Option<PathBuf>,

    /// Output directory for the generated pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover nocshop.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            scan_results: self.scan_results,
            sources_dir: self.sources_dir,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.field(
            "Scan results",
            config.catalog_resolved.scan_results.display(),
        );
        if let Some(dir) = &config.catalog_resolved.sources_dir {
            output.field("Sources", dir.display());
        }
        output.field("Output", config.output_resolved.dir.display());
        output.field("Index", config.index_path().display());

        let summary = run(&config)?;

        if self.verbose {
            for page in &summary.pages {
                output.item(page.display());
            }
        }

        for rejected in &summary.rejected {
            output.warning(&format!("Skipped {}: {}", rejected.id, rejected.reason));
        }

        output.success(&format!(
            "Generated {} repository pages and {}",
            summary.pages.len(),
            summary.index_path.display()
        ));
        Ok(())
    }
}

/// Load the catalog, back-fill manifests from source descriptors and render.
fn run(config: &Config) -> Result<BuildSummary, CliError> {
    let mut catalog = Catalog::load(&config.catalog_resolved.scan_results)?;

    if let Some(dir) = &config.catalog_resolved.sources_dir {
        let sources = Sources::load_dir(dir)?;
        catalog = sources.merge_into(&catalog);
    }

    let build_config = BuildConfig {
        index_file: config.output_resolved.index_file.clone(),
        autogen_dir: config.output_resolved.autogen_dir.clone(),
    };
    let summary = ShopBuilder::new(catalog, build_config).build(&config.output_resolved.dir)?;
    Ok(summary)
}
