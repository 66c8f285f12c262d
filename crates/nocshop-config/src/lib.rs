//! Configuration management for the NoC Shop generator.
//!
//! Parses `nocshop.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `catalog.scan_results`
//! - `catalog.sources_dir`
//! - `output.dir`

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the scan results document.
    pub scan_results: Option<PathBuf>,
    /// Override the source descriptor directory.
    pub sources_dir: Option<PathBuf>,
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "nocshop.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog input configuration (paths are relative strings from TOML).
    catalog: CatalogConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved catalog configuration (set after loading).
    #[serde(skip)]
    pub catalog_resolved: CatalogConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw catalog configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CatalogConfigRaw {
    scan_results: Option<String>,
    sources_dir: Option<String>,
}

/// Resolved catalog input configuration with absolute paths.
#[derive(Debug, Default)]
pub struct CatalogConfig {
    /// Scan result document (YAML or JSON).
    pub scan_results: PathBuf,
    /// Directory of `<repo>.yml` source descriptors, if any.
    pub sources_dir: Option<PathBuf>,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    index_file: Option<String>,
    autogen_dir: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory the index page is written to.
    pub dir: PathBuf,
    /// File name of the index page inside `dir`.
    pub index_file: String,
    /// Sub-directory of `dir` holding per-repository pages.
    pub autogen_dir: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`OUT_DIR`} not set").
        message: String,
    },
}

/// Require a value to be a single plain path component.
fn require_file_name(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "{field} must be a plain name without path separators"
        ))),
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `nocshop.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(scan_results) = &settings.scan_results {
            self.catalog_resolved.scan_results.clone_from(scan_results);
        }
        if let Some(sources_dir) = &settings.sources_dir {
            self.catalog_resolved.sources_dir = Some(sources_dir.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
    }

    /// Path of the index page.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.output_resolved.dir.join(&self.output_resolved.index_file)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            catalog: CatalogConfigRaw::default(),
            output: OutputConfigRaw::default(),
            catalog_resolved: CatalogConfig {
                scan_results: base.join("scan_results.yml"),
                sources_dir: None,
            },
            output_resolved: OutputConfig {
                dir: base.join("source"),
                index_file: "index.md".to_owned(),
                autogen_dir: "autogen".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_file_name(&self.output_resolved.index_file, "output.index_file")?;
        require_file_name(&self.output_resolved.autogen_dir, "output.autogen_dir")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.catalog.scan_results {
            self.catalog.scan_results = Some(expand::expand_env(path, "catalog.scan_results")?);
        }
        if let Some(ref path) = self.catalog.sources_dir {
            self.catalog.sources_dir = Some(expand::expand_env(path, "catalog.sources_dir")?);
        }
        if let Some(ref path) = self.output.dir {
            self.output.dir = Some(expand::expand_env(path, "output.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.catalog_resolved = CatalogConfig {
            scan_results: resolve(self.catalog.scan_results.as_deref(), "scan_results.yml"),
            sources_dir: self
                .catalog
                .sources_dir
                .as_deref()
                .map(|dir| config_dir.join(dir)),
        };

        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref(), "source"),
            index_file: self
                .output
                .index_file
                .clone()
                .unwrap_or_else(|| "index.md".to_owned()),
            autogen_dir: self
                .output
                .autogen_dir
                .clone()
                .unwrap_or_else(|| "autogen".to_owned()),
        };
    }
}
