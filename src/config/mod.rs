//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[base]`    | Site metadata (title, description, language)   |
//! | `[build]`   | Output and asset paths, minification           |
//! | `[data]`    | Where `data.json` is resolved from             |
//! | `[serve]`   | Development server (port, interface, watch)    |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Ernest Bernin"
//! description = "PhD Candidate in Chemistry"
//!
//! [build]
//! output = "public"
//! minify = true
//!
//! [data]
//! candidates = ["data/data.json", "../data/data.json"]
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
mod data;
mod error;
mod handle;
mod serve;
pub mod defaults;

// Internal imports used in this module
use base::BaseConfig;
use build::BuildConfig;
use data::DataConfig;
use error::ConfigError;
use serve::ServeConfig;

pub use handle::{cfg, init_config, reload_config};

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Site data resolution
    #[serde(default)]
    pub data: DataConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load config for a CLI invocation: read the file if present, then apply
    /// CLI overrides and normalize paths.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Page title: `[base].title`, or `fallback` (the hero title) when unset.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.base.title.as_str() {
            "" => fallback,
            title => title,
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        // Determine the final root path based on command
        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        self.update_path_with_root(&root, cli);

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.data.base, args.data_base.as_ref());
            self.build.clean |= args.clean;
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
            self.base.url = Some(format!(
                "http://{}:{}",
                self.serve.interface, self.serve.port
            ));
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        // Apply CLI overrides first
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.base.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::invalid("base.url", "must start with http:// or https://"));
        }

        if self.data.candidates.is_empty() {
            bail!(ConfigError::invalid("data.candidates", "must have at least one element"));
        }

        if self.data.candidates.iter().any(|c| c.trim().is_empty()) {
            bail!(ConfigError::invalid("data.candidates", "must not contain empty paths"));
        }

        if self.build.output == self.get_root() {
            bail!(ConfigError::invalid("build.output", "must not be the site root"));
        }

        if let Some(Commands::Init { .. }) = self.cli.map(|cli| &cli.command)
            && self.config_path.exists()
        {
            bail!("Config file already exists. Remove it manually or init in a different path.");
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::try_parse_from(args).unwrap()))
    }

    #[test]
    fn test_from_str() {
        let config_str = r#"
            [base]
            title = "Ernest Bernin"
            author = "Ernest"
        "#;
        let config = SiteConfig::from_str(config_str).unwrap();

        assert_eq!(config.base.title, "Ernest Bernin");
        assert_eq!(config.base.author, "Ernest");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let invalid_config = r#"
            [base
            title = "My Site"
        "#;
        assert!(SiteConfig::from_str(invalid_config).is_err());
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_title_or() {
        let mut config = SiteConfig::default();
        assert_eq!(config.title_or("Hero"), "Hero");
        config.base.title = "Site".into();
        assert_eq!(config.title_or("Hero"), "Site");
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.base.title, "");
        assert!(config.build.minify);
        assert_eq!(config.serve.port, 5277);
        assert_eq!(config.data.candidates.len(), 2);
    }

    #[test]
    fn test_full_config_all_sections() {
        let config = r#"
            [base]
            title = "Ernest Bernin"
            description = "Chemistry"
            url = "https://ernest.example.com"
            language = "en-US"

            [build]
            output = "dist"
            assets = "static"
            minify = false

            [data]
            base = "content"
            candidates = ["data.json"]

            [serve]
            interface = "127.0.0.1"
            port = 3000
            watch = true
        "#;
        let config = SiteConfig::from_str(config).unwrap();

        assert_eq!(config.base.title, "Ernest Bernin");
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.assets, PathBuf::from("static"));
        assert_eq!(config.data.base, "content");
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let config = r#"
            [base]
            title = "Test"

            [deploy]
            provider = "github"
        "#;
        assert!(SiteConfig::from_str(config).is_err());
    }

    #[test]
    fn test_update_with_cli_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&[
            "folio", "--root", root, "--output", "out", "build", "--minify", "false",
            "--data-base", "https://a.org/",
        ]);

        let config = SiteConfig::load(cli).unwrap();
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(config.get_root(), root);
        assert_eq!(config.build.output, root.join("out"));
        assert_eq!(config.build.assets, root.join("assets"));
        assert!(!config.build.minify);
        assert_eq!(config.data.base, "https://a.org/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serve_overrides_base_url() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = leak_cli(&[
            "folio", "--root", dir.path().to_str().unwrap(), "serve", "--port", "8080",
        ]);

        let config = SiteConfig::load(cli).unwrap();
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.base.url.as_deref(), Some("http://127.0.0.1:8080"));
    }

    #[test]
    fn test_load_reads_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("folio.toml"), "[base]\ntitle = \"From File\"\n").unwrap();
        let cli = leak_cli(&["folio", "--root", dir.path().to_str().unwrap(), "build"]);

        let config = SiteConfig::load(cli).unwrap();
        assert_eq!(config.base.title, "From File");
        assert!(config.config_path.ends_with("folio.toml"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/site"));
        config.build.output = PathBuf::from("/site/public");
        assert!(config.validate().is_ok());

        config.data.candidates.clear();
        assert!(config.validate().is_err());

        config.data.candidates = vec![" ".into()];
        assert!(config.validate().is_err());

        config.data.candidates = vec!["data.json".into()];
        config.base.url = Some("ftp://x".into());
        assert!(config.validate().is_err());

        config.base.url = None;
        config.build.output = PathBuf::from("/site");
        assert!(config.validate().is_err());
    }
}
