//! Folio - a static site generator for academic profile pages.

mod build;
mod cli;
mod config;
mod data;
mod dom;
mod init;
mod page;
mod render;
mod serve;
mod utils;
mod watch;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use init::new_site;
use serve::serve_site;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(load_config(cli)?);

    match &cli.command {
        Commands::Init { name } => new_site(&cfg(), name.is_some()),
        Commands::Build { .. } => build_site(&cfg()).map(|_| ()),
        Commands::Serve { .. } => {
            build_site(&cfg())?;
            serve_site()
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    if !cli.is_init() && !config.config_path.exists() {
        log!("config"; "{} not found, using defaults", config.config_path.display());
    }

    config.validate()?;
    Ok(config)
}
