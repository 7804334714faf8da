//! Inkpress - a static site generator for markdown blogs.

mod analytics;
mod build;
mod cli;
mod config;
mod content;
mod generator;
mod init;
mod logger;
mod og;
mod render;
mod serve;
mod theme;
mod utils;
mod watch;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use generator::{rss::build_rss, sitemap::build_sitemap};
use init::new_site;
use serve::{bind_server, serve_site};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config = load_config(cli)?;
    init_config(config);

    match &cli.command {
        Commands::Init { name } => new_site(&cfg(), name.is_some()),
        Commands::Build { .. } => build_all().map(|_| ()),
        Commands::Serve { .. } => {
            // Bind first: a port conflict moves the port, and the built
            // pages must carry URLs for the port actually bound
            let (server, addr) = bind_server()?;
            build_all()?;
            serve_site(server, addr)
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}

/// Build the site, then generate the rss feed and sitemap in parallel.
fn build_all() -> Result<()> {
    let config = cfg();
    let snapshot = build_site(&config)?;

    let (rss_result, sitemap_result) = rayon::join(
        || build_rss(&config, &snapshot),
        || build_sitemap(&config, &snapshot),
    );
    rss_result?;
    sitemap_result
}
