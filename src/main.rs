//! Skillet - A static site generator for cooklang recipe trees.

mod build;
mod cli;
mod config;
mod error;
mod highlight;
mod logger;
mod parser;
mod paths;
mod render;
mod templates;
mod watch;

use anyhow::{Context, Result};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use templates::TemplateEngine;
use watch::RebuildCoordinator;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::resolve(&cli);
    config.validate()?;
    let templates = TemplateEngine::new(&config.template_dir);

    match cli.command {
        Commands::Build => {
            let stats = build_site(&config, &templates)
                .with_context(|| format!("build of {} failed", config.source_root.display()))?;
            if stats.failures > 0 {
                anyhow::bail!("{} recipes failed to render", stats.failures);
            }
            Ok(())
        }
        Commands::Watch => RebuildCoordinator::new(&config, &templates).run(),
    }
}
