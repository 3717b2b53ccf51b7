//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Skillet recipe site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root holding recipes/, html/, templates/ and static/
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Recipe source directory
    #[arg(long, env = "RECIPE_DIR")]
    pub recipes: Option<PathBuf>,

    /// Output directory for the generated site
    #[arg(short, long, env = "HTML_DIR")]
    pub output: Option<PathBuf>,

    /// Directory holding folder.html and recipe.html
    #[arg(short, long, env = "TEMPLATE_DIR")]
    pub templates: Option<PathBuf>,

    /// Shared assets copied to <output>/static
    #[arg(long = "static", env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render the whole recipe tree once and exit
    Build,

    /// Render the whole tree, then re-render folders as they change
    Watch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_build() {
        let cli = Cli::try_parse_from(["skillet", "build"]).unwrap();
        assert!(matches!(cli.command, Commands::Build));
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_cli_parses_watch_with_overrides() {
        let cli = Cli::try_parse_from([
            "skillet",
            "--root",
            "/srv/cookbook",
            "--output",
            "/srv/www",
            "watch",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Watch));
        assert_eq!(cli.root.as_deref(), Some(std::path::Path::new("/srv/cookbook")));
        assert_eq!(cli.output.as_deref(), Some(std::path::Path::new("/srv/www")));
    }
}
