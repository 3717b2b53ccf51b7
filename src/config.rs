//! Site configuration.
//!
//! Four paths drive everything: the recipe source tree, the output tree,
//! the template directory and the shared static assets. Each defaults to a
//! fixed subdirectory of the project root and can be overridden per path
//! via CLI flag or environment variable (`RECIPE_DIR`, `HTML_DIR`,
//! `TEMPLATE_DIR`, `STATIC_DIR`).
//!
//! The config is an explicit value handed to constructors, never ambient
//! state, so tests can point an engine at temp directories.

use crate::cli::Cli;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// Resolved, absolute site paths.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Project root the default subpaths hang off.
    pub root: PathBuf,
    /// User-maintained recipe tree. Read-only for the engine.
    pub source_root: PathBuf,
    /// Generated output tree. Owned exclusively by the engine.
    pub output_root: PathBuf,
    /// Directory holding `folder.html` and `recipe.html`.
    pub template_dir: PathBuf,
    /// Shared assets copied to `<output>/static` at build start.
    pub static_dir: PathBuf,
}

impl SiteConfig {
    /// Resolve configuration from CLI arguments (which clap already merged
    /// with the environment variables).
    pub fn resolve(cli: &Cli) -> Self {
        let root = normalize_path(&expand(cli.root.as_deref().unwrap_or(Path::new("."))));
        let resolve_dir = |over: Option<&Path>, default: &str| match over {
            Some(path) => normalize_path(&join_root(&root, &expand(path))),
            None => root.join(default),
        };

        Self {
            source_root: resolve_dir(cli.recipes.as_deref(), "recipes"),
            output_root: resolve_dir(cli.output.as_deref(), "html"),
            template_dir: resolve_dir(cli.templates.as_deref(), "templates"),
            static_dir: resolve_dir(cli.static_dir.as_deref(), "static"),
            root,
        }
    }

    /// Validate the resolved paths before any rendering starts.
    pub fn validate(&self) -> Result<()> {
        if !self.source_root.is_dir() {
            bail!(
                "recipe directory not found: {}",
                self.source_root.display()
            );
        }
        if !self.template_dir.is_dir() {
            bail!(
                "template directory not found: {}",
                self.template_dir.display()
            );
        }
        // An output tree inside the source tree would feed the watcher its
        // own writes and loop forever.
        if self.output_root.starts_with(&self.source_root) {
            bail!(
                "output directory {} must not live inside the recipe directory",
                self.output_root.display()
            );
        }
        Ok(())
    }
}

/// Tilde-expand a user-supplied path.
fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Interpret a relative override as root-relative.
fn join_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Normalize a path to absolute, canonicalizing when it exists.
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;

    fn cli_with(root: Option<&str>, recipes: Option<&str>, output: Option<&str>) -> Cli {
        Cli {
            root: root.map(PathBuf::from),
            recipes: recipes.map(PathBuf::from),
            output: output.map(PathBuf::from),
            templates: None,
            static_dir: None,
            command: Commands::Build,
        }
    }

    #[test]
    fn test_defaults_hang_off_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let config = SiteConfig::resolve(&cli_with(root.to_str(), None, None));

        assert_eq!(config.source_root, root.join("recipes"));
        assert_eq!(config.output_root, root.join("html"));
        assert_eq!(config.template_dir, root.join("templates"));
        assert_eq!(config.static_dir, root.join("static"));
    }

    #[test]
    fn test_relative_override_is_root_relative() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let config = SiteConfig::resolve(&cli_with(root.to_str(), Some("my-recipes"), None));
        assert_eq!(config.source_root, root.join("my-recipes"));
    }

    #[test]
    fn test_absolute_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let elsewhere = dir.path().join("elsewhere");
        let config = SiteConfig::resolve(&cli_with(
            root.to_str(),
            None,
            elsewhere.to_str(),
        ));
        assert_eq!(config.output_root, elsewhere);
    }

    #[test]
    fn test_validate_requires_source_and_templates() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let config = SiteConfig::resolve(&cli_with(root.to_str(), None, None));
        assert!(config.validate().is_err());

        std::fs::create_dir_all(root.join("recipes")).unwrap();
        assert!(config.validate().is_err());

        std::fs::create_dir_all(root.join("templates")).unwrap();
        let config = SiteConfig::resolve(&cli_with(root.to_str(), None, None));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_output_inside_source() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::create_dir_all(root.join("recipes")).unwrap();
        std::fs::create_dir_all(root.join("templates")).unwrap();
        let config = SiteConfig::resolve(&cli_with(
            root.to_str(),
            None,
            Some("recipes/html"),
        ));
        assert!(config.validate().is_err());
    }
}
