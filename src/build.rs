//! Full-site build orchestration.
//!
//! A full build copies the shared static assets, then renders the whole
//! source tree through [`DirectoryRenderer`]. The watch loop reuses the
//! same path for its startup render.

use crate::config::SiteConfig;
use crate::error::RenderError;
use crate::log;
use crate::paths::PathMapper;
use crate::render::{DirectoryRenderer, RenderStats, copy_static_assets};
use crate::templates::TemplateEngine;
use std::time::Instant;

/// Build the entire site: static assets first, then the recipe tree.
pub fn build_site(
    config: &SiteConfig,
    templates: &TemplateEngine,
) -> Result<RenderStats, RenderError> {
    let started = Instant::now();

    copy_static_assets(&config.static_dir, &config.output_root)?;

    let mapper = PathMapper::new(&config.source_root, &config.output_root);
    let stats = DirectoryRenderer::new(&mapper, templates).render(&config.source_root)?;

    if stats.failures > 0 {
        log!("build"; "rendered {} pages, {} failed, in {:.2?}",
             stats.pages, stats.failures, started.elapsed());
    } else {
        log!("build"; "rendered {} pages in {:.2?}", stats.pages, started.elapsed());
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testutil::Fixture;
    use std::fs;

    fn config_for(fixture: &Fixture) -> SiteConfig {
        SiteConfig {
            root: fixture.dir.path().to_path_buf(),
            source_root: fixture.source_root.clone(),
            output_root: fixture.output_root.clone(),
            template_dir: fixture.dir.path().join("templates"),
            static_dir: fixture.dir.path().join("static"),
        }
    }

    #[test]
    fn test_full_build_renders_assets_and_tree() {
        let fixture = Fixture::new();
        fixture.write_recipe("bread/banana.cook", "Mash @bananas{3}.");
        fs::create_dir_all(fixture.dir.path().join("static")).unwrap();
        fs::write(fixture.dir.path().join("static/styles.css"), "body {}").unwrap();

        let stats = build_site(&config_for(&fixture), &fixture.engine).unwrap();

        assert_eq!(stats.failures, 0);
        assert_eq!(fixture.read_output("static/styles.css"), "body {}");
        assert!(fixture.output_root.join("bread/banana/index.html").is_file());
    }

    #[test]
    fn test_build_without_static_dir() {
        let fixture = Fixture::new();
        fixture.write_recipe("tea.cook", "Steep @leaves.");

        let stats = build_site(&config_for(&fixture), &fixture.engine).unwrap();
        assert_eq!(stats.failures, 0);
        assert!(!fixture.output_root.join("static").exists());
    }
}
