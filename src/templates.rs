//! HTML templating seam.
//!
//! Pages are rendered through minijinja templates loaded from the configured
//! template directory. Exactly two named templates are required:
//! [`FOLDER_TEMPLATE`] for directory listings and [`RECIPE_TEMPLATE`] for
//! recipe pages (both normal and print variants, distinguished by the
//! stylesheet field in the context).

use crate::error::RenderError;
use minijinja::{Environment, path_loader};
use serde::Serialize;
use std::path::Path;

/// Folder index template. Context: breadcrumbs, subfolder names, recipe names.
pub const FOLDER_TEMPLATE: &str = "folder.html";

/// Recipe page template. Context: breadcrumbs, ingredients, highlighted
/// steps, metadata, title, image, stylesheet selector.
pub const RECIPE_TEMPLATE: &str = "recipe.html";

/// A minijinja environment rooted at the template directory.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new(template_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir));
        Self { env }
    }

    /// Render a named template with a serializable context.
    pub fn render(&self, name: &str, context: impl Serialize) -> Result<String, RenderError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Serialize)]
    struct Context<'a> {
        title: &'a str,
        crumbs: Vec<&'a str>,
    }

    #[test]
    fn test_render_named_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("folder.html"),
            "<h1>{{ title }}</h1>{% for c in crumbs %}<a>{{ c }}</a>{% endfor %}",
        )
        .unwrap();

        let engine = TemplateEngine::new(dir.path());
        let html = engine
            .render(
                FOLDER_TEMPLATE,
                Context {
                    title: "Bread",
                    crumbs: vec!["bread", "quickbreads"],
                },
            )
            .unwrap();
        assert_eq!(html, "<h1>Bread</h1><a>bread</a><a>quickbreads</a>");
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::new(dir.path());
        let err = engine
            .render(RECIPE_TEMPLATE, Context { title: "", crumbs: vec![] })
            .unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }
}
