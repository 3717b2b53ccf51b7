//! Rendering of a single recipe file.
//!
//! One `.cook` source file becomes one output directory holding the recipe
//! page, its print variant, a copy of the source file and, when a sibling
//! image with the same stem exists, a copy of that image. All writes are
//! full-file overwrites.

use crate::error::RenderError;
use crate::highlight::highlight;
use crate::parser::{self, Ingredient};
use crate::paths::{IMAGE_EXTS, PathMapper};
use crate::templates::{RECIPE_TEMPLATE, TemplateEngine};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Stylesheet selectors distinguishing the two page variants.
const SCREEN_STYLESHEET: &str = "/static/styles.css";
const PRINT_STYLESHEET: &str = "/static/printable.css";

/// Context handed to the recipe template for both variants.
#[derive(Serialize)]
struct RecipeContext<'a> {
    breadcrumbs: &'a [String],
    title: &'a str,
    ingredients: &'a [Ingredient],
    steps: &'a [String],
    metadata: &'a [(String, String)],
    /// File name of the copied sibling image, when one exists.
    image: Option<&'a str>,
    stylesheet: &'a str,
}

pub struct RecipeRenderer<'a> {
    mapper: &'a PathMapper,
    templates: &'a TemplateEngine,
}

impl<'a> RecipeRenderer<'a> {
    pub fn new(mapper: &'a PathMapper, templates: &'a TemplateEngine) -> Self {
        Self { mapper, templates }
    }

    /// Render one recipe file into its output directory.
    pub fn render(&self, path: &Path) -> Result<(), RenderError> {
        // Also validates that the path lies under the source root.
        let breadcrumbs = self.mapper.breadcrumbs(path)?;
        let title = breadcrumbs.last().cloned().unwrap_or_default();

        let text = fs::read_to_string(path).map_err(RenderError::io(path))?;
        let recipe = parser::parse(&text).map_err(|source| RenderError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let steps = highlight(&recipe.ingredients, &recipe.steps);

        let image = find_image(path);
        let image_name = image
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned());

        let out_dir = self.mapper.output_dir(path)?;
        fs::create_dir_all(&out_dir).map_err(RenderError::io(&out_dir))?;

        for (file_name, stylesheet) in [
            ("index.html", SCREEN_STYLESHEET),
            ("print.html", PRINT_STYLESHEET),
        ] {
            let html = self.templates.render(
                RECIPE_TEMPLATE,
                RecipeContext {
                    breadcrumbs: &breadcrumbs,
                    title: &title,
                    ingredients: &recipe.ingredients,
                    steps: &steps,
                    metadata: &recipe.metadata,
                    image: image_name.as_deref(),
                    stylesheet,
                },
            )?;
            let target = out_dir.join(file_name);
            fs::write(&target, html).map_err(RenderError::io(&target))?;
        }

        copy_into(path, &out_dir)?;
        if let Some(image) = &image {
            copy_into(image, &out_dir)?;
        }

        Ok(())
    }
}

/// Probe for a sibling image by stem name. First matching extension wins;
/// absence is not an error.
fn find_image(recipe_path: &Path) -> Option<PathBuf> {
    IMAGE_EXTS
        .iter()
        .map(|ext| recipe_path.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

/// Copy a file into a directory, keeping its name and overwriting.
fn copy_into(source: &Path, dir: &Path) -> Result<(), RenderError> {
    let Some(name) = source.file_name() else {
        return Err(RenderError::Path(source.to_path_buf()));
    };
    let target = dir.join(name);
    fs::copy(source, &target).map_err(RenderError::io(&target))?;
    Ok(())
}
