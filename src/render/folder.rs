//! Full-subtree rendering of a source folder.
//!
//! Every directory-level change triggers a rebuild of the whole affected
//! subtree: the output directory's children are deleted (the shared-assets
//! entry excepted) and regenerated from the current source. This trades
//! redundant writes for the absence of stale-output bugs, so keep it a
//! recreate, not a diff.
//!
//! A failing recipe or subfolder never aborts its siblings: the failure is
//! logged with its path and counted in [`RenderStats`].

use crate::error::{RenderError, chain};
use crate::log;
use crate::paths::{PathMapper, STATIC_DIR_NAME, display_title, is_recipe_file};
use crate::render::RecipeRenderer;
use crate::templates::{FOLDER_TEMPLATE, TemplateEngine};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of a subtree render. `pages` counts written HTML files.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub pages: usize,
    pub failures: usize,
}

impl RenderStats {
    fn absorb(&mut self, other: Self) {
        self.pages += other.pages;
        self.failures += other.failures;
    }
}

/// Context handed to the folder index template.
#[derive(Serialize)]
struct FolderContext<'a> {
    breadcrumbs: &'a [String],
    folders: &'a [String],
    recipes: &'a [String],
}

pub struct DirectoryRenderer<'a> {
    mapper: &'a PathMapper,
    templates: &'a TemplateEngine,
    recipes: RecipeRenderer<'a>,
}

impl<'a> DirectoryRenderer<'a> {
    pub fn new(mapper: &'a PathMapper, templates: &'a TemplateEngine) -> Self {
        Self {
            mapper,
            templates,
            recipes: RecipeRenderer::new(mapper, templates),
        }
    }

    /// Rebuild the output subtree for one source directory.
    ///
    /// Errors on the directory's own artifacts (listing, index page)
    /// propagate; child failures are logged and counted instead.
    pub fn render(&self, dir: &Path) -> Result<RenderStats, RenderError> {
        let breadcrumbs = self.mapper.breadcrumbs(dir)?;
        let out_dir = self.mapper.output_dir(dir)?;

        fs::create_dir_all(&out_dir).map_err(RenderError::io(&out_dir))?;
        wipe_children(&out_dir)?;

        let (folders, recipe_files) = list_entries(dir)?;
        let folder_names: Vec<String> = folders
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        let recipe_names: Vec<String> = recipe_files
            .iter()
            .map(|path| display_title(path))
            .collect();

        let html = self.templates.render(
            FOLDER_TEMPLATE,
            FolderContext {
                breadcrumbs: &breadcrumbs,
                folders: &folder_names,
                recipes: &recipe_names,
            },
        )?;
        let index = out_dir.join("index.html");
        fs::write(&index, html).map_err(RenderError::io(&index))?;

        let mut stats = RenderStats {
            pages: 1,
            failures: 0,
        };

        // Subfolders before files, both already sorted: deterministic output
        // for reproducible trees.
        for folder in &folders {
            match self.render(folder) {
                Ok(child) => stats.absorb(child),
                Err(err) => {
                    log!("error"; "folder {}: {}", folder.display(), chain(&err));
                    stats.failures += 1;
                }
            }
        }
        for file in &recipe_files {
            match self.recipes.render(file) {
                Ok(()) => stats.pages += 2,
                Err(err) => {
                    log!("error"; "recipe {}: {}", file.display(), chain(&err));
                    stats.failures += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// Immediate subfolders and recipe files of a source directory, each sorted
/// lexicographically. Other files (images, strays) are not listed.
fn list_entries(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), RenderError> {
    let mut folders = Vec::new();
    let mut recipes = Vec::new();

    for entry in fs::read_dir(dir).map_err(RenderError::io(dir))? {
        let entry = entry.map_err(RenderError::io(dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(RenderError::io(&path))?;
        if file_type.is_dir() {
            folders.push(path);
        } else if is_recipe_file(&path) {
            recipes.push(path);
        }
    }

    folders.sort();
    recipes.sort();
    Ok((folders, recipes))
}

/// Delete the immediate children of an output directory, leaving the shared
/// static-assets entry untouched. A missing directory or an entry vanishing
/// mid-wipe is not an error.
fn wipe_children(out_dir: &Path) -> Result<(), RenderError> {
    let entries = match fs::read_dir(out_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(RenderError::io(out_dir)(err)),
    };

    for entry in entries {
        let entry = entry.map_err(RenderError::io(out_dir))?;
        if entry.file_name() == STATIC_DIR_NAME {
            continue;
        }
        let path = entry.path();
        let removed = if entry.file_type().map_err(RenderError::io(&path))?.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        match removed {
            Err(err) if err.kind() != io::ErrorKind::NotFound => {
                return Err(RenderError::io(&path)(err));
            }
            _ => {}
        }
    }

    Ok(())
}
