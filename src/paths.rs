//! Source-to-output path mapping.
//!
//! Pure functions over the two tree roots: breadcrumb derivation and the
//! mirrored output location for a source folder or recipe file. Every source
//! folder becomes an output directory with an `index.html`; every recipe
//! file becomes an output *directory* named by its stem.
//!
//! All entry points validate that the input lies under the source root and
//! fail with [`RenderError::Path`] otherwise, as a defense against symlink
//! escapes or a misbehaving watch source.

use crate::error::RenderError;
use std::path::{Component, Path, PathBuf};

/// Reserved extension marking a recipe source file.
pub const RECIPE_EXT: &str = "cook";

/// Probe order for a recipe's optional sibling image. First match wins.
pub const IMAGE_EXTS: &[&str] = &["jpg", "png"];

/// Output-tree entry holding shared assets (stylesheets). The directory
/// wipe during a rebuild leaves this entry untouched.
pub const STATIC_DIR_NAME: &str = "static";

/// Check whether a path names a recipe source file.
pub fn is_recipe_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == RECIPE_EXT)
}

/// Maps paths between the source tree and the mirrored output tree.
#[derive(Debug, Clone)]
pub struct PathMapper {
    source_root: PathBuf,
    output_root: PathBuf,
}

impl PathMapper {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Strip the source root, failing if `path` does not lie under it.
    pub fn relative<'a>(&self, path: &'a Path) -> Result<&'a Path, RenderError> {
        path.strip_prefix(&self.source_root)
            .map_err(|_| RenderError::Path(path.to_path_buf()))
    }

    /// Folder names from the tree root down to `path`, root first.
    ///
    /// The tree root itself yields an empty list. For recipe files the final
    /// element is the recipe's display title: the file name with the
    /// reserved extension stripped.
    ///
    /// `breadcrumbs("bread/quickbreads/banana.cook")` is
    /// `["bread", "quickbreads", "banana"]`.
    pub fn breadcrumbs(&self, path: &Path) -> Result<Vec<String>, RenderError> {
        let rel = self.relative(path)?;
        let mut crumbs: Vec<String> = rel
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if is_recipe_file(rel)
            && let Some(last) = crumbs.last_mut()
        {
            *last = display_title(rel);
        }

        Ok(crumbs)
    }

    /// The output directory mirroring a source folder or recipe file.
    ///
    /// Folders map by identity; recipe files additionally lose their
    /// extension, turning the recipe into a directory in the output tree.
    pub fn output_dir(&self, path: &Path) -> Result<PathBuf, RenderError> {
        let rel = self.relative(path)?;
        let mapped = self.output_root.join(rel);
        if is_recipe_file(rel) {
            Ok(mapped.with_extension(""))
        } else {
            Ok(mapped)
        }
    }
}

/// Display title of a recipe file: its file name minus the extension.
pub fn display_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
