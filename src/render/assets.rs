//! Shared static assets.
//!
//! Stylesheets and other site-wide files are copied once per full build
//! into the reserved `static` entry of the output root. Folder rebuilds
//! deliberately skip that entry when wiping, so the copy survives any
//! number of incremental rebuilds.

use crate::error::RenderError;
use crate::paths::STATIC_DIR_NAME;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively copy the static assets directory into `<output>/static`,
/// overwriting existing files. A missing source directory is not an error:
/// a site without shared assets is fine.
pub fn copy_static_assets(static_dir: &Path, output_root: &Path) -> Result<(), RenderError> {
    if !static_dir.is_dir() {
        return Ok(());
    }
    let target_root = output_root.join(STATIC_DIR_NAME);

    for entry in WalkDir::new(static_dir) {
        let entry =
            entry.map_err(|err| RenderError::Io(static_dir.to_path_buf(), err.into()))?;
        let rel = entry
            .path()
            .strip_prefix(static_dir)
            .map_err(|_| RenderError::Path(entry.path().to_path_buf()))?;
        let target = target_root.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(RenderError::io(&target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(RenderError::io(&target))?;
        }
    }

    Ok(())
}
