//! Output-tree rendering.
//!
//! [`DirectoryRenderer`] rebuilds one source folder's output subtree from
//! scratch, recursing depth-first and calling [`RecipeRenderer`] for each
//! recipe file. Correctness comes from recreate-from-scratch, not from
//! diffing against prior output.

mod assets;
mod folder;
mod recipe;

pub use assets::copy_static_assets;
pub use folder::{DirectoryRenderer, RenderStats};
pub use recipe::RecipeRenderer;

#[cfg(test)]
pub(crate) mod testutil {
    use crate::paths::PathMapper;
    use crate::templates::TemplateEngine;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A self-contained site rooted in a temp dir: `recipes/`, `html/` and
    /// minimal working templates.
    pub struct Fixture {
        pub dir: TempDir,
        pub source_root: PathBuf,
        pub output_root: PathBuf,
        pub engine: TemplateEngine,
    }

    impl Fixture {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let source_root = dir.path().join("recipes");
            let output_root = dir.path().join("html");
            let template_dir = dir.path().join("templates");
            fs::create_dir_all(&source_root).unwrap();
            fs::create_dir_all(&template_dir).unwrap();
            fs::write(
                template_dir.join("folder.html"),
                "<nav>{% for b in breadcrumbs %}{{ b }}/{% endfor %}</nav>\
                 <ul>{% for f in folders %}<li class=\"folder\">{{ f }}</li>{% endfor %}\
                 {% for r in recipes %}<li class=\"recipe\">{{ r }}</li>{% endfor %}</ul>",
            )
            .unwrap();
            fs::write(
                template_dir.join("recipe.html"),
                "<link href=\"{{ stylesheet | safe }}\"><h1>{{ title }}</h1>\
                 {% if image %}<img src=\"{{ image }}\">{% endif %}\
                 {% for step in steps %}<p>{{ step | safe }}</p>{% endfor %}",
            )
            .unwrap();
            let engine = TemplateEngine::new(&template_dir);
            Self {
                dir,
                source_root,
                output_root,
                engine,
            }
        }

        pub fn mapper(&self) -> PathMapper {
            PathMapper::new(&self.source_root, &self.output_root)
        }

        /// Write a recipe file under the source root, creating parents.
        pub fn write_recipe(&self, rel: &str, content: &str) -> PathBuf {
            let path = self.source_root.join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
            path
        }

        pub fn read_output(&self, rel: &str) -> String {
            fs::read_to_string(self.output_root.join(rel)).unwrap()
        }
    }

    /// Snapshot an output tree as sorted (relative path, bytes) pairs.
    pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files: Vec<(PathBuf, Vec<u8>)> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                (
                    entry.path().strip_prefix(root).unwrap().to_path_buf(),
                    fs::read(entry.path()).unwrap(),
                )
            })
            .collect();
        files.sort();
        files
    }
}
