//! Error types for the rendering engine.
//!
//! The taxonomy mirrors how failures are handled: `Path` means a caller or
//! the watch source handed us a path outside the source tree, `Parse` is a
//! user-data error on a single recipe, `Io` and `Template` are environment
//! errors. Recipe-level failures are caught and logged by the directory
//! renderer so sibling recipes keep rendering.

use crate::parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering the output tree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The given path does not lie under the configured source root.
    #[error("path `{0}` is outside the recipe source root")]
    Path(PathBuf),

    /// A recipe file failed to parse. Carries the offending path so the
    /// failure can be logged without aborting sibling renders.
    #[error("failed to parse recipe `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("template error")]
    Template(#[from] minijinja::Error),
}

impl RenderError {
    /// Wrap an io::Error with the path it happened on.
    pub fn io(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |err| Self::Io(path, err)
    }
}

/// Flatten an error and its cause chain into one `: `-separated line.
pub fn chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_display_contains_path() {
        let err = RenderError::Path(PathBuf::from("/etc/passwd"));
        assert!(format!("{err}").contains("/etc/passwd"));
    }

    #[test]
    fn test_chain_flattens_causes() {
        let err = RenderError::io(std::path::Path::new("html/index.html"))(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let flat = chain(&err);
        assert!(flat.contains("html/index.html"));
        assert!(flat.contains("denied"));
    }

    #[test]
    fn test_parse_error_mentions_line() {
        let err = RenderError::Parse {
            path: PathBuf::from("bad.cook"),
            source: ParseError::UnclosedBraces { line: 3 },
        };
        let flat = chain(&err);
        assert!(flat.contains("bad.cook"));
        assert!(flat.contains("line 3"));
    }
}
