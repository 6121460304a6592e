//! Source documents fed to the compiler

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One markdown input file.
///
/// Position in the book is the document's index in the sequence passed to
/// the compiler, not anything stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path the text was read from; only the file stem is used (title fallback)
    pub path: PathBuf,

    /// Raw UTF-8 markdown
    pub text: String,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// File name without extension, or an empty string
    pub fn file_stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Display form of the path, used in error messages
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}
