//! Chapter type produced by rendering a source document

use serde::{Deserialize, Serialize};

/// A level-2 section heading inside a chapter, used for nested TOC entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub anchor: String,
}

/// A source document rendered to XHTML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedChapter {
    /// 1-based position in reading order
    pub position: usize,

    /// Zero-padded stem, e.g. `chapter03`; doubles as manifest id and anchor
    pub file_stem: String,

    /// Display title
    pub title: String,

    /// Rendered body markup (inside the chapter section)
    pub body: String,

    /// Complete XHTML content document
    pub document: String,

    /// Level-2 headings in document order
    pub sections: Vec<Section>,
}

impl RenderedChapter {
    /// File name inside the container's content directory
    pub fn href(&self) -> String {
        format!("{}.xhtml", self.file_stem)
    }

    /// Manifest / spine identifier
    pub fn id(&self) -> &str {
        &self.file_stem
    }

    /// Stem for a position with the given pad width
    pub fn stem_for(position: usize, width: usize) -> String {
        format!("chapter{:0width$}", position, width = width)
    }
}
