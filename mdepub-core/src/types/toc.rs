//! Table of contents types

use serde::{Deserialize, Serialize};

/// A single entry in the table of contents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TocEntry {
    /// Display title
    pub title: String,

    /// Target document, optionally with a fragment (`chapter01.xhtml#setup`)
    pub href: String,

    /// Stable anchor identifier
    pub anchor: String,

    /// Nesting level (0 = top level)
    pub level: u32,

    /// Child entries for nested TOC
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    /// Create a new TOC entry
    pub fn new(title: impl Into<String>, href: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            anchor: anchor.into(),
            level: 0,
            children: Vec::new(),
        }
    }

    /// Set the nesting level
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Add child entries
    pub fn with_children(mut self, children: Vec<TocEntry>) -> Self {
        self.children = children;
        self
    }

    /// Deepest nesting below and including this entry (1 for a leaf)
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TocEntry::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth() {
        let leaf = TocEntry::new("A", "a.xhtml", "a");
        assert_eq!(leaf.depth(), 1);
        let parent = TocEntry::new("B", "b.xhtml", "b")
            .with_children(vec![TocEntry::new("C", "b.xhtml#c", "c").with_level(1)]);
        assert_eq!(parent.depth(), 2);
    }
}
