//! Compiler configuration

use serde::{Deserialize, Serialize};

/// How the compiler treats markup outside the supported subset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarkupPolicy {
    /// Emit unsupported constructs as escaped literal text
    #[default]
    Passthrough,

    /// Fail compilation on the first unsupported construct
    Strict,
}

/// Options controlling compilation and packaging
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompilerConfig {
    /// Minimum zero-padding width for chapter file names.
    /// Widened automatically when the document count needs more digits.
    pub min_pad_width: usize,

    /// Handling of raw HTML, images and other unsupported markup
    pub markup_policy: MarkupPolicy,

    /// Table of contents depth (1 = chapters, 2 = chapters and their sections)
    pub toc_depth: u8,

    /// Whether to write an EPUB 2 `toc.ncx` alongside the navigation document
    pub include_ncx: bool,

    /// Deflate level for compressed entries
    pub compression_level: Option<i64>,

    /// Whether documents are transformed on the rayon pool
    pub parallel: bool,

    /// Whether to enable tables extension
    pub enable_tables: bool,

    /// Whether to enable strikethrough extension
    pub enable_strikethrough: bool,

    /// Whether to enable footnotes extension
    pub enable_footnotes: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            min_pad_width: 2,
            markup_policy: MarkupPolicy::Passthrough,
            toc_depth: 1,
            include_ncx: true,
            compression_level: None,
            parallel: true,
            enable_tables: true,
            enable_strikethrough: true,
            enable_footnotes: true,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_min_pad_width(mut self, width: usize) -> Self {
        self.min_pad_width = width.max(1);
        self
    }

    pub fn with_markup_policy(mut self, policy: MarkupPolicy) -> Self {
        self.markup_policy = policy;
        self
    }

    pub fn with_toc_depth(mut self, depth: u8) -> Self {
        self.toc_depth = depth.clamp(1, 2);
        self
    }

    pub fn with_ncx(mut self, include: bool) -> Self {
        self.include_ncx = include;
        self
    }

    pub fn with_compression_level(mut self, level: Option<i64>) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable or disable tables parsing
    pub fn with_tables(mut self, enable: bool) -> Self {
        self.enable_tables = enable;
        self
    }

    /// Enable or disable strikethrough parsing
    pub fn with_strikethrough(mut self, enable: bool) -> Self {
        self.enable_strikethrough = enable;
        self
    }

    /// Enable or disable footnotes parsing
    pub fn with_footnotes(mut self, enable: bool) -> Self {
        self.enable_footnotes = enable;
        self
    }

    /// Pad width needed for `count` documents
    pub(crate) fn pad_width_for(&self, count: usize) -> usize {
        let digits = count.max(1).to_string().len();
        self.min_pad_width.max(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.min_pad_width, 2);
        assert_eq!(config.markup_policy, MarkupPolicy::Passthrough);
        assert!(config.include_ncx);
        assert!(config.parallel);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            CompilerConfig::from_json(r#"{"markup_policy": "strict", "toc_depth": 2}"#).unwrap();
        assert_eq!(config.markup_policy, MarkupPolicy::Strict);
        assert_eq!(config.toc_depth, 2);
        assert_eq!(config.min_pad_width, 2);
        assert!(config.enable_tables);
    }

    #[test]
    fn test_pad_width_widens() {
        let config = CompilerConfig::default();
        assert_eq!(config.pad_width_for(1), 2);
        assert_eq!(config.pad_width_for(99), 2);
        assert_eq!(config.pad_width_for(100), 3);
        assert_eq!(config.pad_width_for(1000), 4);
    }
}
