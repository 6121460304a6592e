//! Structural AST produced by the markup parser

use serde::{Deserialize, Serialize};

/// Block-level content element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Block {
    /// Heading (h1-h6) with a document-unique anchor
    Heading {
        level: u8,
        content: Vec<Inline>,
        anchor: String,
    },

    /// Paragraph of text
    Paragraph(Vec<Inline>),

    /// Ordered or unordered list
    List {
        items: Vec<Vec<Block>>,
        start: Option<u64>,
    },

    /// Fenced or indented code block with optional language
    CodeBlock { lang: Option<String>, code: String },

    /// Block quote
    Blockquote(Vec<Block>),

    /// Horizontal rule / thematic break
    ThematicBreak,

    /// Table
    Table(TableData),

    /// Footnote definition; `anchor` is its document-unique element id
    Footnote {
        id: String,
        #[serde(default)]
        anchor: String,
        content: Vec<Block>,
    },
}

/// Inline content element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text
    Text(String),

    /// Bold/strong text
    Bold(Vec<Inline>),

    /// Italic/emphasized text
    Italic(Vec<Inline>),

    /// Strikethrough text
    Strikethrough(Vec<Inline>),

    /// Inline code
    Code(String),

    /// Hyperlink
    Link { children: Vec<Inline>, url: String },

    /// Footnote reference, linking to the definition's anchor
    FootnoteRef {
        id: String,
        #[serde(default)]
        anchor: String,
    },

    /// Line break
    Break,
}

impl Inline {
    /// Create a plain text inline
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }

    /// Plain-text rendering of inline content, markup stripped
    pub fn plain_text(inlines: &[Inline]) -> String {
        inlines
            .iter()
            .map(|i| match i {
                Inline::Text(s) | Inline::Code(s) => s.clone(),
                Inline::Bold(children)
                | Inline::Italic(children)
                | Inline::Strikethrough(children)
                | Inline::Link { children, .. } => Inline::plain_text(children),
                Inline::FootnoteRef { id, .. } => format!("[{}]", id),
                Inline::Break => " ".to_string(),
            })
            .collect()
    }
}

impl Block {
    /// Create a paragraph from inline elements
    pub fn paragraph(content: Vec<Inline>) -> Self {
        Block::Paragraph(content)
    }

    /// Create a heading, clamping the level to 1-6
    pub fn heading(level: u8, content: Vec<Inline>, anchor: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            content,
            anchor: anchor.into(),
        }
    }

    /// Create a code block
    pub fn code_block(code: impl Into<String>, lang: Option<String>) -> Self {
        Block::CodeBlock {
            lang,
            code: code.into(),
        }
    }
}

/// Table data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TableData {
    /// Table header row
    pub headers: Vec<TableCell>,

    /// Table body rows
    pub rows: Vec<Vec<TableCell>>,
}

/// Single table cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableCell {
    /// Cell content
    pub content: Vec<Inline>,
}

impl TableCell {
    pub fn new(content: Vec<Inline>) -> Self {
        Self { content }
    }
}
