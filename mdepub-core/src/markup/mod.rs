//! Markup parsers turning source text into the block AST

mod markdown;

pub use markdown::MarkdownParser;

use crate::config::CompilerConfig;
use crate::error::MarkupViolation;
use crate::types::Block;

/// Trait for parsing a source document's text into blocks.
///
/// Implementations must be deterministic: equal input yields equal output.
/// Heading anchors may be left empty; the renderer assigns unique ones.
pub trait MarkupParser: Send + Sync {
    /// Parse a document body
    fn parse(&self, text: &str) -> Result<Vec<Block>, MarkupViolation>;

    /// File extensions this parser supports
    fn supported_extensions(&self) -> &[&str];
}

/// Get the appropriate parser for a file extension
pub fn parser_for_extension(ext: &str, config: &CompilerConfig) -> Option<Box<dyn MarkupParser>> {
    let ext = ext.to_lowercase();
    let parser = MarkdownParser::from_config(config);
    if parser.supported_extensions().contains(&ext.as_str()) {
        Some(Box::new(parser))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_for_extension() {
        let config = CompilerConfig::default();
        assert!(parser_for_extension("MD", &config).is_some());
        assert!(parser_for_extension("markdown", &config).is_some());
        assert!(parser_for_extension("txt", &config).is_none());
    }
}
