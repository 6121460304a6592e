//! mdepub Core Library
//!
//! Compiles an ordered set of markdown documents into an EPUB 3 container.
//! Compilation is a pure transform producing an immutable [`EpubPackage`];
//! serializing that package to a ZIP container is a separate, stateless step.
//!
//! ```no_run
//! use mdepub_core::{compile, write_package, BookMetadata, SourceDocument};
//!
//! let sources = [
//!     SourceDocument::new("01-intro.md", "# Introduction\n\nHello."),
//!     SourceDocument::new("02-conclusion.md", "Goodbye."),
//! ];
//! let metadata = BookMetadata::new("urn:uuid:0000", "My Book", "en").with_author("Me");
//! let package = compile(&sources, None, metadata, None)?;
//! write_package(&package, "book.epub")?;
//! # Ok::<(), mdepub_core::MdepubError>(())
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod loader;
pub mod markup;
pub mod render;
pub mod types;
pub mod writer;

pub use compiler::{compile, Compiler};
pub use config::{CompilerConfig, MarkupPolicy};
pub use error::{CompileError, MdepubError, PackageWriteError, Result};
pub use loader::{compile_dir, load_sources, load_stylesheet};
pub use types::{
    Block, BookMetadata, CoverImage, EpubPackage, Inline, RenderedChapter, SourceDocument,
    Stylesheet, TableCell, TableData, TocEntry,
};
pub use writer::write_package;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_single_document() {
        let package = compile(
            &[SourceDocument::new("intro.md", "# Hello\n\nWorld")],
            None,
            BookMetadata::new("id-1", "Test Book", "en"),
            None,
        )
        .unwrap();
        assert_eq!(package.metadata.title, "Test Book");
        assert_eq!(package.chapters.len(), 1);
        assert_eq!(package.chapters[0].title, "Hello");
    }
}
