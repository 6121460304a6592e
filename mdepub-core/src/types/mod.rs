//! Core types: inputs, the block AST, and the compiled package

mod block;
mod chapter;
mod cover;
mod metadata;
mod package;
mod source;
mod toc;

pub use block::{Block, Inline, TableCell, TableData};
pub use chapter::{RenderedChapter, Section};
pub use cover::{media_type_for_extension, CoverImage, Stylesheet};
pub use metadata::BookMetadata;
pub use package::{
    EpubPackage, ManifestItem, PackageOptions, COVER_ID, NAV_HREF, NAV_ID, NCX_HREF, NCX_ID,
    STYLESHEET_ID,
};
pub use source::SourceDocument;
pub use toc::TocEntry;
