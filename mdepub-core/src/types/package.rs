//! The compiled package - the value handed to the writer

use serde::{Deserialize, Serialize};

use super::{BookMetadata, CoverImage, RenderedChapter, Stylesheet, TocEntry};

/// Manifest id and href of the navigation document
pub const NAV_ID: &str = "nav";
pub const NAV_HREF: &str = "nav.xhtml";

/// Manifest id and href of the EPUB 2 NCX
pub const NCX_ID: &str = "ncx";
pub const NCX_HREF: &str = "toc.ncx";

pub const STYLESHEET_ID: &str = "stylesheet";
pub const COVER_ID: &str = "cover-image";

/// Packaging options carried from the compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageOptions {
    pub include_ncx: bool,
    pub compression_level: Option<i64>,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            include_ncx: true,
            compression_level: None,
        }
    }
}

/// One `<item>` of the package manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    pub href: String,
    pub media_type: String,
    pub properties: Option<&'static str>,
}

/// A fully compiled book, ready to serialize.
///
/// The spine is always the navigation document followed by the chapters in
/// source order; chapter file names are unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpubPackage {
    pub metadata: BookMetadata,
    pub chapters: Vec<RenderedChapter>,
    pub cover: Option<CoverImage>,
    pub stylesheet: Option<Stylesheet>,
    pub toc: Vec<TocEntry>,
    pub options: PackageOptions,
}

impl EpubPackage {
    /// Get the book title
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Manifest ids in reading order
    pub fn spine(&self) -> Vec<&str> {
        std::iter::once(NAV_ID)
            .chain(self.chapters.iter().map(|c| c.id()))
            .collect()
    }

    /// Every manifest item, in the order written to the package document
    pub fn manifest(&self) -> Vec<ManifestItem> {
        let mut items = vec![ManifestItem {
            id: NAV_ID.to_string(),
            href: NAV_HREF.to_string(),
            media_type: "application/xhtml+xml".to_string(),
            properties: Some("nav"),
        }];

        if self.options.include_ncx {
            items.push(ManifestItem {
                id: NCX_ID.to_string(),
                href: NCX_HREF.to_string(),
                media_type: "application/x-dtbncx+xml".to_string(),
                properties: None,
            });
        }

        if self.stylesheet.is_some() {
            items.push(ManifestItem {
                id: STYLESHEET_ID.to_string(),
                href: Stylesheet::HREF.to_string(),
                media_type: "text/css".to_string(),
                properties: None,
            });
        }

        if let Some(cover) = &self.cover {
            items.push(ManifestItem {
                id: COVER_ID.to_string(),
                href: cover.href(),
                media_type: cover.media_type.clone(),
                properties: Some("cover-image"),
            });
        }

        for chapter in &self.chapters {
            items.push(ManifestItem {
                id: chapter.id().to_string(),
                href: chapter.href(),
                media_type: "application/xhtml+xml".to_string(),
                properties: None,
            });
        }

        items
    }
}
