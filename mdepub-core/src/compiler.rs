//! Compilation of source documents into an [`EpubPackage`]

use rayon::prelude::*;

use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::markup::{MarkdownParser, MarkupParser};
use crate::render::{assign_anchors, collect_sections, derive_title, XhtmlRenderer};
use crate::types::{
    BookMetadata, CoverImage, EpubPackage, PackageOptions, RenderedChapter, SourceDocument,
    Stylesheet, TocEntry,
};

/// Compiles markdown documents into an immutable package
pub struct Compiler {
    config: CompilerConfig,
    parser: Box<dyn MarkupParser>,
}

impl Compiler {
    /// Compiler with default settings
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::default())
    }

    /// Compiler using the given settings and the markdown parser they describe
    pub fn with_config(config: CompilerConfig) -> Self {
        let parser = Box::new(MarkdownParser::from_config(&config));
        Self { config, parser }
    }

    /// Replace the markup parser
    pub fn with_parser(mut self, parser: Box<dyn MarkupParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile `sources`, in order, into a package.
    ///
    /// Nothing is written anywhere; see [`crate::writer`] for serialization.
    pub fn compile(
        &self,
        sources: &[SourceDocument],
        cover: Option<CoverImage>,
        metadata: BookMetadata,
        stylesheet: Option<Stylesheet>,
    ) -> Result<EpubPackage, CompileError> {
        if sources.is_empty() {
            return Err(CompileError::EmptySourceSet);
        }
        metadata.validate()?;

        let width = self.config.pad_width_for(sources.len());
        let renderer =
            XhtmlRenderer::new(metadata.language.clone()).with_stylesheet(stylesheet.is_some());

        let render = |(i, doc): (usize, &SourceDocument)| {
            self.render_document(doc, i + 1, width, &renderer)
        };

        // Collect every result before short-circuiting so the reported
        // error is always the one with the lowest position.
        let results: Vec<Result<RenderedChapter, CompileError>> = if self.config.parallel {
            sources.par_iter().enumerate().map(render).collect()
        } else {
            sources.iter().enumerate().map(render).collect()
        };
        let chapters = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        let toc = chapters.iter().map(|c| self.toc_entry(c)).collect();

        tracing::info!(
            "Compiled '{}' with {} chapters",
            metadata.title,
            chapters.len()
        );

        Ok(EpubPackage {
            metadata,
            chapters,
            cover,
            stylesheet,
            toc,
            options: PackageOptions {
                include_ncx: self.config.include_ncx,
                compression_level: self.config.compression_level,
            },
        })
    }

    /// Title, file name, markup and shell for one document
    fn render_document(
        &self,
        doc: &SourceDocument,
        position: usize,
        width: usize,
        renderer: &XhtmlRenderer,
    ) -> Result<RenderedChapter, CompileError> {
        let text = doc.text.strip_prefix('\u{feff}').unwrap_or(&doc.text);
        let title = derive_title(text, doc.file_stem(), position);
        let file_stem = RenderedChapter::stem_for(position, width);

        let mut blocks =
            self.parser
                .parse(text)
                .map_err(|violation| CompileError::UnsupportedMarkup {
                    document: doc.display_name(),
                    construct: violation.construct,
                })?;
        assign_anchors(&mut blocks, &[file_stem.as_str()]);

        let body = renderer.blocks_to_xhtml(&blocks);
        let document = renderer.chapter_document(&title, &file_stem, &body);

        tracing::debug!(
            "Rendered {} -> {}.xhtml ('{}', {} blocks)",
            doc.display_name(),
            file_stem,
            title,
            blocks.len()
        );

        Ok(RenderedChapter {
            position,
            file_stem,
            title,
            body,
            document,
            sections: collect_sections(&blocks),
        })
    }

    fn toc_entry(&self, chapter: &RenderedChapter) -> TocEntry {
        let children = if self.config.toc_depth >= 2 {
            chapter
                .sections
                .iter()
                .map(|section| {
                    TocEntry::new(
                        section.title.as_str(),
                        format!("{}#{}", chapter.href(), section.anchor),
                        section.anchor.as_str(),
                    )
                    .with_level(1)
                })
                .collect()
        } else {
            Vec::new()
        };

        TocEntry::new(chapter.title.as_str(), chapter.href(), chapter.id()).with_children(children)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile with default settings
pub fn compile(
    sources: &[SourceDocument],
    cover: Option<CoverImage>,
    metadata: BookMetadata,
    stylesheet: Option<Stylesheet>,
) -> Result<EpubPackage, CompileError> {
    Compiler::new().compile(sources, cover, metadata, stylesheet)
}
