//! Reading compiler inputs from the filesystem

use std::fs;
use std::path::{Path, PathBuf};

use crate::compiler::Compiler;
use crate::error::Result;
use crate::markup::parser_for_extension;
use crate::types::{BookMetadata, CoverImage, SourceDocument, Stylesheet};
use crate::writer::write_package;

/// Read every markdown file in `dir`, ordered lexically by file name.
///
/// Subdirectories and files of other types are ignored. Any error listing
/// the directory or inspecting a markdown entry fails the whole load.
pub fn load_sources(dir: impl AsRef<Path>) -> Result<Vec<SourceDocument>> {
    let dir = dir.as_ref();
    let config = crate::config::CompilerConfig::default();

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let is_markdown = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| parser_for_extension(ext, &config).is_some())
            .unwrap_or(false);
        if !is_markdown {
            continue;
        }

        // Symlinks count when their target is a regular file
        let file_type = entry.file_type()?;
        let is_file = if file_type.is_symlink() {
            fs::metadata(&path)?.is_file()
        } else {
            file_type.is_file()
        };
        if is_file {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path)?;
        sources.push(SourceDocument::new(path, text));
    }

    tracing::debug!("Loaded {} source documents from {}", sources.len(), dir.display());

    Ok(sources)
}

/// Read a stylesheet file
pub fn load_stylesheet(path: impl AsRef<Path>) -> Result<Stylesheet> {
    Ok(Stylesheet::new(fs::read_to_string(path)?))
}

/// Load a source directory, compile it and write the package to `dest`
pub fn compile_dir(
    compiler: &Compiler,
    dir: impl AsRef<Path>,
    cover: Option<&Path>,
    metadata: BookMetadata,
    stylesheet: Option<&Path>,
    dest: impl AsRef<Path>,
) -> Result<()> {
    let sources = load_sources(dir)?;
    let cover = cover.map(CoverImage::from_path).transpose()?;
    let stylesheet = stylesheet.map(load_stylesheet).transpose()?;

    let package = compiler.compile(&sources, cover, metadata, stylesheet)?;
    write_package(&package, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CompileError, MdepubError};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_load_sources_orders_lexically() {
        let dir = TempDir::new().unwrap();
        write(&dir, "10-end.md", "end");
        write(&dir, "02-middle.markdown", "middle");
        write(&dir, "01-start.md", "start");
        write(&dir, "notes.txt", "ignored");
        fs::create_dir(dir.path().join("sub.md")).unwrap();

        let sources = load_sources(dir.path()).unwrap();
        let stems: Vec<_> = sources.iter().map(|s| s.file_stem()).collect();
        assert_eq!(stems, vec!["01-start", "02-middle", "10-end"]);
        assert_eq!(sources[0].text, "start");
    }

    #[test]
    fn test_load_sources_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.md"), [0xff, 0xfe, 0x00]).unwrap();
        let err = load_sources(dir.path()).unwrap_err();
        assert!(matches!(err, MdepubError::Io(e) if e.kind() == std::io::ErrorKind::InvalidData));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_sources_reports_dangling_markdown_link() {
        let dir = TempDir::new().unwrap();
        write(&dir, "01-start.md", "start");
        std::os::unix::fs::symlink(dir.path().join("gone.md"), dir.path().join("02-gone.md"))
            .unwrap();

        let err = load_sources(dir.path()).unwrap_err();
        assert!(matches!(err, MdepubError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_load_sources_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = load_sources(dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, MdepubError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_compile_dir_empty_directory() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.epub");
        let err = compile_dir(
            &Compiler::new(),
            dir.path(),
            None,
            BookMetadata::new("id", "Title", "en"),
            None,
            &dest,
        )
        .unwrap_err();
        assert!(matches!(err, MdepubError::Compile(CompileError::EmptySourceSet)));
        assert!(!dest.exists());
    }

    #[test]
    fn test_compile_dir_writes_package() {
        let dir = TempDir::new().unwrap();
        write(&dir, "01-intro.md", "# Intro\n\nHello");
        write(&dir, "style.css", "body { margin: 0; }");
        write(&dir, "cover.png", "\u{1}png");
        let dest = dir.path().join("book.epub");

        compile_dir(
            &Compiler::new(),
            dir.path(),
            Some(&dir.path().join("cover.png")),
            BookMetadata::new("id", "Title", "en"),
            Some(&dir.path().join("style.css")),
            &dest,
        )
        .unwrap();

        assert!(dest.exists());
    }
}
