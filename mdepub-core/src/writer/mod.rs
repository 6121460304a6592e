//! Serialization of an [`EpubPackage`] into an EPUB (ZIP) container

mod nav;
mod opf;

pub use nav::{generate_nav, generate_ncx};
pub use opf::{generate_opf, CONTAINER_XML, OPF_PATH};

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::PackageWriteError;
use crate::types::{EpubPackage, Stylesheet, NAV_HREF, NCX_HREF};

/// Directory holding the package document and all content
const CONTENT_DIR: &str = "OEBPS";

impl EpubPackage {
    /// Serialize the complete container into memory
    pub fn to_bytes(&self) -> Result<Vec<u8>, PackageWriteError> {
        let mut cursor = Cursor::new(Vec::new());
        write_to_writer(self, &mut cursor)?;
        Ok(cursor.into_inner())
    }
}

/// Write a package to `dest`, all-or-nothing.
///
/// The archive is built in memory, written to a temporary file next to
/// `dest` and renamed into place. On failure nothing exists at `dest`.
pub fn write_package(package: &EpubPackage, dest: impl AsRef<Path>) -> Result<(), PackageWriteError> {
    let dest = dest.as_ref();
    let bytes = package.to_bytes()?;

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(dest).map_err(|e| e.error)?;

    tracing::info!(
        "Wrote '{}' ({} bytes) to {}",
        package.title(),
        bytes.len(),
        dest.display()
    );

    Ok(())
}

/// Write the container to any [`Write`] + [`Seek`] destination.
///
/// Entry order and timestamps are fixed, so equal packages produce
/// byte-identical archives.
pub fn write_to_writer<W: Write + Seek>(package: &EpubPackage, writer: W) -> Result<(), PackageWriteError> {
    let mut zip = ZipWriter::new(writer);

    let stored = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(package.options.compression_level)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    // mimetype must be first and uncompressed
    zip.start_file("mimetype", stored)?;
    zip.write_all(b"application/epub+zip")?;

    zip.start_file("META-INF/container.xml", deflated)?;
    zip.write_all(CONTAINER_XML.as_bytes())?;

    zip.start_file(OPF_PATH, deflated)?;
    zip.write_all(generate_opf(package).as_bytes())?;

    zip.start_file(content_path(NAV_HREF), deflated)?;
    zip.write_all(generate_nav(package).as_bytes())?;

    if package.options.include_ncx {
        zip.start_file(content_path(NCX_HREF), deflated)?;
        zip.write_all(generate_ncx(package).as_bytes())?;
    }

    if let Some(stylesheet) = &package.stylesheet {
        zip.start_file(content_path(Stylesheet::HREF), deflated)?;
        zip.write_all(stylesheet.css.as_bytes())?;
    }

    if let Some(cover) = &package.cover {
        // Images are already compressed
        zip.start_file(content_path(&cover.href()), stored)?;
        zip.write_all(&cover.data)?;
    }

    for chapter in &package.chapters {
        zip.start_file(content_path(&chapter.href()), deflated)?;
        zip.write_all(chapter.document.as_bytes())?;
    }

    zip.finish()?;

    tracing::debug!(
        "Serialized {} manifest items for '{}'",
        package.manifest().len(),
        package.title()
    );

    Ok(())
}

fn content_path(href: &str) -> String {
    format!("{}/{}", CONTENT_DIR, href)
}
