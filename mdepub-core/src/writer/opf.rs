//! OPF package document and container descriptor

use crate::render::escape_html as escape_xml;
use crate::types::{EpubPackage, COVER_ID, NCX_ID};

/// Full path of the package document inside the container
pub const OPF_PATH: &str = "OEBPS/content.opf";

pub const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Generate the EPUB 3 package document
pub fn generate_opf(package: &EpubPackage) -> String {
    let metadata = &package.metadata;
    let mut opf = String::new();

    opf.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="book-id" xml:lang="{}">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
"#,
        escape_xml(&metadata.language)
    ));

    opf.push_str(&format!(
        "    <dc:identifier id=\"book-id\">{}</dc:identifier>\n",
        escape_xml(&metadata.identifier)
    ));
    opf.push_str(&format!(
        "    <dc:title>{}</dc:title>\n",
        escape_xml(&metadata.title)
    ));

    for (i, author) in metadata.authors.iter().enumerate() {
        let id = format!("creator-{}", i + 1);
        opf.push_str(&format!(
            "    <dc:creator id=\"{}\">{}</dc:creator>\n",
            id,
            escape_xml(author)
        ));
        opf.push_str(&format!(
            "    <meta refines=\"#{}\" property=\"role\" scheme=\"marc:relators\">aut</meta>\n",
            id
        ));
        opf.push_str(&format!(
            "    <meta refines=\"#{}\" property=\"display-seq\">{}</meta>\n",
            id,
            i + 1
        ));
    }

    opf.push_str(&format!(
        "    <dc:language>{}</dc:language>\n",
        escape_xml(&metadata.language)
    ));

    if let Some(ref publisher) = metadata.publisher {
        opf.push_str(&format!(
            "    <dc:publisher>{}</dc:publisher>\n",
            escape_xml(publisher)
        ));
    }

    if let Some(date) = metadata.date {
        opf.push_str(&format!("    <dc:date>{}</dc:date>\n", date.format("%Y-%m-%d")));
    }

    if let Some(ref description) = metadata.description {
        opf.push_str(&format!(
            "    <dc:description>{}</dc:description>\n",
            escape_xml(description)
        ));
    }

    for subject in &metadata.subjects {
        opf.push_str(&format!(
            "    <dc:subject>{}</dc:subject>\n",
            escape_xml(subject)
        ));
    }

    if let Some(ref rights) = metadata.rights {
        opf.push_str(&format!(
            "    <dc:rights>{}</dc:rights>\n",
            escape_xml(rights)
        ));
    }

    opf.push_str(&format!(
        "    <meta property=\"dcterms:modified\">{}</meta>\n",
        metadata.modified_timestamp()
    ));

    // EPUB 2 readers find the cover through this meta
    if package.cover.is_some() {
        opf.push_str(&format!("    <meta name=\"cover\" content=\"{}\"/>\n", COVER_ID));
    }

    opf.push_str("  </metadata>\n  <manifest>\n");

    for item in package.manifest() {
        let properties = item
            .properties
            .map(|p| format!(" properties=\"{}\"", p))
            .unwrap_or_default();
        opf.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"{}/>\n",
            escape_xml(&item.id),
            escape_xml(&item.href),
            escape_xml(&item.media_type),
            properties
        ));
    }

    opf.push_str("  </manifest>\n");

    if package.options.include_ncx {
        opf.push_str(&format!("  <spine toc=\"{}\">\n", NCX_ID));
    } else {
        opf.push_str("  <spine>\n");
    }

    for idref in package.spine() {
        opf.push_str(&format!("    <itemref idref=\"{}\"/>\n", escape_xml(idref)));
    }

    opf.push_str("  </spine>\n</package>\n");
    opf
}
