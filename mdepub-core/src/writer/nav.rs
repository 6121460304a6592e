//! Navigation document (EPUB 3) and NCX (EPUB 2)

use crate::render::{escape_html as escape_xml, XhtmlRenderer};
use crate::types::{EpubPackage, TocEntry};

const NAV_TITLE: &str = "Table of Contents";

/// Generate `nav.xhtml` listing the TOC in source order
pub fn generate_nav(package: &EpubPackage) -> String {
    let mut body = String::new();

    body.push_str("<nav epub:type=\"toc\" id=\"toc\">\n");
    body.push_str(&format!("<h1>{}</h1>\n", NAV_TITLE));
    write_nav_list(&mut body, &package.toc);
    body.push_str("</nav>\n");

    if let Some(first) = package.chapters.first() {
        body.push_str("<nav epub:type=\"landmarks\" id=\"landmarks\" hidden=\"hidden\">\n<ol>\n");
        body.push_str(&format!(
            "<li><a epub:type=\"toc\" href=\"#toc\">{}</a></li>\n",
            NAV_TITLE
        ));
        body.push_str(&format!(
            "<li><a epub:type=\"bodymatter\" href=\"{}\">{}</a></li>\n",
            escape_xml(&first.href()),
            escape_xml(&first.title)
        ));
        body.push_str("</ol>\n</nav>\n");
    }

    XhtmlRenderer::new(package.metadata.language.clone())
        .with_stylesheet(package.stylesheet.is_some())
        .document(NAV_TITLE, &body)
}

fn write_nav_list(out: &mut String, entries: &[TocEntry]) {
    out.push_str("<ol>\n");
    for entry in entries {
        out.push_str(&format!(
            "<li><a href=\"{}\">{}</a>",
            escape_xml(&entry.href),
            escape_xml(&entry.title)
        ));
        if !entry.children.is_empty() {
            out.push('\n');
            write_nav_list(out, &entry.children);
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ol>\n");
}

/// Generate `toc.ncx` for EPUB 2 reading systems
pub fn generate_ncx(package: &EpubPackage) -> String {
    let depth = package.toc.iter().map(TocEntry::depth).max().unwrap_or(1);
    let mut ncx = String::new();

    ncx.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="{}"/>
    <meta name="dtb:depth" content="{}"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>{}</text>
  </docTitle>
  <navMap>
"#,
        escape_xml(&package.metadata.identifier),
        depth,
        escape_xml(&package.metadata.title)
    ));

    let mut play_order = 1;
    for entry in &package.toc {
        write_nav_point(&mut ncx, entry, &mut play_order, 2);
    }

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

fn write_nav_point(ncx: &mut String, entry: &TocEntry, play_order: &mut usize, indent: usize) {
    let indent_str = "  ".repeat(indent);

    ncx.push_str(&format!(
        "{}<navPoint id=\"navpoint-{}\" playOrder=\"{}\">\n",
        indent_str, play_order, play_order
    ));
    ncx.push_str(&format!(
        "{}  <navLabel><text>{}</text></navLabel>\n",
        indent_str,
        escape_xml(&entry.title)
    ));
    ncx.push_str(&format!(
        "{}  <content src=\"{}\"/>\n",
        indent_str,
        escape_xml(&entry.href)
    ));
    *play_order += 1;

    for child in &entry.children {
        write_nav_point(ncx, child, play_order, indent + 1);
    }

    ncx.push_str(&format!("{}</navPoint>\n", indent_str));
}
