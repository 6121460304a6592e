//! Block AST to XHTML

use super::anchors::slugify;
use crate::types::{Block, Inline, Stylesheet};

/// Renders blocks as XHTML fragments and wraps them in content documents
pub struct XhtmlRenderer {
    /// Language tag written to `xml:lang`
    language: String,
    /// Whether documents link the package stylesheet
    link_stylesheet: bool,
}

impl XhtmlRenderer {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            link_stylesheet: false,
        }
    }

    /// Link `style.css` from every document
    pub fn with_stylesheet(mut self, link: bool) -> Self {
        self.link_stylesheet = link;
        self
    }

    /// Convert Block AST to XHTML
    pub fn blocks_to_xhtml(&self, blocks: &[Block]) -> String {
        let mut html = String::new();
        for block in blocks {
            html.push_str(&self.block_to_xhtml(block));
        }
        html
    }

    /// Convert a single Block to XHTML
    fn block_to_xhtml(&self, block: &Block) -> String {
        match block {
            Block::Heading {
                level,
                content,
                anchor,
            } => {
                let id_attr = if anchor.is_empty() {
                    String::new()
                } else {
                    format!(" id=\"{}\"", escape_html(anchor))
                };
                format!(
                    "<h{level}{id_attr}>{}</h{level}>\n",
                    self.inlines_to_xhtml(content)
                )
            }
            Block::Paragraph(inlines) => {
                format!("<p>{}</p>\n", self.inlines_to_xhtml(inlines))
            }
            Block::List { items, start } => {
                let open = match start {
                    None => "<ul>".to_string(),
                    Some(1) => "<ol>".to_string(),
                    Some(n) => format!("<ol start=\"{}\">", n),
                };
                let close = if start.is_some() { "</ol>" } else { "</ul>" };
                let items_html: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>\n", self.blocks_to_xhtml(item).trim_end()))
                    .collect();
                format!("{open}\n{items_html}{close}\n")
            }
            Block::CodeBlock { lang, code } => {
                let class_attr = lang
                    .as_ref()
                    .map(|l| format!(" class=\"language-{}\"", escape_html(l)))
                    .unwrap_or_default();
                format!("<pre><code{}>{}</code></pre>\n", class_attr, escape_html(code))
            }
            Block::Blockquote(blocks) => {
                format!("<blockquote>\n{}</blockquote>\n", self.blocks_to_xhtml(blocks))
            }
            Block::ThematicBreak => "<hr/>\n".to_string(),
            Block::Table(table) => {
                let mut html = String::from("<table>\n");
                if !table.headers.is_empty() {
                    html.push_str("<thead><tr>");
                    for cell in &table.headers {
                        html.push_str(&format!("<th>{}</th>", self.inlines_to_xhtml(&cell.content)));
                    }
                    html.push_str("</tr></thead>\n");
                }
                html.push_str("<tbody>\n");
                for row in &table.rows {
                    html.push_str("<tr>");
                    for cell in row {
                        html.push_str(&format!("<td>{}</td>", self.inlines_to_xhtml(&cell.content)));
                    }
                    html.push_str("</tr>\n");
                }
                html.push_str("</tbody>\n</table>\n");
                html
            }
            Block::Footnote {
                id,
                anchor,
                content,
            } => {
                format!(
                    "<aside id=\"{}\" epub:type=\"footnote\">\n{}</aside>\n",
                    escape_html(&footnote_anchor(id, anchor)),
                    self.blocks_to_xhtml(content)
                )
            }
        }
    }

    /// Convert inline elements to XHTML
    fn inlines_to_xhtml(&self, inlines: &[Inline]) -> String {
        let mut html = String::new();
        for inline in inlines {
            html.push_str(&self.inline_to_xhtml(inline));
        }
        html
    }

    /// Convert a single Inline to XHTML
    fn inline_to_xhtml(&self, inline: &Inline) -> String {
        match inline {
            Inline::Text(s) => escape_html(s),
            Inline::Bold(children) => {
                format!("<strong>{}</strong>", self.inlines_to_xhtml(children))
            }
            Inline::Italic(children) => {
                format!("<em>{}</em>", self.inlines_to_xhtml(children))
            }
            Inline::Strikethrough(children) => {
                format!("<del>{}</del>", self.inlines_to_xhtml(children))
            }
            Inline::Code(s) => format!("<code>{}</code>", escape_html(s)),
            Inline::Link { children, url } => {
                format!(
                    "<a href=\"{}\">{}</a>",
                    escape_html(url),
                    self.inlines_to_xhtml(children)
                )
            }
            Inline::FootnoteRef { id, anchor } => {
                format!(
                    "<a href=\"#{}\" epub:type=\"noteref\">[{}]</a>",
                    escape_html(&footnote_anchor(id, anchor)),
                    escape_html(id)
                )
            }
            Inline::Break => "<br/>".to_string(),
        }
    }

    /// Wrap a rendered body in a complete chapter document
    pub fn chapter_document(&self, title: &str, section_id: &str, body: &str) -> String {
        let section = format!(
            "<section id=\"{}\" epub:type=\"chapter\">\n{}</section>\n",
            escape_html(section_id),
            body
        );
        self.document(title, &section)
    }

    /// Minimal XHTML shell shared by chapters and the navigation document
    pub fn document(&self, title: &str, body: &str) -> String {
        let stylesheet_link = if self.link_stylesheet {
            format!(
                "\n    <link rel=\"stylesheet\" type=\"text/css\" href=\"{}\"/>",
                Stylesheet::HREF
            )
        } else {
            String::new()
        };
        let lang = escape_html(&self.language);
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" xml:lang="{lang}" lang="{lang}">
<head>
    <meta charset="UTF-8"/>
    <title>{}</title>{}
</head>
<body>
{}</body>
</html>
"#,
            escape_html(title),
            stylesheet_link,
            body
        )
    }
}

/// Anchor of a footnote; blocks that never went through anchor assignment
/// fall back to a slug of the label
fn footnote_anchor(id: &str, anchor: &str) -> String {
    if anchor.is_empty() {
        format!("fn-{}", slugify(id))
    } else {
        anchor.to_string()
    }
}

/// Escape HTML special characters.
///
/// Characters XML 1.0 does not allow (most C0 controls, U+FFFE, U+FFFF)
/// become U+FFFD so the output stays well-formed.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => escaped.push(char::REPLACEMENT_CHARACTER),
        }
    }
    escaped
}

/// The XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TableCell, TableData};

    fn renderer() -> XhtmlRenderer {
        XhtmlRenderer::new("en")
    }

    #[test]
    fn test_paragraph_to_xhtml() {
        let block = Block::Paragraph(vec![
            Inline::Text("Hello ".to_string()),
            Inline::Bold(vec![Inline::Text("world".to_string())]),
        ]);

        let html = renderer().block_to_xhtml(&block);
        assert_eq!(html, "<p>Hello <strong>world</strong></p>\n");
    }

    #[test]
    fn test_code_block_is_escaped() {
        let block = Block::code_block("if a < b && c {}\n", Some("rust".into()));
        let html = renderer().block_to_xhtml(&block);
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">if a &lt; b &amp;&amp; c {}\n</code></pre>\n"
        );
    }

    #[test]
    fn test_escape_replaces_xml_forbidden_characters() {
        assert_eq!(escape_html("page one\u{c}page two\u{1}"), "page one\u{fffd}page two\u{fffd}");
        assert_eq!(escape_html("tab\tline\n\u{ffff}"), "tab\tline\n\u{fffd}");
        assert_eq!(escape_html("<a & 'b'>"), "&lt;a &amp; &#x27;b&#x27;&gt;");

        let html = renderer().block_to_xhtml(&Block::paragraph(vec![Inline::text("bell\u{7}")]));
        assert_eq!(html, "<p>bell\u{fffd}</p>\n");
    }

    #[test]
    fn test_footnote_uses_assigned_anchor() {
        let blocks = vec![
            Block::paragraph(vec![Inline::FootnoteRef {
                id: "my note".into(),
                anchor: "fn-my-note".into(),
            }]),
            Block::Footnote {
                id: "my note".into(),
                anchor: "fn-my-note".into(),
                content: vec![Block::paragraph(vec![Inline::text("Text.")])],
            },
        ];
        let html = renderer().blocks_to_xhtml(&blocks);
        assert_eq!(
            html,
            "<p><a href=\"#fn-my-note\" epub:type=\"noteref\">[my note]</a></p>\n\
             <aside id=\"fn-my-note\" epub:type=\"footnote\">\n<p>Text.</p>\n</aside>\n"
        );
    }

    #[test]
    fn test_table_to_xhtml() {
        let block = Block::Table(TableData {
            headers: vec![TableCell::new(vec![Inline::text("A")])],
            rows: vec![vec![TableCell::new(vec![Inline::text("1")])]],
        });
        let html = renderer().block_to_xhtml(&block);
        assert_eq!(
            html,
            "<table>\n<thead><tr><th>A</th></tr></thead>\n<tbody>\n<tr><td>1</td></tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let block = Block::List {
            items: vec![vec![Block::paragraph(vec![Inline::text("x")])]],
            start: Some(4),
        };
        let html = renderer().block_to_xhtml(&block);
        assert_eq!(html, "<ol start=\"4\">\n<li><p>x</p></li>\n</ol>\n");
    }

    #[test]
    fn test_chapter_document_links_stylesheet() {
        let doc = renderer()
            .with_stylesheet(true)
            .chapter_document("A & B", "chapter01", "");
        assert!(doc.contains("<title>A &amp; B</title>"));
        assert!(doc.contains("href=\"style.css\""));
        assert!(doc.contains("<section id=\"chapter01\" epub:type=\"chapter\">\n</section>"));

        let plain = renderer().chapter_document("A", "chapter01", "");
        assert!(!plain.contains("style.css"));
    }
}
