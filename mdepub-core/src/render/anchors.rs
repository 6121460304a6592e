//! Deterministic heading anchors

use std::collections::{HashMap, HashSet};

use crate::types::{Block, Inline, Section};

/// Give every heading and footnote a unique anchor, in document order.
///
/// Explicit `{#id}` anchors are kept as the base; others are slugs of the
/// heading text. Footnotes get `fn-` plus a slug of their label, and every
/// reference to a label links to the same anchor. Collisions (with each
/// other or with `reserved`) get `-2`, `-3`, ... suffixes.
pub fn assign_anchors(blocks: &mut [Block], reserved: &[&str]) {
    let mut used: HashSet<String> = reserved.iter().map(|s| s.to_string()).collect();
    assign_in(blocks, &mut used);

    let mut labels: Vec<String> = Vec::new();
    walk_footnotes(blocks, &mut |label: &str, _: &mut String| {
        if !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    });

    let notes: HashMap<String, String> = labels
        .into_iter()
        .map(|label| {
            let anchor = unique(format!("fn-{}", slugify(&label)), &mut used);
            (label, anchor)
        })
        .collect();

    walk_footnotes(blocks, &mut |label: &str, anchor: &mut String| {
        if let Some(assigned) = notes.get(label) {
            *anchor = assigned.clone();
        }
    });
}

fn assign_in(blocks: &mut [Block], used: &mut HashSet<String>) {
    for block in blocks {
        match block {
            Block::Heading {
                content, anchor, ..
            } => {
                let base = if anchor.is_empty() {
                    slugify(&Inline::plain_text(content))
                } else {
                    anchor.clone()
                };
                *anchor = unique(base, used);
            }
            Block::Blockquote(children) | Block::Footnote { content: children, .. } => {
                assign_in(children, used)
            }
            Block::List { items, .. } => {
                for item in items {
                    assign_in(item, used);
                }
            }
            _ => {}
        }
    }
}

/// Visit every footnote definition and reference as `(label, anchor)`
fn walk_footnotes(blocks: &mut [Block], f: &mut dyn FnMut(&str, &mut String)) {
    for block in blocks {
        match block {
            Block::Heading { content, .. } | Block::Paragraph(content) => {
                walk_inline_footnotes(content, f)
            }
            Block::List { items, .. } => {
                for item in items {
                    walk_footnotes(item, f);
                }
            }
            Block::Blockquote(children) => walk_footnotes(children, f),
            Block::Table(table) => {
                for cell in table.headers.iter_mut().chain(table.rows.iter_mut().flatten()) {
                    walk_inline_footnotes(&mut cell.content, f);
                }
            }
            Block::Footnote { id, anchor, content } => {
                f(id, anchor);
                walk_footnotes(content, f);
            }
            Block::CodeBlock { .. } | Block::ThematicBreak => {}
        }
    }
}

fn walk_inline_footnotes(inlines: &mut [Inline], f: &mut dyn FnMut(&str, &mut String)) {
    for inline in inlines {
        match inline {
            Inline::FootnoteRef { id, anchor } => f(id, anchor),
            Inline::Bold(children)
            | Inline::Italic(children)
            | Inline::Strikethrough(children)
            | Inline::Link { children, .. } => walk_inline_footnotes(children, f),
            _ => {}
        }
    }
}

fn unique(base: String, used: &mut HashSet<String>) -> String {
    let mut candidate = base.clone();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Lowercase alphanumerics joined by single dashes
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// Top-level level-2 headings, for nested TOC entries
pub fn collect_sections(blocks: &[Block]) -> Vec<Section> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Heading {
                level: 2,
                content,
                anchor,
            } => Some(Section {
                title: Inline::plain_text(content),
                anchor: anchor.clone(),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, text: &str) -> Block {
        Block::heading(level, vec![Inline::text(text)], "")
    }

    fn anchors(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { anchor, .. } => Some(anchor.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Multiple   spaces__and-dashes "), "multiple-spaces-and-dashes");
        assert_eq!(slugify("Ünïcode Ok"), "ünïcode-ok");
        assert_eq!(slugify("!!!"), "section");
    }

    #[test]
    fn test_duplicates_and_reserved() {
        let mut blocks = vec![
            heading(1, "Chapter01"),
            heading(2, "Usage"),
            heading(2, "Usage"),
            heading(2, "Usage"),
        ];
        assign_anchors(&mut blocks, &["chapter01"]);
        assert_eq!(
            anchors(&blocks),
            vec!["chapter01-2", "usage", "usage-2", "usage-3"]
        );
    }

    #[test]
    fn test_explicit_anchor_kept() {
        let mut blocks = vec![Block::heading(2, vec![Inline::text("Setup")], "install")];
        assign_anchors(&mut blocks, &[]);
        assert_eq!(anchors(&blocks), vec!["install"]);
    }

    fn footnote(id: &str, text: &str) -> Block {
        Block::Footnote {
            id: id.into(),
            anchor: String::new(),
            content: vec![Block::paragraph(vec![Inline::text(text)])],
        }
    }

    fn reference(id: &str) -> Inline {
        Inline::FootnoteRef {
            id: id.into(),
            anchor: String::new(),
        }
    }

    #[test]
    fn test_footnote_anchors_avoid_heading_ids() {
        let mut blocks = vec![
            heading(2, "Fn 1"),
            Block::paragraph(vec![Inline::text("See"), reference("1")]),
            footnote("1", "The note."),
        ];
        assign_anchors(&mut blocks, &["chapter01"]);

        assert_eq!(anchors(&blocks), vec!["fn-1"]);
        assert!(matches!(&blocks[1], Block::Paragraph(inlines)
            if matches!(&inlines[1], Inline::FootnoteRef { anchor, .. } if anchor == "fn-1-2")));
        assert!(matches!(&blocks[2], Block::Footnote { anchor, .. } if anchor == "fn-1-2"));
    }

    #[test]
    fn test_footnote_label_is_slugged() {
        let mut blocks = vec![
            Block::paragraph(vec![Inline::Italic(vec![reference("my note")])]),
            footnote("my note", "Text."),
        ];
        assign_anchors(&mut blocks, &[]);

        assert!(matches!(&blocks[0], Block::Paragraph(inlines)
            if matches!(&inlines[0], Inline::Italic(children)
                if matches!(&children[0], Inline::FootnoteRef { anchor, .. } if anchor == "fn-my-note"))));
        assert!(matches!(&blocks[1], Block::Footnote { anchor, .. } if anchor == "fn-my-note"));
    }

    #[test]
    fn test_collect_sections() {
        let mut blocks = vec![heading(1, "Intro"), heading(2, "First"), heading(3, "Deep")];
        assign_anchors(&mut blocks, &[]);
        let sections = collect_sections(&blocks);
        assert_eq!(
            sections,
            vec![Section {
                title: "First".into(),
                anchor: "first".into()
            }]
        );
    }
}
