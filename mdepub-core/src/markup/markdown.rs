//! Markdown parser built on pulldown-cmark

use crate::config::{CompilerConfig, MarkupPolicy};
use crate::error::MarkupViolation;
use crate::types::{Block, Inline, TableCell, TableData};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Parser for the supported markdown subset
pub struct MarkdownParser {
    /// Whether to enable tables extension
    enable_tables: bool,
    /// Whether to enable strikethrough extension
    enable_strikethrough: bool,
    /// Whether to enable footnotes extension
    enable_footnotes: bool,
    /// Handling of raw HTML and images
    policy: MarkupPolicy,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self {
            enable_tables: true,
            enable_strikethrough: true,
            enable_footnotes: true,
            policy: MarkupPolicy::Passthrough,
        }
    }

    /// Build a parser from compiler settings
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self {
            enable_tables: config.enable_tables,
            enable_strikethrough: config.enable_strikethrough,
            enable_footnotes: config.enable_footnotes,
            policy: config.markup_policy,
        }
    }

    /// Enable or disable tables parsing
    pub fn with_tables(mut self, enable: bool) -> Self {
        self.enable_tables = enable;
        self
    }

    /// Enable or disable strikethrough parsing
    pub fn with_strikethrough(mut self, enable: bool) -> Self {
        self.enable_strikethrough = enable;
        self
    }

    /// Enable or disable footnotes parsing
    pub fn with_footnotes(mut self, enable: bool) -> Self {
        self.enable_footnotes = enable;
        self
    }

    /// Set the unsupported-markup policy
    pub fn with_policy(mut self, policy: MarkupPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn get_parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.enable_footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        // Parsed only so the markup policy sees them
        options.insert(Options::ENABLE_TASKLISTS);
        options
    }

    /// Record a construct outside the supported subset.
    /// Strict mode fails; passthrough logs and lets the caller emit literal text.
    fn unsupported(&self, construct: &str) -> Result<(), MarkupViolation> {
        match self.policy {
            MarkupPolicy::Strict => Err(MarkupViolation::new(construct)),
            MarkupPolicy::Passthrough => {
                tracing::warn!("Passing through unsupported {} as literal text", construct);
                Ok(())
            }
        }
    }

    /// Process markdown events into blocks
    fn process_events(&self, events: &[Event], state: &mut ParserState) -> Result<(), MarkupViolation> {
        let mut i = 0;
        while i < events.len() {
            i = self.process_event(events, i, state)?;
        }
        Ok(())
    }

    /// Process a single event, returning the next index to process
    fn process_event(
        &self,
        events: &[Event],
        start: usize,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        match &events[start] {
            Event::Start(tag) => self.handle_start_tag(events, start, tag.clone(), state),
            Event::Text(text) => {
                state.push_text(text.to_string());
                Ok(start + 1)
            }
            Event::Code(code) => {
                state.push_inline(Inline::Code(code.to_string()));
                Ok(start + 1)
            }
            Event::SoftBreak => {
                state.push_text(" ".to_string());
                Ok(start + 1)
            }
            Event::HardBreak => {
                state.push_inline(Inline::Break);
                Ok(start + 1)
            }
            Event::Rule => {
                state.flush_inlines();
                state.blocks.push(Block::ThematicBreak);
                Ok(start + 1)
            }
            Event::FootnoteReference(label) => {
                state.push_inline(Inline::FootnoteRef {
                    id: label.to_string(),
                    anchor: String::new(),
                });
                Ok(start + 1)
            }
            Event::InlineHtml(html) | Event::Html(html) => {
                self.unsupported("raw HTML")?;
                state.push_text(html.to_string());
                Ok(start + 1)
            }
            Event::TaskListMarker(checked) => {
                self.unsupported("task list marker")?;
                state.push_text(if *checked { "[x] " } else { "[ ] " }.to_string());
                Ok(start + 1)
            }
            _ => Ok(start + 1),
        }
    }

    /// Handle a start tag and process until its matching end tag
    fn handle_start_tag(
        &self,
        events: &[Event],
        start: usize,
        tag: Tag,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        // Text already collected in a tight list item precedes this block
        if is_block_tag(&tag) {
            state.flush_inlines();
        }

        match tag {
            Tag::Heading { level, id, .. } => {
                self.process_heading(events, start, level, id.as_deref(), state)
            }
            Tag::Paragraph => self.process_paragraph(events, start, state),
            Tag::BlockQuote => self.process_blockquote(events, start, state),
            Tag::CodeBlock(kind) => self.process_code_block(events, start, kind, state),
            Tag::HtmlBlock => self.process_html_block(events, start, state),
            Tag::List(start_num) => self.process_list(events, start, start_num, state),
            Tag::Table(_) => self.process_table(events, start, state),
            Tag::TableHead => self.process_table_head(events, start, state),
            Tag::TableRow => self.process_table_row(events, start, state),
            Tag::TableCell => self.process_table_cell(events, start, state),
            Tag::Emphasis => self.process_wrapped(events, start, TagEnd::Emphasis, Inline::Italic, state),
            Tag::Strong => self.process_wrapped(events, start, TagEnd::Strong, Inline::Bold, state),
            Tag::Strikethrough => {
                self.process_wrapped(events, start, TagEnd::Strikethrough, Inline::Strikethrough, state)
            }
            Tag::Link { dest_url, .. } => {
                self.process_link(events, start, dest_url.to_string(), state)
            }
            Tag::Image { dest_url, .. } => {
                self.process_image(events, start, dest_url.to_string(), state)
            }
            Tag::FootnoteDefinition(label) => {
                self.process_footnote_def(events, start, label.to_string(), state)
            }
            _ => Ok(start + 1),
        }
    }

    /// Find the matching end tag for a start tag
    fn find_end_tag(&self, events: &[Event], start: usize, expected_end: &TagEnd) -> usize {
        let mut depth = 0;
        for (i, event) in events.iter().enumerate().skip(start) {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(end) => {
                    depth -= 1;
                    if depth == 0 && end == expected_end {
                        return i;
                    }
                }
                _ => {}
            }
        }
        events.len()
    }

    /// Process a heading
    fn process_heading(
        &self,
        events: &[Event],
        start: usize,
        level: HeadingLevel,
        id: Option<&str>,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::Heading(level));
        let inlines = self.collect_inlines(events, start + 1, end)?;

        let level_num = match level {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        };

        state.blocks.push(Block::Heading {
            level: level_num,
            content: inlines,
            anchor: id.unwrap_or_default().to_string(),
        });

        Ok(end + 1)
    }

    /// Process a paragraph
    fn process_paragraph(
        &self,
        events: &[Event],
        start: usize,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::Paragraph);
        let inlines = self.collect_inlines(events, start + 1, end)?;

        if !inlines.is_empty() {
            state.blocks.push(Block::Paragraph(inlines));
        }

        Ok(end + 1)
    }

    /// Process a blockquote
    fn process_blockquote(
        &self,
        events: &[Event],
        start: usize,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::BlockQuote);

        let mut inner_state = ParserState::new();
        self.process_events(&events[start + 1..end], &mut inner_state)?;

        state.blocks.push(Block::Blockquote(inner_state.into_blocks()));

        Ok(end + 1)
    }

    /// Process a code block
    fn process_code_block(
        &self,
        events: &[Event],
        start: usize,
        kind: CodeBlockKind,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let lang = match &kind {
            CodeBlockKind::Fenced(info) => info
                .split_whitespace()
                .next()
                .map(|lang| lang.to_string()),
            CodeBlockKind::Indented => None,
        };

        let end = self.find_end_tag(events, start, &TagEnd::CodeBlock);

        let mut code = String::new();
        for event in &events[start + 1..end] {
            if let Event::Text(text) = event {
                code.push_str(text);
            }
        }

        state.blocks.push(Block::CodeBlock { lang, code });

        Ok(end + 1)
    }

    /// Process a raw HTML block; passthrough keeps it as a literal paragraph
    fn process_html_block(
        &self,
        events: &[Event],
        start: usize,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        self.unsupported("raw HTML")?;
        let end = self.find_end_tag(events, start, &TagEnd::HtmlBlock);

        let mut html = String::new();
        for event in &events[start + 1..end] {
            if let Event::Html(text) | Event::Text(text) = event {
                html.push_str(text);
            }
        }

        let literal = html.trim_end();
        if !literal.is_empty() {
            state
                .blocks
                .push(Block::Paragraph(vec![Inline::text(literal)]));
        }

        Ok(end + 1)
    }

    /// Process a list
    fn process_list(
        &self,
        events: &[Event],
        start: usize,
        start_num: Option<u64>,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::List(start_num.is_some()));

        let mut items: Vec<Vec<Block>> = Vec::new();
        let mut i = start + 1;

        while i < end {
            if let Event::Start(Tag::Item) = &events[i] {
                let item_end = self.find_end_tag(events, i, &TagEnd::Item);

                let mut item_state = ParserState::new();
                self.process_events(&events[i + 1..item_end], &mut item_state)?;
                items.push(item_state.into_blocks());

                i = item_end + 1;
            } else {
                i += 1;
            }
        }

        state.blocks.push(Block::List {
            items,
            start: start_num,
        });

        Ok(end + 1)
    }

    /// Process a table
    fn process_table(
        &self,
        events: &[Event],
        start: usize,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::Table);

        state.table_headers.clear();
        state.table_rows.clear();

        self.process_events(&events[start + 1..end], state)?;

        let table = TableData {
            headers: std::mem::take(&mut state.table_headers),
            rows: std::mem::take(&mut state.table_rows),
        };

        state.blocks.push(Block::Table(table));

        Ok(end + 1)
    }

    /// Process table head
    fn process_table_head(
        &self,
        events: &[Event],
        start: usize,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::TableHead);

        state.current_row.clear();
        self.process_events(&events[start + 1..end], state)?;
        state.table_headers = std::mem::take(&mut state.current_row);

        Ok(end + 1)
    }

    /// Process table row
    fn process_table_row(
        &self,
        events: &[Event],
        start: usize,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::TableRow);

        state.current_row.clear();
        self.process_events(&events[start + 1..end], state)?;

        if !state.current_row.is_empty() {
            state
                .table_rows
                .push(std::mem::take(&mut state.current_row));
        }

        Ok(end + 1)
    }

    /// Process table cell
    fn process_table_cell(
        &self,
        events: &[Event],
        start: usize,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::TableCell);
        let inlines = self.collect_inlines(events, start + 1, end)?;

        state.current_row.push(TableCell::new(inlines));

        Ok(end + 1)
    }

    /// Process emphasis, strong and strikethrough spans
    fn process_wrapped(
        &self,
        events: &[Event],
        start: usize,
        end_tag: TagEnd,
        wrap: fn(Vec<Inline>) -> Inline,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &end_tag);
        let inlines = self.collect_inlines(events, start + 1, end)?;

        state.push_inline(wrap(inlines));

        Ok(end + 1)
    }

    /// Process a link
    fn process_link(
        &self,
        events: &[Event],
        start: usize,
        url: String,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::Link);
        let children = self.collect_inlines(events, start + 1, end)?;

        state.push_inline(Inline::Link { children, url });

        Ok(end + 1)
    }

    /// Process an image. Images are not packaged, so passthrough keeps the
    /// original markdown as literal text.
    fn process_image(
        &self,
        events: &[Event],
        start: usize,
        src: String,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        self.unsupported("image")?;
        let end = self.find_end_tag(events, start, &TagEnd::Image);
        let alt = Inline::plain_text(&self.collect_inlines(events, start + 1, end)?);

        state.push_text(format!("![{}]({})", alt, src));

        Ok(end + 1)
    }

    /// Process a footnote definition
    fn process_footnote_def(
        &self,
        events: &[Event],
        start: usize,
        label: String,
        state: &mut ParserState,
    ) -> Result<usize, MarkupViolation> {
        let end = self.find_end_tag(events, start, &TagEnd::FootnoteDefinition);

        let mut inner_state = ParserState::new();
        self.process_events(&events[start + 1..end], &mut inner_state)?;

        state.blocks.push(Block::Footnote {
            id: label,
            anchor: String::new(),
            content: inner_state.into_blocks(),
        });

        Ok(end + 1)
    }

    /// Collect inline elements from events
    fn collect_inlines(
        &self,
        events: &[Event],
        start: usize,
        end: usize,
    ) -> Result<Vec<Inline>, MarkupViolation> {
        let mut state = ParserState::new();
        self.process_events(&events[start..end], &mut state)?;
        Ok(state.inlines)
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl super::MarkupParser for MarkdownParser {
    fn parse(&self, text: &str) -> Result<Vec<Block>, MarkupViolation> {
        let events: Vec<Event> = Parser::new_ext(text, self.get_parser_options()).collect();

        let mut state = ParserState::new();
        self.process_events(&events, &mut state)?;

        Ok(state.into_blocks())
    }

    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkd"]
    }
}

/// Parser state for tracking context during parsing
struct ParserState {
    blocks: Vec<Block>,
    inlines: Vec<Inline>,
    // Table state
    table_headers: Vec<TableCell>,
    table_rows: Vec<Vec<TableCell>>,
    current_row: Vec<TableCell>,
}

impl ParserState {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            inlines: Vec::new(),
            table_headers: Vec::new(),
            table_rows: Vec::new(),
            current_row: Vec::new(),
        }
    }

    fn push_text(&mut self, text: String) {
        if !text.is_empty() {
            self.inlines.push(Inline::Text(text));
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        self.inlines.push(inline);
    }

    /// Tight list items carry bare inlines instead of paragraphs; each run
    /// becomes a paragraph in the position it was written
    fn flush_inlines(&mut self) {
        if !self.inlines.is_empty() {
            let inlines = std::mem::take(&mut self.inlines);
            self.blocks.push(Block::Paragraph(inlines));
        }
    }

    fn into_blocks(mut self) -> Vec<Block> {
        self.flush_inlines();
        self.blocks
    }
}

fn is_block_tag(tag: &Tag) -> bool {
    matches!(
        tag,
        Tag::Heading { .. }
            | Tag::Paragraph
            | Tag::BlockQuote
            | Tag::CodeBlock(_)
            | Tag::HtmlBlock
            | Tag::List(_)
            | Tag::Table(_)
            | Tag::FootnoteDefinition(_)
    )
}
