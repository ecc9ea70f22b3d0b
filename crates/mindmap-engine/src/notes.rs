//! Note panel rendering.
//!
//! A node's note is markdown. The diagram only decides *when* a note is
//! shown; turning markdown into something visible is delegated to a
//! [`NoteRenderer`].

use pulldown_cmark::{Event, Parser, Tag, TagEnd, html};

use crate::models::NodeId;

pub const NOTE_PANEL_MIN_WIDTH: u32 = 200;
pub const NOTE_PANEL_MAX_WIDTH: u32 = 800;
pub const NOTE_PANEL_DEFAULT_WIDTH: u32 = 320;
/// Approximate pixel width of one character in a plain text panel.
pub const PLAIN_CHAR_WIDTH: u32 = 8;

pub fn clamp_note_panel_width(width: u32) -> u32 {
    width.clamp(NOTE_PANEL_MIN_WIDTH, NOTE_PANEL_MAX_WIDTH)
}

/// The region a note is rendered into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePanel {
    pub node: NodeId,
    pub title: String,
    /// Pixel width of the panel.
    pub width: u32,
    /// Rendered body; its format is up to the renderer.
    pub body: String,
}

impl NotePanel {
    pub fn new(node: NodeId, title: impl Into<String>, width: u32) -> Self {
        Self {
            node,
            title: title.into(),
            width: clamp_note_panel_width(width),
            body: String::new(),
        }
    }
}

pub trait NoteRenderer {
    fn render(&self, note: &str, panel: &mut NotePanel);
}

/// Renders markdown to HTML.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlNotes;

impl NoteRenderer for HtmlNotes {
    fn render(&self, note: &str, panel: &mut NotePanel) {
        panel.body.clear();
        html::push_html(&mut panel.body, Parser::new(note));
    }
}

/// Renders markdown to plain text wrapped to the panel width.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextNotes;

impl NoteRenderer for PlainTextNotes {
    fn render(&self, note: &str, panel: &mut NotePanel) {
        let columns = (panel.width / PLAIN_CHAR_WIDTH).max(1) as usize;
        let text = flatten_markdown(note);
        panel.body = text
            .lines()
            .flat_map(|line| wrap(line, columns))
            .collect::<Vec<_>>()
            .join("\n");
    }
}

fn flatten_markdown(note: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(note) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("• "),
            Event::End(TagEnd::Item) => out.push('\n'),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock) => {
                out.push('\n')
            }
            _ => {}
        }
    }
    out.trim_end().to_string()
}

/// Greedy word wrap; words longer than `columns` get a line of their own.
fn wrap(line: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
