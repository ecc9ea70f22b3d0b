use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::layout::{EdgePath, Point, Rect};
use crate::notes::NotePanel;

use super::{FOLD_GLYPH, Surface, TextAnchor};

pub const STROKE: &str = "#4F46E5";
pub const FOLD_FILL: &str = "#FF9800";
pub const FONT_FAMILY: &str = "Segoe UI, Arial, sans-serif";

/// Surface that accumulates an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Places an HTML note panel along the right edge.
    pub fn note_panel(&mut self, panel: &NotePanel) {
        let width = f64::from(panel.width);
        let x = self.width - width;
        let _ = write!(
            self.body,
            r#"<foreignObject x="{x}" y="0" width="{width}" height="{}"><div xmlns="http://www.w3.org/1999/xhtml" class="mindmap-note"><h3>{}</h3>{}</div></foreignObject>"#,
            self.height,
            encode_text(&panel.title),
            panel.body
        );
    }

    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

impl Surface for SvgSurface {
    fn path(&mut self, path: &EdgePath) {
        let _ = write!(
            self.body,
            r#"<path d="{}" stroke="{STROKE}" stroke-width="1.5" fill="none"/>"#,
            path.to_svg_path()
        );
    }

    fn text(&mut self, at: Point, text: &str, font_size: f64, bold: bool, anchor: TextAnchor) {
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let weight = if bold { "bold" } else { "normal" };
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{font_size}" font-weight="{weight}" font-family="{}" text-anchor="{anchor}" dominant-baseline="central">{}</text>"#,
            at.x,
            at.y,
            encode_double_quoted_attribute(FONT_FAMILY),
            encode_text(text)
        );
    }

    fn circle(&mut self, center: Point, radius: f64, filled: bool) {
        let fill = if filled { FOLD_FILL } else { "white" };
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}" stroke="{STROKE}" stroke-width="1.5"/>"#,
            center.x, center.y
        );
    }

    fn fold_glyph(&mut self, center: Point, font_size: f64) {
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{font_size}" font-weight="bold" font-family="{}" text-anchor="middle" dominant-baseline="central" fill="white">{FOLD_GLYPH}</text>"#,
            center.x,
            center.y,
            encode_double_quoted_attribute(FONT_FAMILY),
        );
    }

    fn rect(&mut self, rect: Rect, highlighted: bool) {
        let stroke_width = if highlighted { 3 } else { 1 };
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="6" fill="white" stroke="{STROKE}" stroke-width="{stroke_width}"/>"#,
            rect.x, rect.y, rect.width, rect.height
        );
    }
}
