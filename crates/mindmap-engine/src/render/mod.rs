//! # Rendering
//!
//! Emits a [`Layout`] onto a [`Surface`] in screen coordinates. Connectors
//! are drawn in a first pass and node glyphs in a second, so glyphs always
//! sit on top of lines.

pub mod svg;

use crate::layout::{EdgePath, Layout, LayoutStrategy, NodeGeometry, Point, Rect};
use crate::models::NodeId;
use crate::viewport::Transform;

pub use svg::SvgSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// Drawing primitives a host surface must provide.
pub trait Surface {
    fn path(&mut self, path: &EdgePath);
    fn text(&mut self, at: Point, text: &str, font_size: f64, bold: bool, anchor: TextAnchor);
    fn circle(&mut self, center: Point, radius: f64, filled: bool);
    fn rect(&mut self, rect: Rect, highlighted: bool);

    /// Glyph centred on a collapsed curve marker.
    fn fold_glyph(&mut self, center: Point, font_size: f64) {
        self.text(center, FOLD_GLYPH, font_size, true, TextAnchor::Middle);
    }
}

/// Glyph drawn at the top-right corner of nodes carrying a note.
pub const NOTE_ICON: &str = "✎";
pub const FOLD_GLYPH: &str = "+";
pub const FOLD_GLYPH_SIZE: f64 = 12.0;

/// Draws `layout` through `transform`. `selected` is outlined as highlighted.
pub fn draw(
    layout: &Layout,
    transform: &Transform,
    selected: Option<&NodeId>,
    surface: &mut dyn Surface,
) {
    for edge in &layout.edges {
        surface.path(&edge.path.map(|p| transform.to_screen(p)));
    }
    for node in &layout.nodes {
        draw_node(layout.strategy, node, transform, selected == Some(&node.id), surface);
    }
}

fn draw_node(
    strategy: LayoutStrategy,
    node: &NodeGeometry,
    transform: &Transform,
    selected: bool,
    surface: &mut dyn Surface,
) {
    let rect = transform.rect_to_screen(&node.rect());
    let font_size = node.font_size * transform.scale;
    let bold = node.depth == 0;

    match strategy {
        LayoutStrategy::Outline | LayoutStrategy::Radial => {
            surface.rect(rect, selected);
            surface.text(rect.center(), &node.text, font_size, bold, TextAnchor::Middle);
        }
        LayoutStrategy::Curve => {
            if selected {
                surface.rect(rect, true);
            }
            let baseline = Point::new(rect.left() + font_size * 0.5, rect.center().y);
            surface.text(baseline, &node.text, font_size, bold, TextAnchor::Start);
        }
    }

    if let Some(marker) = &node.marker {
        let center = transform.to_screen(marker.center);
        surface.circle(center, marker.radius * transform.scale, marker.filled);
        if marker.filled && strategy == LayoutStrategy::Curve {
            surface.fold_glyph(center, FOLD_GLYPH_SIZE * transform.scale);
        }
    }

    if node.has_note {
        surface.text(
            Point::new(rect.right(), rect.top()),
            NOTE_ICON,
            font_size * 0.75,
            false,
            TextAnchor::Middle,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::models::FoldState;
    use crate::parsing::parse;

    #[derive(Debug, PartialEq)]
    enum Op {
        Path,
        Text(String),
        Circle(bool),
        Rect(bool),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Surface for Recorder {
        fn path(&mut self, _path: &EdgePath) {
            self.0.push(Op::Path);
        }
        fn text(&mut self, _at: Point, text: &str, _size: f64, _bold: bool, _a: TextAnchor) {
            self.0.push(Op::Text(text.to_string()));
        }
        fn circle(&mut self, _c: Point, _r: f64, filled: bool) {
            self.0.push(Op::Circle(filled));
        }
        fn rect(&mut self, _rect: Rect, highlighted: bool) {
            self.0.push(Op::Rect(highlighted));
        }
    }

    #[test]
    fn test_connectors_are_drawn_before_glyphs() {
        let root = parse("- a\n  - b\n    - c\n  - d", &FoldState::new()).unwrap();
        for strategy in LayoutStrategy::ALL {
            let mut rec = Recorder::default();
            draw(&layout(&root, strategy), &Transform::default(), None, &mut rec);

            let first_glyph = rec.0.iter().position(|op| *op != Op::Path).unwrap();
            assert_eq!(first_glyph, 3);
            assert!(rec.0[first_glyph..].iter().all(|op| *op != Op::Path));
        }
    }

    #[test]
    fn test_curve_markers_and_selection() {
        let mut root = parse("- a\n  - b\n    - c\n  - d", &FoldState::new()).unwrap();
        root.children[0].collapsed = true;
        let selected = root.children[1].id.clone();

        let mut rec = Recorder::default();
        let result = layout(&root, LayoutStrategy::Curve);
        draw(&result, &Transform::default(), Some(&selected), &mut rec);

        assert_eq!(
            rec.0,
            vec![
                Op::Path,
                Op::Path,
                Op::Text("a".into()),
                Op::Circle(false),
                Op::Text("b".into()),
                Op::Circle(true),
                Op::Text(FOLD_GLYPH.into()),
                Op::Rect(true),
                Op::Text("d".into()),
            ]
        );
    }

    #[test]
    fn test_note_icon_is_drawn() {
        let root = parse("# T\nbody", &FoldState::new()).unwrap();
        let mut rec = Recorder::default();
        draw(&layout(&root, LayoutStrategy::Outline), &Transform::default(), None, &mut rec);
        assert_eq!(
            rec.0,
            vec![Op::Rect(false), Op::Text("T".into()), Op::Text(NOTE_ICON.into())]
        );
    }
}
