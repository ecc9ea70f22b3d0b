use mindmap_engine::layout::{EdgePath, Point, Rect};
use mindmap_engine::{Surface, TextAnchor};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Circle, Context, Line as Segment, Rectangle};

/// Pixel size of one terminal cell. Diagram coordinates are pixels; the
/// canvas maps them onto cells.
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;
/// Polyline segments used to approximate one Bezier connector.
const CURVE_SEGMENTS: usize = 12;

const EDGE_COLOR: Color = Color::Blue;
const NODE_COLOR: Color = Color::Gray;
const SELECTED_COLOR: Color = Color::Yellow;
const FOLD_COLOR: Color = Color::LightRed;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Segment { from: Point, to: Point },
    Label { at: Point, text: String, bold: bool },
    Marker { center: Point, radius: f64, filled: bool },
    Frame { rect: Rect, highlighted: bool },
}

/// Collects diagram primitives in canvas coordinates (y up) so they can be
/// painted from a ratatui `Canvas`.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    height: f64,
    pub shapes: Vec<Shape>,
}

impl CanvasSurface {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            shapes: Vec::new(),
        }
    }

    fn flip(&self, p: Point) -> Point {
        Point::new(p.x, self.height - p.y)
    }

    pub fn paint(&self, ctx: &mut Context) {
        for shape in &self.shapes {
            match shape {
                Shape::Segment { from, to } => ctx.draw(&Segment {
                    x1: from.x,
                    y1: from.y,
                    x2: to.x,
                    y2: to.y,
                    color: EDGE_COLOR,
                }),
                Shape::Frame { rect, highlighted } => ctx.draw(&Rectangle {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                    color: if *highlighted {
                        SELECTED_COLOR
                    } else {
                        NODE_COLOR
                    },
                }),
                Shape::Marker {
                    center,
                    radius,
                    filled,
                } => ctx.draw(&Circle {
                    x: center.x,
                    y: center.y,
                    radius: *radius,
                    color: if *filled { FOLD_COLOR } else { EDGE_COLOR },
                }),
                Shape::Label { at, text, bold } => {
                    let style = if *bold {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ctx.print(at.x, at.y, Line::from(Span::styled(text.clone(), style)));
                }
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn path(&mut self, path: &EdgePath) {
        let points = path.flatten(CURVE_SEGMENTS);
        for pair in points.windows(2) {
            self.shapes.push(Shape::Segment {
                from: self.flip(pair[0]),
                to: self.flip(pair[1]),
            });
        }
    }

    // Terminal text has one size, so `font_size` only matters for the SVG.
    fn text(&mut self, at: Point, text: &str, _font_size: f64, bold: bool, anchor: TextAnchor) {
        let x = match anchor {
            TextAnchor::Start => at.x,
            TextAnchor::Middle => at.x - text.chars().count() as f64 * CELL_WIDTH / 2.0,
        };
        self.shapes.push(Shape::Label {
            at: self.flip(Point::new(x, at.y)),
            text: text.to_string(),
            bold,
        });
    }

    fn circle(&mut self, center: Point, radius: f64, filled: bool) {
        self.shapes.push(Shape::Marker {
            center: self.flip(center),
            radius,
            filled,
        });
    }

    fn rect(&mut self, rect: Rect, highlighted: bool) {
        let bottom_left = self.flip(Point::new(rect.x, rect.bottom()));
        self.shapes.push(Shape::Frame {
            rect: Rect::new(bottom_left.x, bottom_left.y, rect.width, rect.height),
            highlighted,
        });
    }
}

/// Centre of a terminal cell, in pixels relative to the canvas origin.
pub fn cell_to_pixel(column: u16, row: u16, origin: (u16, u16)) -> Point {
    Point::new(
        (f64::from(column.saturating_sub(origin.0)) + 0.5) * CELL_WIDTH,
        (f64::from(row.saturating_sub(origin.1)) + 0.5) * CELL_HEIGHT,
    )
}
