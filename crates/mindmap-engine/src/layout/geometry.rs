use serde::Serialize;

use crate::models::NodeId;

use super::LayoutStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Smallest rectangle containing every point.
    pub fn from_points(points: &[Point]) -> Self {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if points.is_empty() {
            return Self::default();
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Which way a node's subtree grows from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Root,
    Right,
    Left,
}

/// Circular glyph drawn next to a node that has children.
///
/// Outline and radial layouts only show it on collapsed nodes; the curve
/// layout shows a hollow marker on every parent and fills it when collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub center: Point,
    pub radius: f64,
    pub filled: bool,
}

impl Marker {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center, self.radius * 2.0, self.radius * 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeGeometry {
    pub id: NodeId,
    pub text: String,
    pub depth: usize,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub side: Side,
    pub marker: Option<Marker>,
    pub has_children: bool,
    pub collapsed: bool,
    pub has_note: bool,
}

impl NodeGeometry {
    /// Box occupied by the label.
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, self.width, self.height)
    }

    /// Label box plus marker, if any.
    pub fn bounds(&self) -> Rect {
        match &self.marker {
            Some(marker) => self.rect().union(&marker.bounds()),
            None => self.rect(),
        }
    }
}

/// Connector path between a parent and one of its visible children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EdgePath {
    /// Horizontal, vertical, horizontal: parent edge → mid x → child edge.
    Elbow { points: [Point; 4] },
    /// Cubic Bezier.
    Curve {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl EdgePath {
    pub fn start(&self) -> Point {
        match self {
            EdgePath::Elbow { points } => points[0],
            EdgePath::Curve { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            EdgePath::Elbow { points } => points[3],
            EdgePath::Curve { end, .. } => *end,
        }
    }

    /// Extent of the path. For curves this is the hull of the control
    /// points, which always contains the curve itself.
    pub fn bounds(&self) -> Rect {
        match self {
            EdgePath::Elbow { points } => Rect::from_points(points),
            EdgePath::Curve {
                start,
                control1,
                control2,
                end,
            } => Rect::from_points(&[*start, *control1, *control2, *end]),
        }
    }

    /// Applies `f` to every defining point.
    pub fn map(&self, f: impl Fn(Point) -> Point) -> EdgePath {
        match self {
            EdgePath::Elbow { points } => EdgePath::Elbow {
                points: points.map(&f),
            },
            EdgePath::Curve {
                start,
                control1,
                control2,
                end,
            } => EdgePath::Curve {
                start: f(*start),
                control1: f(*control1),
                control2: f(*control2),
                end: f(*end),
            },
        }
    }

    /// Polyline approximation; curves are sampled `segments` times.
    pub fn flatten(&self, segments: usize) -> Vec<Point> {
        match self {
            EdgePath::Elbow { points } => points.to_vec(),
            EdgePath::Curve {
                start,
                control1,
                control2,
                end,
            } => {
                let segments = segments.max(1);
                (0..=segments)
                    .map(|i| {
                        let t = i as f64 / segments as f64;
                        let u = 1.0 - t;
                        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
                        Point::new(
                            a * start.x + b * control1.x + c * control2.x + d * end.x,
                            a * start.y + b * control1.y + c * control2.y + d * end.y,
                        )
                    })
                    .collect()
            }
        }
    }

    /// SVG path data.
    pub fn to_svg_path(&self) -> String {
        match self {
            EdgePath::Elbow { points: [a, b, c, d] } => format!(
                "M{},{} L{},{} L{},{} L{},{}",
                a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y
            ),
            EdgePath::Curve {
                start,
                control1,
                control2,
                end,
            } => format!(
                "M{},{} C{},{} {},{} {},{}",
                start.x, start.y, control1.x, control1.y, control2.x, control2.y, end.x, end.y
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeGeometry {
    pub from: NodeId,
    pub to: NodeId,
    pub path: EdgePath,
}

/// Positioned nodes and connectors for one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub strategy: LayoutStrategy,
    pub nodes: Vec<NodeGeometry>,
    pub edges: Vec<EdgeGeometry>,
    /// Union of every node box, marker and edge extent.
    pub bounds: Rect,
}

impl Layout {
    pub fn node(&self, id: &NodeId) -> Option<&NodeGeometry> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Topmost node whose box or marker contains `p` (content coordinates).
    pub fn hit_test(&self, p: Point) -> Option<&NodeGeometry> {
        self.nodes.iter().rev().find(|n| n.bounds().contains(p))
    }
}

/// Accumulates geometry and keeps the running bounding box.
#[derive(Debug)]
pub(crate) struct LayoutBuilder {
    strategy: LayoutStrategy,
    nodes: Vec<NodeGeometry>,
    edges: Vec<EdgeGeometry>,
    bounds: Option<Rect>,
}

impl LayoutBuilder {
    pub(crate) fn new(strategy: LayoutStrategy) -> Self {
        Self {
            strategy,
            nodes: Vec::new(),
            edges: Vec::new(),
            bounds: None,
        }
    }

    pub(crate) fn push_node(&mut self, node: NodeGeometry) {
        self.extend(node.bounds());
        self.nodes.push(node);
    }

    pub(crate) fn push_edge(&mut self, from: &NodeId, to: &NodeId, path: EdgePath) {
        self.extend(path.bounds());
        self.edges.push(EdgeGeometry {
            from: from.clone(),
            to: to.clone(),
            path,
        });
    }

    fn extend(&mut self, rect: Rect) {
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(&rect),
            None => rect,
        });
    }

    pub(crate) fn finish(self) -> Layout {
        Layout {
            strategy: self.strategy,
            nodes: self.nodes,
            edges: self.edges,
            bounds: self.bounds.unwrap_or_default(),
        }
    }
}
