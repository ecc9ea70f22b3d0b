//! Legacy curved layout: a single rightward direction, every parent carries a
//! trailing circle marker and connectors are cubic Beziers leaving it.

use crate::models::{Node, NodeId};

use super::{
    LayoutStrategy,
    geometry::{EdgePath, Layout, LayoutBuilder, Marker, NodeGeometry, Point, Rect, Side},
    measure::{Metrics, font_size, label_height, stack_height, subtree_height, text_width},
};

pub const CURVE_ORIGIN_X: f64 = 40.0;
pub const MARKER_RADIUS: f64 = 6.0;
/// Space between the end of a label and its marker.
pub const MARKER_GAP: f64 = 6.0;
/// Horizontal distance from a parent's marker centre to its children.
pub const CHILD_OFFSET: f64 = 60.0;
pub const MIN_CONTROL_RATIO: f64 = 0.3;
pub const MAX_CONTROL_RATIO: f64 = 0.7;

const METRICS: Metrics = LayoutStrategy::Curve.metrics();

pub(crate) fn layout_curve(root: &Node) -> Layout {
    let mut out = LayoutBuilder::new(LayoutStrategy::Curve);
    place(root, 0, CURVE_ORIGIN_X, 0.0, None, &mut out);
    out.finish()
}

/// Places `node` with its label's left edge at `x`, then its children.
/// `incoming` is the parent id and the connector's start point.
fn place(
    node: &Node,
    depth: usize,
    x: f64,
    y: f64,
    incoming: Option<(&NodeId, Point)>,
    out: &mut LayoutBuilder,
) {
    let width = text_width(&node.text, depth);
    let height = label_height(depth);
    let rect = Rect::new(x, y - height / 2.0, width, height);
    let marker_x = rect.right() + MARKER_GAP + MARKER_RADIUS;

    if let Some((parent, start)) = incoming {
        out.push_edge(parent, &node.id, curve(start, Point::new(x, y)));
    }

    let marker = (!node.is_leaf()).then(|| Marker {
        center: Point::new(marker_x, y),
        radius: MARKER_RADIUS,
        filled: node.collapsed,
    });

    out.push_node(NodeGeometry {
        id: node.id.clone(),
        text: node.text.clone(),
        depth,
        center: rect.center(),
        width,
        height,
        font_size: font_size(depth),
        side: if depth == 0 { Side::Root } else { Side::Right },
        marker,
        has_children: !node.is_leaf(),
        collapsed: node.collapsed,
        has_note: node.has_note(),
    });

    if !node.is_expanded() {
        return;
    }

    let child_x = marker_x + CHILD_OFFSET;
    let start = Point::new(marker_x + MARKER_RADIUS, y);
    let mut top = y - stack_height(&node.children, METRICS) / 2.0;
    for child in &node.children {
        let h = subtree_height(child, METRICS);
        place(
            child,
            depth + 1,
            child_x,
            top + h / 2.0,
            Some((&node.id, start)),
            out,
        );
        top += h + METRICS.gap;
    }
}

/// Cubic Bezier whose control points sit on the start and end rows, pulled
/// horizontally by a share of the run that grows with the rise.
pub fn curve(start: Point, end: Point) -> EdgePath {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let ratio = if dx > 0.0 {
        (dy.abs() / dx).clamp(MIN_CONTROL_RATIO, MAX_CONTROL_RATIO)
    } else {
        0.5
    };
    EdgePath::Curve {
        start,
        control1: Point::new(start.x + dx * ratio, start.y),
        control2: Point::new(end.x - dx * ratio, end.y),
        end,
    }
}
