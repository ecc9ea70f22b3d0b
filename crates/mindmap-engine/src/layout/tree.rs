//! Elbow-connected layouts: Outline and Radial share one recursive placer
//! that is parameterised by growth direction and root-child partitioning.

use crate::models::Node;

use super::{
    LayoutStrategy,
    geometry::{EdgePath, LayoutBuilder, Layout, Marker, NodeGeometry, Point, Rect, Side},
    measure::{Metrics, font_size, label_height, stack_height, subtree_height, text_width},
};

/// Left edge of the root label in the outline layout.
pub const OUTLINE_ORIGIN_X: f64 = 40.0;
/// Centre of the root label in the radial layout.
pub const RADIAL_CENTER: Point = Point::new(0.0, 0.0);
/// Horizontal distance between a parent's edge and its children's near edge.
pub const LEVEL_GAP: f64 = 48.0;
/// Distance from a label edge to the centre of its fold marker.
pub const FOLD_MARKER_OFFSET: f64 = 8.0;
pub const FOLD_MARKER_RADIUS: f64 = 6.0;

const METRICS: Metrics = LayoutStrategy::Outline.metrics();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
}

impl Direction {
    fn side(self) -> Side {
        match self {
            Direction::Right => Side::Right,
            Direction::Left => Side::Left,
        }
    }

    /// The edge of `rect` facing the direction of growth.
    fn outer_edge(self, rect: &Rect) -> f64 {
        match self {
            Direction::Right => rect.right(),
            Direction::Left => rect.left(),
        }
    }

    fn sign(self) -> f64 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }
}

/// How the root's children are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildPartition {
    /// Every child grows to the right.
    AllRight,
    /// The first `ceil(n / 2)` children go right, the rest left.
    Split,
}

impl ChildPartition {
    fn split(self, children: &[Node]) -> (&[Node], &[Node]) {
        match self {
            ChildPartition::AllRight => (children, &[]),
            ChildPartition::Split => children.split_at(children.len().div_ceil(2)),
        }
    }
}

pub(crate) fn layout_tree(root: &Node, partition: ChildPartition) -> Layout {
    let strategy = match partition {
        ChildPartition::AllRight => LayoutStrategy::Outline,
        ChildPartition::Split => LayoutStrategy::Radial,
    };
    let mut out = LayoutBuilder::new(strategy);

    let width = text_width(&root.text, 0);
    let center = match partition {
        ChildPartition::AllRight => Point::new(OUTLINE_ORIGIN_X + width / 2.0, 0.0),
        ChildPartition::Split => RADIAL_CENTER,
    };
    let root_geo = node_geometry(root, 0, center, Side::Root, Direction::Right);
    let rect = root_geo.rect();
    out.push_node(root_geo);

    if root.is_expanded() {
        let (right, left) = partition.split(&root.children);
        place_children(root, right, &rect, 1, Direction::Right, &mut out);
        place_children(root, left, &rect, 1, Direction::Left, &mut out);
    }

    out.finish()
}

/// Stacks `children` beside `parent_rect`, centred on its vertical centre,
/// and recurses into every expanded child in the same direction.
fn place_children(
    parent: &Node,
    children: &[Node],
    parent_rect: &Rect,
    depth: usize,
    dir: Direction,
    out: &mut LayoutBuilder,
) {
    if children.is_empty() {
        return;
    }

    let parent_edge = dir.outer_edge(parent_rect);
    let parent_y = parent_rect.center().y;
    let near_edge = parent_edge + dir.sign() * LEVEL_GAP;
    let mut top = parent_y - stack_height(children, METRICS) / 2.0;

    for child in children {
        let height = subtree_height(child, METRICS);
        let y = top + height / 2.0;
        let width = text_width(&child.text, depth);
        let center = Point::new(near_edge + dir.sign() * width / 2.0, y);

        out.push_edge(&parent.id, &child.id, elbow(parent_edge, parent_y, near_edge, y));

        let geo = node_geometry(child, depth, center, dir.side(), dir);
        let rect = geo.rect();
        out.push_node(geo);

        if child.is_expanded() {
            place_children(child, &child.children, &rect, depth + 1, dir, out);
        }

        top += height + METRICS.gap;
    }
}

fn elbow(from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> EdgePath {
    let mid_x = (from_x + to_x) / 2.0;
    EdgePath::Elbow {
        points: [
            Point::new(from_x, from_y),
            Point::new(mid_x, from_y),
            Point::new(mid_x, to_y),
            Point::new(to_x, to_y),
        ],
    }
}

fn node_geometry(node: &Node, depth: usize, center: Point, side: Side, dir: Direction) -> NodeGeometry {
    let width = text_width(&node.text, depth);
    let height = label_height(depth);
    let rect = Rect::from_center(center, width, height);

    let marker = node.collapsed.then(|| Marker {
        center: Point::new(
            dir.outer_edge(&rect) + dir.sign() * FOLD_MARKER_OFFSET,
            center.y,
        ),
        radius: FOLD_MARKER_RADIUS,
        filled: true,
    });

    NodeGeometry {
        id: node.id.clone(),
        text: node.text.clone(),
        depth,
        center,
        width,
        height,
        font_size: font_size(depth),
        side,
        marker,
        has_children: !node.is_leaf(),
        collapsed: node.collapsed,
        has_note: node.has_note(),
    }
}
