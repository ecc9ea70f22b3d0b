//! # Layout Engine
//!
//! Computes the position of every visible node and connector of an outline
//! tree. Layout is a pure function of the tree (including its fold flags);
//! the whole tree is recomputed on every call.
//!
//! ## Strategies
//!
//! - **Outline** (`tree`): root at a fixed left margin, everything grows right,
//!   elbow connectors.
//! - **Radial** (`tree`): root centred, first half of its children to the
//!   right and the rest to the left; each side behaves like Outline.
//! - **Curve** (`curve`): legacy single-direction layout with circle markers
//!   and Bezier connectors.

pub mod curve;
pub mod geometry;
pub mod measure;
pub mod tree;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Node;

pub use geometry::{
    EdgeGeometry, EdgePath, Layout, Marker, NodeGeometry, Point, Rect, Side,
};
pub use measure::{Metrics, font_size, subtree_height, text_width};
pub use tree::{ChildPartition, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    #[default]
    Outline,
    Radial,
    Curve,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 3] = [
        LayoutStrategy::Outline,
        LayoutStrategy::Radial,
        LayoutStrategy::Curve,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutStrategy::Outline => "outline",
            LayoutStrategy::Radial => "radial",
            LayoutStrategy::Curve => "curve",
        }
    }

    /// Sibling spacing used by the strategy's placer.
    pub const fn metrics(self) -> Metrics {
        match self {
            LayoutStrategy::Outline | LayoutStrategy::Radial => Metrics::OUTLINE,
            LayoutStrategy::Curve => Metrics::CURVE,
        }
    }

    /// The following strategy in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            LayoutStrategy::Outline => LayoutStrategy::Radial,
            LayoutStrategy::Radial => LayoutStrategy::Curve,
            LayoutStrategy::Curve => LayoutStrategy::Outline,
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown layout strategy: {0} (expected outline, radial or curve)")]
pub struct UnknownStrategy(pub String);

impl FromStr for LayoutStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Lays out `root` and every visible descendant.
pub fn layout(root: &Node, strategy: LayoutStrategy) -> Layout {
    let result = match strategy {
        LayoutStrategy::Outline => tree::layout_tree(root, ChildPartition::AllRight),
        LayoutStrategy::Radial => tree::layout_tree(root, ChildPartition::Split),
        LayoutStrategy::Curve => curve::layout_curve(root),
    };
    log::debug!(
        "{strategy} layout: {} nodes, {} edges, bounds {:?}",
        result.nodes.len(),
        result.edges.len(),
        result.bounds
    );
    result
}
