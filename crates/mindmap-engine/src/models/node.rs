use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a node within a parsed outline.
///
/// Identities are unique within one parse. Whether they survive a re-parse
/// depends on the [`IdStrategy`](crate::parsing::IdStrategy) used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Sentinel identity of the synthetic list-mode root.
    pub const ROOT: &'static str = "root";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A node of the outline tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    /// Document order; determines vertical stacking in every layout.
    pub children: Vec<Node>,
    /// Only ever true on nodes with at least one child.
    pub collapsed: bool,
    /// Markdown body attached by the heading dialect.
    pub note: Option<String>,
}

impl Node {
    pub fn new(id: NodeId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            children: Vec::new(),
            collapsed: false,
            note: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when children are laid out and rendered.
    pub fn is_expanded(&self) -> bool {
        !self.is_leaf() && !self.collapsed
    }

    pub fn has_note(&self) -> bool {
        self.note.is_some()
    }

    /// Total number of nodes in this subtree, hidden ones included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Pre-order walk over every node with its depth (root = 0).
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node, usize)) {
        self.walk_at(0, f);
    }

    fn walk_at<'a>(&'a self, depth: usize, f: &mut impl FnMut(&'a Node, usize)) {
        f(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, f);
        }
    }

    /// Sets `collapsed` on every node that has children and returns their ids.
    pub fn set_all_collapsed(&mut self, collapsed: bool) -> Vec<NodeId> {
        let mut changed = Vec::new();
        self.set_all_collapsed_into(collapsed, &mut changed);
        changed
    }

    fn set_all_collapsed_into(&mut self, collapsed: bool, out: &mut Vec<NodeId>) {
        if self.is_leaf() {
            return;
        }
        self.collapsed = collapsed;
        out.push(self.id.clone());
        for child in &mut self.children {
            child.set_all_collapsed_into(collapsed, out);
        }
    }

    /// Structural equality ignoring identities: shape, text, notes and folds.
    pub fn same_outline(&self, other: &Node) -> bool {
        self.text == other.text
            && self.note == other.note
            && self.collapsed == other.collapsed
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_outline(b))
    }

    /// Renders the tree as an indented outline, one node per line.
    ///
    /// Collapsed nodes are suffixed with ` [+]`; note lines follow their node
    /// prefixed with `> `. Identities are omitted so the dump is stable across
    /// parses.
    pub fn to_outline_string(&self) -> String {
        let mut lines = Vec::new();
        self.walk(&mut |node, depth| {
            let indent = "  ".repeat(depth);
            let fold = if node.collapsed { " [+]" } else { "" };
            lines.push(format!("{indent}- {}{fold}", node.text));
            if let Some(note) = &node.note {
                for line in note.lines() {
                    lines.push(format!("{indent}  > {line}").trim_end().to_string());
                }
            }
        });
        lines.join("\n")
    }
}
