use crate::models::{FoldState, Node, NodeId};

use super::{
    classify::{LineClass, LineKind},
    draft::DraftTree,
    ids::IdGenerator,
};

/// Label of the synthetic root when no title line is present.
pub const DEFAULT_ROOT_TEXT: &str = "Root";

/// Builds a tree from indented bullet lines.
///
/// A stack of `(node, indent)` pairs is seeded with a synthetic root at
/// indent −1; each line pops every entry indented at least as deep as itself
/// and becomes a child of what remains on top.
pub struct ListBuilder {
    tree: DraftTree,
    root: usize,
    stack: Vec<(usize, isize)>,
    title: Option<String>,
    seen_first: bool,
}

impl ListBuilder {
    pub fn new() -> Self {
        let mut tree = DraftTree::new();
        let root = tree.add_root(DEFAULT_ROOT_TEXT);
        Self {
            tree,
            root,
            stack: vec![(root, -1)],
            title: None,
            seen_first: false,
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        if c.is_blank() {
            return;
        }

        if !self.seen_first {
            self.seen_first = true;
            if let LineKind::Heading { text, .. } = &c.kind {
                self.tree.set_text(self.root, text.clone());
                self.title = Some(text.clone());
                return;
            }
        }

        let indent = c.indent as isize;
        while self.stack.len() > 1 && self.stack.last().is_some_and(|&(_, i)| i >= indent) {
            self.stack.pop();
        }

        let parent = self.stack.last().map_or(self.root, |&(idx, _)| idx);
        let idx = self.tree.add_child(parent, c.list_text());
        self.stack.push((idx, indent));
    }

    pub fn finish(self, ids: &IdGenerator, folds: &FoldState) -> Node {
        let top_level = self.tree.children(self.root);
        if self.title.is_none() && top_level.len() == 1 {
            // A single top-level bullet is the real root.
            return self
                .tree
                .materialize(top_level[0], NodeId::ROOT, None, ids, folds);
        }

        self.tree
            .materialize(self.root, "", Some(NodeId::root()), ids, folds)
    }
}

impl Default for ListBuilder {
    fn default() -> Self {
        Self::new()
    }
}
