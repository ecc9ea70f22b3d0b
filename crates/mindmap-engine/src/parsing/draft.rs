use std::collections::HashMap;

use crate::models::{FoldState, Node, NodeId};

use super::ids::IdGenerator;

#[derive(Debug, Clone, Default)]
struct DraftNode {
    text: String,
    note: Vec<String>,
    children: Vec<usize>,
}

/// Index-based tree the builders grow line by line.
///
/// Identities are only assigned in [`DraftTree::materialize`], once every
/// node's ancestry and sibling order are known.
#[derive(Debug, Clone, Default)]
pub struct DraftTree {
    nodes: Vec<DraftNode>,
}

impl DraftTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, text: impl Into<String>) -> usize {
        self.nodes.push(DraftNode {
            text: text.into(),
            ..DraftNode::default()
        });
        self.nodes.len() - 1
    }

    pub fn add_child(&mut self, parent: usize, text: impl Into<String>) -> usize {
        let idx = self.add_root(text);
        self.nodes[parent].children.push(idx);
        idx
    }

    pub fn set_text(&mut self, idx: usize, text: impl Into<String>) {
        self.nodes[idx].text = text.into();
    }

    pub fn set_note(&mut self, idx: usize, lines: Vec<String>) {
        self.nodes[idx].note = lines;
    }

    pub fn children(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].children
    }

    /// Converts the subtree at `idx` into owned [`Node`]s.
    ///
    /// `id` overrides the generated identity of the subtree root (used for
    /// the list-mode sentinel). Fold flags are seeded from `folds` for nodes
    /// that have children.
    pub fn materialize(
        &self,
        idx: usize,
        parent_key: &str,
        id: Option<NodeId>,
        ids: &IdGenerator,
        folds: &FoldState,
    ) -> Node {
        let draft = &self.nodes[idx];
        let key = match &id {
            Some(id) => id.to_string(),
            None => IdGenerator::key(parent_key, &draft.text, 0),
        };
        self.build(idx, key, id, ids, folds)
    }

    fn build(
        &self,
        idx: usize,
        key: String,
        id: Option<NodeId>,
        ids: &IdGenerator,
        folds: &FoldState,
    ) -> Node {
        let draft = &self.nodes[idx];
        let id = id.unwrap_or_else(|| ids.id_for(&key));

        let mut seen: HashMap<&str, usize> = HashMap::new();
        let children: Vec<Node> = draft
            .children
            .iter()
            .map(|&child| {
                let text = self.nodes[child].text.as_str();
                let ordinal = seen.entry(text).or_insert(0);
                let child_key = IdGenerator::key(&key, text, *ordinal);
                *ordinal += 1;
                self.build(child, child_key, None, ids, folds)
            })
            .collect();

        let note = draft.note.join("\n").trim().to_string();
        let collapsed = !children.is_empty() && folds.is_collapsed(&id);

        Node {
            id,
            text: draft.text.clone(),
            children,
            collapsed,
            note: (!note.is_empty()).then_some(note),
        }
    }
}
