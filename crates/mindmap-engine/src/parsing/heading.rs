use crate::models::{FoldState, Node};

use super::{
    classify::{LineClass, LineKind},
    draft::DraftTree,
    ids::IdGenerator,
};

/// Builds a tree from a `#` heading hierarchy.
///
/// The first heading becomes the root whatever its depth. Body lines between
/// two headings form the note of the earlier one.
pub struct HeadingBuilder {
    tree: DraftTree,
    root: Option<usize>,
    stack: Vec<(usize, usize)>,
    current: Option<usize>,
    note: Vec<String>,
}

impl HeadingBuilder {
    pub fn new() -> Self {
        Self {
            tree: DraftTree::new(),
            root: None,
            stack: Vec::new(),
            current: None,
            note: Vec::new(),
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        match &c.kind {
            LineKind::Blank => {}
            LineKind::Heading { level, text } => {
                self.flush_note();
                self.open_heading(*level, text);
            }
            LineKind::ListItem { .. } | LineKind::Text => {
                // Text ahead of the first heading has no owner.
                if self.current.is_some() {
                    self.note.push(c.raw.clone());
                }
            }
        }
    }

    pub fn finish(mut self, ids: &IdGenerator, folds: &FoldState) -> Option<Node> {
        // EOF flush
        self.flush_note();
        let root = self.root?;
        Some(self.tree.materialize(root, "", None, ids, folds))
    }

    fn open_heading(&mut self, level: usize, text: &str) {
        let Some(root) = self.root else {
            let root = self.tree.add_root(text);
            self.root = Some(root);
            self.stack.push((root, level));
            self.current = Some(root);
            return;
        };

        while self.stack.last().is_some_and(|&(_, depth)| depth >= level) {
            self.stack.pop();
        }

        // An emptied stack means the heading is no deeper than the root.
        let parent = self.stack.last().map_or(root, |&(idx, _)| idx);
        let idx = self.tree.add_child(parent, text);
        self.stack.push((idx, level));
        self.current = Some(idx);
    }

    fn flush_note(&mut self) {
        let lines = std::mem::take(&mut self.note);
        if let Some(current) = self.current
            && !lines.is_empty()
        {
            self.tree.set_note(current, lines);
        }
    }
}

impl Default for HeadingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
