use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::NodeId;

/// Remembered fold flags keyed by node identity.
///
/// Entries are only ever added or overwritten, never removed, so a flag
/// recorded during one render seeds any later parse that produces the same
/// identity.
#[derive(Debug, Default, Clone)]
pub struct FoldState {
    folds: HashMap<NodeId, bool>,
}

/// Fold state shared between every diagram opened by one host.
pub type SharedFoldState = Rc<RefCell<FoldState>>;

impl FoldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedFoldState {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Last recorded flag for `id`, if any.
    pub fn get(&self, id: &NodeId) -> Option<bool> {
        self.folds.get(id).copied()
    }

    pub fn is_collapsed(&self, id: &NodeId) -> bool {
        self.get(id).unwrap_or(false)
    }

    pub fn set(&mut self, id: NodeId, collapsed: bool) {
        self.folds.insert(id, collapsed);
    }

    pub fn set_many(&mut self, ids: impl IntoIterator<Item = NodeId>, collapsed: bool) {
        for id in ids {
            self.set(id, collapsed);
        }
    }

    pub fn len(&self) -> usize {
        self.folds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_node_is_expanded() {
        let state = FoldState::new();
        assert_eq!(state.get(&"x".into()), None);
        assert!(!state.is_collapsed(&"x".into()));
        assert!(state.is_empty());
    }

    #[test]
    fn test_set_overwrites_and_grows() {
        let mut state = FoldState::new();
        state.set("a".into(), true);
        state.set("a".into(), false);
        state.set_many(["b".into(), "c".into()], true);

        assert_eq!(state.len(), 3);
        assert_eq!(state.get(&"a".into()), Some(false));
        assert!(state.is_collapsed(&"c".into()));
    }

    #[test]
    fn test_shared_state_is_visible_to_all_holders() {
        let shared = FoldState::shared();
        let other = Rc::clone(&shared);
        shared.borrow_mut().set("n".into(), true);
        assert!(other.borrow().is_collapsed(&"n".into()));
    }
}
