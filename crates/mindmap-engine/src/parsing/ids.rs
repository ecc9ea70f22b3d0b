use uuid::Uuid;

use crate::models::NodeId;

/// Namespace for name-based node identities.
const NODE_NAMESPACE: Uuid = Uuid::from_u128(0x8c3e_51f4_2b0d_4f6a_9e71_3d5a_c0b8_e217);

/// How node identities are produced during a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Derived from the chain of ancestor labels plus the node's own label
    /// and its ordinal among same-labelled siblings. Survives unrelated edits
    /// to the source, so remembered folds keep applying.
    #[default]
    Stable,
    /// A fresh random identity for every node on every parse.
    Random,
}

/// Hands out identities while a draft tree is materialised.
#[derive(Debug, Clone, Copy)]
pub struct IdGenerator {
    strategy: IdStrategy,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }

    /// Key describing a node's position, used as the name for stable ids.
    /// The label is length-prefixed so labels containing `/` or `#` cannot
    /// make two positions spell the same key.
    pub fn key(parent_key: &str, text: &str, ordinal: usize) -> String {
        format!("{parent_key}/{}:{text}#{ordinal}", text.len())
    }

    pub fn id_for(&self, key: &str) -> NodeId {
        let uuid = match self.strategy {
            IdStrategy::Stable => Uuid::new_v5(&NODE_NAMESPACE, key.as_bytes()),
            IdStrategy::Random => Uuid::new_v4(),
        };
        NodeId::new(format!("node-{}", uuid.simple()))
    }
}
