//! # Outline Parsing
//!
//! Turns the text of one mind map block into a rooted [`Node`] tree.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified on its own
//!    into a `LineClass` (indent width, heading level, bullet, blank).
//! 2. **Dialect Detection**: the classified block is either a heading
//!    hierarchy or an indented list (see [`detect_dialect`]).
//! 3. **Tree Construction** (`list`, `heading`): a builder keeps a stack of
//!    open nodes and grows a `DraftTree`, which is materialised into owned
//!    nodes with identities and remembered fold flags.
//!
//! Nothing here fails: odd indentation or stray markers still produce a tree.

pub mod classify;
pub mod draft;
pub mod heading;
pub mod ids;
pub mod list;

#[cfg(test)]
mod tests;

use crate::models::{FoldState, Node};

pub use classify::{Dialect, LineClass, LineKind, OutlineLineClassifier, detect_dialect};
pub use heading::HeadingBuilder;
pub use ids::{IdGenerator, IdStrategy};
pub use list::ListBuilder;

/// Parses outline source with stable identities.
///
/// Returns `None` when every line is blank.
pub fn parse(source: &str, folds: &FoldState) -> Option<Node> {
    parse_with(source, IdStrategy::Stable, folds)
}

pub fn parse_with(source: &str, strategy: IdStrategy, folds: &FoldState) -> Option<Node> {
    let classifier = OutlineLineClassifier;
    let lines: Vec<LineClass> = source.split('\n').map(|l| classifier.classify(l)).collect();

    if lines.iter().all(LineClass::is_blank) {
        log::debug!("outline source is blank");
        return None;
    }

    let ids = IdGenerator::new(strategy);
    let dialect = detect_dialect(&lines);
    let root = match dialect {
        Dialect::Heading => {
            let mut builder = HeadingBuilder::new();
            for lc in &lines {
                builder.push(lc);
            }
            builder.finish(&ids, folds)
        }
        Dialect::List => {
            let mut builder = ListBuilder::new();
            for lc in &lines {
                builder.push(lc);
            }
            Some(builder.finish(&ids, folds))
        }
    };

    if let Some(root) = &root {
        log::debug!(
            "parsed {:?} outline: {} nodes under {:?}",
            dialect,
            root.count(),
            root.text
        );
    }
    root
}
