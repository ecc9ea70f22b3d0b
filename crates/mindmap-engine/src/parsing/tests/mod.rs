//! Unit tests for the outline parser.
//!
//! Tree shapes are compared through `Node::to_outline_string`, which leaves
//! out identities so the same expectations hold for every id strategy.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::models::{FoldState, Node, NodeId};
use crate::parsing::{IdStrategy, parse, parse_with};

fn outline(source: &str) -> String {
    parse(source, &FoldState::new())
        .map(|root| root.to_outline_string())
        .unwrap_or_default()
}

fn texts(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|n| n.text.as_str()).collect()
}

#[rstest]
#[case("")]
#[case("\n\n")]
#[case("   \n\t\n  ")]
fn blank_source_has_no_tree(#[case] source: &str) {
    assert!(parse(source, &FoldState::new()).is_none());
}

#[test]
fn single_top_level_item_becomes_root() {
    let root = parse("- A\n  - B\n  - C", &FoldState::new()).unwrap();

    assert_eq!(root.text, "A");
    assert_eq!(texts(&root.children), vec!["B", "C"]);
    assert_ne!(root.id, NodeId::root());
}

#[test]
fn heading_scenario_with_note() {
    let root = parse("# Title\n## Child1\ntext note\n## Child2", &FoldState::new()).unwrap();

    assert_eq!(root.text, "Title");
    assert_eq!(texts(&root.children), vec!["Child1", "Child2"]);
    assert_eq!(root.children[0].note.as_deref(), Some("text note"));
    assert_eq!(root.children[1].note, None);
}

#[test]
fn several_top_level_items_keep_synthetic_root() {
    let root = parse("- a\n- b\n  - b1", &FoldState::new()).unwrap();

    assert_eq!(root.id, NodeId::root());
    assert_eq!(root.text, "Root");
    assert_eq!(root.to_outline_string(), "- Root\n  - a\n  - b\n    - b1");
}

#[rstest]
#[case("# Mind\n- a\n- b", "- Mind\n  - a\n  - b")]
#[case("# Mind\n- only", "- Mind\n  - only")]
#[case("\n# Mind\n\n- a", "- Mind\n  - a")]
fn leading_heading_overrides_root_title(#[case] source: &str, #[case] expected: &str) {
    let root = parse(source, &FoldState::new()).unwrap();
    assert_eq!(root.id, NodeId::root());
    assert_eq!(root.to_outline_string(), expected);
}

#[test]
fn later_heading_in_list_mode_is_an_ordinary_node() {
    assert_eq!(
        outline("- a\n# later\n- b"),
        "- Root\n  - a\n  - # later\n  - b"
    );
}

#[rstest]
#[case::tabs_and_spaces("- a\n\t- b\n    - c", "- a\n  - b\n  - c")]
#[case::shallower_than_first("    - a\n- b", "- Root\n  - a\n  - b")]
#[case::uneven_steps("- a\n   - b\n  - c\n      - d", "- a\n  - b\n  - c\n    - d")]
#[case::plain_lines("topic\n  idea\n  other", "- topic\n  - idea\n  - other")]
#[case::star_markers("* a\n  * b", "- a\n  - b")]
fn list_mode_follows_indent_stack(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(outline(source), expected);
}

#[rstest]
#[case("- a\n  - b\n    - c\n  - d\n- e")]
#[case("- A\n  - B\n  - C")]
#[case("* x\n\t* y\n\t\t* z")]
fn uniform_reindent_keeps_shape(#[case] source: &str) {
    let shifted: String = source
        .lines()
        .map(|l| format!("   {l}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(outline(&shifted), outline(source));
}

#[test]
fn heading_depth_is_relative_to_root() {
    assert_eq!(
        outline("## R\n### A\n#### A1\n### B"),
        "- R\n  - A\n    - A1\n  - B"
    );
}

#[test]
fn heading_no_deeper_than_root_falls_back_to_root() {
    assert_eq!(
        outline("## R\n### A\n## B\n# C"),
        "- R\n  - A\n  - B\n  - C"
    );
}

#[test]
fn notes_stay_with_their_heading() {
    let root = parse(
        "intro ignored\n# R\nroot note\n## A\nnote a\n\n  more a\n## B\n### B1\nb1 body",
        &FoldState::new(),
    )
    .unwrap();

    assert_eq!(root.note.as_deref(), Some("root note"));
    assert_eq!(root.children[0].note.as_deref(), Some("note a\n  more a"));
    assert_eq!(root.children[1].note, None);
    assert_eq!(root.children[1].children[0].note.as_deref(), Some("b1 body"));
}

#[test]
fn bullets_under_headings_are_note_text() {
    let root = parse("# R\n## A\n- x\n- y", &FoldState::new()).unwrap();
    assert_eq!(root.children[0].note.as_deref(), Some("- x\n- y"));
    assert!(root.children[0].is_leaf());
}

#[rstest]
#[case("- a\n  - b\n  - c\n- d")]
#[case("# T\n## A\nbody\n### A1\n## B")]
fn parsing_twice_gives_the_same_outline(#[case] source: &str) {
    let folds = FoldState::new();
    for strategy in [IdStrategy::Stable, IdStrategy::Random] {
        let first = parse_with(source, strategy, &folds).unwrap();
        let second = parse_with(source, strategy, &folds).unwrap();
        assert!(first.same_outline(&second));
    }
}

#[test]
fn ids_are_unique_within_a_parse() {
    let root = parse("- x\n  - dup\n  - dup\n  - y\n    - dup", &FoldState::new()).unwrap();
    let mut seen = HashSet::new();
    root.walk(&mut |node, _| assert!(seen.insert(node.id.clone()), "duplicate id"));
    assert_eq!(seen.len(), 5);
}

#[test]
fn ids_stay_unique_when_labels_contain_separators() {
    let root = parse("- a#0/b\n  - x\n- a\n  - b\n    - y", &FoldState::new()).unwrap();
    let mut count = 0;
    let mut seen = HashSet::new();
    root.walk(&mut |node, _| {
        count += 1;
        seen.insert(node.id.clone());
    });
    assert_eq!(count, 6);
    assert_eq!(seen.len(), count);
}

#[test]
fn stable_ids_survive_unrelated_edits() {
    let folds = FoldState::new();
    let before = parse("- a\n  - b\n    - c\n- d", &folds).unwrap();
    let after = parse("- new\n- a\n  - inserted\n  - b\n    - c\n- d", &folds).unwrap();

    let b_before = &before.children[0].children[0];
    let b_after = &after.children[1].children[1];
    assert_eq!(b_before.text, "b");
    assert_eq!(b_after.text, "b");
    assert_eq!(b_before.id, b_after.id);
}

#[test]
fn random_ids_change_except_for_the_sentinel_root() {
    let folds = FoldState::new();
    let first = parse_with("- a\n- b", IdStrategy::Random, &folds).unwrap();
    let second = parse_with("- a\n- b", IdStrategy::Random, &folds).unwrap();

    assert_eq!(first.id, NodeId::root());
    assert_eq!(second.id, NodeId::root());
    assert_ne!(first.children[0].id, second.children[0].id);
}

#[test]
fn remembered_folds_seed_collapsed_flags() {
    let mut folds = FoldState::new();
    let source = "- a\n  - b\n    - c\n  - leaf";
    let first = parse(source, &folds).unwrap();
    let b = first.children[0].id.clone();
    let leaf = first.children[1].id.clone();

    folds.set(b, true);
    folds.set(leaf, true);
    let second = parse(source, &folds).unwrap();

    assert!(second.children[0].collapsed);
    // Leaves never carry a fold flag.
    assert!(!second.children[1].collapsed);
    assert_eq!(
        second.to_outline_string(),
        "- a\n  - b [+]\n    - c\n  - leaf"
    );
}

#[test]
fn sentinel_root_fold_applies_under_random_ids() {
    let mut folds = FoldState::new();
    folds.set(NodeId::root(), true);
    let root = parse_with("- a\n- b", IdStrategy::Random, &folds).unwrap();
    assert!(root.collapsed);
}
