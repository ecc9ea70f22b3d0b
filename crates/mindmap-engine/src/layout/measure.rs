//! Size functions shared by every layout strategy.
//!
//! Nothing is cached: both functions are cheap for editor-sized outlines and
//! are recomputed on every pass.

use crate::models::Node;

pub const ROOT_FONT_SIZE: f64 = 18.0;
pub const FONT_SIZE_STEP: f64 = 2.0;
pub const MIN_FONT_SIZE: f64 = 12.0;

/// Width of a non-wide character as a fraction of the font size.
pub const NARROW_CHAR_RATIO: f64 = 0.55;
/// Horizontal padding added to every label.
pub const LABEL_PADDING: f64 = 24.0;
/// Vertical padding added to the font size to get a label's box height.
pub const LABEL_VERTICAL_PADDING: f64 = 6.0;

/// Vertical spacing rules of a strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Height of a leaf or collapsed node.
    pub floor: f64,
    /// Space between adjacent sibling subtrees.
    pub gap: f64,
}

impl Metrics {
    pub const OUTLINE: Metrics = Metrics {
        floor: 28.0,
        gap: 8.0,
    };
    pub const CURVE: Metrics = Metrics {
        floor: 24.0,
        gap: 20.0,
    };
}

pub fn font_size(depth: usize) -> f64 {
    (ROOT_FONT_SIZE - FONT_SIZE_STEP * depth as f64).max(MIN_FONT_SIZE)
}

pub fn label_height(depth: usize) -> f64 {
    font_size(depth) + LABEL_VERTICAL_PADDING
}

/// True for characters that render at full em width (CJK and friends).
pub fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x2FFFD
        | 0x30000..=0x3FFFD)
}

/// Horizontal space a label needs at `depth`.
pub fn text_width(text: &str, depth: usize) -> f64 {
    let size = font_size(depth);
    let glyphs: f64 = text
        .chars()
        .map(|c| if is_wide(c) { size } else { size * NARROW_CHAR_RATIO })
        .sum();
    glyphs + LABEL_PADDING
}

/// Vertical space the visible part of `node`'s subtree needs.
pub fn subtree_height(node: &Node, metrics: Metrics) -> f64 {
    if node.is_expanded() {
        stack_height(&node.children, metrics)
    } else {
        metrics.floor
    }
}

/// Height of siblings stacked with `metrics.gap` between them.
pub fn stack_height(children: &[Node], metrics: Metrics) -> f64 {
    if children.is_empty() {
        return 0.0;
    }
    let sum: f64 = children.iter().map(|c| subtree_height(c, metrics)).sum();
    sum + metrics.gap * (children.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoldState;
    use crate::parsing::parse;
    use rstest::rstest;

    #[rstest]
    #[case(0, 18.0)]
    #[case(1, 16.0)]
    #[case(3, 12.0)]
    #[case(9, 12.0)]
    fn test_font_size_shrinks_to_minimum(#[case] depth: usize, #[case] expected: f64) {
        assert_eq!(font_size(depth), expected);
    }

    #[test]
    fn test_text_width_counts_wide_characters_fully() {
        // 16 * 0.55 * 2 + 24
        assert!((text_width("ab", 1) - 41.6).abs() < 1e-9);
        // 16 * 2 + 24
        assert_eq!(text_width("思维", 1), 56.0);
        assert_eq!(text_width("", 0), LABEL_PADDING);
    }

    #[test]
    fn test_subtree_height_sums_children_and_gaps() {
        let root = parse("- r\n  - a\n    - a1\n    - a2\n  - b", &FoldState::new()).unwrap();

        assert_eq!(subtree_height(&root.children[1], Metrics::OUTLINE), 28.0);
        assert_eq!(subtree_height(&root.children[0], Metrics::OUTLINE), 64.0);
        assert_eq!(subtree_height(&root, Metrics::OUTLINE), 100.0);
        assert_eq!(subtree_height(&root, Metrics::CURVE), 24.0 * 3.0 + 20.0 * 2.0);
    }

    #[test]
    fn test_parent_is_never_shorter_than_a_child() {
        let root = parse(
            "- r\n  - a\n    - a1\n      - a11\n  - b\n    - b1\n    - b2",
            &FoldState::new(),
        )
        .unwrap();
        for metrics in [Metrics::OUTLINE, Metrics::CURVE] {
            root.walk(&mut |node, _| {
                for child in &node.children {
                    assert!(subtree_height(node, metrics) >= subtree_height(child, metrics));
                }
            });
        }
    }

    #[test]
    fn test_collapsing_drops_to_floor() {
        let mut root = parse("- r\n  - a\n  - b\n  - c", &FoldState::new()).unwrap();
        let expanded = subtree_height(&root, Metrics::OUTLINE);
        root.collapsed = true;
        let collapsed = subtree_height(&root, Metrics::OUTLINE);

        assert_eq!(collapsed, Metrics::OUTLINE.floor);
        assert!(collapsed < expanded);
    }
}
