use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)\s+(.*)$").expect("heading pattern is valid"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*](?:\s|$)").expect("list item pattern is valid"));
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s*").expect("list marker pattern is valid"));

/// Width of a tab when measuring indentation.
pub const TAB_WIDTH: usize = 4;

/// What a single line looks like, without reference to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// `#`-style heading; `level` is the marker count.
    Heading { level: usize, text: String },
    /// `-` or `*` bullet; `text` has the marker stripped.
    ListItem { text: String },
    /// Anything else that isn't blank.
    Text,
}

/// Classification of a single line containing only local facts.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Leading whitespace width (space = 1, tab = [`TAB_WIDTH`]).
    pub indent: usize,
    pub kind: LineKind,
    /// The line without its trailing `\r`.
    pub raw: String,
}

impl LineClass {
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, LineKind::Blank)
    }

    pub fn heading_level(&self) -> Option<usize> {
        match self.kind {
            LineKind::Heading { level, .. } => Some(level),
            _ => None,
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self.kind, LineKind::ListItem { .. })
    }

    /// Node label for list mode: the trimmed line with any bullet removed.
    ///
    /// Headings that reach list mode keep their `#` markers.
    pub fn list_text(&self) -> String {
        match &self.kind {
            LineKind::ListItem { text } => text.clone(),
            _ => strip_list_marker(self.raw.trim()),
        }
    }
}

/// Classifies individual lines of outline source.
pub struct OutlineLineClassifier;

impl OutlineLineClassifier {
    pub fn classify(&self, line: &str) -> LineClass {
        let raw = line.trim_end_matches('\r');
        let trimmed = raw.trim();

        let kind = if trimmed.is_empty() {
            LineKind::Blank
        } else if let Some(caps) = HEADING.captures(trimmed) {
            LineKind::Heading {
                level: caps[1].len(),
                text: caps[2].trim().to_string(),
            }
        } else if LIST_ITEM.is_match(trimmed) {
            LineKind::ListItem {
                text: strip_list_marker(trimmed),
            }
        } else {
            LineKind::Text
        };

        LineClass {
            indent: indent_width(raw),
            kind,
            raw: raw.to_string(),
        }
    }
}

/// Width of the leading whitespace of `line`.
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .map_while(|c| match c {
            ' ' => Some(1),
            '\t' => Some(TAB_WIDTH),
            _ => None,
        })
        .sum()
}

fn strip_list_marker(trimmed: &str) -> String {
    LIST_MARKER.replace(trimmed, "").trim().to_string()
}

/// Which outline syntax a block is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Indented `-`/`*` bullets.
    List,
    /// `#` heading hierarchy with optional note bodies.
    Heading,
}

/// Picks the dialect for a classified block; first matching rule wins.
///
/// 1. any heading of depth two or more selects headings, even next to bullets;
/// 2. any heading at all, with no bullet anywhere, selects headings;
/// 3. everything else is a list.
pub fn detect_dialect(lines: &[LineClass]) -> Dialect {
    let deep_heading = lines
        .iter()
        .any(|l| l.heading_level().is_some_and(|level| level >= 2));
    if deep_heading {
        return Dialect::Heading;
    }

    let any_heading = lines.iter().any(|l| l.heading_level().is_some());
    let any_item = lines.iter().any(LineClass::is_list_item);
    if any_heading && !any_item {
        return Dialect::Heading;
    }

    Dialect::List
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classify_all(src: &str) -> Vec<LineClass> {
        src.split('\n')
            .map(|l| OutlineLineClassifier.classify(l))
            .collect()
    }

    #[rstest]
    #[case("", 0)]
    #[case("    - a", 4)]
    #[case("\t- a", 4)]
    #[case("\t  - a", 6)]
    #[case("no indent", 0)]
    fn test_indent_width(#[case] line: &str, #[case] expected: usize) {
        assert_eq!(indent_width(line), expected);
    }

    #[rstest]
    #[case("   ", LineKind::Blank)]
    #[case("## Child", LineKind::Heading { level: 2, text: "Child".into() })]
    #[case("  # Indented title  ", LineKind::Heading { level: 1, text: "Indented title".into() })]
    #[case("- item", LineKind::ListItem { text: "item".into() })]
    #[case("\t*   starred", LineKind::ListItem { text: "starred".into() })]
    #[case("-", LineKind::ListItem { text: "".into() })]
    #[case("#hashtag", LineKind::Text)]
    #[case("-dash", LineKind::Text)]
    #[case("plain words", LineKind::Text)]
    fn test_classify_kind(#[case] line: &str, #[case] expected: LineKind) {
        assert_eq!(OutlineLineClassifier.classify(line).kind, expected);
    }

    #[test]
    fn test_classify_strips_carriage_return() {
        let lc = OutlineLineClassifier.classify("- item\r");
        assert_eq!(lc.raw, "- item");
        assert_eq!(lc.list_text(), "item");
    }

    #[test]
    fn test_list_text_for_loose_lines() {
        assert_eq!(OutlineLineClassifier.classify("-dash").list_text(), "dash");
        assert_eq!(OutlineLineClassifier.classify("  plain").list_text(), "plain");
        assert_eq!(OutlineLineClassifier.classify("# Title").list_text(), "# Title");
    }

    #[rstest]
    #[case("# Title\n## Child", Dialect::Heading)]
    #[case("- a\n## Deep heading wins\n- b", Dialect::Heading)]
    #[case("# Only\nsome text", Dialect::Heading)]
    #[case("# Title\n- item", Dialect::List)]
    #[case("- a\n  - b", Dialect::List)]
    #[case("plain\n  indented", Dialect::List)]
    fn test_detect_dialect(#[case] src: &str, #[case] expected: Dialect) {
        assert_eq!(detect_dialect(&classify_all(src)), expected);
    }
}
