use std::fmt;

/// One indentation level of rendered output.
pub const INDENT: &str = "  ";

/// A node of the line tree produced by building a [`Root`](super::Root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    /// Lines nested one level deeper than their parent.
    Block(Vec<Line>),
}

impl Line {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Line::Text(text.into())
    }
}

/// An indentation-aware tree of output lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    items: Vec<Line>,
}

impl BuildResult {
    #[must_use]
    pub fn new(items: Vec<Line>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[Line] {
        &self.items
    }

    /// Flatten the tree, prefixing each line with [`INDENT`] once per level
    /// of nesting.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        flatten(&self.items, 0, &mut out);
        out
    }
}

fn flatten(items: &[Line], depth: usize, out: &mut Vec<String>) {
    for item in items {
        match item {
            Line::Text(text) => out.push(format!("{}{text}", INDENT.repeat(depth))),
            Line::Block(nested) => flatten(nested, depth + 1, out),
        }
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_not_indented() {
        let r = BuildResult::new(vec![Line::text("a"), Line::text("b")]);
        assert_eq!(r.lines(), vec!["a", "b"]);
    }

    #[test]
    fn nested_blocks_indent_two_spaces_per_level() {
        let r = BuildResult::new(vec![
            Line::text("a {"),
            Line::Block(vec![
                Line::text("b {"),
                Line::Block(vec![Line::text("c")]),
                Line::text("}"),
            ]),
            Line::text("}"),
        ]);
        assert_eq!(r.lines(), vec!["a {", "  b {", "    c", "  }", "}"]);
    }

    #[test]
    fn display_joins_without_trailing_newline() {
        let r = BuildResult::new(vec![Line::text("a"), Line::Block(vec![Line::text("b")])]);
        assert_eq!(r.to_string(), "a\n  b");
    }

    #[test]
    fn empty_block_emits_nothing() {
        let r = BuildResult::new(vec![Line::Block(vec![])]);
        assert!(r.lines().is_empty());
    }
}
