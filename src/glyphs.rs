use std::borrow::Cow;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::rows::VisibleRow;

/// Connector and expander glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeGlyphs<'a> {
    pub indent: &'a str,
    pub branch_last: &'a str,
    pub branch: &'a str,
    pub vert: &'a str,
    pub leaf: &'a str,
    pub expanded: &'a str,
    pub collapsed: &'a str,
}

impl TreeGlyphs<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "   ",
            branch_last: "└──",
            branch: "├──",
            vert: "│  ",
            leaf: "•",
            expanded: "▼",
            collapsed: "▶",
        }
    }

    /// Glyphs matching the `-` / `+` / bullet expander of plain-text outlines.
    pub const fn ascii() -> Self {
        Self {
            indent: "   ",
            branch_last: "`--",
            branch: "|--",
            vert: "|  ",
            leaf: "*",
            expanded: "-",
            collapsed: "+",
        }
    }
}

impl Default for TreeGlyphs<'static> {
    fn default() -> Self {
        Self::unicode()
    }
}

/// How connector columns are drawn.
#[derive(Clone, Copy, Debug)]
pub struct TreeLineStyle {
    /// When `false`, ancestor columns are plain indentation.
    pub draw_lines: bool,
    pub line_style: Style,
}

impl Default for TreeLineStyle {
    fn default() -> Self {
        Self {
            draw_lines: true,
            line_style: Style::default(),
        }
    }
}

/// Picks one connector glyph per trail entry.
///
/// Earlier columns carry a vertical line while that ancestor still has siblings
/// below it; the last column is a branch or, for the last sibling, a closing branch.
pub fn connector_glyphs<'a>(trail: &[usize], glyphs: &TreeGlyphs<'a>) -> Vec<&'a str> {
    let last = trail.len().saturating_sub(1);
    trail
        .iter()
        .enumerate()
        .map(|(column, &lower)| match (column == last, lower > 0) {
            (true, true) => glyphs.branch,
            (true, false) => glyphs.branch_last,
            (false, true) => glyphs.vert,
            (false, false) => glyphs.indent,
        })
        .collect()
}

/// Expander glyph derived from the child count and the expand flag.
pub const fn expander_glyph<'a>(
    has_children: bool,
    is_expanded: bool,
    glyphs: &TreeGlyphs<'a>,
) -> &'a str {
    match (has_children, is_expanded) {
        (true, true) => glyphs.expanded,
        (true, false) => glyphs.collapsed,
        (false, _) => glyphs.leaf,
    }
}

/// Builds the label line of a row: connectors, expander, then the label.
pub fn tree_label_line<'a, Id>(
    row: &VisibleRow<Id>,
    label: impl Into<Cow<'a, str>>,
    glyphs: &TreeGlyphs<'a>,
    style: TreeLineStyle,
) -> Line<'a> {
    let mut spans = Vec::with_capacity(row.lower_siblings_count.len() + 3);

    if style.draw_lines {
        for part in connector_glyphs(&row.lower_siblings_count, glyphs) {
            spans.push(Span::styled(part, style.line_style));
        }
    } else {
        for _ in 0..row.lower_siblings_count.len() {
            spans.push(Span::raw(glyphs.indent));
        }
    }

    spans.push(Span::raw(expander_glyph(
        row.has_children,
        row.is_expanded,
        glyphs,
    )));
    spans.push(Span::raw(" "));
    spans.push(Span::raw(label.into()));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Hierarchy;
    use crate::record::{FlatNode, default_label};
    use crate::rows::visible_rows;

    fn rendered(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn connectors_follow_trail() {
        let glyphs = TreeGlyphs::ascii();
        assert_eq!(connector_glyphs(&[1], &glyphs), vec!["|--"]);
        assert_eq!(connector_glyphs(&[0], &glyphs), vec!["`--"]);
        assert_eq!(connector_glyphs(&[1, 0, 2], &glyphs), vec!["|  ", "   ", "|--"]);
        assert!(connector_glyphs(&[], &glyphs).is_empty());
    }

    #[test]
    fn expander_depends_on_children() {
        let glyphs = TreeGlyphs::ascii();
        assert_eq!(expander_glyph(true, true, &glyphs), "-");
        assert_eq!(expander_glyph(true, false, &glyphs), "+");
        assert_eq!(expander_glyph(false, true, &glyphs), "*");
    }

    #[test]
    fn renders_outline() {
        let tree = Hierarchy::build(&[
            FlatNode::new(1, 0, 1, 1),
            FlatNode::new(2, 0, 2, 1),
            FlatNode::new(3, 1, 1, 2),
        ]);
        let glyphs = TreeGlyphs::unicode();
        let lines: Vec<String> = visible_rows(&tree)
            .iter()
            .map(|row| {
                rendered(&tree_label_line(
                    row,
                    default_label(row.id),
                    &glyphs,
                    TreeLineStyle::default(),
                ))
            })
            .collect();

        assert_eq!(
            lines,
            vec!["├──▼ Node 1", "│  └──• Node 3", "└──• Node 2"]
        );
    }

    #[test]
    fn plain_indent_without_lines() {
        let tree = Hierarchy::build(&[FlatNode::new(1, 0, 1, 1), FlatNode::new(3, 1, 1, 2)]);
        let rows = visible_rows(&tree);
        let style = TreeLineStyle {
            draw_lines: false,
            ..TreeLineStyle::default()
        };
        let line = tree_label_line(&rows[1], "child", &TreeGlyphs::ascii(), style);
        assert_eq!(rendered(&line), "      * child");
    }
}
