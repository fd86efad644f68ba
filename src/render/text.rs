//! Plain text rendering for outlines and assembled lines.

use std::fmt::Write;

use crate::model::{BaseStyle, Line, OutlineResult};

const UNTITLED: &str = "(untitled)";

/// Render an outline as an indented tree.
///
/// The first line is the title; each heading follows on its own line,
/// indented two spaces per level below H1 and suffixed with its page.
pub fn to_tree(result: &OutlineResult) -> String {
    let mut out = String::new();
    out.push_str(if result.title.is_empty() {
        UNTITLED
    } else {
        &result.title
    });
    out.push('\n');

    for heading in &result.outline {
        let indent = "  ".repeat(heading.level.depth());
        let _ = writeln!(out, "{}{} (p. {})", indent, heading.text, heading.page);
    }
    out
}

/// Render assembled lines with their style and position, one per row,
/// preceded by the estimated body style.
pub fn to_line_table(lines: &[Line], base: &BaseStyle) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "base style: {}pt {}{}",
        base.size,
        base.font,
        if base.is_bold { " (bold)" } else { "" }
    );

    for line in lines {
        let _ = writeln!(
            out,
            "p{:<3} {:>7.1} {:>3}pt {:<1} {:<24} {}",
            line.page + 1,
            line.top(),
            line.size,
            if line.is_bold { "B" } else { "" },
            line.font,
            line.text
        );
    }
    out
}
