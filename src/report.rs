//! Human-readable error reports with a source excerpt.

use std::fmt::Write;

use crate::position::Position;

/// `path:(line:col) : message`, followed by the offending source line and
/// a caret under the reported column.
#[must_use]
pub fn render(path: &str, source: &str, position: Position, message: &str) -> String {
    let mut out = format!("{path}:({position}) : {message}\n");

    let Some(line) = source.lines().nth(position.line.saturating_sub(1)) else {
        return out;
    };
    let gutter = position.line.to_string();
    let _ = writeln!(out, "{gutter} | {line}");

    let padding: String = line
        .chars()
        .take(position.col.saturating_sub(1))
        .map(|ch| if ch == '\t' { '\t' } else { ' ' })
        .collect();
    let _ = writeln!(out, "{} | {padding}^", " ".repeat(gutter.len()));
    out
}
