//! Plain-text report that underlines each diagnostic under the input.
//!
//! Output mirrors compiler diagnostics: a `severity: message` line,
//! the input itself, then a caret line beneath the offending span.

use std::fmt::Write as _;

use crate::diagnostic::{Diagnostic, ValidationResult};

/// Render every diagnostic in `result` against `input`.
///
/// Returns `"ok\n"` when there is nothing to report.
#[must_use]
pub fn render(input: &str, result: &ValidationResult) -> String {
    let mut out = String::new();
    for diagnostic in result.diagnostics() {
        render_diagnostic(&mut out, input, diagnostic);
    }

    if out.is_empty() {
        out.push_str("ok\n");
    }
    out
}

fn render_diagnostic(out: &mut String, input: &str, diagnostic: &Diagnostic) {
    let _ = writeln!(out, "{}: {}", diagnostic.severity, diagnostic.message);
    let _ = writeln!(out, "  {input}");

    // carets are placed by character, not byte
    let indent = char_count(input, 0, diagnostic.position);
    let width = char_count(input, diagnostic.position, diagnostic.span().end()).max(1);
    out.push_str("  ");
    out.push_str(&" ".repeat(indent));
    out.push_str(&"^".repeat(width));
    out.push('\n');
}

fn char_count(input: &str, start: usize, end: usize) -> usize {
    input.get(start..end).map_or(end - start, |s| s.chars().count())
}
