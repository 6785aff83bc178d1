//! Structural checks for a single pipeline stage.

use std::collections::BTreeSet;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::token::{Span, Token, TokenKind};

/// Flag letters accepted without a warning by default.
pub const DEFAULT_FLAGS: &str = "ivEewxcnHh";

/// Set of supported single-letter flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet(BTreeSet<char>);

impl FlagSet {
    #[must_use]
    pub fn from_letters(letters: &str) -> Self {
        Self(letters.chars().collect())
    }

    #[must_use]
    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter)
    }

    pub fn insert(&mut self, letter: char) {
        self.0.insert(letter);
    }
}

impl Default for FlagSet {
    fn default() -> Self {
        Self::from_letters(DEFAULT_FLAGS)
    }
}

/// Validate one stage's tokens.
///
/// Offsets in the returned diagnostics are relative to `stage`.
/// A blank stage produces nothing.
#[must_use]
pub fn validate_stage(stage: &str, tokens: &[Token], flags: &FlagSet) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if stage.trim().is_empty() {
        return out;
    }

    let mut has_pattern = false;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Command => {}
            TokenKind::Flag => {
                // a group with unknown letters may be a pattern starting with '-'
                has_pattern |= check_flag(token, flags, &mut out);
            }
            TokenKind::QuotedString => {
                has_pattern = true;
                check_quoted(token, &mut out);
            }
            TokenKind::BarePattern => {
                has_pattern = true;
                if token.text.eq_ignore_ascii_case("like") {
                    check_like(token, tokens.get(i + 1), &mut out);
                }
            }
            TokenKind::Unknown => {
                out.push(Diagnostic::new(
                    &DiagnosticKind::UnrecognizedToken,
                    token.span(),
                ));
            }
        }
    }

    if !has_pattern {
        out.push(Diagnostic::new(
            &DiagnosticKind::MissingPattern,
            Span::new(0, stage.len()),
        ));
    }

    out
}

/// Returns true when the group holds at least one unsupported letter.
fn check_flag(token: &Token, flags: &FlagSet, out: &mut Vec<Diagnostic>) -> bool {
    let Some(letters) = token.text.strip_prefix('-') else {
        out.push(Diagnostic::new(&DiagnosticKind::FlagMissingDash, token.span()));
        return false;
    };

    if letters.is_empty() {
        out.push(Diagnostic::new(&DiagnosticKind::EmptyFlagName, token.span()));
        return false;
    }

    let mut unsupported = false;
    for (i, letter) in letters.char_indices() {
        if !flags.contains(letter) {
            unsupported = true;
            out.push(Diagnostic::new(
                &DiagnosticKind::UnsupportedFlag(letter),
                Span::new(token.offset + 1 + i, letter.len_utf8()),
            ));
        }
    }
    unsupported
}

fn check_quoted(token: &Token, out: &mut Vec<Diagnostic>) {
    let text = token.text.as_str();
    let Some(quote) = text.chars().next() else {
        return;
    };

    if text.len() < 2 {
        out.push(Diagnostic::new(&DiagnosticKind::MalformedString, token.span()));
        return;
    }

    let interior = text
        .strip_suffix(quote)
        .and_then(|body| body.get(quote.len_utf8()..))
        .filter(|body| !ends_with_escape(body));
    let Some(interior) = interior else {
        out.push(Diagnostic::new(
            &DiagnosticKind::UnterminatedQuote(quote),
            token.span(),
        ));
        return;
    };

    let bytes = interior.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'"' | b'\'' | b'\\' | b'n' | b't' | b'r') => i += 2,
            Some(b'x') if bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit) => i += 3,
            Some(_) => {
                let len = 1 + interior[i + 1..].chars().next().map_or(0, char::len_utf8);
                out.push(Diagnostic::new(
                    &DiagnosticKind::InvalidEscape,
                    Span::new(token.offset + 1 + i, len),
                ));
                i += len;
            }
            None => i += 1,
        }
    }
}

/// Odd run of trailing backslashes means the last quote is escaped.
fn ends_with_escape(interior: &str) -> bool {
    interior.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

fn check_like(like: &Token, next: Option<&Token>, out: &mut Vec<Diagnostic>) {
    match next {
        Some(pattern) if pattern.is_pattern() => {
            if !pattern.text.contains('%') {
                out.push(Diagnostic::new(
                    &DiagnosticKind::LikeWithoutWildcard,
                    pattern.span(),
                ));
            }
        }
        _ => out.push(Diagnostic::new(
            &DiagnosticKind::LikeWithoutWildcard,
            like.span(),
        )),
    }
}
