#![allow(dead_code)]

use grep_expr::{Token, ValidationResult, tokenize};

/// Messages of all diagnostics, errors first.
pub fn messages(result: &ValidationResult) -> Vec<&str> {
    result.diagnostics().map(|d| d.message.as_str()).collect()
}

/// Rebuild a stage from its tokens and the whitespace between them.
pub fn reconstruct(stage: &str, tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut cursor = 0;
    for token in tokens {
        assert!(
            token.offset >= cursor,
            "overlapping token {token:?} in {stage:?}"
        );
        let gap = &stage[cursor..token.offset];
        assert!(
            gap.chars().all(char::is_whitespace),
            "non-whitespace gap {gap:?} before {token:?}"
        );
        out.push_str(gap);
        out.push_str(&token.text);
        cursor = token.offset + token.text.len();
    }
    out.push_str(&stage[cursor..]);
    out
}

/// Assert the round-trip property for one stage.
pub fn assert_lossless(stage: &str) {
    let tokens = tokenize(stage);
    assert_eq!(reconstruct(stage, &tokens), stage);
}

/// Assert every diagnostic lies inside `input`.
pub fn assert_spans_within(input: &str, result: &ValidationResult) {
    for d in result.diagnostics() {
        assert!(
            d.position + d.length <= input.len(),
            "span {}..{} exceeds input of length {} ({})",
            d.position,
            d.position + d.length,
            input.len(),
            d.message
        );
    }
}
