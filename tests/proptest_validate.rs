//! Property-based tests with proptest.
//!
//! Arbitrary and expression-shaped inputs are fed through the
//! validator to check it never panics, is deterministic, keeps every
//! span inside the input, and tokenizes losslessly.

mod common;

use common::{assert_spans_within, reconstruct};
use grep_expr::{split, tokenize, validate};
use proptest::prelude::*;

// -- Strategies --

/// Random printable ASCII plus whitespace and control characters.
fn arbitrary_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('\x00', '\x7f'), 0..256)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

/// Characters that drive the splitter and lexer state machines.
fn dense_source() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just('|'),
            Just('"'),
            Just('\''),
            Just('\\'),
            Just('-'),
            Just(' '),
            Just('i'),
            Just('v'),
            Just('z'),
            Just('\u{e9}'),
        ],
        0..128,
    )
    .prop_map(|chars| chars.into_iter().collect::<String>())
}

/// One plausible stage: optional command, flags, and a pattern.
fn stage() -> impl Strategy<Value = String> {
    let command = prop_oneof![Just(""), Just("grep "), Just("egrep ")];
    let flags = "(-[ivEewxcnHhzQ]{1,3} ){0,2}";
    let pattern = prop_oneof![
        "[0-9.*][a-z0-9.*]{0,9}",
        "\"[a-z |]{0,10}\"",
        "'[a-z |]{0,10}'",
    ];
    (command, flags, pattern).prop_map(|(c, f, p)| format!("{c}{f}{p}"))
}

fn expression() -> impl Strategy<Value = String> {
    prop::collection::vec(stage(), 1..6).prop_map(|stages| stages.join(" | "))
}

// -- Property tests --

proptest! {
    /// Validation never panics and always terminates.
    #[test]
    fn never_panics(source in arbitrary_source()) {
        let _ = validate(&source);
    }

    #[test]
    fn deterministic(source in dense_source()) {
        prop_assert_eq!(validate(&source), validate(&source));
    }

    /// Every span lies inside the input, on character boundaries.
    #[test]
    fn spans_within_input(source in dense_source()) {
        let result = validate(&source);
        assert_spans_within(&source, &result);
        for d in result.diagnostics() {
            prop_assert!(source.is_char_boundary(d.position));
            prop_assert!(source.is_char_boundary(d.position + d.length));
        }
    }

    #[test]
    fn valid_iff_no_errors(source in arbitrary_source()) {
        let result = validate(&source);
        prop_assert_eq!(result.is_valid, result.errors.is_empty());
    }

    /// Tokens plus the whitespace between them rebuild each stage.
    #[test]
    fn lossless_tokenization(source in dense_source()) {
        for stage in split(&source).stages {
            let tokens = tokenize(stage.text);
            prop_assert_eq!(reconstruct(stage.text, &tokens), stage.text);
        }
    }

    #[test]
    fn lossless_on_arbitrary(source in arbitrary_source()) {
        let tokens = tokenize(&source);
        prop_assert_eq!(reconstruct(&source, &tokens), source);
    }

    /// Stage offsets point at the stage text inside the input.
    #[test]
    fn stage_offsets_match_input(source in dense_source()) {
        for stage in split(&source).stages {
            prop_assert_eq!(&source[stage.offset..stage.offset + stage.text.len()], stage.text);
        }
    }

    /// Well-formed expressions split into as many stages as were joined.
    #[test]
    fn quoted_pipes_do_not_split(stages in prop::collection::vec(
        prop_oneof!["[a-z]{1,8}", "\"[a-z |]{0,8}\"", "'[a-z |]{0,8}'"],
        1..6,
    )) {
        let input = stages.join(" | ");
        prop_assert_eq!(split(&input).len(), stages.len());
    }

    /// Well-formed expressions never produce errors, only warnings.
    #[test]
    fn plausible_expressions_are_valid(input in expression()) {
        let result = validate(&input);
        prop_assert!(result.is_valid, "unexpected errors {:?} for {:?}", result.errors, input);
    }
}

#[test]
fn large_pathological_inputs_complete() {
    for input in [
        "\\".repeat(200_000),
        "|".repeat(200_000),
        "\"|".repeat(100_000),
        "-i ".repeat(60_000),
        "a\u{1}".repeat(100_000),
    ] {
        let result = validate(&input);
        assert_spans_within(&input, &result);
    }
}
