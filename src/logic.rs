//! Pipeline-level checks across all stages.
//!
//! Findings here are warnings anchored at position 0 with length 0:
//! they describe the pipeline as a whole, not one character.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::lexer::tokenize;
use crate::token::Span;

/// Check the ordered stage texts for pipeline-level problems.
#[must_use]
pub fn validate_logic(stages: &[&str]) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if stages
        .last()
        .is_some_and(|stage| has_flag(stage, 'v'))
    {
        out.push(pipeline_warning(&DiagnosticKind::NegatedFinalStage));
    }

    let ignore_case_stages = stages
        .iter()
        .filter(|stage| has_flag(stage, 'i'))
        .count();
    if ignore_case_stages > 1 {
        out.push(pipeline_warning(&DiagnosticKind::DuplicateIgnoreCase));
    }

    out
}

/// Whether any flag group in `stage` contains `letter`.
fn has_flag(stage: &str, letter: char) -> bool {
    tokenize(stage)
        .iter()
        .any(|token| token.flag_letters().contains(letter))
}

fn pipeline_warning(kind: &DiagnosticKind) -> Diagnostic {
    Diagnostic::new(kind, Span::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(stages: &[&str]) -> Vec<String> {
        validate_logic(stages)
            .into_iter()
            .map(|d| d.message)
            .collect()
    }

    #[test]
    fn negated_last_stage() {
        let diags = validate_logic(&["abc", "grep -v def"]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].span(), Span::new(0, 0));
        assert!(diags[0].message.contains("negates"));
    }

    #[test]
    fn negation_inside_group() {
        assert_eq!(messages(&["-iv x"]).len(), 1);
    }

    #[test]
    fn negation_before_last_stage_is_fine() {
        assert!(messages(&["grep -v a", "b"]).is_empty());
    }

    #[test]
    fn quoted_dash_v_is_not_a_flag() {
        assert!(messages(&[r#"grep "-v""#]).is_empty());
        assert!(messages(&["foo-vbar"]).is_empty());
    }

    #[test]
    fn duplicate_ignore_case_reported_once() {
        let msgs = messages(&["grep -i a", "grep -i b", "-i c"]);
        assert_eq!(msgs, ["duplicate -i flag across stages"]);
    }

    #[test]
    fn single_ignore_case() {
        assert!(messages(&["grep -i a", "b"]).is_empty());
    }

    #[test]
    fn no_stages() {
        assert!(validate_logic(&[]).is_empty());
    }
}
