//! Splits a full expression into pipeline stages.
//!
//! A single pass tracks quote and escape state so that a `|` inside
//! quotes, or preceded by a backslash, stays part of its stage. Every
//! stage is returned together with its absolute start offset, so no
//! second scan is needed to map stage positions back to the input.

/// One pipe-delimited segment of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage<'a> {
    /// Stage text with surrounding whitespace trimmed.
    pub text: &'a str,
    /// Offset of `text` within the original input.
    pub offset: usize,
}

/// Result of splitting an expression on unquoted, unescaped pipes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pipeline<'a> {
    pub stages: Vec<Stage<'a>>,
    /// Offset of a backslash at the very end of the input that had
    /// nothing left to escape.
    pub trailing_escape: Option<usize>,
}

impl<'a> Pipeline<'a> {
    /// Absolute offset of the first non-whitespace character of
    /// stage `index`.
    #[must_use]
    pub fn stage_start_offset(&self, index: usize) -> Option<usize> {
        self.stages.get(index).map(|stage| stage.offset)
    }

    /// Raw stage texts in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&'a str> {
        self.stages.iter().map(|stage| stage.text).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Split `input` into trimmed stages.
///
/// A pipe always closes the current stage, even when it is empty;
/// the text after the last pipe becomes a stage only when it is
/// non-blank. An empty input yields no stages.
#[must_use]
pub fn split(input: &str) -> Pipeline<'_> {
    let mut stages = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut quote_char = '"';
    let mut escaped = false;

    for (i, ch) in input.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if !in_quotes && (ch == '"' || ch == '\'') {
            in_quotes = true;
            quote_char = ch;
        } else if in_quotes && ch == quote_char {
            in_quotes = false;
        } else if !in_quotes && ch == '|' {
            stages.push(make_stage(input, start, i));
            start = i + 1;
        }
    }

    let last = make_stage(input, start, input.len());
    if !last.text.is_empty() {
        stages.push(last);
    }

    Pipeline {
        stages,
        trailing_escape: escaped.then(|| input.len() - 1),
    }
}

fn make_stage(input: &str, start: usize, end: usize) -> Stage<'_> {
    let raw = &input[start..end];
    let leading = raw.len() - raw.trim_start().len();
    Stage {
        text: raw.trim(),
        offset: start + leading,
    }
}
