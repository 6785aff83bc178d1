use tracing::debug;

use crate::Error;
use crate::diagnostic::{Diagnostic, DiagnosticKind, ValidationResult};
use crate::lexer::tokenize;
use crate::logic::validate_logic;
use crate::splitter::split;
use crate::stage::{FlagSet, validate_stage};
use crate::token::Span;

/// Validate an expression with the default rules.
///
/// Never fails: every input, however malformed, yields a result.
#[must_use]
pub fn validate(input: &str) -> ValidationResult {
    Validator::new().validate(input)
}

/// Configurable expression validator.
///
/// Holds only configuration; each call to [`Validator::validate`] is
/// independent of every other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    flags: FlagSet,
    trailing_escape: bool,
}

impl Validator {
    /// Validator with the default flag set `i v E e w x c n H h`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: FlagSet::default(),
            trailing_escape: true,
        }
    }

    /// Replace the supported flag letters.
    #[must_use]
    pub fn supported_flags(mut self, letters: &str) -> Self {
        self.flags = FlagSet::from_letters(letters);
        self
    }

    /// Replace the supported flag letters, rejecting anything that
    /// could never appear in a flag group.
    pub fn try_supported_flags(self, letters: &str) -> Result<Self, Error> {
        if let Some(bad) = letters.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidFlagLetter(bad));
        }
        Ok(self.supported_flags(letters))
    }

    /// Add one supported flag letter.
    #[must_use]
    pub fn allow_flag(mut self, letter: char) -> Self {
        self.flags.insert(letter);
        self
    }

    /// Toggle the warning for a backslash at the end of the input.
    #[must_use]
    pub const fn trailing_escape(mut self, enabled: bool) -> Self {
        self.trailing_escape = enabled;
        self
    }

    /// Validate `input`, returning diagnostics located in `input`.
    #[must_use]
    pub fn validate(&self, input: &str) -> ValidationResult {
        if input.trim().is_empty() {
            return ValidationResult::valid();
        }

        let pipeline = split(input);
        let mut diagnostics = Vec::new();

        for (index, stage) in pipeline.stages.iter().enumerate() {
            let tokens = tokenize(stage.text);
            debug!(
                stage = index,
                offset = stage.offset,
                tokens = tokens.len(),
                "validating stage"
            );
            diagnostics.extend(
                validate_stage(stage.text, &tokens, &self.flags)
                    .into_iter()
                    .map(|d| d.shifted(stage.offset)),
            );
        }

        if let Some(position) = pipeline.trailing_escape.filter(|_| self.trailing_escape) {
            diagnostics.push(Diagnostic::new(
                &DiagnosticKind::TrailingEscape,
                Span::new(position, 1),
            ));
        }

        diagnostics.extend(validate_logic(&pipeline.texts()));

        let result = ValidationResult::from_diagnostics(diagnostics);
        debug!(
            stages = pipeline.len(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated expression"
        );
        result
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
