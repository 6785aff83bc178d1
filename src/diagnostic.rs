use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::Span;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The expression is syntactically invalid.
    Error,
    /// The expression is valid but probably not what was meant.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Classifies a finding. The `Display` output is the message shown
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Flag token that does not start with `-`.
    FlagMissingDash,
    /// `-` with no letters after it.
    EmptyFlagName,
    /// Flag letter outside the supported set.
    UnsupportedFlag(char),
    /// Quoted string shorter than two characters.
    MalformedString,
    /// Quoted string with no closing quote.
    UnterminatedQuote(char),
    /// Backslash sequence not in the known escape set.
    InvalidEscape,
    /// Character that cannot start any token.
    UnrecognizedToken,
    /// Stage with flags or a command but nothing to search for.
    MissingPattern,
    /// `LIKE` operator whose pattern has no `%`.
    LikeWithoutWildcard,
    /// Backslash at the end of the input with nothing to escape.
    TrailingEscape,
    /// The last stage is negated, so nothing can be highlighted.
    NegatedFinalStage,
    /// `-i` given in more than one stage.
    DuplicateIgnoreCase,
}

impl DiagnosticKind {
    /// Severity this kind is always reported with.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::FlagMissingDash
            | Self::EmptyFlagName
            | Self::MalformedString
            | Self::UnterminatedQuote(_)
            | Self::UnrecognizedToken
            | Self::MissingPattern => Severity::Error,
            Self::UnsupportedFlag(_)
            | Self::InvalidEscape
            | Self::LikeWithoutWildcard
            | Self::TrailingEscape
            | Self::NegatedFinalStage
            | Self::DuplicateIgnoreCase => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlagMissingDash => write!(f, "argument must start with '-'"),
            Self::EmptyFlagName => write!(f, "flag name must not be empty"),
            Self::UnsupportedFlag(letter) => write!(f, "unsupported flag: -{letter}"),
            Self::MalformedString => write!(f, "malformed string"),
            Self::UnterminatedQuote('\'') => write!(f, "unterminated single quote"),
            Self::UnterminatedQuote(_) => write!(f, "unterminated double quote"),
            Self::InvalidEscape => write!(f, "invalid escape character"),
            Self::UnrecognizedToken => write!(f, "unrecognized token"),
            Self::MissingPattern => write!(f, "missing search pattern"),
            Self::LikeWithoutWildcard => write!(f, "LIKE pattern has no '%' wildcard"),
            Self::TrailingEscape => write!(f, "trailing escape character"),
            Self::NegatedFinalStage => {
                write!(f, "final stage negates output; results will not be highlighted")
            }
            Self::DuplicateIgnoreCase => write!(f, "duplicate -i flag across stages"),
        }
    }
}

/// One reported finding, located in the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{severity}: {message} at position {position}")]
pub struct Diagnostic {
    pub message: String,
    pub position: usize,
    pub length: usize,
    pub severity: Severity,
}

impl Diagnostic {
    /// Build a diagnostic for `kind` covering `span`.
    #[must_use]
    pub fn new(kind: &DiagnosticKind, span: Span) -> Self {
        Self {
            message: kind.to_string(),
            position: span.position,
            length: span.length,
            severity: kind.severity(),
        }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.position, self.length)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Move the diagnostic right by `by` bytes.
    #[must_use]
    pub fn shifted(mut self, by: usize) -> Self {
        self.position += by;
        self
    }
}

/// Outcome of validating one expression.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    /// A result with no diagnostics.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Partition diagnostics by severity, keeping their order.
    #[must_use]
    pub fn from_diagnostics(diagnostics: impl IntoIterator<Item = Diagnostic>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            diagnostics.into_iter().partition(Diagnostic::is_error);
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Errors followed by warnings.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(&self.warnings)
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert into a `Result`: warnings on success, errors on failure.
    pub fn into_result(self) -> Result<Vec<Diagnostic>, Vec<Diagnostic>> {
        if self.is_valid {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}
