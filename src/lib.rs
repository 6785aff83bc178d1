//! Lexer and syntax validator for piped grep-style filter expressions.
//!
//! An expression is a chain of stages separated by `|`, each stage
//! holding optional flags and a search pattern, bare or quoted:
//! `grep -i timeout | -v "health check"`. Validation reports
//! structured errors and warnings whose spans point into the original
//! input, so an editor can underline exactly the offending text.
//!
//! # Quick start
//!
//! ```
//! use grep_expr::validate;
//!
//! let result = validate("grep -i error | grep -iz worker");
//! assert!(result.is_valid);
//! assert_eq!(result.warnings[0].message, "unsupported flag: -z");
//! assert_eq!(result.warnings[0].position, 23);
//! ```
//!
//! ## Custom flag set
//!
//! ```
//! use grep_expr::Validator;
//!
//! let validator = Validator::new().allow_flag('P');
//! assert!(validator.validate("-P '[0-9]+'").warnings.is_empty());
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use std::path::PathBuf;

pub mod diagnostic;
pub mod lexer;
pub mod logic;
pub mod render;
pub mod splitter;
pub mod stage;
pub mod token;
pub mod validator;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity, ValidationResult};
pub use lexer::tokenize;
pub use logic::validate_logic;
pub use render::render;
pub use splitter::{Pipeline, Stage, split};
pub use stage::{DEFAULT_FLAGS, FlagSet, validate_stage};
pub use token::{Span, Token, TokenKind};
pub use validator::{Validator, validate};

/// Errors from the fallible edges of the crate: configuration and
/// the command-line tool. Validation itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A supported-flag letter that can never appear in a flag group.
    #[error("invalid flag letter: {0:?}")]
    InvalidFlagLetter(char),
    /// Reading an input file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing JSON output failed.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
