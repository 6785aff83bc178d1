/// Byte range in the original input, used to underline a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub position: usize,
    pub length: usize,
}

impl Span {
    #[must_use]
    pub const fn new(position: usize, length: usize) -> Self {
        Self { position, length }
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.position + self.length
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// The `grep` or `egrep` keyword.
    Command,
    /// Flag group (`-i`, `-ivE`).
    Flag,
    /// Single- or double-quoted literal, possibly unterminated.
    QuotedString,
    /// Unquoted, whitespace-delimited pattern.
    BarePattern,
    /// A single character that cannot start any other token.
    Unknown,
}

/// A single token with its kind, source text, and stage-relative offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

impl Token {
    /// Span of the whole token, relative to its stage.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.offset, self.text.len())
    }

    /// Whether this token can serve as the stage's search pattern.
    #[must_use]
    pub const fn is_pattern(&self) -> bool {
        matches!(self.kind, TokenKind::BarePattern | TokenKind::QuotedString)
    }

    /// Letters of a flag group, without the leading `-`.
    ///
    /// Empty for non-flag tokens.
    #[must_use]
    pub fn flag_letters(&self) -> &str {
        if self.kind == TokenKind::Flag {
            self.text.strip_prefix('-').unwrap_or(&self.text)
        } else {
            ""
        }
    }
}
