use tracing::trace;

use crate::token::{Token, TokenKind};

/// Tokenize a single pipeline stage into a sequence of tokens.
///
/// Never fails: characters that cannot start any token become
/// `TokenKind::Unknown` so that validation can report every
/// problem in the stage. Offsets are relative to `stage`.
#[must_use]
pub fn tokenize(stage: &str) -> Vec<Token> {
    Lexer::new(stage).tokenize()
}

const COMMANDS: [&str; 2] = ["egrep", "grep"];

/// Characters that end a bare pattern and are lexed on their own.
fn is_stray(ch: char) -> bool {
    ch.is_control() && !ch.is_whitespace()
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.bump();
                continue;
            }

            let token = match ch {
                '"' | '\'' => self.read_quoted_string(ch),
                '-' if self.peek_at(1).is_some_and(|c| c.is_ascii_alphanumeric()) => {
                    self.read_flag()
                }
                c if is_stray(c) => self.read_unknown(),
                _ => self
                    .read_command()
                    .unwrap_or_else(|| self.read_bare_pattern()),
            };

            trace!(kind = ?token.kind, offset = token.offset, text = %token.text, "token");
            tokens.push(token);
        }

        tokens
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            text: self.input[start..self.pos].to_string(),
            offset: start,
        }
    }

    fn read_command(&mut self) -> Option<Token> {
        let rest = &self.input[self.pos..];
        let keyword = COMMANDS.iter().find(|kw| {
            rest.strip_prefix(**kw)
                .is_some_and(|after| after.chars().next().is_none_or(char::is_whitespace))
        })?;

        let start = self.pos;
        self.pos += keyword.len();
        Some(self.make_token(TokenKind::Command, start))
    }

    fn read_flag(&mut self) -> Token {
        let start = self.pos;
        self.bump(); // skip '-'
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.bump();
        }
        self.make_token(TokenKind::Flag, start)
    }

    /// Reads up to and including the matching close quote, or to
    /// the end of the stage when the string is unterminated.
    fn read_quoted_string(&mut self, quote: char) -> Token {
        let start = self.pos;
        self.bump(); // skip opening quote

        while let Some(ch) = self.peek() {
            self.bump();
            if ch == '\\' {
                // escaped character never closes the string
                self.bump();
            } else if ch == quote {
                break;
            }
        }

        self.make_token(TokenKind::QuotedString, start)
    }

    fn read_bare_pattern(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !is_stray(c))
        {
            self.bump();
        }
        self.make_token(TokenKind::BarePattern, start)
    }

    fn read_unknown(&mut self) -> Token {
        let start = self.pos;
        self.bump();
        self.make_token(TokenKind::Unknown, start)
    }
}
