// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lightweight, dialect-independent tokenization of pattern text.
//!
//! This lexer views a pattern through a simplified grammar: every character
//! is either one of the structural metacharacters or a literal. It knows
//! nothing about dialects, escapes' meanings, or context (a `*` inside a
//! character class still lexes as [`MetaCharacter::Star`]).
//!
//! It exists for the alternate entry points — syntax highlighting, literal
//! tooling, quick structural scans — and is **not** consumed by the main
//! parser, which works on the character cursor directly.
//!
//! # Example
//!
//! ```
//! use relex_core::source_analysis::{tokenize, TokenKind, MetaCharacter};
//!
//! let tokens = tokenize("a|b");
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].kind, TokenKind::Meta(MetaCharacter::Pipe));
//! ```

use super::source::Source;
use super::span::Span;

/// A token of the simplified grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Its location in the pattern.
    pub span: Span,
}

/// The kind of token, not including source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A structural metacharacter.
    Meta(MetaCharacter),
    /// Any other character.
    Char(char),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns true for the end-of-input token.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        matches!(self, Self::Eof)
    }
}

/// The structural metacharacters of the simplified grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaCharacter {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftSquare,
    /// `]`
    RightSquare,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `|`
    Pipe,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `.`
    Dot,
    /// `^`
    Caret,
    /// `$`
    Dollar,
    /// `\`
    Backslash,
    /// `-`
    Minus,
    /// `:`
    Colon,
}

impl MetaCharacter {
    /// Looks up the metacharacter for `c`.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            '[' => Self::LeftSquare,
            ']' => Self::RightSquare,
            '{' => Self::LeftBrace,
            '}' => Self::RightBrace,
            '|' => Self::Pipe,
            '*' => Self::Star,
            '+' => Self::Plus,
            '?' => Self::Question,
            '.' => Self::Dot,
            '^' => Self::Caret,
            '$' => Self::Dollar,
            '\\' => Self::Backslash,
            '-' => Self::Minus,
            ':' => Self::Colon,
            _ => return None,
        })
    }

    /// The character this metacharacter stands for.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::LeftParen => '(',
            Self::RightParen => ')',
            Self::LeftSquare => '[',
            Self::RightSquare => ']',
            Self::LeftBrace => '{',
            Self::RightBrace => '}',
            Self::Pipe => '|',
            Self::Star => '*',
            Self::Plus => '+',
            Self::Question => '?',
            Self::Dot => '.',
            Self::Caret => '^',
            Self::Dollar => '$',
            Self::Backslash => '\\',
            Self::Minus => '-',
            Self::Colon => ':',
        }
    }
}

/// A lexer over the simplified grammar.
///
/// Implements [`Iterator`]; iteration ends before the EOF token.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: Source<'src>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer for the given pattern text.
    #[must_use]
    pub const fn new(input: &'src str) -> Self {
        Self {
            source: Source::new(input),
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.source.current_position();
        let Some(c) = self.source.peek() else {
            return Token {
                kind: TokenKind::Eof,
                span: Span::empty(start),
            };
        };
        // The cursor is non-empty here, so eating cannot fail.
        let _ = self.source.try_eat(c);
        let kind = MetaCharacter::from_char(c).map_or(TokenKind::Char(c), TokenKind::Meta);
        Token {
            kind,
            span: self.source.span_from(start),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

/// Tokenizes a pattern, excluding the EOF token.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Tokenizes a pattern, including the trailing EOF token.
#[must_use]
pub fn tokenize_with_eof(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_metacharacters_and_literals() {
        let tokens = tokenize("a(b)*");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Char('a'),
                TokenKind::Meta(MetaCharacter::LeftParen),
                TokenKind::Char('b'),
                TokenKind::Meta(MetaCharacter::RightParen),
                TokenKind::Meta(MetaCharacter::Star),
            ]
        );
    }

    #[test]
    fn spans_cover_the_input() {
        let tokens = tokenize("é|x");
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(2, 3));
        assert_eq!(tokens[2].span, Span::new(3, 4));
    }

    #[test]
    fn eof_token_is_empty_at_end() {
        let tokens = tokenize_with_eof("ab");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].kind, TokenKind::Eof);
        assert_eq!(tokens[2].span, Span::empty(2));
    }

    #[test]
    fn metacharacter_round_trip() {
        for c in "()[]{}|*+?.^$\\-:".chars() {
            let meta = MetaCharacter::from_char(c).unwrap();
            assert_eq!(meta.as_char(), c);
        }
        assert_eq!(MetaCharacter::from_char('a'), None);
    }
}
