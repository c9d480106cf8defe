// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Regex-literal delimiter detection.
//!
//! Host tooling embeds regex literals in surrounding source text using one
//! of a few delimiter pairs. [`lex_regex`] finds the delimiter, the inner
//! pattern text, and where the literal ends — without parsing the pattern.
//! [`parse_with_delimiters`](super::parse_with_delimiters) builds on it.
//!
//! A backslash escapes the character after it, so a closing delimiter
//! character can appear inside the literal as `\/` (or `\|`).

use super::error::{DelimiterLexError, DelimiterLexErrorKind};
use super::span::Span;

/// A recognized regex-literal delimiter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `/.../`
    ForwardSlash,
    /// `'/.../'`
    QuotedSlash,
    /// `'|...|'`
    QuotedPipe,
}

impl Delimiter {
    /// All delimiters, longest opening first (so detection is unambiguous).
    const ALL: [Self; 3] = [Self::QuotedSlash, Self::QuotedPipe, Self::ForwardSlash];

    /// The opening text.
    #[must_use]
    pub const fn opening(self) -> &'static str {
        match self {
            Self::ForwardSlash => "/",
            Self::QuotedSlash => "'/",
            Self::QuotedPipe => "'|",
        }
    }

    /// The closing text.
    #[must_use]
    pub const fn closing(self) -> &'static str {
        match self {
            Self::ForwardSlash => "/",
            Self::QuotedSlash => "/'",
            Self::QuotedPipe => "|'",
        }
    }

    /// True for the delimiters that imply the experimental dialect.
    #[must_use]
    pub const fn is_experimental(self) -> bool {
        matches!(self, Self::QuotedSlash | Self::QuotedPipe)
    }
}

/// The result of delimiter lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexedRegex<'src> {
    /// The pattern text between the delimiters.
    pub contents: &'src str,
    /// Which delimiter pair was found.
    pub delimiter: Delimiter,
    /// The byte offset just past the closing delimiter.
    pub end: usize,
}

impl LexedRegex<'_> {
    /// The byte range of `contents` within the original input.
    #[must_use]
    pub const fn contents_bounds(&self) -> (usize, usize) {
        let start = self.delimiter.opening().len();
        (start, self.end - self.delimiter.closing().len())
    }
}

/// Detects and lexes one regex literal at the start of `input`.
///
/// Returns the inner pattern text, the delimiter, and the offset just past
/// the closing delimiter (trailing input is allowed and left alone).
///
/// # Errors
///
/// - [`UnknownDelimiter`] when `input` does not start with a recognized
///   opening.
/// - [`UnterminatedRegexLiteral`] when the closing delimiter is missing
///   (end of input or a newline).
/// - [`UnprintableAscii`] when a C0 control character other than tab
///   appears inside the literal.
///
/// [`UnknownDelimiter`]: DelimiterLexErrorKind::UnknownDelimiter
/// [`UnterminatedRegexLiteral`]: DelimiterLexErrorKind::UnterminatedRegexLiteral
/// [`UnprintableAscii`]: DelimiterLexErrorKind::UnprintableAscii
pub fn lex_regex(input: &str) -> Result<LexedRegex<'_>, DelimiterLexError> {
    let delimiter = Delimiter::ALL
        .into_iter()
        .find(|d| input.starts_with(d.opening()))
        .ok_or_else(|| {
            DelimiterLexError::new(DelimiterLexErrorKind::UnknownDelimiter, Span::empty(0))
        })?;

    let open_len = delimiter.opening().len();
    let closing = delimiter.closing();
    let mut chars = input[open_len..].char_indices();

    while let Some((offset, c)) = chars.next() {
        let pos = open_len + offset;
        if input[pos..].starts_with(closing) {
            let end = pos + closing.len();
            return Ok(LexedRegex {
                contents: &input[open_len..pos],
                delimiter,
                end,
            });
        }
        match c {
            '\\' => {
                // The backslash shields the next character, including a
                // closing delimiter char.
                if chars.next().is_none() {
                    break;
                }
            }
            '\n' | '\r' => {
                return Err(DelimiterLexError::new(
                    DelimiterLexErrorKind::UnterminatedRegexLiteral,
                    Span::from(pos..pos + 1),
                ));
            }
            c if c.is_ascii_control() && c != '\t' => {
                return Err(DelimiterLexError::new(
                    DelimiterLexErrorKind::UnprintableAscii,
                    Span::from(pos..pos + 1),
                ));
            }
            _ => {}
        }
    }

    Err(DelimiterLexError::new(
        DelimiterLexErrorKind::UnterminatedRegexLiteral,
        Span::from(0..input.len()),
    ))
}
