// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the regex front end.
//!
//! Errors carry source locations ([`Span`]) for precise diagnostics.
//! They integrate with [`miette`] for beautiful error reporting.
//!
//! Propagation policy: lexical helpers return `Err`; the cursor's
//! transactional [`try_eating`](super::Source::try_eating) restores the
//! cursor on `Ok(None)` but never on `Err`, so the span attached here always
//! points at the failure, not at the speculation start.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// Result alias used by all lexical and parsing routines.
pub type ParseResult<T> = Result<T, ParseError>;

/// A syntax error encountered while parsing a regex pattern.
///
/// The front end has no error recovery: the first error aborts the parse
/// and is returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct ParseError {
    /// The kind of syntax error.
    #[source]
    pub kind: ParseErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates an "unexpected end of input" error at the given position.
    #[must_use]
    pub fn unexpected_end(at: u32) -> Self {
        Self::new(ParseErrorKind::UnexpectedEndOfInput, Span::empty(at))
    }

    /// Creates an "expected `literal`" error.
    #[must_use]
    pub fn expected(literal: impl Into<EcoString>, span: Span) -> Self {
        Self::new(ParseErrorKind::Expected(literal.into()), span)
    }

    /// Creates a fallback error with a free-form message.
    #[must_use]
    pub fn misc(message: impl Into<EcoString>, span: Span) -> Self {
        Self::new(ParseErrorKind::Misc(message.into()), span)
    }
}

/// The kind of syntax error, without its location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The pattern ended in the middle of a construct.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A specific piece of text was required.
    #[error("expected '{0}'")]
    Expected(EcoString),

    /// One of several pieces of text was required.
    #[error("expected one of {}", format_alternatives(.0))]
    ExpectedSequence(Vec<EcoString>),

    /// A construct that must not be empty was empty (e.g. `[]`, `\p{}`).
    #[error("expected non-empty contents")]
    ExpectedNonEmptyContents,

    /// A keyboard escape operand was not ASCII.
    #[error("expected ASCII character, found '{0}'")]
    ExpectedAscii(char),

    /// Digits in the given radix were required.
    #[error("expected number in radix {radix}, found '{text}'")]
    ExpectedNumber {
        /// The text that failed to lex as a number.
        text: EcoString,
        /// The radix that was required.
        radix: u32,
    },

    /// An exact digit count was required (e.g. `\uHHHH`).
    #[error("expected {expected} digits, found '{text}'")]
    ExpectedNumDigits {
        /// The digits that were found.
        text: EcoString,
        /// How many digits were required.
        expected: usize,
    },

    /// A numeric literal did not fit the value type.
    #[error("number '{0}' overflows")]
    NumberOverflow(EcoString),

    /// A scalar escape named a value outside U+0000..U+10FFFF or a
    /// surrogate.
    #[error("{0:#x} is not a valid Unicode scalar value")]
    InvalidScalar(u32),

    /// `(?` was not followed by a recognized group specifier.
    #[error("expected group specifier")]
    ExpectedGroupSpecifier,

    /// A `(*...)` sentinel named an unknown group kind.
    #[error("unknown group kind '(*{0}'")]
    UnknownGroupKind(EcoString),

    /// An unrecognized letter appeared in a matching-option sequence.
    #[error("invalid matching option '{0}'")]
    InvalidMatchingOption(char),

    /// `(?^...)` resets all options; a `-` afterwards is meaningless.
    #[error("cannot remove matching options after '^'")]
    CannotRemoveMatchingOptionsAfterCaret,

    /// `y{g}` / `y{w}` select a mode and cannot appear after `-`.
    #[error("text segment options cannot be removed")]
    CannotRemoveTextSegmentOptions,

    /// A quantifier had nothing to apply to.
    #[error("quantifier has no operand")]
    QuantifierWithoutOperand,

    /// Fallback for conditions without a dedicated kind.
    #[error("{0}")]
    Misc(EcoString),
}

fn format_alternatives(alts: &[EcoString]) -> String {
    let quoted: Vec<String> = alts.iter().map(|a| format!("'{a}'")).collect();
    quoted.join(", ")
}

/// An error from regex-literal delimiter lexing (see
/// [`lex_regex`](super::lex_regex)).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct DelimiterLexError {
    /// The kind of delimiter error.
    #[source]
    pub kind: DelimiterLexErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl DelimiterLexError {
    /// Creates a new delimiter lexing error.
    #[must_use]
    pub fn new(kind: DelimiterLexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl From<DelimiterLexError> for ParseError {
    fn from(err: DelimiterLexError) -> Self {
        Self::misc(err.kind.to_string(), err.span)
    }
}

/// The kind of delimiter lexing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DelimiterLexErrorKind {
    /// The input did not start with a recognized delimiter.
    #[error("unknown regex literal delimiter")]
    UnknownDelimiter,

    /// The closing delimiter was missing.
    #[error("unterminated regex literal")]
    UnterminatedRegexLiteral,

    /// An unprintable ASCII byte appeared inside the literal.
    #[error("unprintable ASCII character in regex literal")]
    UnprintableAscii,
}
