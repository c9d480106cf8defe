// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for regex patterns.
//!
//! This module contains the source cursor, the dialect-aware lexical
//! routines, the recursive-descent parser, and the diagnostics they share.
//!
//! # Parsing
//!
//! [`parse`] converts pattern text into an [`Ast`](crate::ast::Ast) under a
//! set of [`SyntaxOptions`](crate::SyntaxOptions);
//! [`parse_with_delimiters`] first strips a regex-literal delimiter pair
//! (see [`lex_regex`]).
//!
//! ```
//! use relex_core::{parse, SyntaxOptions};
//!
//! let ast = parse(r"\d+", SyntaxOptions::traditional()).unwrap();
//! assert_eq!(ast.span().len(), 3);
//! ```
//!
//! # Lexical analysis
//!
//! The parser consumes characters through [`Source`], a cursor with rewind
//! checkpoints; the transactional [`Source::try_eating`] restores the
//! cursor on `Ok(None)` but never on `Err`, so error spans always point at
//! the failure. A lightweight dialect-independent [`Lexer`] over the
//! simplified grammar is available for tooling via [`tokenize`].
//!
//! # Error handling
//!
//! There is no error recovery: the first [`ParseError`] aborts the parse.
//! Errors are structured `(kind, range)` values integrating with `miette`.

mod delimiters;
mod error;
mod lexer;
mod parser;
mod source;
mod span;
mod token;

#[cfg(test)]
mod lexer_property_tests;

pub use delimiters::{Delimiter, LexedRegex, lex_regex};
pub use error::{
    DelimiterLexError, DelimiterLexErrorKind, ParseError, ParseErrorKind, ParseResult,
};
pub use parser::{parse, parse_with_delimiters};
pub use source::{Checkpoint, Source};
pub use span::{Located, Span};
pub use token::{Lexer, MetaCharacter, Token, TokenKind, tokenize, tokenize_with_eof};
