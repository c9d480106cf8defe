// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The positioned character cursor over pattern text.
//!
//! [`Source`] is pure data plus deterministic operations: peeking,
//! bulk-eating by predicate, and rewind checkpoints. There is no I/O and no
//! hidden state; the lexer and parser jointly consume one cursor per parse.
//!
//! # Transactional lookahead
//!
//! [`Source::try_eating`] snapshots the cursor and runs a closure. A
//! `Ok(None)` result restores the snapshot (the speculation failed benignly);
//! `Ok(Some)` commits; `Err` propagates **without restoring**, so the error
//! span keeps pointing at the character that caused the failure.

use super::error::{ParseError, ParseResult};
use super::span::{Located, Span};

/// A cursor over pattern text, tracking the current byte position.
///
/// The cursor may be bounded to a sub-range of a larger string (used by
/// delimiter stripping), in which case all spans remain absolute offsets
/// into the original input.
#[derive(Debug, Clone, Copy)]
pub struct Source<'src> {
    input: &'src str,
    pos: usize,
    end: usize,
}

/// A saved cursor position, produced by [`Source::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl<'src> Source<'src> {
    /// Creates a cursor over the whole input.
    #[must_use]
    pub const fn new(input: &'src str) -> Self {
        Self {
            input,
            pos: 0,
            end: input.len(),
        }
    }

    /// Creates a cursor over `input[start..end]` whose positions are
    /// absolute offsets into `input`.
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is not a valid char-boundary range of `input`.
    #[must_use]
    pub fn with_bounds(input: &'src str, start: usize, end: usize) -> Self {
        assert!(input.get(start..end).is_some(), "invalid source bounds");
        Self {
            input,
            pos: start,
            end,
        }
    }

    /// The text still to be consumed.
    #[must_use]
    pub fn remaining(&self) -> &'src str {
        &self.input[self.pos..self.end]
    }

    /// Returns true when the cursor has consumed all input.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.end
    }

    /// The current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "patterns over 4GB are not supported"
    )]
    #[must_use]
    pub const fn current_position(&self) -> u32 {
        self.pos as u32
    }

    /// Creates a span from `start` to the current position.
    #[must_use]
    pub const fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    // ── Peeking ──────────────────────────────────────────────────────────

    /// Peeks at the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peeks `n` characters ahead (`n == 0` is the same as [`peek`]).
    ///
    /// [`peek`]: Source::peek
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Returns true if the remaining input starts with `seq`.
    #[must_use]
    pub fn starts_with(&self, seq: &str) -> bool {
        self.remaining().starts_with(seq)
    }

    // ── Eating ───────────────────────────────────────────────────────────

    /// Consumes and returns the next character.
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::UnexpectedEndOfInput`] at the current
    /// position when the input is exhausted.
    ///
    /// [`ParseErrorKind::UnexpectedEndOfInput`]: super::ParseErrorKind::UnexpectedEndOfInput
    pub fn eat(&mut self) -> ParseResult<char> {
        let c = self
            .peek()
            .ok_or_else(|| ParseError::unexpected_end(self.current_position()))?;
        self.pos += c.len_utf8();
        Ok(c)
    }

    /// Consumes the next character if it equals `c`.
    pub fn try_eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes the next character if `pred` accepts it.
    pub fn try_eat_where(&mut self, pred: impl Fn(char) -> bool) -> Option<char> {
        let c = self.peek().filter(|&c| pred(c))?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `seq` if the remaining input starts with it.
    pub fn try_eat_seq(&mut self, seq: &str) -> bool {
        if self.starts_with(seq) {
            self.pos += seq.len();
            true
        } else {
            false
        }
    }

    /// Consumes characters while `pred` holds, returning the eaten prefix.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'src str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.input[start..self.pos]
    }

    /// Consumes at most `n` characters matching `pred`, returning the eaten
    /// prefix.
    pub fn eat_up_to(&mut self, n: usize, pred: impl Fn(char) -> bool) -> &'src str {
        let start = self.pos;
        for _ in 0..n {
            match self.peek() {
                Some(c) if pred(c) => self.pos += c.len_utf8(),
                _ => break,
            }
        }
        &self.input[start..self.pos]
    }

    /// Consumes `c` or fails with an `expected` diagnostic
    /// (`unexpected end of input` when the input is exhausted).
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::Expected`] at the current character, or
    /// [`ParseErrorKind::UnexpectedEndOfInput`] at the end position.
    ///
    /// [`ParseErrorKind::Expected`]: super::ParseErrorKind::Expected
    /// [`ParseErrorKind::UnexpectedEndOfInput`]: super::ParseErrorKind::UnexpectedEndOfInput
    pub fn expect(&mut self, c: char) -> ParseResult<()> {
        if self.try_eat(c) {
            return Ok(());
        }
        let at = self.current_position();
        match self.peek() {
            None => Err(ParseError::unexpected_end(at)),
            Some(found) => Err(ParseError::expected(
                c.to_string(),
                Span::from(at as usize..at as usize + found.len_utf8()),
            )),
        }
    }

    /// Consumes `seq` or fails with an `expected` diagnostic
    /// (`unexpected end of input` when the input is exhausted).
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::Expected`] at the current character, or
    /// [`ParseErrorKind::UnexpectedEndOfInput`] at the end position.
    ///
    /// [`ParseErrorKind::Expected`]: super::ParseErrorKind::Expected
    /// [`ParseErrorKind::UnexpectedEndOfInput`]: super::ParseErrorKind::UnexpectedEndOfInput
    pub fn expect_seq(&mut self, seq: &str) -> ParseResult<()> {
        if self.try_eat_seq(seq) {
            return Ok(());
        }
        let at = self.current_position();
        if self.is_at_end() {
            Err(ParseError::unexpected_end(at))
        } else {
            Err(ParseError::expected(seq, Span::empty(at)))
        }
    }

    // ── Checkpointing ────────────────────────────────────────────────────

    /// Saves the current position.
    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Restores a previously saved position.
    pub const fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.0;
    }

    /// Runs a speculative lex.
    ///
    /// Restores the cursor when `f` returns `Ok(None)`; commits when it
    /// returns `Ok(Some)`. An `Err` propagates without restoring, so the
    /// error location points at the failure.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn try_eating<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<Option<T>>,
    ) -> ParseResult<Option<T>> {
        let checkpoint = self.checkpoint();
        let result = f(self)?;
        if result.is_none() {
            self.rewind(checkpoint);
        }
        Ok(result)
    }

    /// Runs `f` and wraps its result in a [`Located`] spanning
    /// `[start, current)`.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn record_loc<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Located<T>> {
        let start = self.current_position();
        let value = f(self)?;
        Ok(Located::new(value, self.span_from(start)))
    }
}
