// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Dialect-aware lexical analysis.
//!
//! These are the lexing routines the parser invokes for each nonterminal:
//! escape sequences, Unicode scalar notations, property predicates, group
//! introducers, quantifiers, references, quotes, comments, and matching
//! options. They live in a separate file as further `impl` blocks on
//! [`Parser`], because they share the parser's cursor and context (dialect
//! flags, prior group count, class depth).
//!
//! # Disambiguation
//!
//! Several constructs share prefixes and are resolved here, in order:
//!
//! - `(?P=`/`(?P>`/`(?&`/`(?R`/`(?±N` group-like references are tried
//!   **before** matching-option parsing, so `(?P…` and `(?-…` resolve
//!   correctly.
//! - `\N` followed by digits is a backreference or an octal escape under
//!   the rule in [`lex_octal_or_backref`](Parser::lex_escaped_atom): a
//!   leading `0` is always octal; otherwise the maximal decimal run `N` is
//!   a backreference iff `1 ≤ N ≤ 9`, the first digit is `8` or `9`, or
//!   `N` does not exceed the number of capturing groups opened so far.
//! - A `{` that is not followed by a valid range through `}` is rewound
//!   and later consumed as a literal.

use ecow::EcoString;

use crate::ast::{
    Atom, AtomKind, CharacterProperty, EscapedBuiltin, GroupKind, MatchingOption,
    MatchingOptionSequence, QuantAmount, QuantKind, Quote, Reference, ReferenceKind, Trivia,
    TriviaKind,
};
use crate::options::SyntaxOptions;
use crate::source_analysis::error::{ParseError, ParseErrorKind, ParseResult};
use crate::source_analysis::span::{Located, Span};
use crate::unicode::{classify_property, classify_value_only};

use super::parser::{GroupIntroducer, Parser};

// ── Trivia, quotes, quantifiers ──────────────────────────────────────────

impl Parser<'_> {
    /// Lexes a comment (`(?#...)`, experimental `/*...*/`) or, under
    /// ignore-whitespace, a run of whitespace.
    pub(crate) fn lex_trivia(&mut self) -> ParseResult<Option<Trivia>> {
        let start = self.source.current_position();

        if self.source.try_eat_seq("(?#") {
            let text = EcoString::from(self.source.eat_while(|c| c != ')'));
            self.source.expect(')')?;
            return Ok(Some(Trivia {
                kind: TriviaKind::Comment,
                text,
                span: self.source.span_from(start),
            }));
        }

        if self
            .context
            .syntax
            .contains(SyntaxOptions::EXPERIMENTAL_COMMENTS)
            && self.source.try_eat_seq("/*")
        {
            let mut text = EcoString::new();
            loop {
                if self.source.try_eat_seq("*/") {
                    break;
                }
                text.push(self.source.eat()?);
            }
            return Ok(Some(Trivia {
                kind: TriviaKind::Comment,
                text,
                span: self.source.span_from(start),
            }));
        }

        if self.context.ignore_whitespace {
            let text = self
                .source
                .eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
            if !text.is_empty() {
                let text = EcoString::from(text);
                return Ok(Some(Trivia {
                    kind: TriviaKind::Whitespace,
                    text,
                    span: self.source.span_from(start),
                }));
            }
        }

        Ok(None)
    }

    /// Lexes a `\Q...\E` quote, or an experimental `"..."` quote.
    ///
    /// `\Q` without a matching `\E` runs to the end of the pattern. The
    /// experimental form unescapes `\"` and `\\` and must be terminated.
    pub(crate) fn lex_quote(&mut self) -> ParseResult<Option<Quote>> {
        let start = self.source.current_position();

        if self.source.try_eat_seq("\\Q") {
            let mut literal = EcoString::new();
            loop {
                if self.source.is_at_end() || self.source.try_eat_seq("\\E") {
                    break;
                }
                literal.push(self.source.eat()?);
            }
            return Ok(Some(Quote {
                literal,
                span: self.source.span_from(start),
            }));
        }

        if self
            .context
            .syntax
            .contains(SyntaxOptions::EXPERIMENTAL_QUOTES)
            && self.source.try_eat('"')
        {
            let mut literal = EcoString::new();
            loop {
                if self.source.try_eat('"') {
                    break;
                }
                if self.source.try_eat_seq("\\\"") {
                    literal.push('"');
                } else if self.source.try_eat_seq("\\\\") {
                    literal.push('\\');
                } else {
                    literal.push(self.source.eat()?);
                }
            }
            return Ok(Some(Quote {
                literal,
                span: self.source.span_from(start),
            }));
        }

        Ok(None)
    }

    /// Lexes a quantifier: `*`, `+`, `?`, or a `{...}` range, followed by
    /// an optional kind suffix (`?` reluctant, `+` possessive).
    ///
    /// Returns `None` (with the cursor restored) when no quantifier is
    /// present — in particular when a `{` is not followed by a valid range.
    pub(crate) fn lex_quantifier(
        &mut self,
    ) -> ParseResult<Option<(Located<QuantAmount>, Located<QuantKind>)>> {
        let amount = self.try_lexing(|p| {
            let start = p.source.current_position();
            let amount = if p.source.try_eat('*') {
                Some(QuantAmount::ZeroOrMore)
            } else if p.source.try_eat('+') {
                Some(QuantAmount::OneOrMore)
            } else if p.source.try_eat('?') {
                Some(QuantAmount::ZeroOrOne)
            } else if p.source.try_eat('{') {
                p.lex_range_amount()?
            } else {
                None
            };
            Ok(amount.map(|amount| Located::new(amount, p.source.span_from(start))))
        })?;
        let Some(amount) = amount else {
            return Ok(None);
        };

        let kind = self.source.record_loc(|src| {
            Ok(if src.try_eat('?') {
                QuantKind::Reluctant
            } else if src.try_eat('+') {
                QuantKind::Possessive
            } else {
                QuantKind::Eager
            })
        })?;
        Ok(Some((amount, kind)))
    }

    /// Lexes the inside of a `{...}` range. The `{` has been eaten.
    ///
    /// Grammar: `n`, `n,`, `,m`, `n,m`; with the experimental-ranges flag
    /// also `n...m`, `n..<m`, `...m`, `..<m` (a half-open upper bound is
    /// decremented). Whitespace anywhere inside disables the range
    /// interpretation.
    fn lex_range_amount(&mut self) -> ParseResult<Option<QuantAmount>> {
        let ranges = self
            .context
            .syntax
            .contains(SyntaxOptions::EXPERIMENTAL_RANGES);
        let lower = self.lex_decimal()?;

        let amount = if self.source.try_eat(',') {
            match (lower, self.lex_decimal()?) {
                (Some(n), Some(m)) => QuantAmount::Range(n.value, m.value),
                (Some(n), None) => QuantAmount::NOrMore(n.value),
                (None, Some(m)) => QuantAmount::UpToN(m.value),
                (None, None) => return Ok(None),
            }
        } else if ranges && self.source.try_eat_seq("..<") {
            let Some(m) = self.lex_decimal()? else {
                return Ok(None);
            };
            if m.value == 0 {
                return Ok(None);
            }
            match lower {
                Some(n) => QuantAmount::Range(n.value, m.value - 1),
                None => QuantAmount::UpToN(m.value - 1),
            }
        } else if ranges && self.source.try_eat_seq("...") {
            let Some(m) = self.lex_decimal()? else {
                return Ok(None);
            };
            match lower {
                Some(n) => QuantAmount::Range(n.value, m.value),
                None => QuantAmount::UpToN(m.value),
            }
        } else {
            match lower {
                Some(n) => QuantAmount::Exactly(n.value),
                None => return Ok(None),
            }
        };

        if self.source.try_eat('}') {
            Ok(Some(amount))
        } else {
            Ok(None)
        }
    }
}

// ── Numbers ──────────────────────────────────────────────────────────────

impl Parser<'_> {
    /// Lexes a run of decimal digits, or `None` when the next character is
    /// not a digit.
    fn lex_decimal(&mut self) -> ParseResult<Option<Located<u32>>> {
        let start = self.source.current_position();
        let digits = self.source.eat_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Ok(None);
        }
        let span = self.source.span_from(start);
        let value = digits
            .parse::<u32>()
            .map_err(|_| ParseError::new(ParseErrorKind::NumberOverflow(digits.into()), span))?;
        Ok(Some(Located::new(value, span)))
    }

    /// Lexes one or more digits in the given radix.
    fn expect_number_radix(&mut self, radix: u32) -> ParseResult<Located<u32>> {
        let start = self.source.current_position();
        let digits = self.source.eat_while(|c| c.is_digit(radix));
        let span = self.source.span_from(start);
        if digits.is_empty() {
            let mut text = EcoString::new();
            if let Some(c) = self.source.peek() {
                text.push(c);
            }
            return Err(ParseError::new(
                ParseErrorKind::ExpectedNumber { text, radix },
                Span::empty(self.source.current_position()),
            ));
        }
        let value = u32::from_str_radix(digits, radix)
            .map_err(|_| ParseError::new(ParseErrorKind::NumberOverflow(digits.into()), span))?;
        Ok(Located::new(value, span))
    }

    /// Lexes exactly `expected` digits in the given radix.
    fn expect_num_digits(&mut self, expected: usize, radix: u32) -> ParseResult<Located<u32>> {
        let start = self.source.current_position();
        let digits = self.source.eat_up_to(expected, |c| c.is_digit(radix));
        let span = self.source.span_from(start);
        if digits.chars().count() != expected {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedNumDigits {
                    text: digits.into(),
                    expected,
                },
                span,
            ));
        }
        let value = u32::from_str_radix(digits, radix)
            .map_err(|_| ParseError::new(ParseErrorKind::NumberOverflow(digits.into()), span))?;
        Ok(Located::new(value, span))
    }
}

// ── Escapes ──────────────────────────────────────────────────────────────

impl Parser<'_> {
    fn atom_at(&self, kind: AtomKind, start: u32) -> Atom {
        Atom {
            kind,
            span: self.source.span_from(start),
        }
    }

    /// Validates a numeric escape as a Unicode scalar value.
    fn scalar_atom(&self, value: u32, start: u32) -> ParseResult<Atom> {
        let span = self.source.span_from(start);
        char::from_u32(value).map_or_else(
            || Err(ParseError::new(ParseErrorKind::InvalidScalar(value), span)),
            |c| {
                Ok(Atom {
                    kind: AtomKind::Scalar(c),
                    span,
                })
            },
        )
    }

    fn expect_ascii(&mut self) -> ParseResult<char> {
        let start = self.source.current_position();
        let c = self.source.eat()?;
        if c.is_ascii() {
            Ok(c)
        } else {
            Err(ParseError::new(
                ParseErrorKind::ExpectedAscii(c),
                self.source.span_from(start),
            ))
        }
    }

    /// Lexes one escaped atom. The cursor is on the backslash.
    ///
    /// Inside a custom character class the class-local subset applies:
    /// `\b` is backspace, references are plain letters, and anchors do not
    /// exist. Escaped metacharacters and unrecognized escapes yield the
    /// character itself.
    pub(crate) fn lex_escaped_atom(&mut self, in_class: bool) -> ParseResult<Atom> {
        let start = self.source.current_position();
        self.source.expect('\\')?;
        let c = self.source.eat()?;
        match c {
            '0'..='9' => self.lex_octal_or_backref(start, c, in_class),
            'u' | 'x' if self.source.try_eat('{') => {
                let value = self.expect_number_radix(16)?;
                self.source.expect('}')?;
                self.scalar_atom(value.value, start)
            }
            'u' => {
                let value = self.expect_num_digits(4, 16)?;
                self.scalar_atom(value.value, start)
            }
            'x' => {
                // 0-2 hex digits; a bare `\x` is U+0000.
                let digits = self.source.eat_up_to(2, |c| c.is_ascii_hexdigit());
                let mut value = 0;
                for digit in digits.chars() {
                    value = value * 16 + digit.to_digit(16).unwrap_or(0);
                }
                self.scalar_atom(value, start)
            }
            'U' => {
                let value = self.expect_num_digits(8, 16)?;
                self.scalar_atom(value.value, start)
            }
            'o' => {
                self.source.expect('{')?;
                let value = self.expect_number_radix(8)?;
                self.source.expect('}')?;
                self.scalar_atom(value.value, start)
            }
            'N' => self.lex_named_character(start, in_class),
            'p' | 'P' => self.lex_character_property(start, c == 'P'),
            'c' => {
                let operand = self.expect_ascii()?;
                Ok(self.atom_at(AtomKind::KeyboardControl(operand), start))
            }
            'C' if self.source.peek() == Some('-') => {
                self.source.expect('-')?;
                let operand = self.expect_ascii()?;
                Ok(self.atom_at(AtomKind::KeyboardControl(operand), start))
            }
            'M' if self.source.peek() == Some('-') => {
                self.source.expect('-')?;
                if self.source.try_eat_seq("\\C-") {
                    let operand = self.expect_ascii()?;
                    Ok(self.atom_at(AtomKind::KeyboardMetaControl(operand), start))
                } else {
                    let operand = self.expect_ascii()?;
                    Ok(self.atom_at(AtomKind::KeyboardMeta(operand), start))
                }
            }
            'g' | 'k' if !in_class => self.lex_escaped_reference(start, c),
            _ => {
                let kind = EscapedBuiltin::from_letter(c, in_class)
                    .map_or(AtomKind::Char(c), AtomKind::EscapedBuiltin);
                Ok(self.atom_at(kind, start))
            }
        }
    }

    /// Lexes `\N{NAME}` / `\N{U+H+}`, or bare `\N` (not-newline) outside a
    /// class.
    fn lex_named_character(&mut self, start: u32, in_class: bool) -> ParseResult<Atom> {
        if self.source.try_eat('{') {
            if self.source.try_eat_seq("U+") {
                let value = self.expect_number_radix(16)?;
                self.source.expect('}')?;
                return self.scalar_atom(value.value, start);
            }
            let name_start = self.source.current_position();
            let name = EcoString::from(self.source.eat_while(|c| c != '}'));
            if name.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedNonEmptyContents,
                    self.source.span_from(name_start),
                ));
            }
            self.source.expect('}')?;
            return Ok(self.atom_at(AtomKind::NamedCharacter(name), start));
        }
        if in_class {
            return Err(ParseError::expected(
                "{",
                Span::empty(self.source.current_position()),
            ));
        }
        Ok(self.atom_at(AtomKind::EscapedBuiltin(EscapedBuiltin::NotNewline), start))
    }

    /// Lexes the body of `\p{...}` / `\P{...}`.
    fn lex_character_property(&mut self, start: u32, inverted: bool) -> ParseResult<Atom> {
        self.source.expect('{')?;
        let body_start = self.source.current_position();
        let body = self.source.eat_while(|c| c != '}');
        if body.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedNonEmptyContents,
                self.source.span_from(body_start),
            ));
        }
        let kind = body.split_once('=').map_or_else(
            || classify_value_only(body.trim()),
            |(key, value)| classify_property(key.trim(), value.trim()),
        );
        self.source.expect('}')?;
        Ok(self.atom_at(
            AtomKind::CharacterProperty(CharacterProperty {
                kind,
                inverted,
                is_posix: false,
            }),
            start,
        ))
    }

    /// Resolves `\` followed by digits. The first digit has been eaten.
    ///
    /// See the module docs for the disambiguation rule. When the decimal
    /// reading loses, up to three octal digits are re-lexed from the first
    /// digit and any remaining digits are left for later literal lexing.
    fn lex_octal_or_backref(&mut self, start: u32, d0: char, in_class: bool) -> ParseResult<Atom> {
        if d0 == '0' {
            // Up to 3 octal digits total, including the leading 0.
            let digits = self.source.eat_up_to(2, |c| matches!(c, '0'..='7'));
            let mut value = 0;
            for digit in digits.chars() {
                value = value * 8 + digit.to_digit(8).unwrap_or(0);
            }
            return self.scalar_atom(value, start);
        }

        let run_start = self.source.checkpoint();
        let rest = self.source.eat_while(|c| c.is_ascii_digit());
        let text = format!("{d0}{rest}");
        let digits_span = Span::new(start + 1, self.source.current_position());
        let value = text.parse::<u32>().map_err(|_| {
            ParseError::new(ParseErrorKind::NumberOverflow(text.as_str().into()), digits_span)
        })?;

        let is_backref = !in_class
            && ((1..=9).contains(&value)
                || matches!(d0, '8' | '9')
                || value <= self.context.prior_group_count);
        if is_backref {
            let reference = Reference {
                kind: ReferenceKind::Absolute(value),
                span: digits_span,
            };
            return Ok(self.atom_at(AtomKind::Backreference(reference), start));
        }

        self.source.rewind(run_start);
        if matches!(d0, '8' | '9') {
            // Inside a class only: not an octal digit, so a literal.
            return Ok(self.atom_at(AtomKind::Char(d0), start));
        }
        let more = self.source.eat_up_to(2, |c| matches!(c, '0'..='7'));
        let mut value = d0.to_digit(8).unwrap_or(0);
        for digit in more.chars() {
            value = value * 8 + digit.to_digit(8).unwrap_or(0);
        }
        self.scalar_atom(value, start)
    }

    /// Lexes `\g` / `\k` reference forms.
    fn lex_escaped_reference(&mut self, start: u32, intro: char) -> ParseResult<Atom> {
        if intro == 'g' {
            if self.source.try_eat('{') {
                let reference = self.parse_reference_body('}')?;
                return Ok(self.atom_at(AtomKind::Backreference(reference), start));
            }
            if self.source.try_eat('<') {
                let reference = self.parse_reference_body('>')?;
                return Ok(self.atom_at(AtomKind::Subpattern(reference), start));
            }
            if self.source.try_eat('\'') {
                let reference = self.parse_reference_body('\'')?;
                return Ok(self.atom_at(AtomKind::Subpattern(reference), start));
            }
            // Bare \gN / \g+N / \g-N.
            let body_start = self.source.current_position();
            let sign = if self.source.try_eat('-') {
                Some(-1)
            } else if self.source.try_eat('+') {
                Some(1)
            } else {
                None
            };
            let number = self.lex_decimal()?;
            let span = self.source.span_from(body_start);
            let kind = match (sign, number) {
                (None, Some(n)) => ReferenceKind::Absolute(n.value),
                (Some(s), Some(n)) => ReferenceKind::Relative(s * self.to_signed(n.value, span)?),
                (_, None) => {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedSequence(vec!["{".into(), "<".into(), "'".into()]),
                        Span::empty(self.source.current_position()),
                    ));
                }
            };
            return Ok(self.atom_at(
                AtomKind::Backreference(Reference { kind, span }),
                start,
            ));
        }

        for (open, close) in [('<', '>'), ('\'', '\''), ('{', '}')] {
            if self.source.try_eat(open) {
                let reference = self.parse_reference_body(close)?;
                return Ok(self.atom_at(AtomKind::Backreference(reference), start));
            }
        }
        Err(ParseError::new(
            ParseErrorKind::ExpectedSequence(vec!["<".into(), "'".into(), "{".into()]),
            Span::empty(self.source.current_position()),
        ))
    }

    fn to_signed(&self, value: u32, span: Span) -> ParseResult<i32> {
        i32::try_from(value).map_err(|_| {
            ParseError::new(
                ParseErrorKind::NumberOverflow(value.to_string().as_str().into()),
                span,
            )
        })
    }

    /// Lexes the delimited body of a reference (`name`, `N`, `+N`, `-N`)
    /// and its closing character.
    fn parse_reference_body(&mut self, close: char) -> ParseResult<Reference> {
        let body_start = self.source.current_position();
        let text = self.source.eat_while(|c| c != close);
        let span = self.source.span_from(body_start);
        if text.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedNonEmptyContents,
                span,
            ));
        }
        let kind = reference_kind_from_text(text, span)?;
        self.source.expect(close)?;
        Ok(Reference { kind, span })
    }
}

/// Classifies reference body text as a number, signed number, or name.
fn reference_kind_from_text(text: &str, span: Span) -> ParseResult<ReferenceKind> {
    let (sign, digits) = match (text.strip_prefix('-'), text.strip_prefix('+')) {
        (Some(rest), _) => (Some(-1i32), rest),
        (_, Some(rest)) => (Some(1i32), rest),
        _ => (None, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(ReferenceKind::Named(text.into()));
    }
    let value = digits
        .parse::<u32>()
        .map_err(|_| ParseError::new(ParseErrorKind::NumberOverflow(text.into()), span))?;
    Ok(match sign {
        None => ReferenceKind::Absolute(value),
        Some(s) => {
            let signed = i32::try_from(value)
                .map_err(|_| ParseError::new(ParseErrorKind::NumberOverflow(text.into()), span))?;
            ReferenceKind::Relative(s * signed)
        }
    })
}

// ── Group introducers ────────────────────────────────────────────────────

impl Parser<'_> {
    /// Lexes everything from `(` up to (and sometimes including) the text
    /// that determines what the group is.
    pub(crate) fn lex_group_start(&mut self) -> ParseResult<GroupIntroducer> {
        let start = self.source.current_position();
        self.source.expect('(')?;

        if self.source.try_eat('*') {
            let kind = self.lex_long_form_group_kind()?;
            return Ok(GroupIntroducer::Kind(Located::new(
                kind,
                self.source.span_from(start),
            )));
        }

        // Group-like references must be tried before matching options to
        // resolve `(?P…` and `(?-…`.
        if let Some(atom) = self.try_lexing(|p| p.lex_group_like_reference(start))? {
            return Ok(GroupIntroducer::Reference(atom));
        }

        let kind = if self.source.try_eat('?') {
            self.lex_group_specifier()?
        } else if self
            .context
            .syntax
            .contains(SyntaxOptions::EXPERIMENTAL_CAPTURES)
            && self.source.try_eat_seq("_:")
        {
            GroupKind::NonCapture
        } else {
            GroupKind::Capture
        };
        Ok(GroupIntroducer::Kind(Located::new(
            kind,
            self.source.span_from(start),
        )))
    }

    /// Lexes the specifier after `(?`.
    fn lex_group_specifier(&mut self) -> ParseResult<GroupKind> {
        if self.source.try_eat_seq("<=") {
            return Ok(GroupKind::Lookbehind);
        }
        if self.source.try_eat_seq("<!") {
            return Ok(GroupKind::NegativeLookbehind);
        }
        if self.source.try_eat_seq("<*") {
            return Ok(GroupKind::NonAtomicLookbehind);
        }
        if self.source.try_eat('<') {
            return Ok(GroupKind::NamedCapture(self.expect_group_name('>')?));
        }
        if self.source.try_eat_seq("P<") {
            return Ok(GroupKind::NamedCapture(self.expect_group_name('>')?));
        }
        if self.source.try_eat('\'') {
            return Ok(GroupKind::NamedCapture(self.expect_group_name('\'')?));
        }
        if self.source.try_eat(':') {
            return Ok(GroupKind::NonCapture);
        }
        if self.source.try_eat('|') {
            return Ok(GroupKind::NonCaptureReset);
        }
        if self.source.try_eat('>') {
            return Ok(GroupKind::Atomic);
        }
        if self.source.try_eat('=') {
            return Ok(GroupKind::Lookahead);
        }
        if self.source.try_eat('!') {
            return Ok(GroupKind::NegativeLookahead);
        }
        if self.source.try_eat('*') {
            return Ok(GroupKind::NonAtomicLookahead);
        }

        let options_start = self.source.current_position();
        let Some(options) = self.lex_matching_option_sequence()? else {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedGroupSpecifier,
                Span::empty(options_start),
            ));
        };
        if self.source.try_eat(':') {
            return Ok(GroupKind::ChangeMatchingOptions {
                options,
                isolated: false,
            });
        }
        // An isolated specifier closes the parentheses itself; its scope
        // is the remainder of the enclosing alternation branch.
        self.source.expect(')')?;
        Ok(GroupKind::ChangeMatchingOptions {
            options,
            isolated: true,
        })
    }

    /// Lexes a PCRE2 long-form sentinel after `(*`.
    fn lex_long_form_group_kind(&mut self) -> ParseResult<GroupKind> {
        let name_start = self.source.current_position();
        let name = self
            .source
            .eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let span = self.source.span_from(name_start);
        let kind = match name {
            "atomic" => GroupKind::Atomic,
            "pla" | "positive_lookahead" => GroupKind::Lookahead,
            "nla" | "negative_lookahead" => GroupKind::NegativeLookahead,
            "plb" | "positive_lookbehind" => GroupKind::Lookbehind,
            "nlb" | "negative_lookbehind" => GroupKind::NegativeLookbehind,
            "napla" | "non_atomic_positive_lookahead" => GroupKind::NonAtomicLookahead,
            "naplb" | "non_atomic_positive_lookbehind" => GroupKind::NonAtomicLookbehind,
            "sr" | "script_run" => GroupKind::ScriptRun,
            "asr" | "atomic_script_run" => GroupKind::AtomicScriptRun,
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::UnknownGroupKind(name.into()),
                    span,
                ));
            }
        };
        self.source.expect(':')?;
        Ok(kind)
    }

    /// Lexes `(?P=name)`, `(?P>name)`, `(?&name)`, `(?R)`, `(?N)`,
    /// `(?+N)`, `(?-N)`. Returns `None` (restoring) when the text after
    /// `(` is not one of these.
    fn lex_group_like_reference(&mut self, start: u32) -> ParseResult<Option<Atom>> {
        if !self.source.try_eat('?') {
            return Ok(None);
        }
        if self.source.try_eat_seq("P=") {
            let reference = self.parse_reference_body(')')?;
            return Ok(Some(self.atom_at(AtomKind::Backreference(reference), start)));
        }
        if self.source.try_eat_seq("P>") {
            let reference = self.parse_reference_body(')')?;
            return Ok(Some(self.atom_at(AtomKind::Subpattern(reference), start)));
        }
        if self.source.try_eat('&') {
            let reference = self.parse_reference_body(')')?;
            return Ok(Some(self.atom_at(AtomKind::Subpattern(reference), start)));
        }
        if self.source.starts_with("R)") {
            let r_start = self.source.current_position();
            let _ = self.source.try_eat('R');
            let reference = Reference {
                kind: ReferenceKind::RecurseWholePattern,
                span: self.source.span_from(r_start),
            };
            self.source.expect(')')?;
            return Ok(Some(self.atom_at(AtomKind::Subpattern(reference), start)));
        }

        let is_number = matches!(self.source.peek(), Some('0'..='9'))
            || (matches!(self.source.peek(), Some('+' | '-'))
                && self.source.peek_nth(1).is_some_and(|c| c.is_ascii_digit()));
        if !is_number {
            return Ok(None);
        }
        let body_start = self.source.current_position();
        let sign = if self.source.try_eat('-') {
            Some(-1)
        } else if self.source.try_eat('+') {
            Some(1)
        } else {
            None
        };
        let Some(number) = self.lex_decimal()? else {
            return Ok(None);
        };
        let span = self.source.span_from(body_start);
        let kind = match sign {
            Some(s) => ReferenceKind::Relative(s * self.to_signed(number.value, span)?),
            None if number.value == 0 => ReferenceKind::RecurseWholePattern,
            None => ReferenceKind::Absolute(number.value),
        };
        self.source.expect(')')?;
        Ok(Some(self.atom_at(
            AtomKind::Subpattern(Reference { kind, span }),
            start,
        )))
    }

    /// Lexes a group name and its closing delimiter.
    fn expect_group_name(&mut self, close: char) -> ParseResult<Located<EcoString>> {
        let start = self.source.current_position();
        let name = self.source.eat_while(|c| c.is_alphanumeric() || c == '_');
        let span = self.source.span_from(start);
        if name.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedNonEmptyContents,
                span,
            ));
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ParseError::misc("group name must not start with a digit", span));
        }
        let located = Located::new(EcoString::from(name), span);
        self.source.expect(close)?;
        Ok(located)
    }
}

// ── Matching options ─────────────────────────────────────────────────────

impl Parser<'_> {
    const fn is_matching_option_start(c: char) -> bool {
        matches!(
            c,
            'i' | 'J' | 'm' | 'n' | 's' | 'U' | 'x' | 'w' | 'D' | 'P' | 'S' | 'W' | 'y'
        )
    }

    /// Lexes a matching-option sequence: `[^] adding* (- removing*)?`.
    ///
    /// Returns `None` when nothing option-like is present (the caller then
    /// reports an unknown group specifier). The terminator (`:` or `)`) is
    /// left for the caller.
    fn lex_matching_option_sequence(&mut self) -> ParseResult<Option<MatchingOptionSequence>> {
        let caret = if self.source.peek() == Some('^') {
            let start = self.source.current_position();
            let _ = self.source.try_eat('^');
            Some(self.source.span_from(start))
        } else {
            None
        };

        let mut adding = Vec::new();
        let mut minus = None;
        let mut removing = Vec::new();
        loop {
            match self.source.peek() {
                None | Some(':' | ')') => break,
                Some('-') => {
                    let dash_start = self.source.current_position();
                    let _ = self.source.try_eat('-');
                    let dash = self.source.span_from(dash_start);
                    if caret.is_some() {
                        return Err(ParseError::new(
                            ParseErrorKind::CannotRemoveMatchingOptionsAfterCaret,
                            dash,
                        ));
                    }
                    if minus.is_some() {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidMatchingOption('-'),
                            dash,
                        ));
                    }
                    minus = Some(dash);
                }
                Some(c) => {
                    if !Self::is_matching_option_start(c) {
                        if caret.is_none() && minus.is_none() && adding.is_empty() {
                            return Ok(None);
                        }
                        let at = self.source.current_position() as usize;
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidMatchingOption(c),
                            Span::from(at..at + c.len_utf8()),
                        ));
                    }
                    let option = self.lex_matching_option()?;
                    if minus.is_some() {
                        if option.value.is_text_segment_mode() {
                            return Err(ParseError::new(
                                ParseErrorKind::CannotRemoveTextSegmentOptions,
                                option.span,
                            ));
                        }
                        removing.push(option);
                    } else {
                        adding.push(option);
                    }
                }
            }
        }

        if caret.is_none() && minus.is_none() && adding.is_empty() {
            return Ok(None);
        }
        Ok(Some(MatchingOptionSequence {
            caret,
            adding,
            minus,
            removing,
        }))
    }

    /// Lexes a single matching option. The caller has checked the first
    /// character is a plausible option start.
    fn lex_matching_option(&mut self) -> ParseResult<Located<MatchingOption>> {
        let start = self.source.current_position();
        let c = self.source.eat()?;
        let option = match c {
            'i' => MatchingOption::CaseInsensitive,
            'J' => MatchingOption::AllowDuplicateGroupNames,
            'm' => MatchingOption::Multiline,
            'n' => MatchingOption::NamedCapturesOnly,
            's' => MatchingOption::SingleLine,
            'U' => MatchingOption::ReluctantByDefault,
            'x' => {
                if self.source.try_eat('x') {
                    MatchingOption::ExtraExtended
                } else {
                    MatchingOption::Extended
                }
            }
            'w' => MatchingOption::UnicodeWordBoundaries,
            'D' => MatchingOption::AsciiOnlyDigit,
            'P' => MatchingOption::AsciiOnlyPosixProps,
            'S' => MatchingOption::AsciiOnlySpace,
            'W' => MatchingOption::AsciiOnlyWord,
            'y' => {
                self.source.expect('{')?;
                let mode_start = self.source.current_position();
                let mode = self.source.eat()?;
                let option = match mode {
                    'g' => MatchingOption::TextSegmentGraphemeMode,
                    'w' => MatchingOption::TextSegmentWordMode,
                    _ => {
                        return Err(ParseError::new(
                            ParseErrorKind::ExpectedSequence(vec!["g".into(), "w".into()]),
                            self.source.span_from(mode_start),
                        ));
                    }
                };
                self.source.expect('}')?;
                option
            }
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidMatchingOption(other),
                    self.source.span_from(start),
                ));
            }
        };
        Ok(Located::new(option, self.source.span_from(start)))
    }
}
