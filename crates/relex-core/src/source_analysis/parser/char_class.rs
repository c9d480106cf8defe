// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The custom-character-class sub-parser.
//!
//! Opened by `[` (or `[^`). The class-depth counter in the parsing context
//! is incremented on entry and decremented on the matching `]`; a `]`
//! encountered outside any class is an ordinary literal, handled by the
//! main atom parser.
//!
//! Inside a class the grammar is flat: atoms (with the class-local subset
//! of escapes), nested classes, POSIX classes, quotes, ranges `A-B`, and
//! the set operators `&&` / `--` / `~~` at equal precedence, folded
//! left-associatively. The parser never emits alternation, group,
//! quantification, or trivia nodes inside a class.

use crate::ast::{
    Atom, AtomKind, CharacterProperty, ClassMember, ClassRange, ClassStart, CustomCharacterClass,
    SetOp, SetOperation,
};
use crate::source_analysis::error::{ParseError, ParseErrorKind, ParseResult};
use crate::source_analysis::span::Located;
use crate::unicode::{PosixClass, PropertyKind};

use super::Parser;

impl Parser<'_> {
    /// Parses a full custom character class, brackets included.
    pub(crate) fn parse_custom_character_class(&mut self) -> ParseResult<CustomCharacterClass> {
        let class_start = self.source.current_position();
        let start = self.source.record_loc(|src| {
            src.expect('[')?;
            Ok(if src.try_eat('^') {
                ClassStart::Inverted
            } else {
                ClassStart::Normal
            })
        })?;

        self.enter_class_nesting()?;
        let members = self.parse_class_member_list()?;
        if members.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedNonEmptyContents,
                self.source.span_from(class_start),
            ));
        }
        self.source.expect(']')?;
        self.leave_class_nesting();

        Ok(CustomCharacterClass {
            start,
            members,
            span: self.source.span_from(class_start),
        })
    }

    /// Parses member runs and folds set operators left-associatively:
    /// `[a&&b~~c]` becomes `((a ∩ b) ⊕ c)`.
    fn parse_class_member_list(&mut self) -> ParseResult<Vec<ClassMember>> {
        let mut members = self.parse_class_member_run()?;
        while let Some(op) = self.lex_class_set_operator()? {
            let rhs = self.parse_class_member_run()?;
            if rhs.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedNonEmptyContents,
                    self.source.span_from(op.span.end()),
                ));
            }
            members = vec![ClassMember::SetOperation(SetOperation {
                lhs: members,
                op,
                rhs,
            })];
        }
        Ok(members)
    }

    /// Parses members up to a set operator, the closing `]`, or the end of
    /// input.
    fn parse_class_member_run(&mut self) -> ParseResult<Vec<ClassMember>> {
        let mut members = Vec::new();
        loop {
            if self.context.ignore_whitespace {
                let _ = self
                    .source
                    .eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
            }
            if self.source.is_at_end()
                || self.source.peek() == Some(']')
                || self.at_class_set_operator()
            {
                return Ok(members);
            }

            let member = self.parse_class_member()?;
            match member {
                ClassMember::Atom(lhs) if self.range_follows() => {
                    members.push(self.parse_class_range(lhs)?);
                }
                other => members.push(other),
            }
        }
    }

    /// True when the next text is a range dash: a `-` that is neither a
    /// set operator, nor trailing (`-]`), nor at the end of input.
    fn range_follows(&self) -> bool {
        self.source.peek() == Some('-')
            && !self.at_class_set_operator()
            && !matches!(self.source.peek_nth(1), None | Some(']'))
    }

    /// Parses `-B` after the low endpoint.
    fn parse_class_range(&mut self, lhs: Atom) -> ParseResult<ClassMember> {
        let dash_start = self.source.current_position();
        self.source.expect('-')?;
        let dash = self.source.span_from(dash_start);

        let rhs = self.parse_class_member()?;
        let ClassMember::Atom(rhs) = rhs else {
            return Err(ParseError::misc(
                "invalid character class range operand",
                rhs_span(&rhs),
            ));
        };
        if !is_valid_range_operand(&lhs) {
            return Err(ParseError::misc(
                "invalid character class range operand",
                lhs.span,
            ));
        }
        if !is_valid_range_operand(&rhs) {
            return Err(ParseError::misc(
                "invalid character class range operand",
                rhs.span,
            ));
        }
        Ok(ClassMember::Range(ClassRange { lhs, dash, rhs }))
    }

    /// Parses one member: a nested class, POSIX class, quote, or atom.
    fn parse_class_member(&mut self) -> ParseResult<ClassMember> {
        if self.source.starts_with("[:") {
            if let Some(atom) = self.try_lexing(|p| p.lex_posix_class())? {
                return Ok(ClassMember::Atom(atom));
            }
        }
        if self.source.peek() == Some('[') {
            return self.parse_custom_character_class().map(ClassMember::Custom);
        }
        if let Some(quote) = self.lex_quote()? {
            return Ok(ClassMember::Quote(quote));
        }
        if self.source.peek() == Some('\\') {
            return self.lex_escaped_atom(true).map(ClassMember::Atom);
        }
        let start = self.source.current_position();
        let c = self.source.eat()?;
        Ok(ClassMember::Atom(Atom {
            kind: AtomKind::Char(c),
            span: self.source.span_from(start),
        }))
    }

    /// Lexes `[:name:]` / `[:^name:]`. Returns `None` (restoring) when the
    /// text is not a POSIX class — it is then a nested class beginning
    /// with a literal `:`.
    fn lex_posix_class(&mut self) -> ParseResult<Option<Atom>> {
        let start = self.source.current_position();
        if !self.source.try_eat_seq("[:") {
            return Ok(None);
        }
        let inverted = self.source.try_eat('^');
        let name = self
            .source
            .eat_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '));
        if name.is_empty() || !self.source.try_eat_seq(":]") {
            return Ok(None);
        }
        let kind = PosixClass::from_name(name).map_or_else(
            || PropertyKind::Other {
                key: None,
                value: name.into(),
            },
            PropertyKind::Posix,
        );
        Ok(Some(Atom {
            kind: AtomKind::CharacterProperty(CharacterProperty {
                kind,
                inverted,
                is_posix: true,
            }),
            span: self.source.span_from(start),
        }))
    }

    fn at_class_set_operator(&self) -> bool {
        self.source.starts_with("&&")
            || self.source.starts_with("--")
            || self.source.starts_with("~~")
    }

    fn lex_class_set_operator(&mut self) -> ParseResult<Option<Located<SetOp>>> {
        let start = self.source.current_position();
        let op = if self.source.try_eat_seq("&&") {
            SetOp::Intersection
        } else if self.source.try_eat_seq("--") {
            SetOp::Subtraction
        } else if self.source.try_eat_seq("~~") {
            SetOp::SymmetricDifference
        } else {
            return Ok(None);
        };
        Ok(Some(Located::new(op, self.source.span_from(start))))
    }

    fn enter_class_nesting(&mut self) -> ParseResult<()> {
        self.enter_nesting()?;
        self.context.custom_char_class_depth += 1;
        Ok(())
    }

    fn leave_class_nesting(&mut self) {
        self.context.custom_char_class_depth -= 1;
        self.leave_nesting();
    }
}

/// Range endpoints must denote a single character: literals, scalar
/// escapes, single-character builtins, or keyboard escapes.
fn is_valid_range_operand(atom: &Atom) -> bool {
    atom.kind.as_char().is_some()
        || matches!(
            atom.kind,
            AtomKind::KeyboardControl(_)
                | AtomKind::KeyboardMeta(_)
                | AtomKind::KeyboardMetaControl(_)
        )
}

fn rhs_span(member: &ClassMember) -> crate::source_analysis::Span {
    match member {
        ClassMember::Atom(atom) => atom.span,
        ClassMember::Range(range) => range.span(),
        ClassMember::Custom(class) => class.span,
        ClassMember::Quote(quote) => quote.span,
        ClassMember::SetOperation(op) => op.op.span,
    }
}
