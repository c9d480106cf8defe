// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for regex patterns.
//!
//! The grammar, precedence low to high:
//!
//! ```text
//! RE            = Alternation
//! Alternation   = Concatenation ('|' Concatenation)*
//! Concatenation = Quantified*
//! Quantified    = Atom Quantifier?
//! Atom          = Group | CustomCC | Quote | Trivia | EscapedAtom | Literal
//! ```
//!
//! The parser calls the lexical routines in
//! [`lexer`](super::lexer) for each nonterminal; it peeks raw characters
//! only in a handful of disambiguation predicates. There is no error
//! recovery: the first error aborts the parse with its location intact.
//!
//! # Parser state
//!
//! [`Parser`] owns the [`Source`] cursor and a [`ParsingContext`]: the
//! dialect flags, the number of capturing groups opened so far (which
//! drives octal/backreference disambiguation), the custom-character-class
//! depth, and a nesting-depth guard. Deep recursion grows the stack on the
//! heap via `stacker::maybe_grow`, so pathological nesting cannot overflow.
//!
//! # Usage
//!
//! ```
//! use relex_core::{parse, SyntaxOptions};
//!
//! let ast = parse("ab|c", SyntaxOptions::traditional()).unwrap();
//! assert!(!ast.has_capture());
//! ```

use crate::ast::{
    Alternation, Ast, Atom, AtomKind, Concatenation, Group, GroupKind, MatchingOptionSequence,
    Quantification,
};
use crate::options::SyntaxOptions;
use crate::source_analysis::delimiters::lex_regex;
use crate::source_analysis::error::{ParseError, ParseErrorKind, ParseResult};
use crate::source_analysis::source::Source;
use crate::source_analysis::span::Located;

mod char_class;
#[cfg(test)]
mod tests;

/// Recursion ceiling for nested groups, classes, and alternations.
///
/// Combined with `stacker::maybe_grow`, this bounds both stack usage and
/// worst-case parse time on adversarial input.
const MAX_NESTING_DEPTH: u32 = 64;

/// Parses a bare pattern under the given dialect flags.
///
/// # Examples
///
/// ```
/// use relex_core::{parse, SyntaxOptions};
///
/// let ast = parse("a(b)", SyntaxOptions::traditional()).unwrap();
/// assert!(ast.has_capture());
/// ```
///
/// # Errors
///
/// Returns the first syntax error with its source range.
pub fn parse(input: &str, syntax: SyntaxOptions) -> ParseResult<Ast> {
    Parser::new(Source::new(input), syntax).parse_complete()
}

/// Detects and strips a regex-literal delimiter pair, then parses the
/// inner pattern.
///
/// The quoted delimiters (`'/…/'`, `'|…|'`) imply the experimental
/// dialect; `/…/` parses traditionally. Spans in the result are absolute
/// offsets into `input`, including the delimiter prefix.
///
/// # Examples
///
/// ```
/// use relex_core::parse_with_delimiters;
///
/// let ast = parse_with_delimiters("/a|b/").unwrap();
/// assert_eq!(ast.span().start(), 1);
/// ```
///
/// # Errors
///
/// Returns a delimiter error (as a [`ParseError`]) or the first syntax
/// error from the inner pattern.
pub fn parse_with_delimiters(input: &str) -> ParseResult<Ast> {
    let lexed = lex_regex(input).map_err(ParseError::from)?;
    let (start, end) = lexed.contents_bounds();
    let syntax = if lexed.delimiter.is_experimental() {
        SyntaxOptions::experimental()
    } else {
        SyntaxOptions::traditional()
    };
    Parser::new(Source::with_bounds(input, start, end), syntax).parse_complete()
}

/// Mutable state threaded through the parse.
#[derive(Debug, Clone)]
pub(crate) struct ParsingContext {
    /// The dialect flags, fixed for the whole parse.
    pub(crate) syntax: SyntaxOptions,
    /// Whether runs of whitespace currently lex as trivia. Starts from the
    /// syntax flags and is toggled by `x`/`xx` matching options in scope.
    pub(crate) ignore_whitespace: bool,
    /// Capturing groups opened to the left of the current position.
    pub(crate) prior_group_count: u32,
    /// How many custom character classes enclose the current position.
    pub(crate) custom_char_class_depth: u32,
    /// Current recursion depth, bounded by [`MAX_NESTING_DEPTH`].
    nesting_depth: u32,
}

/// The regex parser: a source cursor plus [`ParsingContext`].
///
/// The lexical routines live in [`lexer`](super::lexer) as further `impl`
/// blocks on this type; the custom-character-class sub-parser in
/// [`char_class`].
#[derive(Debug)]
pub(crate) struct Parser<'src> {
    pub(crate) source: Source<'src>,
    pub(crate) context: ParsingContext,
}

/// What `(` introduced: a group kind, or a group-like reference that is
/// emitted as an atom rather than a group.
#[derive(Debug)]
pub(crate) enum GroupIntroducer {
    /// A real group; the introducer (up to and including any `:`) has been
    /// consumed.
    Kind(Located<GroupKind>),
    /// `(?R)`, `(?P=name)`, etc.; the whole construct including `)` has
    /// been consumed.
    Reference(Atom),
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: Source<'src>, syntax: SyntaxOptions) -> Self {
        Self {
            source,
            context: ParsingContext {
                syntax,
                ignore_whitespace: syntax.ignores_whitespace(),
                prior_group_count: 0,
                custom_char_class_depth: 0,
                nesting_depth: 0,
            },
        }
    }

    /// Parses the whole pattern, requiring the cursor to be exhausted.
    pub(crate) fn parse_complete(mut self) -> ParseResult<Ast> {
        let ast = self.parse_node()?;
        if self.source.is_at_end() {
            debug_assert_eq!(self.context.custom_char_class_depth, 0);
            Ok(ast)
        } else {
            // parse_node only stops early on ')'.
            let at = self.source.current_position();
            Err(ParseError::misc(
                "unmatched closing parenthesis",
                self.source.span_from(at).merge((at..at + 1).into()),
            ))
        }
    }

    /// Speculative lexing at the parser level: restores the cursor on
    /// `Ok(None)`, commits on `Ok(Some)`, propagates errors without
    /// restoring.
    pub(crate) fn try_lexing<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<Option<T>>,
    ) -> ParseResult<Option<T>> {
        let checkpoint = self.source.checkpoint();
        let result = f(self)?;
        if result.is_none() {
            self.source.rewind(checkpoint);
        }
        Ok(result)
    }

    fn enter_nesting(&mut self) -> ParseResult<()> {
        if self.context.nesting_depth >= MAX_NESTING_DEPTH {
            let at = self.source.current_position();
            return Err(ParseError::misc(
                "pattern is too deeply nested",
                self.source.span_from(at),
            ));
        }
        self.context.nesting_depth += 1;
        Ok(())
    }

    const fn leave_nesting(&mut self) {
        self.context.nesting_depth -= 1;
    }

    // ── Alternation ──────────────────────────────────────────────────────

    /// Parses an alternation (the top-level nonterminal).
    pub(crate) fn parse_node(&mut self) -> ParseResult<Ast> {
        self.enter_nesting()?;
        // 32 KiB red zone, 256 KiB new segment; the nesting-depth guard
        // caps recursion, so few segments are ever needed.
        let result = stacker::maybe_grow(32 * 1024, 256 * 1024, || self.parse_alternation());
        self.leave_nesting();
        result
    }

    fn parse_alternation(&mut self) -> ParseResult<Ast> {
        let start = self.source.current_position();
        let mut children = Vec::new();
        let mut pipes = Vec::new();

        children.push(self.parse_concatenation()?);
        loop {
            let pipe_start = self.source.current_position();
            if !self.source.try_eat('|') {
                break;
            }
            pipes.push(self.source.span_from(pipe_start));
            children.push(self.parse_concatenation()?);
        }

        if children.len() == 1 {
            return Ok(children.swap_remove(0));
        }
        Ok(Ast::Alternation(Alternation {
            children,
            pipes,
            span: self.source.span_from(start),
        }))
    }

    // ── Concatenation ────────────────────────────────────────────────────

    fn parse_concatenation(&mut self) -> ParseResult<Ast> {
        let start = self.source.current_position();
        let mut children: Vec<Ast> = Vec::new();

        loop {
            match self.source.peek() {
                None | Some('|' | ')') => break,
                _ => {}
            }

            // Quotes and comments are lexed before atoms because they are
            // not quantifiable.
            if let Some(trivia) = self.lex_trivia()? {
                children.push(Ast::Trivia(trivia));
                continue;
            }
            if let Some(quote) = self.lex_quote()? {
                children.push(Ast::Quote(quote));
                continue;
            }
            if let Some((amount, _)) = self.lex_quantifier()? {
                return Err(ParseError::new(
                    ParseErrorKind::QuantifierWithoutOperand,
                    amount.span,
                ));
            }

            let atom = self.parse_primary()?;
            children.push(self.parse_quantifier_suffix(atom)?);
        }

        let span = self.source.span_from(start);
        match children.len() {
            0 => Ok(Ast::Empty(span)),
            1 => Ok(children.swap_remove(0)),
            _ => Ok(Ast::Concatenation(Concatenation { children, span })),
        }
    }

    /// Applies a quantifier to `atom` when one follows.
    ///
    /// Under ignore-whitespace, spaces between the atom and its quantifier
    /// are absorbed into the quantification.
    fn parse_quantifier_suffix(&mut self, atom: Ast) -> ParseResult<Ast> {
        let quantifier = self.try_lexing(|p| {
            if p.context.ignore_whitespace {
                let _ = p.source.eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
            }
            p.lex_quantifier()
        })?;
        let Some((amount, kind)) = quantifier else {
            return Ok(atom);
        };
        let span = atom.span().merge(amount.span).merge(kind.span);
        Ok(Ast::Quantification(Quantification {
            amount,
            kind,
            child: Box::new(atom),
            span,
        }))
    }

    // ── Atoms and groups ─────────────────────────────────────────────────

    /// Parses one group, custom character class, or atom. The caller has
    /// already ruled out end-of-branch characters and non-quantifiable
    /// constructs.
    fn parse_primary(&mut self) -> ParseResult<Ast> {
        let start = self.source.current_position();
        match self.source.peek() {
            Some('(') => self.parse_group(),
            Some('[') => self
                .parse_custom_character_class()
                .map(Ast::CustomCharacterClass),
            Some('\\') => self.lex_escaped_atom(false).map(Ast::Atom),
            Some('.') => {
                let _ = self.source.try_eat('.');
                Ok(self.atom_from(AtomKind::AnyCharacter, start))
            }
            Some('^') => {
                let _ = self.source.try_eat('^');
                Ok(self.atom_from(AtomKind::StartOfLine, start))
            }
            Some('$') => {
                let _ = self.source.try_eat('$');
                Ok(self.atom_from(AtomKind::EndOfLine, start))
            }
            // Includes a stray ']' (a literal outside any class) and a '{'
            // that did not lex as a range quantifier.
            Some(_) => {
                let c = self.source.eat()?;
                Ok(self.atom_from(AtomKind::Char(c), start))
            }
            None => Err(ParseError::unexpected_end(start)),
        }
    }

    fn atom_from(&self, kind: AtomKind, start: u32) -> Ast {
        Ast::Atom(Atom {
            kind,
            span: self.source.span_from(start),
        })
    }

    fn parse_group(&mut self) -> ParseResult<Ast> {
        let start = self.source.current_position();
        match self.lex_group_start()? {
            GroupIntroducer::Reference(atom) => Ok(Ast::Atom(atom)),
            GroupIntroducer::Kind(kind) => {
                if kind.value.is_capturing() {
                    self.context.prior_group_count += 1;
                }
                match &kind.value {
                    GroupKind::ChangeMatchingOptions {
                        options,
                        isolated: true,
                    } => {
                        // The group's scope is the remainder of the current
                        // alternation branch.
                        let saved = self.context.ignore_whitespace;
                        self.context.ignore_whitespace = self.whitespace_mode_after(options);
                        let child = self.parse_concatenation();
                        self.context.ignore_whitespace = saved;
                        let child = child?;
                        let span = self.source.span_from(start);
                        Ok(Ast::Group(Group {
                            kind,
                            child: Box::new(child),
                            span,
                        }))
                    }
                    _ => {
                        let saved = self.context.ignore_whitespace;
                        if let GroupKind::ChangeMatchingOptions { options, .. } = &kind.value {
                            self.context.ignore_whitespace = self.whitespace_mode_after(options);
                        }
                        let child = self.parse_node().and_then(|child| {
                            self.source.expect(')')?;
                            Ok(child)
                        });
                        self.context.ignore_whitespace = saved;
                        let child = child?;
                        let span = self.source.span_from(start);
                        Ok(Ast::Group(Group {
                            kind,
                            child: Box::new(child),
                            span,
                        }))
                    }
                }
            }
        }
    }

    /// The whitespace mode in effect after applying `options` to the
    /// current one.
    fn whitespace_mode_after(&self, options: &MatchingOptionSequence) -> bool {
        let mut ignore = self.context.ignore_whitespace;
        if options.caret.is_some() {
            ignore = false;
        }
        for option in &options.adding {
            if option.value.is_extended_syntax() {
                ignore = true;
            }
        }
        for option in &options.removing {
            if option.value.is_extended_syntax() {
                ignore = false;
            }
        }
        ignore
    }
}
