// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for regex patterns.
//!
//! The AST is the contract between the front end and downstream
//! compilers/executors. Every node carries a [`Span`] into the pattern text;
//! composite nodes span from their first child's start to their last child's
//! end.
//!
//! # Design Philosophy
//!
//! - **All nodes have spans** — required for diagnostics that point at the
//!   offending pattern text.
//! - **Tree, not graph** — nodes own their children exclusively; there is no
//!   sharing and no back-edges, so plain `Box`/`Vec` ownership suffices.
//! - **Immutable after parse** — the parser is the only producer; nothing
//!   mutates an AST after construction.
//! - **Rich enough for round-trip** — trivia (comments, ignored whitespace)
//!   and unrecognized property names are preserved verbatim.
//!
//! # Example
//!
//! ```
//! use relex_core::{parse, SyntaxOptions};
//! use relex_core::ast::Ast;
//!
//! let ast = parse("a|b", SyntaxOptions::traditional()).unwrap();
//! let Ast::Alternation(alt) = ast else { panic!() };
//! assert_eq!(alt.children.len(), 2);
//! assert_eq!(alt.pipes.len(), 1);
//! ```

use ecow::EcoString;

use crate::source_analysis::{Located, Span};
use crate::unicode::PropertyKind;

/// A node in the regex AST.
///
/// The variants mirror the grammar: alternation over concatenation over
/// quantification over atoms, with groups and custom character classes
/// recursing back into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Two or more branches separated by `|`.
    Alternation(Alternation),
    /// An ordered sequence of nodes.
    Concatenation(Concatenation),
    /// A grouped subpattern, `(...)` and friends.
    Group(Group),
    /// A quantified node, e.g. `a+` or `(ab){2,4}?`.
    Quantification(Quantification),
    /// A `\Q...\E` (or experimental `"..."`) literal run.
    Quote(Quote),
    /// A comment or a run of ignored whitespace.
    Trivia(Trivia),
    /// A single matchable unit.
    Atom(Atom),
    /// A bracketed character class.
    CustomCharacterClass(CustomCharacterClass),
    /// An explicitly empty node (empty alternation branch).
    Empty(Span),
}

impl Ast {
    /// The source range this node covers.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Alternation(alt) => alt.span,
            Self::Concatenation(concat) => concat.span,
            Self::Group(group) => group.span,
            Self::Quantification(quant) => quant.span,
            Self::Quote(quote) => quote.span,
            Self::Trivia(trivia) => trivia.span,
            Self::Atom(atom) => atom.span,
            Self::CustomCharacterClass(class) => class.span,
            Self::Empty(span) => *span,
        }
    }

    /// The direct AST children of this node.
    ///
    /// Custom character class members are not AST nodes and are not
    /// included; see [`CustomCharacterClass::members`].
    #[must_use]
    pub fn children(&self) -> Vec<&Ast> {
        match self {
            Self::Alternation(alt) => alt.children.iter().collect(),
            Self::Concatenation(concat) => concat.children.iter().collect(),
            Self::Group(group) => vec![&group.child],
            Self::Quantification(quant) => vec![&quant.child],
            Self::Quote(_)
            | Self::Trivia(_)
            | Self::Atom(_)
            | Self::CustomCharacterClass(_)
            | Self::Empty(_) => Vec::new(),
        }
    }

    /// True if this subtree contains a capturing group.
    #[must_use]
    pub fn has_capture(&self) -> bool {
        if let Self::Group(group) = self {
            if group.kind.value.is_capturing() {
                return true;
            }
        }
        self.children().iter().any(|child| child.has_capture())
    }

    /// True for comment/whitespace nodes.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Trivia(_))
    }

    /// Renders the node in the stable dump format used by tests and
    /// diagnostics.
    #[must_use]
    pub fn dump(&self) -> String {
        match self {
            Self::Alternation(alt) => {
                let branches: Vec<String> = alt.children.iter().map(Ast::dump).collect();
                format!("alternation({})", branches.join(", "))
            }
            Self::Concatenation(concat) => {
                let children: Vec<String> = concat.children.iter().map(Ast::dump).collect();
                format!("concatenation({})", children.join(", "))
            }
            Self::Group(group) => {
                format!("group({}, {})", group.kind.value.dump(), group.child.dump())
            }
            Self::Quantification(quant) => format!(
                "quantification({}, {}, {})",
                quant.amount.value.dump(),
                quant.kind.value.dump(),
                quant.child.dump()
            ),
            Self::Quote(quote) => format!("quote({:?})", quote.literal.as_str()),
            Self::Trivia(trivia) => match trivia.kind {
                TriviaKind::Comment => format!("comment({:?})", trivia.text.as_str()),
                TriviaKind::Whitespace => "whitespace".to_string(),
            },
            Self::Atom(atom) => atom.kind.dump(),
            Self::CustomCharacterClass(class) => class.dump(),
            Self::Empty(_) => "empty".to_string(),
        }
    }
}

/// Two or more alternation branches with the locations of the separating
/// pipes.
///
/// Invariant: `pipes.len() == children.len() - 1` and `children.len() >= 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternation {
    /// The branches, in source order.
    pub children: Vec<Ast>,
    /// The location of each `|`.
    pub pipes: Vec<Span>,
    /// The full source range.
    pub span: Span,
}

/// An ordered sequence of nodes with an explicit span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concatenation {
    /// The children, in source order.
    pub children: Vec<Ast>,
    /// The full source range.
    pub span: Span,
}

/// A grouped subpattern: a kind tag and a single child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// What sort of group this is, spanning the introducer (e.g. `(?<name>`).
    pub kind: Located<GroupKind>,
    /// The grouped subpattern.
    pub child: Box<Ast>,
    /// The full source range, including the parentheses (for isolated
    /// option groups, extending over the implicit scope).
    pub span: Span,
}

/// The kind of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// `(...)` — a numbered capture.
    Capture,
    /// `(?<name>...)`, `(?P<name>...)`, `(?'name'...)` — a named capture.
    NamedCapture(Located<EcoString>),
    /// `(?:...)`.
    NonCapture,
    /// `(?|...)` — capture numbers reset across branches.
    NonCaptureReset,
    /// `(?>...)` — atomic (no backtracking into the group).
    Atomic,
    /// `(?=...)`.
    Lookahead,
    /// `(?!...)`.
    NegativeLookahead,
    /// `(?*...)`.
    NonAtomicLookahead,
    /// `(?<=...)`.
    Lookbehind,
    /// `(?<!...)`.
    NegativeLookbehind,
    /// `(?<*...)`.
    NonAtomicLookbehind,
    /// `(*sr:...)`.
    ScriptRun,
    /// `(*asr:...)`.
    AtomicScriptRun,
    /// `(?i-s:...)` or isolated `(?i)`.
    ChangeMatchingOptions {
        /// The option sequence between `(?` and `:`/`)`.
        options: MatchingOptionSequence,
        /// True for `(?i)`-style groups whose scope is the remainder of
        /// the enclosing alternation branch.
        isolated: bool,
    },
}

impl GroupKind {
    /// True for groups that contribute a capture slot.
    #[must_use]
    pub const fn is_capturing(&self) -> bool {
        matches!(self, Self::Capture | Self::NamedCapture(_))
    }

    /// The capture name, for named captures.
    #[must_use]
    pub fn name(&self) -> Option<&EcoString> {
        match self {
            Self::NamedCapture(name) => Some(&name.value),
            _ => None,
        }
    }

    fn dump(&self) -> String {
        match self {
            Self::Capture => "capture".into(),
            Self::NamedCapture(name) => format!("named_capture({})", name.value),
            Self::NonCapture => "non_capture".into(),
            Self::NonCaptureReset => "non_capture_reset".into(),
            Self::Atomic => "atomic".into(),
            Self::Lookahead => "lookahead".into(),
            Self::NegativeLookahead => "negative_lookahead".into(),
            Self::NonAtomicLookahead => "non_atomic_lookahead".into(),
            Self::Lookbehind => "lookbehind".into(),
            Self::NegativeLookbehind => "negative_lookbehind".into(),
            Self::NonAtomicLookbehind => "non_atomic_lookbehind".into(),
            Self::ScriptRun => "script_run".into(),
            Self::AtomicScriptRun => "atomic_script_run".into(),
            Self::ChangeMatchingOptions { options, isolated } => {
                format!(
                    "change_matching_options({}{})",
                    options.dump(),
                    if *isolated { ", isolated" } else { "" }
                )
            }
        }
    }
}

/// A single matching option, as written in a `(?...)` specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchingOption {
    /// `i`
    CaseInsensitive,
    /// `J`
    AllowDuplicateGroupNames,
    /// `m`
    Multiline,
    /// `n`
    NamedCapturesOnly,
    /// `s`
    SingleLine,
    /// `U`
    ReluctantByDefault,
    /// `x`
    Extended,
    /// `xx`
    ExtraExtended,
    /// `w`
    UnicodeWordBoundaries,
    /// `D`
    AsciiOnlyDigit,
    /// `P`
    AsciiOnlyPosixProps,
    /// `S`
    AsciiOnlySpace,
    /// `W`
    AsciiOnlyWord,
    /// `y{g}`
    TextSegmentGraphemeMode,
    /// `y{w}`
    TextSegmentWordMode,
}

impl MatchingOption {
    /// True for the `y{...}` text-segment mode selectors, which cannot be
    /// removed.
    #[must_use]
    pub const fn is_text_segment_mode(self) -> bool {
        matches!(
            self,
            Self::TextSegmentGraphemeMode | Self::TextSegmentWordMode
        )
    }

    /// True for `x` and `xx`, which control whitespace handling during the
    /// parse itself.
    #[must_use]
    pub const fn is_extended_syntax(self) -> bool {
        matches!(self, Self::Extended | Self::ExtraExtended)
    }

    fn dump(self) -> &'static str {
        match self {
            Self::CaseInsensitive => "i",
            Self::AllowDuplicateGroupNames => "J",
            Self::Multiline => "m",
            Self::NamedCapturesOnly => "n",
            Self::SingleLine => "s",
            Self::ReluctantByDefault => "U",
            Self::Extended => "x",
            Self::ExtraExtended => "xx",
            Self::UnicodeWordBoundaries => "w",
            Self::AsciiOnlyDigit => "D",
            Self::AsciiOnlyPosixProps => "P",
            Self::AsciiOnlySpace => "S",
            Self::AsciiOnlyWord => "W",
            Self::TextSegmentGraphemeMode => "y{g}",
            Self::TextSegmentWordMode => "y{w}",
        }
    }
}

/// A matching-option sequence: `[^] adding* (- removing*)?`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchingOptionSequence {
    /// The location of a leading `^` (unset everything first), if present.
    pub caret: Option<Span>,
    /// Options being turned on.
    pub adding: Vec<Located<MatchingOption>>,
    /// The location of the `-` introducing the removal list, if present.
    pub minus: Option<Span>,
    /// Options being turned off.
    pub removing: Vec<Located<MatchingOption>>,
}

impl MatchingOptionSequence {
    fn dump(&self) -> String {
        let mut out = String::new();
        if self.caret.is_some() {
            out.push('^');
        }
        for opt in &self.adding {
            out.push_str(opt.value.dump());
        }
        if self.minus.is_some() || !self.removing.is_empty() {
            out.push('-');
        }
        for opt in &self.removing {
            out.push_str(opt.value.dump());
        }
        out
    }
}

/// A quantified node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantification {
    /// How many repetitions, spanning the quantifier text.
    pub amount: Located<QuantAmount>,
    /// Eager, reluctant, or possessive; an empty span when no suffix was
    /// written.
    pub kind: Located<QuantKind>,
    /// The quantified atom.
    pub child: Box<Ast>,
    /// The full source range (child plus quantifier).
    pub span: Span,
}

/// The repetition amount of a quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantAmount {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
    /// `{n}`
    Exactly(u32),
    /// `{n,}`
    NOrMore(u32),
    /// `{,m}`
    UpToN(u32),
    /// `{n,m}`
    Range(u32, u32),
}

impl QuantAmount {
    fn dump(self) -> String {
        match self {
            Self::ZeroOrMore => "zero_or_more".into(),
            Self::OneOrMore => "one_or_more".into(),
            Self::ZeroOrOne => "zero_or_one".into(),
            Self::Exactly(n) => format!("exactly({n})"),
            Self::NOrMore(n) => format!("{n}_or_more"),
            Self::UpToN(m) => format!("up_to({m})"),
            Self::Range(n, m) => format!("range({n}, {m})"),
        }
    }
}

/// The backtracking behavior of a quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuantKind {
    /// No suffix.
    #[default]
    Eager,
    /// `?` suffix.
    Reluctant,
    /// `+` suffix.
    Possessive,
}

impl QuantKind {
    const fn dump(self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Reluctant => "reluctant",
            Self::Possessive => "possessive",
        }
    }
}

/// A literal run whose contents are regex-escape-neutral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// The quoted text, without the delimiters.
    pub literal: EcoString,
    /// The full source range, including delimiters.
    pub span: Span,
}

/// A comment or a run of ignored whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    /// Comment or whitespace.
    pub kind: TriviaKind,
    /// The text, without comment delimiters.
    pub text: EcoString,
    /// The full source range.
    pub span: Span,
}

/// The kind of trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    /// `(?#...)` or experimental `/* ... */`.
    Comment,
    /// Spaces consumed under ignore-whitespace.
    Whitespace,
}

/// A single matchable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// What the atom matches.
    pub kind: AtomKind,
    /// The full source range.
    pub span: Span,
}

/// The kind of an atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomKind {
    /// A literal character.
    Char(char),
    /// A scalar written as an escape (`\u{41}`, `\x41`, `\101`, ...).
    Scalar(char),
    /// `.`
    AnyCharacter,
    /// `^`
    StartOfLine,
    /// `$`
    EndOfLine,
    /// `\d`, `\W`, `\b`, and the rest of the backslash-letter builtins.
    EscapedBuiltin(EscapedBuiltin),
    /// `\N{NAME}` — a character named by the UCD.
    NamedCharacter(EcoString),
    /// `\p{...}` / `\P{...}` / `[:name:]`.
    CharacterProperty(CharacterProperty),
    /// `\1`, `\k<name>`, `(?P=name)`, ...
    Backreference(Reference),
    /// `(?R)`, `(?&name)`, `\g<name>`, ... — a subpattern invocation.
    Subpattern(Reference),
    /// `\cX` / `\C-X`.
    KeyboardControl(char),
    /// `\M-X`.
    KeyboardMeta(char),
    /// `\M-\C-X`.
    KeyboardMetaControl(char),
}

impl AtomKind {
    fn dump(&self) -> String {
        match self {
            Self::Char(c) => format!("char({c:?})"),
            Self::Scalar(c) => format!("scalar(U+{:04X})", u32::from(*c)),
            Self::AnyCharacter => "any".into(),
            Self::StartOfLine => "start_of_line".into(),
            Self::EndOfLine => "end_of_line".into(),
            Self::EscapedBuiltin(builtin) => format!("builtin(\\{})", builtin.letter()),
            Self::NamedCharacter(name) => format!("named_char({name})"),
            Self::CharacterProperty(property) => property.dump(),
            Self::Backreference(reference) => format!("backreference({})", reference.kind.dump()),
            Self::Subpattern(reference) => format!("subpattern({})", reference.kind.dump()),
            Self::KeyboardControl(c) => format!("control({c})"),
            Self::KeyboardMeta(c) => format!("meta({c})"),
            Self::KeyboardMetaControl(c) => format!("meta_control({c})"),
        }
    }

    /// The scalar this atom stands for, when it is a known single
    /// character.
    ///
    /// Literal chars, scalar escapes, and the single-character escaped
    /// builtins (`\n`, `\t`, ...) all have one; character classes and
    /// assertions do not.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) | Self::Scalar(c) => Some(*c),
            Self::EscapedBuiltin(builtin) => builtin.as_char(),
            _ => None,
        }
    }
}

/// A backslash-letter builtin escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapedBuiltin {
    /// `\a` — U+0007.
    Alarm,
    /// `\e` — U+001B.
    Escape,
    /// `\f` — U+000C.
    FormFeed,
    /// `\n`.
    Newline,
    /// `\r`.
    CarriageReturn,
    /// `\t`.
    Tab,
    /// `\b` inside a custom character class — U+0008.
    Backspace,
    /// `\C` — a single data unit.
    SingleDataUnit,
    /// `\d`.
    DecimalDigit,
    /// `\D`.
    NotDecimalDigit,
    /// `\h`.
    HorizontalWhitespace,
    /// `\H`.
    NotHorizontalWhitespace,
    /// Bare `\N` (no brace) — any character but newline.
    NotNewline,
    /// `\R`.
    NewlineSequence,
    /// `\s`.
    Whitespace,
    /// `\S`.
    NotWhitespace,
    /// `\v`.
    VerticalTab,
    /// `\V`.
    NotVerticalTab,
    /// `\w`.
    WordCharacter,
    /// `\W`.
    NotWordCharacter,
    /// `\X`.
    GraphemeCluster,
    /// `\b` outside a custom character class.
    WordBoundary,
    /// `\B`.
    NotWordBoundary,
    /// `\A`.
    StartOfSubject,
    /// `\Z`.
    EndOfSubjectBeforeNewline,
    /// `\z`.
    EndOfSubject,
    /// `\G`.
    FirstMatchingPositionOfSubject,
    /// `\K`.
    ResetStartOfMatch,
    /// `\O`.
    TrueAnychar,
    /// `\y`.
    TextSegment,
    /// `\Y`.
    NotTextSegment,
}

impl EscapedBuiltin {
    /// Looks up the builtin for an escaped letter. `\b` and `\N` resolve
    /// differently inside a custom character class.
    #[must_use]
    pub fn from_letter(letter: char, in_custom_char_class: bool) -> Option<Self> {
        Some(match letter {
            'a' => Self::Alarm,
            'e' => Self::Escape,
            'f' => Self::FormFeed,
            'n' => Self::Newline,
            'r' => Self::CarriageReturn,
            't' => Self::Tab,
            'b' if in_custom_char_class => Self::Backspace,
            'b' => Self::WordBoundary,
            'C' => Self::SingleDataUnit,
            'd' => Self::DecimalDigit,
            'D' => Self::NotDecimalDigit,
            'h' => Self::HorizontalWhitespace,
            'H' => Self::NotHorizontalWhitespace,
            'N' if !in_custom_char_class => Self::NotNewline,
            'R' => Self::NewlineSequence,
            's' => Self::Whitespace,
            'S' => Self::NotWhitespace,
            'v' => Self::VerticalTab,
            'V' => Self::NotVerticalTab,
            'w' => Self::WordCharacter,
            'W' => Self::NotWordCharacter,
            'X' => Self::GraphemeCluster,
            'B' => Self::NotWordBoundary,
            'A' => Self::StartOfSubject,
            'Z' => Self::EndOfSubjectBeforeNewline,
            'z' => Self::EndOfSubject,
            'G' => Self::FirstMatchingPositionOfSubject,
            'K' => Self::ResetStartOfMatch,
            'O' => Self::TrueAnychar,
            'y' => Self::TextSegment,
            'Y' => Self::NotTextSegment,
            _ => return None,
        })
    }

    /// The letter as written after the backslash.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Alarm => 'a',
            Self::Escape => 'e',
            Self::FormFeed => 'f',
            Self::Newline => 'n',
            Self::CarriageReturn => 'r',
            Self::Tab => 't',
            Self::Backspace | Self::WordBoundary => 'b',
            Self::SingleDataUnit => 'C',
            Self::DecimalDigit => 'd',
            Self::NotDecimalDigit => 'D',
            Self::HorizontalWhitespace => 'h',
            Self::NotHorizontalWhitespace => 'H',
            Self::NotNewline => 'N',
            Self::NewlineSequence => 'R',
            Self::Whitespace => 's',
            Self::NotWhitespace => 'S',
            Self::VerticalTab => 'v',
            Self::NotVerticalTab => 'V',
            Self::WordCharacter => 'w',
            Self::NotWordCharacter => 'W',
            Self::GraphemeCluster => 'X',
            Self::NotWordBoundary => 'B',
            Self::StartOfSubject => 'A',
            Self::EndOfSubjectBeforeNewline => 'Z',
            Self::EndOfSubject => 'z',
            Self::FirstMatchingPositionOfSubject => 'G',
            Self::ResetStartOfMatch => 'K',
            Self::TrueAnychar => 'O',
            Self::TextSegment => 'y',
            Self::NotTextSegment => 'Y',
        }
    }

    /// The single character this escape denotes, for the plain character
    /// escapes.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Alarm => Some('\u{7}'),
            Self::Escape => Some('\u{1B}'),
            Self::FormFeed => Some('\u{C}'),
            Self::Newline => Some('\n'),
            Self::CarriageReturn => Some('\r'),
            Self::Tab => Some('\t'),
            Self::Backspace => Some('\u{8}'),
            _ => None,
        }
    }
}

/// A character-property predicate, `\p{...}` / `\P{...}` / `[:name:]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterProperty {
    /// The classified predicate.
    pub kind: PropertyKind,
    /// True for `\P{...}` and `[:^name:]`.
    pub inverted: bool,
    /// True when written in the POSIX `[:name:]` form.
    pub is_posix: bool,
}

impl CharacterProperty {
    fn dump(&self) -> String {
        let mut out = String::from(if self.inverted {
            "not_property("
        } else {
            "property("
        });
        match &self.kind {
            PropertyKind::Any => out.push_str("any"),
            PropertyKind::Assigned => out.push_str("assigned"),
            PropertyKind::GeneralCategory(category) => {
                out.push_str("gc=");
                out.push_str(category.abbreviation());
            }
            PropertyKind::Script(name) => {
                out.push_str("script=");
                out.push_str(name);
            }
            PropertyKind::ScriptExtension(name) => {
                out.push_str("scx=");
                out.push_str(name);
            }
            PropertyKind::Block(name) => {
                out.push_str("block=");
                out.push_str(name);
            }
            PropertyKind::Age(name) => {
                out.push_str("age=");
                out.push_str(name);
            }
            PropertyKind::Binary(name) => out.push_str(name),
            PropertyKind::Posix(class) => {
                out.push_str("posix=");
                out.push_str(class.name());
            }
            PropertyKind::Other { key, value } => {
                out.push_str("other=");
                if let Some(key) = key {
                    out.push_str(key);
                    out.push('=');
                }
                out.push_str(value);
            }
        }
        out.push(')');
        out
    }
}

/// A reference to another part of the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// How the target is identified.
    pub kind: ReferenceKind,
    /// The source range of the reference text.
    pub span: Span,
}

/// How a reference identifies its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `\3`, `(?4)` — the nth capturing group.
    Absolute(u32),
    /// `\g{-2}`, `(?+1)` — relative to the current group count.
    Relative(i32),
    /// `\k<name>`, `(?&name)`.
    Named(EcoString),
    /// `(?R)` — recurse the whole pattern.
    RecurseWholePattern,
}

impl ReferenceKind {
    fn dump(&self) -> String {
        match self {
            Self::Absolute(n) => format!("absolute {n}"),
            Self::Relative(n) => format!("relative {n:+}"),
            Self::Named(name) => format!("named {name}"),
            Self::RecurseWholePattern => "whole_pattern".into(),
        }
    }
}

/// A bracketed character class `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomCharacterClass {
    /// Whether the class is `[` or `[^`, spanning the opening text.
    pub start: Located<ClassStart>,
    /// The members, in source order. Set operations fold the surrounding
    /// member runs into themselves.
    pub members: Vec<ClassMember>,
    /// The full source range, including brackets.
    pub span: Span,
}

impl CustomCharacterClass {
    /// True for `[^...]`.
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        matches!(self.start.value, ClassStart::Inverted)
    }

    fn dump(&self) -> String {
        let members: Vec<String> = self.members.iter().map(ClassMember::dump).collect();
        format!(
            "{}[{}]",
            if self.is_inverted() { "inverted_class" } else { "class" },
            members.join(", ")
        )
    }
}

/// Whether a class is normal or inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassStart {
    /// `[`
    Normal,
    /// `[^`
    Inverted,
}

/// A member of a custom character class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    /// A single atom.
    Atom(Atom),
    /// A range `A-B`.
    Range(ClassRange),
    /// A nested class.
    Custom(CustomCharacterClass),
    /// A `\Q...\E` run.
    Quote(Quote),
    /// `lhs OP rhs` for `&&`, `--`, `~~`.
    SetOperation(SetOperation),
}

impl ClassMember {
    fn dump(&self) -> String {
        match self {
            Self::Atom(atom) => atom.kind.dump(),
            Self::Range(range) => format!(
                "range({}, {})",
                range.lhs.kind.dump(),
                range.rhs.kind.dump()
            ),
            Self::Custom(class) => class.dump(),
            Self::Quote(quote) => format!("quote({:?})", quote.literal.as_str()),
            Self::SetOperation(op) => op.dump(),
        }
    }
}

/// A character range inside a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRange {
    /// The low endpoint.
    pub lhs: Atom,
    /// The location of the `-`.
    pub dash: Span,
    /// The high endpoint.
    pub rhs: Atom,
}

impl ClassRange {
    /// The full source range of the member.
    #[must_use]
    pub fn span(&self) -> Span {
        self.lhs.span.merge(self.rhs.span)
    }
}

/// A set operation between two member runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOperation {
    /// Members to the left of the operator.
    pub lhs: Vec<ClassMember>,
    /// The operator with its location.
    pub op: Located<SetOp>,
    /// Members to the right of the operator.
    pub rhs: Vec<ClassMember>,
}

impl SetOperation {
    fn dump(&self) -> String {
        let lhs: Vec<String> = self.lhs.iter().map(ClassMember::dump).collect();
        let rhs: Vec<String> = self.rhs.iter().map(ClassMember::dump).collect();
        format!(
            "set_op([{}], {}, [{}])",
            lhs.join(", "),
            self.op.value.dump(),
            rhs.join(", ")
        )
    }
}

/// A class set operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOp {
    /// `&&`
    Intersection,
    /// `--`
    Subtraction,
    /// `~~`
    SymmetricDifference,
}

impl SetOp {
    const fn dump(self) -> &'static str {
        match self {
            Self::Intersection => "intersection",
            Self::Subtraction => "subtraction",
            Self::SymmetricDifference => "symmetric_difference",
        }
    }
}
