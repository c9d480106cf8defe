// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Dialect feature flags.
//!
//! [`SyntaxOptions`] selects which extended syntaxes the parser recognizes.
//! The flags are orthogonal and threaded through the parser state by value;
//! there are no globals. The default (`traditional`) has every extension
//! off, matching PCRE-family expectations.

use bitflags::bitflags;

bitflags! {
    /// Orthogonal dialect flags for the parser.
    ///
    /// # Examples
    ///
    /// ```
    /// use relex_core::SyntaxOptions;
    ///
    /// let traditional = SyntaxOptions::default();
    /// assert!(!traditional.contains(SyntaxOptions::EXPERIMENTAL_RANGES));
    ///
    /// let experimental = SyntaxOptions::experimental();
    /// assert!(experimental.contains(SyntaxOptions::EXPERIMENTAL_QUOTES));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SyntaxOptions: u8 {
        /// Enables `"…"` quoting (with `\"` escapes).
        const EXPERIMENTAL_QUOTES = 1 << 0;
        /// Enables `/* … */` comments.
        const EXPERIMENTAL_COMMENTS = 1 << 1;
        /// Enables `n...m` / `n..<m` quantifier ranges.
        const EXPERIMENTAL_RANGES = 1 << 2;
        /// Enables the `(_: …)` non-capture shorthand.
        const EXPERIMENTAL_CAPTURES = 1 << 3;
        /// Collapses runs of spaces into trivia.
        const NON_SEMANTIC_WHITESPACE = 1 << 4;
    }
}

impl SyntaxOptions {
    /// The default dialect: all extensions off.
    #[must_use]
    pub const fn traditional() -> Self {
        Self::empty()
    }

    /// All experimental extensions on, including non-semantic whitespace.
    ///
    /// This is the dialect implied by the experimental regex-literal
    /// delimiters (`'/…/'`, `'|…|'`).
    #[must_use]
    pub const fn experimental() -> Self {
        Self::all()
    }

    /// True when runs of spaces should be lexed as trivia.
    #[must_use]
    pub const fn ignores_whitespace(self) -> bool {
        self.contains(Self::NON_SEMANTIC_WHITESPACE)
    }
}
