// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the source cursor and the lightweight token
//! lexer.
//!
//! Invariants:
//!
//! 1. **Tokenization never panics** and produces one token per character
//! 2. **Token spans tile the input** — contiguous, in order, covering
//!    `[0, len)` exactly
//! 3. **Checkpoint restore is exact** — a failed speculation leaves the
//!    cursor untouched
//! 4. **`eat_while` + `eat` consume the whole input** byte-for-byte

use proptest::prelude::*;

use super::source::Source;
use super::token::tokenize;

proptest! {
    #[test]
    fn tokenize_is_total_and_one_token_per_char(input in ".*") {
        let tokens = tokenize(&input);
        prop_assert_eq!(tokens.len(), input.chars().count());
    }

    #[test]
    fn token_spans_tile_the_input(input in ".*") {
        let tokens = tokenize(&input);
        let mut position = 0u32;
        for token in &tokens {
            prop_assert_eq!(token.span.start(), position);
            prop_assert!(token.span.len() > 0);
            position = token.span.end();
        }
        prop_assert_eq!(position as usize, input.len());
    }

    #[test]
    fn checkpoint_restores_exactly(input in ".+", eaten in 0usize..8) {
        let mut source = Source::new(&input);
        for _ in 0..eaten {
            let _ = source.eat();
        }
        let before = source.current_position();
        let checkpoint = source.checkpoint();
        let _ = source.eat_while(|c| c != 'Q');
        source.rewind(checkpoint);
        prop_assert_eq!(source.current_position(), before);
        prop_assert_eq!(source.remaining(), &input[before as usize..]);
    }

    #[test]
    fn try_eating_none_is_a_no_op(input in ".*") {
        let mut source = Source::new(&input);
        let result: Option<()> = source
            .try_eating(|src| {
                let _ = src.eat_while(|_| true);
                Ok(None)
            })
            .unwrap();
        prop_assert!(result.is_none());
        prop_assert_eq!(source.current_position(), 0);
    }

    #[test]
    fn eating_consumes_every_byte(input in ".*") {
        let mut source = Source::new(&input);
        let mut collected = String::new();
        while let Some(c) = source.peek() {
            let eaten = source.eat().unwrap();
            prop_assert_eq!(eaten, c);
            collected.push(eaten);
        }
        prop_assert!(source.is_at_end());
        prop_assert_eq!(collected, input);
    }
}
