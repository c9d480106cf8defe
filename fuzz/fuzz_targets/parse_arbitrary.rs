// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for parser crash safety testing.
//!
//! This target feeds arbitrary byte sequences to the parser and asserts
//! that it never panics. The parser must handle all input gracefully,
//! producing either a valid AST or a structured error.
//!
//! Invalid UTF-8 bytes are converted via lossy conversion (U+FFFD
//! replacement) so the lexer and parser still get exercised with unusual
//! character sequences.
//!
//! # Success Criteria
//!
//! - No panic on any input (including replacement characters)
//! - On success, every span lies within the input and the capture
//!   structure round-trips through its binary serialization
//! - On failure, the error span lies within the input

#![no_main]

use libfuzzer_sys::fuzz_target;
use relex_core::capture::CaptureStructure;
use relex_core::{SyntaxOptions, parse};

fuzz_target!(|data: &[u8]| {
    // The first byte selects the dialect flags; the rest is the pattern.
    let Some((&flags, pattern)) = data.split_first() else {
        return;
    };
    let pattern = String::from_utf8_lossy(pattern);
    let syntax = SyntaxOptions::from_bits_truncate(flags);

    match parse(&pattern, syntax) {
        Ok(ast) => {
            assert!(ast.span().end() as usize <= pattern.len());
            let structure = CaptureStructure::from_ast(&ast);
            let mut buffer = vec![0u8; structure.serialization_buffer_size()];
            let written = structure.encode_into(&mut buffer).unwrap();
            assert_eq!(written, buffer.len());
            assert_eq!(CaptureStructure::decode(&buffer).unwrap(), structure);
        }
        Err(err) => {
            assert!(err.span.end() as usize <= pattern.len());
        }
    }
});
