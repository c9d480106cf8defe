// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Capture structure: the shape of a pattern's capturing groups.
//!
//! Walking the AST left to right, every capturing group contributes a slot
//! (named or unnamed). Quantifiers reshape the slots of their subtree:
//! optional quantifiers (`?`, `{0,m}`) produce optionals, repeating
//! quantifiers (`*`, `+`, `{n,}`, counted repeats other than exactly-one)
//! produce arrays, and alternation branches make their captures optional.
//! Multiple top-level captures form a tuple in encounter order.
//!
//! A binary serialization is provided for embedding capture shapes in
//! compiled artifacts. Only round-trip fidelity is promised — the encoded
//! form is not a stable interchange format.

use ecow::EcoString;
use thiserror::Error;

use crate::ast::{Ast, QuantAmount};

/// The shape of the captures produced by a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureStructure {
    /// One capture slot, optionally named.
    Atom(Option<EcoString>),
    /// A capture that may be absent.
    Optional(Box<CaptureStructure>),
    /// A capture that repeats.
    Array(Box<CaptureStructure>),
    /// Multiple captures in encounter order. `Tuple(vec![])` is the shape
    /// of a pattern with no captures.
    Tuple(Vec<CaptureStructure>),
}

impl CaptureStructure {
    /// Computes the capture structure of a parsed pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use relex_core::{parse, SyntaxOptions};
    /// use relex_core::capture::CaptureStructure;
    ///
    /// let ast = parse("a(b)", SyntaxOptions::traditional()).unwrap();
    /// let shape = CaptureStructure::from_ast(&ast);
    /// assert_eq!(shape, CaptureStructure::Atom(None));
    /// ```
    #[must_use]
    pub fn from_ast(ast: &Ast) -> Self {
        let mut slots = Vec::new();
        collect(ast, &mut slots);
        if slots.len() == 1 {
            slots.swap_remove(0)
        } else {
            Self::Tuple(slots)
        }
    }

    /// True when the structure contains no capture slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Atom(_) => false,
            Self::Optional(inner) | Self::Array(inner) => inner.is_empty(),
            Self::Tuple(slots) => slots.iter().all(Self::is_empty),
        }
    }

    fn optional(self) -> Self {
        match self {
            already @ Self::Optional(_) => already,
            other => Self::Optional(Box::new(other)),
        }
    }
}

fn collect(ast: &Ast, out: &mut Vec<CaptureStructure>) {
    match ast {
        Ast::Alternation(alt) => {
            for child in &alt.children {
                let mut branch = Vec::new();
                collect(child, &mut branch);
                out.extend(branch.into_iter().map(CaptureStructure::optional));
            }
        }
        Ast::Concatenation(concat) => {
            for child in &concat.children {
                collect(child, out);
            }
        }
        Ast::Group(group) => {
            if group.kind.value.is_capturing() {
                out.push(CaptureStructure::Atom(group.kind.value.name().cloned()));
            }
            collect(&group.child, out);
        }
        Ast::Quantification(quant) => {
            let mut inner = Vec::new();
            collect(&quant.child, &mut inner);
            out.extend(
                inner
                    .into_iter()
                    .map(|slot| reshape_quantified(slot, quant.amount.value)),
            );
        }
        Ast::Quote(_)
        | Ast::Trivia(_)
        | Ast::Atom(_)
        | Ast::CustomCharacterClass(_)
        | Ast::Empty(_) => {}
    }
}

fn reshape_quantified(slot: CaptureStructure, amount: QuantAmount) -> CaptureStructure {
    match amount {
        QuantAmount::ZeroOrOne | QuantAmount::UpToN(_) | QuantAmount::Range(0, _) => {
            slot.optional()
        }
        QuantAmount::Exactly(1) | QuantAmount::Range(1, 1) => slot,
        QuantAmount::ZeroOrMore
        | QuantAmount::OneOrMore
        | QuantAmount::Exactly(_)
        | QuantAmount::NOrMore(_)
        | QuantAmount::Range(..) => CaptureStructure::Array(Box::new(slot)),
    }
}

// ── Binary serialization ─────────────────────────────────────────────────

/// Serialization format version, the first byte of every encoding.
const VERSION: u8 = 1;

mod code {
    pub(super) const ATOM: u8 = 1;
    pub(super) const NAMED_ATOM: u8 = 2;
    pub(super) const OPTIONAL: u8 = 3;
    pub(super) const ARRAY: u8 = 4;
    pub(super) const BEGIN_TUPLE: u8 = 5;
    pub(super) const END_TUPLE: u8 = 6;
}

/// An error from capture-structure serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaptureSerializationError {
    /// The output buffer cannot hold the encoding.
    #[error("buffer too small for capture structure")]
    BufferTooSmall,
    /// The input ended in the middle of a node.
    #[error("truncated capture structure")]
    Truncated,
    /// The version byte is not recognized.
    #[error("unsupported capture structure version {0}")]
    UnsupportedVersion(u8),
    /// An op code is not recognized.
    #[error("invalid capture structure op code {0}")]
    InvalidCode(u8),
    /// A capture name is not valid UTF-8.
    #[error("invalid capture name")]
    InvalidName,
}

impl CaptureStructure {
    /// The buffer size required to encode this structure, including the
    /// version byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use relex_core::{parse, SyntaxOptions};
    /// use relex_core::capture::CaptureStructure;
    ///
    /// let ast = parse("(a)?", SyntaxOptions::traditional()).unwrap();
    /// let shape = CaptureStructure::from_ast(&ast);
    /// let mut buffer = vec![0u8; shape.serialization_buffer_size()];
    /// shape.encode_into(&mut buffer).unwrap();
    /// ```
    #[must_use]
    pub fn serialization_buffer_size(&self) -> usize {
        1 + self.node_size()
    }

    fn node_size(&self) -> usize {
        match self {
            Self::Atom(None) => 1,
            Self::Atom(Some(name)) => 2 + name.len(),
            Self::Optional(inner) | Self::Array(inner) => 1 + inner.node_size(),
            Self::Tuple(slots) => 2 + slots.iter().map(Self::node_size).sum::<usize>(),
        }
    }

    /// Encodes into `buffer`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`CaptureSerializationError::BufferTooSmall`] when `buffer` cannot
    /// hold the encoding; use
    /// [`serialization_buffer_size`](CaptureStructure::serialization_buffer_size)
    /// to size it.
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, CaptureSerializationError> {
        let mut pos = 0;
        write_byte(buffer, &mut pos, VERSION)?;
        encode_node(self, buffer, &mut pos)?;
        Ok(pos)
    }

    /// Encodes into a freshly allocated buffer.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        encode_node_vec(self, &mut buffer);
        let mut out = vec![VERSION];
        out.extend_from_slice(&buffer);
        out
    }

    /// Decodes a structure previously produced by [`encode`] /
    /// [`encode_into`]. Trailing bytes after the encoded node are ignored
    /// (buffers may be padded).
    ///
    /// # Errors
    ///
    /// Any [`CaptureSerializationError`] variant other than
    /// `BufferTooSmall`.
    ///
    /// [`encode`]: CaptureStructure::encode
    /// [`encode_into`]: CaptureStructure::encode_into
    pub fn decode(bytes: &[u8]) -> Result<Self, CaptureSerializationError> {
        let mut pos = 0;
        let version = read_byte(bytes, &mut pos)?;
        if version != VERSION {
            return Err(CaptureSerializationError::UnsupportedVersion(version));
        }
        decode_node(bytes, &mut pos)
    }
}

fn write_byte(buffer: &mut [u8], pos: &mut usize, byte: u8) -> Result<(), CaptureSerializationError> {
    let Some(slot) = buffer.get_mut(*pos) else {
        return Err(CaptureSerializationError::BufferTooSmall);
    };
    *slot = byte;
    *pos += 1;
    Ok(())
}

fn encode_node(
    node: &CaptureStructure,
    buffer: &mut [u8],
    pos: &mut usize,
) -> Result<(), CaptureSerializationError> {
    match node {
        CaptureStructure::Atom(None) => write_byte(buffer, pos, code::ATOM),
        CaptureStructure::Atom(Some(name)) => {
            write_byte(buffer, pos, code::NAMED_ATOM)?;
            for byte in name.as_bytes() {
                write_byte(buffer, pos, *byte)?;
            }
            write_byte(buffer, pos, 0)
        }
        CaptureStructure::Optional(inner) => {
            write_byte(buffer, pos, code::OPTIONAL)?;
            encode_node(inner, buffer, pos)
        }
        CaptureStructure::Array(inner) => {
            write_byte(buffer, pos, code::ARRAY)?;
            encode_node(inner, buffer, pos)
        }
        CaptureStructure::Tuple(slots) => {
            write_byte(buffer, pos, code::BEGIN_TUPLE)?;
            for slot in slots {
                encode_node(slot, buffer, pos)?;
            }
            write_byte(buffer, pos, code::END_TUPLE)
        }
    }
}

fn encode_node_vec(node: &CaptureStructure, out: &mut Vec<u8>) {
    match node {
        CaptureStructure::Atom(None) => out.push(code::ATOM),
        CaptureStructure::Atom(Some(name)) => {
            out.push(code::NAMED_ATOM);
            out.extend_from_slice(name.as_bytes());
            out.push(0);
        }
        CaptureStructure::Optional(inner) => {
            out.push(code::OPTIONAL);
            encode_node_vec(inner, out);
        }
        CaptureStructure::Array(inner) => {
            out.push(code::ARRAY);
            encode_node_vec(inner, out);
        }
        CaptureStructure::Tuple(slots) => {
            out.push(code::BEGIN_TUPLE);
            for slot in slots {
                encode_node_vec(slot, out);
            }
            out.push(code::END_TUPLE);
        }
    }
}

fn read_byte(bytes: &[u8], pos: &mut usize) -> Result<u8, CaptureSerializationError> {
    let byte = bytes
        .get(*pos)
        .copied()
        .ok_or(CaptureSerializationError::Truncated)?;
    *pos += 1;
    Ok(byte)
}

fn decode_node(bytes: &[u8], pos: &mut usize) -> Result<CaptureStructure, CaptureSerializationError> {
    match read_byte(bytes, pos)? {
        code::ATOM => Ok(CaptureStructure::Atom(None)),
        code::NAMED_ATOM => {
            let name_start = *pos;
            loop {
                if read_byte(bytes, pos)? == 0 {
                    break;
                }
            }
            let name = std::str::from_utf8(&bytes[name_start..*pos - 1])
                .map_err(|_| CaptureSerializationError::InvalidName)?;
            Ok(CaptureStructure::Atom(Some(name.into())))
        }
        code::OPTIONAL => Ok(CaptureStructure::Optional(Box::new(decode_node(
            bytes, pos,
        )?))),
        code::ARRAY => Ok(CaptureStructure::Array(Box::new(decode_node(bytes, pos)?))),
        code::BEGIN_TUPLE => {
            let mut slots = Vec::new();
            while bytes.get(*pos) != Some(&code::END_TUPLE) {
                slots.push(decode_node(bytes, pos)?);
            }
            *pos += 1;
            Ok(CaptureStructure::Tuple(slots))
        }
        other => Err(CaptureSerializationError::InvalidCode(other)),
    }
}
