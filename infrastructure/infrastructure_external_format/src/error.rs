//! Codec Errors
//!
//! Every failure is terminal for the single encode or decode call that hit
//! it. Offsets are byte positions in the message handed to the decoder,
//! version byte included.

/// Encoding and decoding error kinds
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Missing or wrong version byte
    #[error("invalid header: expected version byte 131, found {found:?}")]
    InvalidHeader { found: Option<u8> },

    /// Unrecognized type tag
    #[error("unknown tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    /// List payload not terminated by NIL
    #[error("improper list: expected NIL terminator at offset {offset}, found {found}")]
    ImproperList { found: u8, offset: usize },

    /// Bytes left over after the top-level term
    #[error("{remaining} trailing bytes after the top-level term")]
    TrailingData { remaining: usize },

    /// A read ran past the end of the input
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        needed: usize,
        available: usize,
        offset: usize,
    },

    /// The encoded form does not fit the scratch buffer
    #[error("encoded term needs {needed} bytes, buffer capacity is {capacity}")]
    BufferOverflow { capacity: usize, needed: usize },

    /// A value with no mapping to the wire format
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Terms nested deeper than the configured limit
    #[error("term nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}
