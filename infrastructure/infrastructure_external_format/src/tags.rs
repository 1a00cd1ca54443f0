//! Wire Tag Constants
//!
//! Tag bytes of the external term format. Every encoded term starts with one
//! of these; a top-level message additionally starts with [`VERSION_MAGIC`].

pub use infrastructure_bignum_encoding::{LARGE_BIG_EXT, SMALL_BIG_EXT};

/// Leading byte of every top-level message
pub const VERSION_MAGIC: u8 = 131;

/// IEEE 754 double, 8 bytes big-endian
pub const NEW_FLOAT_EXT: u8 = 70;

/// Small integer (0-255)
pub const SMALL_INTEGER_EXT: u8 = 97;

/// Integer (32-bit signed, big-endian)
pub const INTEGER_EXT: u8 = 98;

/// Float as a 31-byte ASCII field (legacy)
pub const FLOAT_EXT: u8 = 99;

/// Atom with a 2-byte length
pub const ATOM_EXT: u8 = 100;

/// Small tuple (arity <= 255)
pub const SMALL_TUPLE_EXT: u8 = 104;

/// Large tuple (4-byte arity)
pub const LARGE_TUPLE_EXT: u8 = 105;

/// Nil (empty list)
pub const NIL_EXT: u8 = 106;

/// Byte string with a 2-byte length (legacy text)
pub const STRING_EXT: u8 = 107;

/// List with a 4-byte count, NIL terminated
pub const LIST_EXT: u8 = 108;

/// Binary with a 4-byte length
pub const BINARY_EXT: u8 = 109;

/// Atom with a 1-byte length
pub const SMALL_ATOM_EXT: u8 = 115;

/// Map with a 4-byte pair count
pub const MAP_EXT: u8 = 116;

/// UTF-8 atom with a 2-byte length
pub const ATOM_UTF8_EXT: u8 = 118;

/// UTF-8 atom with a 1-byte length
pub const SMALL_ATOM_UTF8_EXT: u8 = 119;

/// Width of the FLOAT_EXT payload
pub const FLOAT_EXT_LEN: usize = 31;
