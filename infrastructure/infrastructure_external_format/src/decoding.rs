//! Decoding Module
//!
//! Recursive descent over the tag space. The decoder walks a borrowed byte
//! slice with a cursor and copies every variable-length payload into an owned
//! term; the input is never modified.
//!
//! Every read is bounds checked before it happens, so a short or corrupt
//! message fails with [`CodecError::Truncated`] instead of panicking. An
//! element count read from the wire only pre-allocates as many elements as
//! the remaining bytes could encode, and never more than
//! [`PREALLOCATION_LIMIT`]; the rest grows on demand as elements decode.

use entities_data_handling::{Atom, Map, Term};
use infrastructure_bignum_encoding::{BignumCodec, BignumError};

use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::tags::*;

/// Most elements a single container header may reserve up front
pub(crate) const PREALLOCATION_LIMIT: usize = 1 << 16;

/// Cursor-based term decoder
///
/// The input and the config carry separate lifetimes so that
/// [`Decoder::rest`] can outlive a short-lived config borrow.
pub(crate) struct Decoder<'a, 'c> {
    input: &'a [u8],
    pos: usize,
    config: &'c CodecConfig,
    depth: usize,
}

impl<'a, 'c> Decoder<'a, 'c> {
    pub(crate) fn new(input: &'a [u8], config: &'c CodecConfig) -> Self {
        Self {
            input,
            pos: 0,
            config,
            depth: 0,
        }
    }

    /// Current cursor position
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not consumed yet
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Consume the version byte that opens a top-level message
    pub(crate) fn version(&mut self) -> Result<(), CodecError> {
        match self.input.get(self.pos) {
            Some(&VERSION_MAGIC) => {
                self.pos += 1;
                Ok(())
            }
            found => Err(CodecError::InvalidHeader {
                found: found.copied(),
            }),
        }
    }

    pub(crate) fn term(&mut self) -> Result<Term, CodecError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        match tag {
            SMALL_INTEGER_EXT => Ok(Term::SmallInt(self.read_u8()?)),
            INTEGER_EXT => Ok(Term::Int32(self.read_i32()?)),
            NEW_FLOAT_EXT => Ok(Term::Float64(f64::from_bits(self.read_u64()?))),
            FLOAT_EXT => self.legacy_float(),
            ATOM_EXT => {
                let len = self.read_u16()? as usize;
                self.latin1_atom(len)
            }
            SMALL_ATOM_EXT => {
                let len = self.read_u8()? as usize;
                self.latin1_atom(len)
            }
            ATOM_UTF8_EXT => {
                let len = self.read_u16()? as usize;
                self.utf8_atom(len)
            }
            SMALL_ATOM_UTF8_EXT => {
                let len = self.read_u8()? as usize;
                self.utf8_atom(len)
            }
            SMALL_TUPLE_EXT => {
                let arity = self.read_u8()? as usize;
                self.tuple(arity)
            }
            LARGE_TUPLE_EXT => {
                let arity = self.read_u32()? as usize;
                self.tuple(arity)
            }
            NIL_EXT => Ok(Term::Nil),
            STRING_EXT => {
                let len = self.read_u16()? as usize;
                let bytes = self.take(len)?;
                Ok(Term::Text(String::from_utf8_lossy(bytes).into_owned()))
            }
            LIST_EXT => self.list(),
            BINARY_EXT => {
                let len = self.read_u32()? as usize;
                let bytes = self.take(len)?;
                if self.config.all_binaries_as_string {
                    Ok(Term::Text(String::from_utf8_lossy(bytes).into_owned()))
                } else {
                    Ok(Term::Binary(bytes.to_vec()))
                }
            }
            SMALL_BIG_EXT => self.bignum(false),
            LARGE_BIG_EXT => self.bignum(true),
            MAP_EXT => self.map(),
            other => Err(CodecError::UnknownTag { tag: other, offset }),
        }
    }

    fn legacy_float(&mut self) -> Result<Term, CodecError> {
        let field = self.take(FLOAT_EXT_LEN)?;
        let text = std::str::from_utf8(field)
            .map_err(|_| CodecError::UnsupportedValue("legacy float is not ASCII".to_string()))?;
        let text = text.trim_end_matches('\0').trim();
        text.parse::<f64>()
            .map(Term::Float64)
            .map_err(|_| CodecError::UnsupportedValue(format!("unparseable legacy float {:?}", text)))
    }

    fn latin1_atom(&mut self, len: usize) -> Result<Term, CodecError> {
        let bytes = self.take(len)?;
        let name = match std::str::from_utf8(bytes) {
            Ok(name) => name.to_owned(),
            Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
        };
        Ok(self.atom(name))
    }

    fn utf8_atom(&mut self, len: usize) -> Result<Term, CodecError> {
        let offset = self.pos;
        let bytes = self.take(len)?;
        let name = std::str::from_utf8(bytes).map_err(|_| {
            CodecError::UnsupportedValue(format!("invalid UTF-8 atom at offset {}", offset))
        })?;
        Ok(self.atom(name.to_owned()))
    }

    fn atom(&self, name: String) -> Term {
        if name == "true" {
            Term::Boolean(true)
        } else if name == "false" {
            Term::Boolean(false)
        } else if self.config.decode_null_values && name == self.config.convention.null_atom() {
            Term::Null
        } else {
            Term::Atom(Atom::from(name))
        }
    }

    fn tuple(&mut self, arity: usize) -> Result<Term, CodecError> {
        let mut items = Vec::with_capacity(self.capacity_hint(arity, 1));
        self.nested(|decoder| {
            for _ in 0..arity {
                items.push(decoder.term()?);
            }
            Ok(())
        })?;
        Ok(Term::Tuple(items.into_boxed_slice()))
    }

    fn list(&mut self) -> Result<Term, CodecError> {
        let count = self.read_u32()? as usize;
        let mut items = Vec::with_capacity(self.capacity_hint(count, 1));
        self.nested(|decoder| {
            for _ in 0..count {
                items.push(decoder.term()?);
            }
            Ok(())
        })?;

        let offset = self.pos;
        match self.read_u8()? {
            NIL_EXT => Ok(Term::list(items)),
            found => Err(CodecError::ImproperList { found, offset }),
        }
    }

    fn map(&mut self) -> Result<Term, CodecError> {
        let count = self.read_u32()? as usize;
        let mut map = Map::with_capacity(self.capacity_hint(count, 2));
        self.nested(|decoder| {
            for _ in 0..count {
                let key = decoder.term()?;
                let value = decoder.term()?;
                map.put(key, value);
            }
            Ok(())
        })?;
        Ok(Term::Map(map))
    }

    fn bignum(&mut self, wide: bool) -> Result<Term, CodecError> {
        let offset = self.pos;
        let (value, consumed) =
            BignumCodec::decode_body(self.rest(), wide).map_err(|e| match e {
                BignumError::Truncated { needed, available } => CodecError::Truncated {
                    needed,
                    available,
                    offset,
                },
                other => CodecError::UnsupportedValue(other.to_string()),
            })?;
        self.pos += consumed;
        Ok(Term::integer(value))
    }

    fn nested<F>(&mut self, body: F) -> Result<(), CodecError>
    where
        F: FnOnce(&mut Self) -> Result<(), CodecError>,
    {
        if self.depth >= self.config.max_depth {
            return Err(CodecError::NestingTooDeep {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    /// Elements to reserve for `count` elements of at least `min_len` bytes each
    fn capacity_hint(&self, count: usize, min_len: usize) -> usize {
        count
            .min(self.remaining() / min_len)
            .min(PREALLOCATION_LIMIT)
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if len > self.remaining() {
            return Err(CodecError::Truncated {
                needed: len,
                available: self.remaining(),
                offset: self.pos,
            });
        }
        let bytes = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_u16(&mut self) -> Result<u16, CodecError> {
        self.read_array().map(u16::from_be_bytes)
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.read_array().map(u32::from_be_bytes)
    }

    fn read_i32(&mut self) -> Result<i32, CodecError> {
        self.read_array().map(i32::from_be_bytes)
    }

    fn read_u64(&mut self) -> Result<u64, CodecError> {
        self.read_array().map(u64::from_be_bytes)
    }
}
