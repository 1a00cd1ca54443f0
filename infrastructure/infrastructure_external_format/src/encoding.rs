//! Encoding Module
//!
//! Serializes a `Term` into a [`ScratchBuffer`], dispatching on the term
//! variant. The wire class of an integer is chosen from its value, not from
//! the variant holding it:
//!
//! | Value | Tag |
//! |---|---|
//! | 0..=255 | SMALL_INTEGER_EXT |
//! | -2^27..=2^27-1 | INTEGER_EXT |
//! | anything else | SMALL_BIG_EXT / LARGE_BIG_EXT |

use entities_data_handling::{Integer, Map, Term, INT32_MAX, INT32_MIN};
use infrastructure_bignum_encoding::BignumCodec;

use crate::buffer::ScratchBuffer;
use crate::config::{CodecConfig, Convention};
use crate::error::CodecError;
use crate::tags::*;

/// Term encoder writing into a borrowed scratch buffer
pub(crate) struct Encoder<'a> {
    out: &'a mut ScratchBuffer,
    config: &'a CodecConfig,
    depth: usize,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(out: &'a mut ScratchBuffer, config: &'a CodecConfig) -> Self {
        Self {
            out,
            config,
            depth: 0,
        }
    }

    /// Write the version byte that opens a top-level message
    pub(crate) fn version(&mut self) -> Result<(), CodecError> {
        self.out.put_u8(VERSION_MAGIC)
    }

    pub(crate) fn term(&mut self, term: &Term) -> Result<(), CodecError> {
        match term {
            Term::Null => self.atom(self.config.convention.null_atom()),
            Term::Nil => self.out.put_u8(NIL_EXT),
            Term::Boolean(true) => self.atom("true"),
            Term::Boolean(false) => self.atom("false"),
            Term::SmallInt(value) => self.small_integer(i64::from(*value)),
            Term::Int32(value) => self.small_integer(i64::from(*value)),
            Term::BigInt(value) => self.integer(value),
            Term::Float64(value) => self.out.put_tagged(NEW_FLOAT_EXT, &value.to_be_bytes()),
            Term::Atom(atom) => self.atom(atom.as_str()),
            Term::Text(text) => self.text(text),
            Term::Binary(bytes) => self.binary(bytes),
            Term::List(items) => self.list(items),
            Term::Tuple(items) => self.tuple(items),
            Term::Map(map) => self.map(map),
        }
    }

    fn small_integer(&mut self, value: i64) -> Result<(), CodecError> {
        if (0..=255).contains(&value) {
            self.out.put_tagged(SMALL_INTEGER_EXT, &[value as u8])
        } else if (INT32_MIN..=INT32_MAX).contains(&value) {
            self.out.put_tagged(INTEGER_EXT, &(value as i32).to_be_bytes())
        } else {
            self.bignum(&Integer::from(value))
        }
    }

    fn integer(&mut self, value: &Integer) -> Result<(), CodecError> {
        match i64::try_from(value) {
            Ok(small) => self.small_integer(small),
            Err(_) => self.bignum(value),
        }
    }

    fn bignum(&mut self, value: &Integer) -> Result<(), CodecError> {
        let encoded = BignumCodec::encode(value)
            .map_err(|e| CodecError::UnsupportedValue(e.to_string()))?;
        self.out.put_slice(&encoded)
    }

    fn atom(&mut self, name: &str) -> Result<(), CodecError> {
        let len = u16::try_from(name.len()).map_err(|_| {
            CodecError::UnsupportedValue(format!("atom of {} bytes exceeds 65535", name.len()))
        })?;
        self.out.put_tagged(ATOM_EXT, &len.to_be_bytes())?;
        self.out.put_slice(name.as_bytes())
    }

    fn text(&mut self, text: &str) -> Result<(), CodecError> {
        match self.config.convention {
            Convention::Elixir => self.binary(text.as_bytes()),
            Convention::Erlang => {
                let len = u16::try_from(text.len()).map_err(|_| {
                    CodecError::UnsupportedValue(format!(
                        "string of {} bytes exceeds 65535",
                        text.len()
                    ))
                })?;
                self.out.put_tagged(STRING_EXT, &len.to_be_bytes())?;
                self.out.put_slice(text.as_bytes())
            }
        }
    }

    fn binary(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let len = count_u32(bytes.len(), "binary")?;
        self.out.put_tagged(BINARY_EXT, &len.to_be_bytes())?;
        self.out.put_slice(bytes)
    }

    fn list(&mut self, items: &[Term]) -> Result<(), CodecError> {
        if items.is_empty() {
            return self.out.put_u8(NIL_EXT);
        }
        let count = count_u32(items.len(), "list")?;
        self.out.put_tagged(LIST_EXT, &count.to_be_bytes())?;
        self.nested(|encoder| {
            for item in items {
                encoder.term(item)?;
            }
            Ok(())
        })?;
        self.out.put_u8(NIL_EXT)
    }

    fn tuple(&mut self, items: &[Term]) -> Result<(), CodecError> {
        if items.len() <= u8::MAX as usize {
            self.out.put_tagged(SMALL_TUPLE_EXT, &[items.len() as u8])?;
        } else {
            let arity = count_u32(items.len(), "tuple")?;
            self.out.put_tagged(LARGE_TUPLE_EXT, &arity.to_be_bytes())?;
        }
        self.nested(|encoder| {
            for item in items {
                encoder.term(item)?;
            }
            Ok(())
        })
    }

    fn map(&mut self, map: &Map) -> Result<(), CodecError> {
        let count = count_u32(map.len(), "map")?;
        self.out.put_tagged(MAP_EXT, &count.to_be_bytes())?;
        self.nested(|encoder| {
            for (key, value) in map.iter() {
                encoder.map_key(key)?;
                encoder.term(value)?;
            }
            Ok(())
        })
    }

    fn map_key(&mut self, key: &Term) -> Result<(), CodecError> {
        match key {
            Term::Text(text) if self.config.encode_string_key_as_atom => self.atom(text),
            other => self.term(other),
        }
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
}

fn count_u32(len: usize, what: &str) -> Result<u32, CodecError> {
    u32::try_from(len).map_err(|_| {
        CodecError::UnsupportedValue(format!("{} of {} elements exceeds a 32-bit count", what, len))
    })
}
