//! Size Calculation Module
//!
//! Computes the exact number of bytes the encoder will write for a term,
//! without writing anything. The rules mirror `encoding` one for one, so the
//! size can be checked against a buffer capacity before encoding starts.

use entities_data_handling::{Integer, Term, INT32_MAX, INT32_MIN};
use infrastructure_bignum_encoding::{magnitude_len, BignumCodec};

use crate::config::{CodecConfig, Convention};
use crate::error::CodecError;

/// Size of a top-level message, version byte included
pub fn encoded_size(term: &Term, config: &CodecConfig) -> Result<usize, CodecError> {
    Ok(1 + term_size(term, config)?)
}

/// Size of a term without the version byte
pub fn term_size(term: &Term, config: &CodecConfig) -> Result<usize, CodecError> {
    SizeCalculator { config, depth: 0 }.term(term)
}

struct SizeCalculator<'a> {
    config: &'a CodecConfig,
    depth: usize,
}

impl SizeCalculator<'_> {
    fn term(&mut self, term: &Term) -> Result<usize, CodecError> {
        match term {
            Term::Null => atom_size(self.config.convention.null_atom()),
            Term::Nil => Ok(1),
            Term::Boolean(true) => atom_size("true"),
            Term::Boolean(false) => atom_size("false"),
            Term::SmallInt(value) => Ok(small_integer_size(i64::from(*value))),
            Term::Int32(value) => Ok(small_integer_size(i64::from(*value))),
            Term::BigInt(value) => Ok(integer_size(value)),
            Term::Float64(_) => Ok(9),
            Term::Atom(atom) => atom_size(atom.as_str()),
            Term::Text(text) => match self.config.convention {
                Convention::Elixir => Ok(5 + text.len()),
                Convention::Erlang => {
                    if text.len() > u16::MAX as usize {
                        return Err(CodecError::UnsupportedValue(format!(
                            "string of {} bytes exceeds 65535",
                            text.len()
                        )));
                    }
                    Ok(3 + text.len())
                }
            },
            Term::Binary(bytes) => {
                check_count(bytes.len(), "binary")?;
                Ok(5 + bytes.len())
            }
            Term::List(items) if items.is_empty() => Ok(1),
            Term::List(items) => {
                check_count(items.len(), "list")?;
                Ok(5 + self.elements(items)? + 1)
            }
            Term::Tuple(items) => {
                let header = if items.len() <= u8::MAX as usize {
                    2
                } else {
                    check_count(items.len(), "tuple")?;
                    5
                };
                Ok(header + self.elements(items)?)
            }
            Term::Map(map) => {
                check_count(map.len(), "map")?;
                self.nested(|calc| {
                    let mut size = 5;
                    for (key, value) in map.iter() {
                        size += match key {
                            Term::Text(text) if calc.config.encode_string_key_as_atom => {
                                atom_size(text)?
                            }
                            other => calc.term(other)?,
                        };
                        size += calc.term(value)?;
                    }
                    Ok(size)
                })
            }
        }
    }

    fn elements(&mut self, items: &[Term]) -> Result<usize, CodecError> {
        self.nested(|calc| {
            let mut size = 0;
            for item in items {
                size += calc.term(item)?;
            }
            Ok(size)
        })
    }

    fn nested<F>(&mut self, body: F) -> Result<usize, CodecError>
    where
        F: FnOnce(&mut Self) -> Result<usize, CodecError>,
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

fn small_integer_size(value: i64) -> usize {
    if (0..=255).contains(&value) {
        2
    } else if (INT32_MIN..=INT32_MAX).contains(&value) {
        5
    } else {
        BignumCodec::encoded_len(magnitude_len(&Integer::from(value)))
    }
}

fn integer_size(value: &Integer) -> usize {
    match i64::try_from(value) {
        Ok(small) => small_integer_size(small),
        Err(_) => BignumCodec::encoded_len(magnitude_len(value)),
    }
}

fn atom_size(name: &str) -> Result<usize, CodecError> {
    if name.len() > u16::MAX as usize {
        return Err(CodecError::UnsupportedValue(format!(
            "atom of {} bytes exceeds 65535",
            name.len()
        )));
    }
    Ok(3 + name.len())
}

fn check_count(len: usize, what: &str) -> Result<(), CodecError> {
    if u32::try_from(len).is_err() {
        return Err(CodecError::UnsupportedValue(format!(
            "{} of {} elements exceeds a 32-bit count",
            what, len
        )));
    }
    Ok(())
}
