//! Bignum Codec Module
//!
//! Encodes and decodes complete bignum terms:
//!
//! - **SMALL_BIG_EXT** (tag 110): tag + 1-byte length + sign + n magnitude bytes
//! - **LARGE_BIG_EXT** (tag 111): tag + 4-byte big-endian length + sign + n magnitude bytes
//!
//! The length counts magnitude bytes only. The sign byte is 0 for positive
//! values and 1 for negative ones.

use malachite::Integer;

use crate::common::{bytes_to_integer, integer_to_bytes, BignumError};

/// Bignum with a 1-byte length
pub const SMALL_BIG_EXT: u8 = 110;

/// Bignum with a 4-byte length
pub const LARGE_BIG_EXT: u8 = 111;

/// Bignum codec
pub struct BignumCodec;

impl BignumCodec {
    /// Encode an Integer as a complete bignum term (tag included)
    ///
    /// Magnitudes of up to 255 bytes use SMALL_BIG_EXT, longer ones LARGE_BIG_EXT.
    pub fn encode(value: &Integer) -> Result<Vec<u8>, BignumError> {
        let (magnitude, is_negative) = integer_to_bytes(value);
        let arity = magnitude.len();

        let mut buf = Vec::with_capacity(Self::encoded_len(arity));
        if arity <= u8::MAX as usize {
            buf.push(SMALL_BIG_EXT);
            buf.push(arity as u8);
        } else {
            let arity32 = u32::try_from(arity).map_err(|_| BignumError::ValueTooLarge(arity))?;
            buf.push(LARGE_BIG_EXT);
            buf.extend_from_slice(&arity32.to_be_bytes());
        }
        buf.push(u8::from(is_negative));
        buf.extend_from_slice(&magnitude);
        Ok(buf)
    }

    /// Total encoded size for a magnitude of `arity` bytes, tag included
    pub fn encoded_len(arity: usize) -> usize {
        let header = if arity <= u8::MAX as usize { 2 } else { 5 };
        header + 1 + arity
    }

    /// Decode a complete bignum term starting at its tag
    ///
    /// # Returns
    ///
    /// * `Ok((integer, bytes_consumed))` - Decoded value and bytes consumed, tag included
    /// * `Err(BignumError)` - Decoding error
    pub fn decode(data: &[u8]) -> Result<(Integer, usize), BignumError> {
        let tag = *data.first().ok_or(BignumError::Truncated {
            needed: 1,
            available: 0,
        })?;
        let wide = match tag {
            SMALL_BIG_EXT => false,
            LARGE_BIG_EXT => true,
            other => return Err(BignumError::InvalidTag(other)),
        };
        let (value, consumed) = Self::decode_body(&data[1..], wide)?;
        Ok((value, consumed + 1))
    }

    /// Decode a bignum payload that follows an already consumed tag
    ///
    /// `wide` selects the 4-byte length of LARGE_BIG_EXT.
    pub fn decode_body(data: &[u8], wide: bool) -> Result<(Integer, usize), BignumError> {
        let len_size = if wide { 4 } else { 1 };
        if data.len() < len_size + 1 {
            return Err(BignumError::Truncated {
                needed: len_size + 1,
                available: data.len(),
            });
        }

        let arity = if wide {
            u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize
        } else {
            data[0] as usize
        };
        let is_negative = data[len_size] != 0;

        let start = len_size + 1;
        let end = start
            .checked_add(arity)
            .filter(|&end| end <= data.len())
            .ok_or(BignumError::Truncated {
                needed: start.saturating_add(arity),
                available: data.len(),
            })?;

        Ok((bytes_to_integer(&data[start..end], is_negative), end))
    }
}
