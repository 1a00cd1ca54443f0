//! Common Encoding/Decoding Utilities
//!
//! Sign-and-magnitude conversion between malachite `Integer` values and the
//! little-endian byte sequences carried in bignum payloads.
//!
//! Both directions are exact for any magnitude and never pass through a
//! machine word or a float.

use malachite::base::num::basic::traits::Zero;
use malachite::base::num::conversion::traits::PowerOf2Digits;
use malachite::base::num::logic::traits::SignificantBits;
use malachite::{Integer, Natural};

/// Bignum encoding and decoding errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BignumError {
    /// Declared length runs past the available bytes
    #[error("bignum truncated: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    /// Not a bignum tag
    #[error("expected bignum tag 110 or 111, got {0}")]
    InvalidTag(u8),
    /// Magnitude length does not fit the 4-byte length field
    #[error("bignum magnitude of {0} bytes does not fit a 32-bit length")]
    ValueTooLarge(usize),
}

/// Split an Integer into its little-endian magnitude bytes and sign
///
/// Reads the magnitude out as base-256 digits, least significant first, so
/// zero yields an empty magnitude. Runs in time linear in the magnitude.
///
/// # Returns
///
/// * `(bytes, is_negative)` - Magnitude (least significant byte first) and sign flag
pub fn integer_to_bytes(value: &Integer) -> (Vec<u8>, bool) {
    let bytes: Vec<u8> = value.unsigned_abs_ref().to_power_of_2_digits_asc(8);
    (bytes, *value < 0)
}

/// Rebuild an Integer from little-endian magnitude bytes and a sign
pub fn bytes_to_integer(bytes: &[u8], is_negative: bool) -> Integer {
    // Every u8 is a valid base-256 digit
    let magnitude =
        Natural::from_power_of_2_digits_asc(8, bytes.iter().copied()).unwrap_or(Natural::ZERO);
    Integer::from_sign_and_abs(!is_negative, magnitude)
}

/// Number of magnitude bytes `integer_to_bytes` produces for a value
pub fn magnitude_len(value: &Integer) -> usize {
    value.unsigned_abs_ref().significant_bits().div_ceil(8) as usize
}
