//! Infrastructure Layer: External Term Format
//!
//! Encodes and decodes terms in the external term format, the binary layout
//! the remote runtime uses for messages on a port.
//!
//! ## Overview
//!
//! Every top-level message is one version byte (131) followed by exactly one
//! tagged term. [`encode`] and [`decode`] enforce that envelope: decoding
//! rejects a wrong version byte and any bytes left after the term.
//!
//! Encoding writes into a fixed-capacity [`ScratchBuffer`]. [`encode_into`]
//! borrows one from the caller and returns a slice into it; [`encode`] sizes
//! a private buffer from [`encoded_size`] and hands back an owned vector. A
//! [`Codec`] bundles a configuration with its own reusable buffer.
//!
//! ## Modules
//!
//! - **[`config`](config/index.html)**: Convention and codec switches
//! - **[`buffer`](buffer/index.html)**: Fixed-capacity scratch buffer
//! - **[`size_calculation`](size_calculation/index.html)**: Exact encoded sizes
//! - **[`tags`](tags/index.html)**: Wire tag constants
//! - `encoding` / `decoding`: Tag dispatch in each direction
//!
//! ## See Also
//!
//! - [`entities_data_handling`](../entities_data_handling/index.html): Term types
//! - [`infrastructure_bignum_encoding`](../infrastructure_bignum_encoding/index.html): Bignum layout

/*
 * %CopyrightBegin%
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright Lee Barney 2025. All Rights Reserved.
 *
 * This file is derived from work copyrighted by Ericsson AB 1996-2025.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * %CopyrightEnd%
 */

pub mod buffer;
pub mod config;
mod decoding;
mod encoding;
pub mod error;
pub mod size_calculation;
pub mod tags;

use entities_data_handling::Term;

pub use buffer::ScratchBuffer;
pub use config::{
    CodecConfig, Convention, ParseConventionError, DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_DEPTH,
};
pub use error::CodecError;
pub use size_calculation::{encoded_size, term_size};
pub use tags::VERSION_MAGIC;

use decoding::Decoder;
use encoding::Encoder;

/// Encode a term into a freshly allocated message
///
/// The size is computed first, so a term larger than
/// `config.buffer_capacity` fails with [`CodecError::BufferOverflow`]
/// before any byte is written.
pub fn encode(term: &Term, config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    let size = encoded_size(term, config).inspect_err(|e| log::debug!("encode failed: {}", e))?;
    if size > config.buffer_capacity {
        let err = CodecError::BufferOverflow {
            capacity: config.buffer_capacity,
            needed: size,
        };
        log::debug!("encode failed: {}", err);
        return Err(err);
    }
    let mut buffer = ScratchBuffer::new(size);
    encode_into(term, config, &mut buffer)?;
    Ok(buffer.into_vec())
}

/// Encode a term into a caller-owned scratch buffer
///
/// Returns the written message as a slice borrowed from `buffer`. On failure
/// the buffer is left empty and ready for the next call.
pub fn encode_into<'b>(
    term: &Term,
    config: &CodecConfig,
    buffer: &'b mut ScratchBuffer,
) -> Result<&'b [u8], CodecError> {
    buffer.prepare();
    let result = {
        let mut encoder = Encoder::new(buffer, config);
        encoder.version().and_then(|()| encoder.term(term))
    };
    match result {
        Ok(()) => {
            log::trace!("encoded {} bytes", buffer.len());
            Ok(buffer.as_slice())
        }
        Err(e) => {
            buffer.clear();
            log::debug!("encode failed: {}", e);
            Err(e)
        }
    }
}

/// Decode one complete message
///
/// Fails with [`CodecError::InvalidHeader`] if the version byte is missing
/// and with [`CodecError::TrailingData`] if bytes follow the term.
pub fn decode(bytes: &[u8], config: &CodecConfig) -> Result<Term, CodecError> {
    let (term, rest) = decode_prefix(bytes, config)?;
    if !rest.is_empty() {
        let err = CodecError::TrailingData {
            remaining: rest.len(),
        };
        log::debug!("decode failed: {}", err);
        return Err(err);
    }
    Ok(term)
}

/// Decode the message at the front of `bytes`, returning the unconsumed rest
pub fn decode_prefix<'i>(
    bytes: &'i [u8],
    config: &CodecConfig,
) -> Result<(Term, &'i [u8]), CodecError> {
    let mut decoder = Decoder::new(bytes, config);
    let result = decoder.version().and_then(|()| decoder.term());
    match result {
        Ok(term) => {
            log::trace!("decoded {} of {} bytes", decoder.position(), bytes.len());
            Ok((term, decoder.rest()))
        }
        Err(e) => {
            log::debug!("decode failed: {}", e);
            Err(e)
        }
    }
}

/// Codec handle: a configuration plus a reusable scratch buffer
///
/// Encoding takes `&mut self`, so one handle serves one encode at a time.
/// Give each thread its own handle.
#[derive(Debug, Clone)]
pub struct Codec {
    config: CodecConfig,
    scratch: ScratchBuffer,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        let scratch = ScratchBuffer::new(config.buffer_capacity);
        Self { config, scratch }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode into the handle's buffer and copy the message out
    pub fn encode(&mut self, term: &Term) -> Result<Vec<u8>, CodecError> {
        self.encode_nocopy(term).map(<[u8]>::to_vec)
    }

    /// Encode into the handle's buffer, borrowing the result
    ///
    /// The slice is valid until the next encode on this handle.
    pub fn encode_nocopy(&mut self, term: &Term) -> Result<&[u8], CodecError> {
        encode_into(term, &self.config, &mut self.scratch)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Term, CodecError> {
        decode(bytes, &self.config)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

/// Render bytes as a binary literal, e.g. `<<131,97,1>>`
pub fn pp_bytes(bytes: &[u8]) -> String {
    let body: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
    format!("<<{}>>", body.join(","))
}
