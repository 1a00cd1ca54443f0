//! Infrastructure Layer: Bignum Encoding
//!
//! Provides bignum encoding and decoding for the external term format.
//!
//! ## Overview
//!
//! Integers outside the 32-bit integer wire class travel as a sign byte plus a
//! little-endian magnitude. This crate converts malachite `Integer` values to
//! and from that layout without ever passing through a fixed-precision type.
//!
//! ## Modules
//!
//! - **[`bignum_codec`](bignum_codec/index.html)**: Complete bignum terms
//!   (SMALL_BIG_EXT and LARGE_BIG_EXT), tag and length prefix included.
//!
//! - `common`: Sign-and-magnitude conversion helpers shared by the codec and by
//!   the size calculation in `infrastructure_external_format`.
//!
//! ## See Also
//!
//! - [`infrastructure_external_format`](../infrastructure_external_format/index.html): Term encoder and decoder

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

mod common;

pub mod bignum_codec;

pub use bignum_codec::{BignumCodec, LARGE_BIG_EXT, SMALL_BIG_EXT};
pub use common::{bytes_to_integer, integer_to_bytes, magnitude_len, BignumError};
