//! Entities Layer: Data Handling
//!
//! This crate provides the value model exchanged between a host process and a
//! remote Erlang/Elixir runtime over the external term format.
//!
//! ## Overview
//!
//! The `entities_data_handling` crate is the innermost layer of the workspace.
//! It knows nothing about bytes on the wire; it only defines the values that
//! the codec in `infrastructure_external_format` reads and writes.
//!
//! ## Modules
//!
//! - **[`term`](term/index.html)**: The `Term` enum covering null, booleans,
//!   the three integer width classes, floats, atoms, text, binaries, lists,
//!   tuples and maps.
//!
//! - **[`atom`](atom/index.html)**: The `Atom` type. Atoms are a separate type
//!   from text so that an atom survives a round trip as an atom.
//!
//! - **[`map`](map/index.html)**: Insertion-ordered map whose key lookups treat
//!   an atom, a text and a UTF-8 binary with the same characters as the same
//!   key.
//!
//! ## Usage
//!
//! ```rust
//! use entities_data_handling::{Atom, Map, Term};
//!
//! let mut map = Map::new();
//! map.put(Term::atom("count"), Term::from(42));
//!
//! let term = Term::tuple(vec![Term::atom("ok"), Term::Map(map)]);
//! let inner = term.as_tuple().unwrap()[1].as_map().unwrap();
//! assert_eq!(inner.get(&Term::text("count")), Some(&Term::from(42)));
//! assert_eq!(Atom::new("ok"), "ok");
//! ```

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

pub mod atom;
pub mod map;
pub mod term;

// Re-export main types for convenience
pub use atom::Atom;
pub use map::{keys_equivalent, Map, MapError};
pub use term::{Term, INT32_MAX, INT32_MIN};

// Arbitrary precision integer carried by `Term::BigInt`
pub use malachite::Integer;
