//! Adapters Layer: Port I/O
//!
//! Connects the port server to byte streams such as stdin and stdout.
//!
//! ## Overview
//!
//! The remote runtime talks to a port program through a pipe, sending each
//! message as a 4-byte big-endian length followed by the encoded term.
//! [`PortReader`] and [`PortWriter`] handle the framing; [`TermPort`] adds
//! the codec and implements
//! [`TermChannel`](usecases_port_server::TermChannel) so it can be handed
//! straight to [`serve`](usecases_port_server::serve).
//!
//! ## Modules
//!
//! - **[`framing`](framing/index.html)**: Length-prefixed frames
//! - **[`term_port`](term_port/index.html)**: Framed term channel

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

pub mod framing;
pub mod term_port;

pub use framing::{PortError, PortReader, PortWriter, LENGTH_PREFIX_LEN};
pub use term_port::TermPort;
