//! Use Cases Layer: Port Server
//!
//! Runs a request/response loop over a stream of terms on behalf of a remote
//! runtime that talks to this process through a port.
//!
//! ## Overview
//!
//! A [`Handler`] owns the request logic. [`serve`] reads terms from a
//! [`TermChannel`], passes the first one to [`Handler::init`] and every later
//! one to [`Handler::handle`], strictly in order. Replies and queued
//! [`Outbox`] messages go back over the same channel. A failing request is
//! answered with `{error, {Kind, Code, Name, Message, Stack}}` and does not
//! stop the loop.
//!
//! ## Modules
//!
//! - **[`handler`](handler/index.html)**: Handler trait, outcomes, errors
//! - **[`server`](server/index.html)**: The loop and the channel trait
//! - **[`handlers`](handlers/index.html)**: `Echo` and `Calculator`
//!
//! ## See Also
//!
//! - [`adapters_port_io`](../../adapters/adapters_port_io/index.html): Framed channel over byte streams

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

pub mod handler;
pub mod handlers;
pub mod server;

pub use handler::{Handler, HandlerError, Outbox, Outcome};
pub use handlers::{Calculator, Echo};
pub use server::{serve, ServerError, TermChannel};
