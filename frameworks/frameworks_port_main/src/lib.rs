//! Frameworks Layer: Port Program
//!
//! Wires the codec, the framed port and a bundled handler into the
//! `bert_port` executable.
//!
//! ## Overview
//!
//! The remote runtime starts `bert_port` as a port program and exchanges
//! length-prefixed messages with it over stdin and stdout. Stdout carries
//! nothing but frames, so all logging goes to stderr.
//!
//! ## Modules
//!
//! - **[`args`](args/index.html)**: Command-line flags and their mapping
//!   onto `CodecConfig`
//!
//! ## See Also
//!
//! - [`usecases_port_server`](../usecases_port_server/index.html): The request loop
//! - [`adapters_port_io`](../adapters_port_io/index.html): Framing

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

pub mod args;

use std::io::{Read, Write};

use adapters_port_io::{PortError, TermPort};
use usecases_port_server::{serve, Calculator, Echo, ServerError};

pub use args::{HandlerKind, PortArgs};

/// Serve the selected handler over `source` and `sink` until end of input
pub fn run<R: Read, W: Write>(
    args: &PortArgs,
    source: R,
    sink: W,
) -> Result<(), ServerError<PortError>> {
    let config = args.codec_config();
    log::debug!(
        "starting {:?} handler, convention {}, buffer {} bytes",
        args.handler,
        config.convention,
        config.buffer_capacity
    );
    let mut port = TermPort::with_max_frame_len(source, sink, config, args.max_frame_len());
    match args.handler {
        HandlerKind::Echo => serve(&mut port, &mut Echo),
        HandlerKind::Calculator => serve(&mut port, &mut Calculator),
    }
}
