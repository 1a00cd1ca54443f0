//! Command-Line Argument Parsing Module
//!
//! Maps `bert_port` flags onto the codec configuration and the handler to
//! run. Uses clap for type-safe argument parsing.

use clap::{Parser, ValueEnum};
use infrastructure_external_format::{CodecConfig, Convention, DEFAULT_BUFFER_CAPACITY};

/// Bundled request handlers
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HandlerKind {
    /// Reply with every request unchanged
    #[default]
    Echo,
    /// Keep a running total ({get,_}, {add,N}, {rem,N})
    Calculator,
}

/// Port program arguments
#[derive(Parser, Debug)]
#[command(name = "bert_port")]
#[command(about = "Serve external term format requests over stdin/stdout")]
pub struct PortArgs {
    /// Handler answering requests
    #[arg(long, value_enum, default_value_t = HandlerKind::Echo)]
    pub handler: HandlerKind,

    /// Peer naming convention: elixir or erlang
    #[arg(long, default_value_t = Convention::Elixir)]
    pub convention: Convention,

    /// Encode text map keys as text instead of atoms
    #[arg(long)]
    pub no_string_key_atom: bool,

    /// Decode the convention's null atom as null
    #[arg(long)]
    pub decode_null_values: bool,

    /// Decode every binary as text
    #[arg(long)]
    pub binaries_as_string: bool,

    /// Encode buffer capacity in bytes, version byte included
    #[arg(long, default_value_t = DEFAULT_BUFFER_CAPACITY)]
    pub buffer_size: usize,

    /// Largest accepted incoming frame (defaults to the buffer size)
    #[arg(long)]
    pub max_frame: Option<usize>,

    /// Log filter, e.g. "debug" or "usecases_port_server=trace" (overrides RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl PortArgs {
    /// Check argument values
    pub fn validate(&self) -> Result<(), String> {
        if self.buffer_size < 2 {
            return Err("--buffer-size must be at least 2 bytes".to_string());
        }
        if self.max_frame == Some(0) {
            return Err("--max-frame must be positive".to_string());
        }
        // Frames carry a 4-byte length prefix
        let limit = u32::MAX as usize;
        if self.buffer_size > limit {
            return Err(format!("--buffer-size must be at most {} bytes", limit));
        }
        if self.max_frame.is_some_and(|len| len > limit) {
            return Err(format!("--max-frame must be at most {} bytes", limit));
        }
        Ok(())
    }

    /// Codec configuration selected by the flags
    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig::new()
            .with_convention(self.convention)
            .with_string_key_as_atom(!self.no_string_key_atom)
            .with_null_values(self.decode_null_values)
            .with_binaries_as_string(self.binaries_as_string)
            .with_buffer_capacity(self.buffer_size)
    }

    pub fn max_frame_len(&self) -> usize {
        self.max_frame.unwrap_or(self.buffer_size)
    }
}
