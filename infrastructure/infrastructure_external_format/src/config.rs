//! Codec Configuration
//!
//! Settings that choose which term variants the codec produces and expects.
//! They never change term identity, only the wire representation picked for
//! null, text and map keys, and the variants produced on decode.

use std::fmt;
use std::str::FromStr;

/// Default scratch buffer capacity: 10 MiB, version byte included
pub const DEFAULT_BUFFER_CAPACITY: usize = 10 * 1024 * 1024;

/// Default limit on term nesting
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Naming convention of the remote runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convention {
    /// Null is `nil`, text travels as a binary
    #[default]
    Elixir,
    /// Null is `undefined`, text travels as a legacy byte string
    Erlang,
}

impl Convention {
    /// Name of the atom standing for null
    pub fn null_atom(self) -> &'static str {
        match self {
            Convention::Elixir => "nil",
            Convention::Erlang => "undefined",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::Elixir => f.write_str("elixir"),
            Convention::Erlang => f.write_str("erlang"),
        }
    }
}

/// Unknown convention name
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown convention {0:?}, expected \"elixir\" or \"erlang\"")]
pub struct ParseConventionError(String);

impl FromStr for Convention {
    type Err = ParseConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elixir" => Ok(Convention::Elixir),
            "erlang" => Ok(Convention::Erlang),
            _ => Err(ParseConventionError(s.to_owned())),
        }
    }
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Null atom name and text encoding
    pub convention: Convention,
    /// Encode text map keys as atoms
    pub encode_string_key_as_atom: bool,
    /// Decode the convention's null atom as `Term::Null`
    pub decode_null_values: bool,
    /// Decode binaries as text instead of raw bytes
    pub all_binaries_as_string: bool,
    /// Upper bound on one encoded message, version byte included
    pub buffer_capacity: usize,
    /// Upper bound on list, tuple and map nesting
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            convention: Convention::Elixir,
            encode_string_key_as_atom: true,
            decode_null_values: false,
            all_binaries_as_string: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_string_key_as_atom(mut self, enabled: bool) -> Self {
        self.encode_string_key_as_atom = enabled;
        self
    }

    pub fn with_null_values(mut self, enabled: bool) -> Self {
        self.decode_null_values = enabled;
        self
    }

    pub fn with_binaries_as_string(mut self, enabled: bool) -> Self {
        self.all_binaries_as_string = enabled;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
