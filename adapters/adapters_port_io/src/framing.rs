//! Framing Module
//!
//! Port messages travel as a 4-byte big-endian length followed by exactly
//! that many bytes.

use std::io::{ErrorKind, Read, Write};

use infrastructure_external_format::CodecError;

/// Width of the length prefix
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Framing and transport errors
#[derive(thiserror::Error, Debug)]
pub enum PortError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// End of input inside a length prefix or payload
    #[error("stream ended inside a frame: expected {expected} bytes, got {received}")]
    TruncatedFrame { expected: usize, received: usize },

    /// Declared length above the configured maximum
    #[error("frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Reads length-prefixed frames from a byte stream
#[derive(Debug)]
pub struct PortReader<R> {
    source: R,
    max_frame_len: usize,
}

impl<R: Read> PortReader<R> {
    pub fn new(source: R, max_frame_len: usize) -> Self {
        Self {
            source,
            max_frame_len,
        }
    }

    pub fn max_frame_len(&self) -> usize {
        self.max_frame_len
    }

    /// Read the next frame payload
    ///
    /// Returns `Ok(None)` when the stream ends cleanly between frames.
    pub fn read_message(&mut self) -> Result<Option<Vec<u8>>, PortError> {
        let mut prefix = [0u8; LENGTH_PREFIX_LEN];
        match self.fill(&mut prefix)? {
            0 => return Ok(None),
            LENGTH_PREFIX_LEN => {}
            received => {
                return Err(PortError::TruncatedFrame {
                    expected: LENGTH_PREFIX_LEN,
                    received,
                })
            }
        }

        let len = u32::from_be_bytes(prefix) as usize;
        if len > self.max_frame_len {
            return Err(PortError::FrameTooLarge {
                len,
                max: self.max_frame_len,
            });
        }

        let mut payload = vec![0u8; len];
        let received = self.fill(&mut payload)?;
        if received < len {
            return Err(PortError::TruncatedFrame {
                expected: len,
                received,
            });
        }
        log::trace!("read frame of {} bytes", len);
        Ok(Some(payload))
    }

    /// Read until `buf` is full or the stream ends; returns bytes read
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, PortError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

/// Writes length-prefixed frames to a byte stream
#[derive(Debug)]
pub struct PortWriter<W> {
    sink: W,
}

impl<W: Write> PortWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Write one frame and flush it
    pub fn write_message(&mut self, payload: &[u8]) -> Result<(), PortError> {
        let len = u32::try_from(payload.len()).map_err(|_| PortError::FrameTooLarge {
            len: payload.len(),
            max: u32::MAX as usize,
        })?;
        self.sink.write_all(&len.to_be_bytes())?;
        self.sink.write_all(payload)?;
        self.sink.flush()?;
        log::trace!("wrote frame of {} bytes", payload.len());
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
