//! Term Port Module
//!
//! A [`TermChannel`] over a pair of byte streams: frames are read from one
//! and written to the other, each frame carrying one encoded message.

use std::io::{Read, Write};

use entities_data_handling::Term;
use infrastructure_external_format::{Codec, CodecConfig};
use usecases_port_server::TermChannel;

use crate::framing::{PortError, PortReader, PortWriter};

/// Framed, encoded term stream
#[derive(Debug)]
pub struct TermPort<R, W> {
    reader: PortReader<R>,
    writer: PortWriter<W>,
    codec: Codec,
}

impl<R: Read, W: Write> TermPort<R, W> {
    /// Build a port whose frame limit equals the codec buffer capacity
    pub fn new(source: R, sink: W, config: CodecConfig) -> Self {
        let max_frame_len = config.buffer_capacity;
        Self::with_max_frame_len(source, sink, config, max_frame_len)
    }

    pub fn with_max_frame_len(source: R, sink: W, config: CodecConfig, max_frame_len: usize) -> Self {
        Self {
            reader: PortReader::new(source, max_frame_len),
            writer: PortWriter::new(sink),
            codec: Codec::new(config),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        self.codec.config()
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader.into_inner(), self.writer.into_inner())
    }
}

impl<R: Read, W: Write> TermChannel for TermPort<R, W> {
    type Error = PortError;

    fn recv(&mut self) -> Result<Option<Term>, PortError> {
        match self.reader.read_message()? {
            Some(frame) => Ok(Some(self.codec.decode(&frame)?)),
            None => Ok(None),
        }
    }

    fn send(&mut self, term: &Term) -> Result<(), PortError> {
        let message = self.codec.encode_nocopy(term)?;
        self.writer.write_message(message)
    }
}
