//! UART-bound controller front end.

use controller_core::{ControllerInput, ControllerState, InputError};
use embedded_io::{Read, ReadReady};

use crate::decoder::SerialDecoder;

/// Bytes pulled from the reader per `read` call.
pub const READ_CHUNK_SIZE: usize = 32;

/// Upper bound on `read` calls per poll, so a busy line cannot stall the
/// caller's loop.
pub const MAX_READS_PER_POLL: usize = 8;

/// A [`SerialDecoder`] fed from a non-blocking UART reader.
///
/// Only data the reader reports as ready is consumed, so [`poll`](Self::poll)
/// never blocks.
pub struct SerialController<R> {
    reader: R,
    decoder: SerialDecoder,
}

impl<R: Read + ReadReady> SerialController<R> {
    /// Create a new controller over the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: SerialDecoder::new(),
        }
    }

    /// Consume whatever the reader has buffered.
    ///
    /// Returns `Ok(true)` if at least one valid packet completed.
    pub fn poll(&mut self) -> Result<bool, InputError> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut decoded = false;

        for _ in 0..MAX_READS_PER_POLL {
            if !self.reader.read_ready().map_err(|_| InputError::Io)? {
                break;
            }
            let n = self.reader.read(&mut chunk).map_err(|_| InputError::Io)?;
            if n == 0 {
                // Ready with nothing to read is end-of-stream
                return Err(InputError::Disconnected);
            }
            let bytes = chunk.get(..n).ok_or(InputError::Io)?;
            decoded |= self.decoder.process_bytes(bytes);
        }
        Ok(decoded)
    }

    /// Get the most recently decoded state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ControllerState {
        self.decoder.state()
    }

    /// Direct access to the decoder.
    pub fn decoder(&self) -> &SerialDecoder {
        &self.decoder
    }

    /// Mutable access to the decoder, e.g. to reset it after a line error.
    pub fn decoder_mut(&mut self) -> &mut SerialDecoder {
        &mut self.decoder
    }

    /// Get a reference to the reader.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Decompose into the reader and the decoder.
    pub fn into_parts(self) -> (R, SerialDecoder) {
        (self.reader, self.decoder)
    }
}

impl<R: Read + ReadReady> ControllerInput for SerialController<R> {
    fn update(&mut self) -> Result<bool, InputError> {
        self.poll()
    }

    fn state(&self) -> &ControllerState {
        self.decoder.state()
    }
}
