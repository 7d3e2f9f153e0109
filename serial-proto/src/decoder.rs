//! Incremental decoder for the COBS-framed serial stream.
//!
//! Bytes are pushed one at a time (or in batches) as the UART delivers them.
//! Non-delimiter bytes accumulate in a fixed buffer; a delimiter closes the
//! frame, which is escape-decoded and validated as a [`SerialPacket`]. Only a
//! valid packet touches the controller state, and it replaces it whole.
//!
//! Every failure is silent and local: the frame is dropped, the buffer is
//! cleared, and the caller sees `false`. A corrupted stream resynchronizes at
//! the next delimiter.
//!
//! [`SerialPacket`]: crate::SerialPacket

use controller_core::ControllerState;
use heapless::Vec;

use crate::frame::{decode_frame, FrameError, FRAME_DELIMITER, MAX_FRAME_SIZE};

/// Counters describing what the decoder has seen since creation.
///
/// Counters wrap on overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderStats {
    /// Frames that decoded into a valid packet.
    pub frames_decoded: u32,
    /// Non-empty frames that were dropped as malformed.
    pub frames_rejected: u32,
    /// Partial frames discarded because the buffer filled up.
    pub overflows: u32,
}

/// Stream framing state machine for the serial transport.
///
/// # Example
///
/// ```
/// use controller_core::{ControllerState, DPad};
/// use serial_proto::{encode_frame, SerialDecoder, SerialPacket, MAX_ENCODED_FRAME_SIZE};
///
/// let sent = ControllerState { dpad: DPad::Left, ..ControllerState::neutral() };
/// let mut wire = [0u8; MAX_ENCODED_FRAME_SIZE];
/// let len = encode_frame(&SerialPacket::from_state(&sent), &mut wire).unwrap();
///
/// let mut decoder = SerialDecoder::new();
/// assert!(decoder.process_bytes(&wire[..len]));
/// assert_eq!(decoder.state().dpad, DPad::Left);
/// ```
#[derive(Debug, Clone)]
pub struct SerialDecoder {
    buffer: Vec<u8, MAX_FRAME_SIZE>,
    state: ControllerState,
    stats: DecoderStats,
}

impl SerialDecoder {
    /// Create a decoder with an empty buffer and a neutral state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: ControllerState::neutral(),
            stats: DecoderStats {
                frames_decoded: 0,
                frames_rejected: 0,
                overflows: 0,
            },
        }
    }

    /// Feed one byte.
    ///
    /// Returns `true` only when this byte is the delimiter that completes a
    /// valid packet; the state has then been replaced with the packet's fields.
    pub fn process_byte(&mut self, byte: u8) -> bool {
        if byte != FRAME_DELIMITER {
            self.accumulate(byte);
            return false;
        }

        if self.buffer.is_empty() {
            // Back-to-back delimiters: nothing was framed
            return false;
        }

        let result = self.finish_frame();
        self.buffer.clear();

        match result {
            Ok(state) => {
                self.state = state;
                self.stats.frames_decoded = self.stats.frames_decoded.wrapping_add(1);
                true
            }
            Err(err) => {
                trace!("dropping serial frame: {:?}", err);
                self.stats.frames_rejected = self.stats.frames_rejected.wrapping_add(1);
                false
            }
        }
    }

    /// Feed a batch of bytes.
    ///
    /// Returns `true` if at least one valid packet completed in the batch. When
    /// several did, only the last one remains in [`state`](Self::state); use
    /// [`process_bytes_with`](Self::process_bytes_with) to observe each of them.
    pub fn process_bytes(&mut self, bytes: &[u8]) -> bool {
        self.process_bytes_with(bytes, |_| {}) > 0
    }

    /// Feed a batch of bytes, calling `on_frame` with the state after every
    /// valid packet.
    ///
    /// Returns the number of packets decoded.
    pub fn process_bytes_with<F>(&mut self, bytes: &[u8], mut on_frame: F) -> usize
    where
        F: FnMut(&ControllerState),
    {
        let mut decoded = 0;
        for &byte in bytes {
            if self.process_byte(byte) {
                decoded += 1;
                on_frame(&self.state);
            }
        }
        decoded
    }

    /// Discard any partial frame. The controller state is left as is.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Get the most recently decoded state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Mutable access, e.g. to force a neutral state after a timeout.
    #[inline]
    pub fn state_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }

    #[must_use]
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Number of bytes of the frame currently being received.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Append a non-delimiter byte. One slot is always kept free for the
    /// delimiter; when none is left the whole partial frame is dropped,
    /// along with `byte`.
    fn accumulate(&mut self, byte: u8) {
        if self.buffer.len() >= MAX_FRAME_SIZE - 1 || self.buffer.push(byte).is_err() {
            debug!("serial frame overflow, dropping {} bytes", self.buffer.len());
            self.buffer.clear();
            self.stats.overflows = self.stats.overflows.wrapping_add(1);
        }
    }

    /// Close the current frame and validate it.
    fn finish_frame(&mut self) -> Result<ControllerState, FrameError> {
        // The delimiter is part of the escape-decodable unit
        self.buffer
            .push(FRAME_DELIMITER)
            .map_err(|_| FrameError::Cobs)?;
        let packet = decode_frame(&self.buffer)?;
        Ok(packet.to_controller_state()?)
    }
}

impl Default for SerialDecoder {
    fn default() -> Self {
        Self::new()
    }
}
