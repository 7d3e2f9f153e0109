//! COBS-framed serial controller packet decoding.
//!
//! This crate provides chip-agnostic decoding of the serial controller stream:
//! fixed 11-byte packets, COBS-encoded and terminated by `0x00`. It works with
//! any UART driver that implements the `embedded-io` traits, or bytes can be
//! pushed by hand.
//!
//! # Modules
//!
//! - [`packet`]: the 11-byte wire layout ([`SerialPacket`]) and XOR checksum
//! - [`frame`]: COBS framing, sender-side [`encode_frame`]
//! - [`decoder`]: incremental stream decoder ([`SerialDecoder`])
//! - [`controller`]: decoder bound to a UART reader ([`SerialController`])
//!
//! # Example
//!
//! ```
//! use serial_proto::SerialDecoder;
//!
//! let mut decoder = SerialDecoder::new();
//!
//! // Feed bytes from UART as they arrive
//! let uart_bytes = [
//!     0x04, 0xAA, 0x05, 0xFA, 0x02, 0x7F, 0x06, 0xFF, 0x01, 0x01, 0x03, 0xD6, 0x00,
//! ];
//! let mut completed = 0;
//! for byte in uart_bytes {
//!     if decoder.process_byte(byte) {
//!         completed += 1;
//!     }
//! }
//!
//! assert_eq!(completed, 1);
//! assert_eq!(decoder.state().left_stick.x, 5);
//! assert!(decoder.state().cross());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log and format through defmt
//! - **`log`**: Log through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod fmt;

pub mod controller;
pub mod decoder;
pub mod frame;
pub mod packet;

pub use controller::{SerialController, MAX_READS_PER_POLL, READ_CHUNK_SIZE};
pub use decoder::{DecoderStats, SerialDecoder};
pub use frame::{
    decode_frame, encode_frame, FrameError, SerializeError, FRAME_DELIMITER,
    MAX_ENCODED_FRAME_SIZE, MAX_FRAME_SIZE,
};
pub use packet::{calculate_checksum, PacketError, SerialPacket, PACKET_SIZE};
