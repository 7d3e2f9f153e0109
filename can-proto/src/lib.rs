//! CAN bus controller frame decoding and encoding.
//!
//! This crate provides chip-agnostic decoding of the two controller frames a
//! receiver board publishes on the CAN bus, and the matching encoders for the
//! sending side. It works with any driver implementing
//! [`controller_core::CanBus`].
//!
//! # Frames
//!
//! - **ID 50** ([`CAN_ID_ANALOG`]): stick axes and triggers
//! - **ID 51** ([`CAN_ID_BUTTONS`]): d-pad flags and ten buttons
//!
//! See [`parser`] for the byte layout.
//!
//! # Example
//!
//! ```
//! use can_proto::{CanParser, CAN_ID_BUTTONS};
//! use controller_core::DPad;
//!
//! let mut parser = CanParser::new();
//!
//! // down + right flags resolve to the diagonal
//! assert!(parser.parse(CAN_ID_BUTTONS, &[0b0000_1001, 0, 0, 0, 0, 0, 0, 0]));
//! assert_eq!(parser.state().dpad, DPad::DownRight);
//!
//! // foreign identifiers are ignored
//! assert!(!parser.parse(0x123, &[0xFF; 8]));
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
pub mod encode;
pub mod parser;

pub use controller::{CanController, MAX_FRAMES_PER_UPDATE};
pub use encode::{encode_analog, encode_buttons, encode_dpad};
pub use parser::{decode_buttons, decode_dpad, CanParser, CAN_ID_ANALOG, CAN_ID_BUTTONS};

/// Classic CAN bit rate used by the controller receiver board.
pub const CAN_BITRATE: u32 = 1_000_000;
