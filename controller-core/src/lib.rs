//! Platform-agnostic controller types, d-pad encoding, and transport traits.
//!
//! This crate holds the canonical controller state that every transport
//! decoder writes into, without any platform-specific dependencies. It can be
//! used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`types`]: Canonical state ([`ControllerState`], [`Buttons`], [`DPad`], [`AnalogStick`])
//! - [`input`]: Front-end trait ([`ControllerInput`]) and [`InputError`]
//! - [`bus`]: Bus driver boundary ([`CanBus`], [`CanFrame`])
//!
//! # Example
//!
//! ```rust
//! use controller_core::{Buttons, ControllerState, DPad};
//!
//! let mut state = ControllerState::neutral();
//! state.dpad = DPad::from_flags(true, false, false, true);
//! state.buttons |= Buttons::CROSS;
//!
//! assert_eq!(state.dpad(), DPad::UpRight);
//! assert!(state.dpad_up() && state.dpad_right());
//! assert!(state.cross());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bus;
pub mod input;
pub mod types;

// Re-export main types at crate root
pub use bus::{BusError, CanBus, CanFrame, CAN_PAYLOAD_LEN};
pub use input::{ControllerInput, InputError};
pub use types::{AnalogStick, Buttons, ControllerState, DPad};
