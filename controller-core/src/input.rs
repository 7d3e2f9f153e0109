//! Input trait and error types.

use crate::bus::BusError;
use crate::types::ControllerState;

/// Error type for input operations.
///
/// Only transport failures are reported here. A corrupted or unrecognized
/// message is not an error: it is dropped and the state stays as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Bus/UART I/O error.
    Io,
    /// Transport is gone (bus off, port closed).
    Disconnected,
}

impl From<BusError> for InputError {
    fn from(err: BusError) -> Self {
        match err {
            BusError::Io | BusError::BufferFull => InputError::Io,
            BusError::BusOff => InputError::Disconnected,
        }
    }
}

/// A controller front end that owns a [`ControllerState`] and refreshes it
/// from its transport.
///
/// Implementations must not block: `update` consumes whatever the transport
/// already has and returns. Callers poll it from their own loop.
pub trait ControllerInput {
    /// Consume pending transport data.
    ///
    /// Returns `Ok(true)` if at least one message was decoded into the state.
    fn update(&mut self) -> Result<bool, InputError>;

    /// Most recently decoded state.
    fn state(&self) -> &ControllerState;
}
