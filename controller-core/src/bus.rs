//! Bus transport boundary.
//!
//! Platform drivers (bxCAN, FDCAN, SocketCAN, MCP2515, ...) implement
//! [`CanBus`]; the decoders only ever see [`CanFrame`] values.

/// Payload length of a classic CAN data frame.
pub const CAN_PAYLOAD_LEN: usize = 8;

/// A raw bus frame as handed over by the driver.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CanFrame {
    pub id: u32,
    pub data: [u8; CAN_PAYLOAD_LEN],
    /// Number of meaningful payload bytes (DLC).
    pub len: u8,
}

impl CanFrame {
    /// Full-length frame.
    #[must_use]
    pub const fn new(id: u32, data: [u8; CAN_PAYLOAD_LEN]) -> Self {
        Self { id, data, len: CAN_PAYLOAD_LEN as u8 }
    }
}

/// Error type for bus operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Controller or driver I/O error.
    Io,
    /// Transmit mailboxes are full.
    BufferFull,
    /// Controller has entered bus-off.
    BusOff,
}

/// Minimal send/receive capability of a bus driver.
pub trait CanBus {
    /// Queue a frame for transmission.
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), BusError>;

    /// Take the next received frame, if any. Must not block.
    fn receive(&mut self) -> Result<Option<CanFrame>, BusError>;
}

impl<B: CanBus + ?Sized> CanBus for &mut B {
    fn transmit(&mut self, frame: &CanFrame) -> Result<(), BusError> {
        (**self).transmit(frame)
    }

    fn receive(&mut self) -> Result<Option<CanFrame>, BusError> {
        (**self).receive()
    }
}
