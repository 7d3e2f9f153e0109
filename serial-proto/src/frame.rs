//! COBS framing of packets on the serial line.
//!
//! Each packet is COBS-encoded and terminated by a single `0x00`. COBS
//! guarantees the delimiter never occurs inside an encoded frame, so a
//! receiver that lost sync recovers at the next zero byte.

use crate::packet::{PacketError, SerialPacket, PACKET_SIZE};

/// Frame delimiter on the wire.
pub const FRAME_DELIMITER: u8 = 0x00;

/// Capacity of the receive buffer, delimiter included.
pub const MAX_FRAME_SIZE: usize = 256;

/// Size of one encoded packet on the wire: COBS overhead byte plus delimiter.
pub const MAX_ENCODED_FRAME_SIZE: usize = PACKET_SIZE + 2;

/// Reason a received frame was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Escape decoding failed.
    Cobs,
    /// Frame decoded but is not a valid packet.
    Packet(PacketError),
}

impl From<PacketError> for FrameError {
    fn from(err: PacketError) -> Self {
        FrameError::Packet(err)
    }
}

/// Error type for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// Output buffer is smaller than [`MAX_ENCODED_FRAME_SIZE`].
    BufferTooSmall,
}

/// Encode `packet` as one wire frame: COBS payload followed by the delimiter.
///
/// Returns the number of bytes written.
///
/// # Example
///
/// ```
/// use controller_core::ControllerState;
/// use serial_proto::{encode_frame, SerialPacket, MAX_ENCODED_FRAME_SIZE};
///
/// let packet = SerialPacket::from_state(&ControllerState::neutral());
/// let mut buf = [0u8; MAX_ENCODED_FRAME_SIZE];
/// let len = encode_frame(&packet, &mut buf).unwrap();
///
/// assert_eq!(buf[len - 1], 0x00);
/// assert!(!buf[..len - 1].contains(&0x00));
/// ```
pub fn encode_frame(packet: &SerialPacket, out: &mut [u8]) -> Result<usize, SerializeError> {
    if out.len() < MAX_ENCODED_FRAME_SIZE {
        return Err(SerializeError::BufferTooSmall);
    }

    let len = cobs::encode(&packet.to_bytes(), out);
    let delimiter = out.get_mut(len).ok_or(SerializeError::BufferTooSmall)?;
    *delimiter = FRAME_DELIMITER;
    Ok(len + 1)
}

/// Escape-decode a received frame and validate it as a packet.
///
/// `frame` is the bytes since the previous delimiter with the terminating
/// delimiter appended.
pub fn decode_frame(frame: &[u8]) -> Result<SerialPacket, FrameError> {
    let mut decoded = [0u8; MAX_FRAME_SIZE];
    let len = cobs::decode(frame, &mut decoded).map_err(|_| FrameError::Cobs)?;
    let payload = decoded.get(..len).ok_or(FrameError::Cobs)?;
    Ok(SerialPacket::parse(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use controller_core::{AnalogStick, Buttons, ControllerState, DPad};

    fn sample_packet() -> SerialPacket {
        SerialPacket::from_state(&ControllerState {
            left_stick: AnalogStick::new(5, -6),
            right_stick: AnalogStick::new(0, 127),
            l2_trigger: 0,
            r2_trigger: 255,
            buttons: Buttons::CROSS | Buttons::SHARE,
            dpad: DPad::Right,
        })
    }

    #[test]
    fn test_encode_frame_has_no_interior_zero() {
        let mut buf = [0xEEu8; 32];
        let len = encode_frame(&sample_packet(), &mut buf).unwrap();

        assert!(len <= MAX_ENCODED_FRAME_SIZE);
        assert_eq!(buf[len - 1], FRAME_DELIMITER);
        assert!(!buf[..len - 1].contains(&FRAME_DELIMITER));
    }

    #[test]
    fn test_encode_frame_known_bytes() {
        // 0xAA 0x05 0xFA | 0x00 | 0x7F | 0x00 | 0xFF 0x01 0x01 0x03 0xD6
        let mut buf = [0u8; MAX_ENCODED_FRAME_SIZE];
        let len = encode_frame(&sample_packet(), &mut buf).unwrap();
        assert_eq!(
            &buf[..len],
            &[0x04, 0xAA, 0x05, 0xFA, 0x02, 0x7F, 0x06, 0xFF, 0x01, 0x01, 0x03, 0xD6, 0x00]
        );
    }

    #[test]
    fn test_encode_frame_buffer_too_small() {
        let mut buf = [0u8; MAX_ENCODED_FRAME_SIZE - 1];
        assert_eq!(
            encode_frame(&sample_packet(), &mut buf),
            Err(SerializeError::BufferTooSmall)
        );
    }

    #[test]
    fn test_decode_frame_accepts_encoded() {
        let packet = sample_packet();
        let mut buf = [0u8; MAX_ENCODED_FRAME_SIZE];
        let len = encode_frame(&packet, &mut buf).unwrap();
        assert_eq!(decode_frame(&buf[..len]), Ok(packet));
    }

    #[test]
    fn test_decode_frame_wrong_length() {
        // COBS of [0xAA, 0x01] + delimiter
        assert_eq!(
            decode_frame(&[0x03, 0xAA, 0x01, 0x00]),
            Err(FrameError::Packet(PacketError::Length))
        );
    }

    #[test]
    fn test_decode_frame_bad_cobs() {
        // Code byte claims 5 data bytes but the delimiter comes early
        assert_eq!(decode_frame(&[0x06, 0xAA, 0x00]), Err(FrameError::Cobs));
    }
}
