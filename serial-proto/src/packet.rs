//! Fixed 11-byte controller packet carried by the serial stream.
//!
//! # Layout
//!
//! ```text
//! offset  field        type
//!   0     header       u8   always 0xAA
//!   1     left_x       i8
//!   2     left_y       i8
//!   3     right_x      i8
//!   4     right_y      i8
//!   5     l2_trigger   u8
//!   6     r2_trigger   u8
//!   7-8   buttons      u16  little-endian
//!   9     dpad         u8   0..=8
//!  10     checksum     u8   XOR of bytes 0..=9
//! ```
//!
//! Fields are extracted one byte at a time; nothing relies on the memory
//! layout of [`SerialPacket`].

use controller_core::{AnalogStick, Buttons, ControllerState, DPad};

/// Encoded size of a packet, before escape coding.
pub const PACKET_SIZE: usize = 11;

/// Offset of the checksum trailer.
const CHECKSUM_OFFSET: usize = PACKET_SIZE - 1;

/// Error type for packet validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Input is not exactly [`PACKET_SIZE`] bytes.
    Length,
    /// First byte is not [`SerialPacket::HEADER`].
    Header,
    /// Stored checksum does not match the recomputed one.
    Checksum,
    /// Direction code outside 0..=8.
    Direction,
}

/// Wire image of one packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialPacket {
    pub header: u8,
    pub left_x: i8,
    pub left_y: i8,
    pub right_x: i8,
    pub right_y: i8,
    pub l2_trigger: u8,
    pub r2_trigger: u8,
    pub buttons: u16,
    pub dpad: u8,
    pub checksum: u8,
}

impl SerialPacket {
    /// Header sentinel.
    pub const HEADER: u8 = 0xAA;

    /// Build a packet for `state` with header and checksum filled in.
    #[must_use]
    pub fn from_state(state: &ControllerState) -> Self {
        let mut packet = Self {
            header: Self::HEADER,
            left_x: state.left_stick.x,
            left_y: state.left_stick.y,
            right_x: state.right_stick.x,
            right_y: state.right_stick.y,
            l2_trigger: state.l2_trigger,
            r2_trigger: state.r2_trigger,
            buttons: state.buttons.raw(),
            dpad: state.dpad.code(),
            checksum: 0,
        };
        packet.checksum = packet.calc_checksum();
        packet
    }

    /// Read the fields of an 11-byte image without validating anything.
    #[must_use]
    pub const fn from_bytes(bytes: &[u8; PACKET_SIZE]) -> Self {
        Self {
            header: bytes[0],
            left_x: bytes[1] as i8,
            left_y: bytes[2] as i8,
            right_x: bytes[3] as i8,
            right_y: bytes[4] as i8,
            l2_trigger: bytes[5],
            r2_trigger: bytes[6],
            buttons: u16::from_le_bytes([bytes[7], bytes[8]]),
            dpad: bytes[9],
            checksum: bytes[10],
        }
    }

    /// Parse and validate a decoded frame.
    ///
    /// A packet is accepted when it is exactly [`PACKET_SIZE`] bytes long, starts
    /// with [`Self::HEADER`], and carries a matching checksum.
    pub fn parse(bytes: &[u8]) -> Result<Self, PacketError> {
        let bytes: &[u8; PACKET_SIZE] = bytes.try_into().map_err(|_| PacketError::Length)?;
        let packet = Self::from_bytes(bytes);

        if packet.header != Self::HEADER {
            return Err(PacketError::Header);
        }
        if !packet.verify_checksum() {
            return Err(PacketError::Checksum);
        }
        Ok(packet)
    }

    /// Wire image, checksum byte included as stored.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let [buttons_lo, buttons_hi] = self.buttons.to_le_bytes();
        [
            self.header,
            self.left_x as u8,
            self.left_y as u8,
            self.right_x as u8,
            self.right_y as u8,
            self.l2_trigger,
            self.r2_trigger,
            buttons_lo,
            buttons_hi,
            self.dpad,
            self.checksum,
        ]
    }

    /// XOR of every byte from the header through the direction code.
    #[must_use]
    pub fn calc_checksum(&self) -> u8 {
        let bytes = self.to_bytes();
        calculate_checksum(&bytes[..CHECKSUM_OFFSET])
    }

    #[must_use]
    pub fn verify_checksum(&self) -> bool {
        self.calc_checksum() == self.checksum
    }

    /// Project the packet into a controller state.
    ///
    /// Fails only if the direction code has no [`DPad`] reading.
    pub fn to_controller_state(&self) -> Result<ControllerState, PacketError> {
        let dpad = DPad::from_code(self.dpad).ok_or(PacketError::Direction)?;
        Ok(ControllerState {
            left_stick: AnalogStick::new(self.left_x, self.left_y),
            right_stick: AnalogStick::new(self.right_x, self.right_y),
            l2_trigger: self.l2_trigger,
            r2_trigger: self.r2_trigger,
            buttons: Buttons(self.buttons),
            dpad,
        })
    }
}

/// Running XOR of the given bytes.
#[inline]
#[must_use]
pub fn calculate_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc ^ b)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Packet used throughout: LX=5, LY=-6, RX=0, RY=127, L2=0, R2=255,
    /// Cross+Share, DPad::Right.
    const SAMPLE: [u8; PACKET_SIZE] = [
        0xAA, 0x05, 0xFA, 0x00, 0x7F, 0x00, 0xFF, 0x01, 0x01, 0x03, 0xD6,
    ];

    #[test]
    fn test_sample_checksum() {
        assert_eq!(calculate_checksum(&SAMPLE[..10]), SAMPLE[10]);
    }

    #[test]
    fn test_parse_sample() {
        let packet = SerialPacket::parse(&SAMPLE).unwrap();
        assert_eq!(packet.left_x, 5);
        assert_eq!(packet.left_y, -6);
        assert_eq!(packet.right_y, 127);
        assert_eq!(packet.r2_trigger, 255);
        assert_eq!(packet.buttons, 0x0101);

        let state = packet.to_controller_state().unwrap();
        assert!(state.cross());
        assert!(state.share());
        assert!(!state.circle());
        assert_eq!(state.dpad, DPad::Right);
    }

    #[test]
    fn test_buttons_are_little_endian() {
        let mut bytes = SAMPLE;
        bytes[7] = 0x00;
        bytes[8] = 0x02;
        bytes[10] = calculate_checksum(&bytes[..10]);

        let state = SerialPacket::parse(&bytes)
            .unwrap()
            .to_controller_state()
            .unwrap();
        assert_eq!(state.buttons, Buttons::OPTIONS);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(SerialPacket::parse(&SAMPLE[..10]), Err(PacketError::Length));
        assert_eq!(SerialPacket::parse(&[]), Err(PacketError::Length));

        let mut long = [0u8; PACKET_SIZE + 1];
        long[..PACKET_SIZE].copy_from_slice(&SAMPLE);
        assert_eq!(SerialPacket::parse(&long), Err(PacketError::Length));
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        let mut bytes = SAMPLE;
        bytes[0] = 0xAB;
        // Keep checksum consistent so only the header is wrong
        bytes[10] = calculate_checksum(&bytes[..10]);
        assert_eq!(SerialPacket::parse(&bytes), Err(PacketError::Header));
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        let mut bytes = SAMPLE;
        bytes[10] ^= 0x01;
        assert_eq!(SerialPacket::parse(&bytes), Err(PacketError::Checksum));
    }

    #[test]
    fn test_invalid_direction_code() {
        let mut bytes = SAMPLE;
        bytes[9] = 9;
        bytes[10] = calculate_checksum(&bytes[..10]);

        let packet = SerialPacket::parse(&bytes).unwrap();
        assert_eq!(packet.to_controller_state(), Err(PacketError::Direction));
    }

    #[test]
    fn test_from_state_round_trip() {
        let packet = SerialPacket::parse(&SAMPLE).unwrap();
        let state = packet.to_controller_state().unwrap();
        let rebuilt = SerialPacket::from_state(&state);
        assert_eq!(rebuilt, packet);
        assert_eq!(rebuilt.to_bytes(), SAMPLE);
    }

    #[test]
    fn test_neutral_packet() {
        let packet = SerialPacket::from_state(&ControllerState::neutral());
        assert_eq!(
            packet.to_bytes(),
            [0xAA, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xAA]
        );
    }
}
