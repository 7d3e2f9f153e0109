//! CAN controller frame parser.
//!
//! The controller publishes two independent 8-byte frames:
//!
//! ```text
//! ID 50 (analog):  [LX] [LY] [RX] [RY] [L2] [R2] [--] [--]
//! ID 51 (buttons): [dpad bits] [face bits] [L1] [R1] [L3] [R3] [OPT] [SHR]
//! ```
//!
//! Stick axes are signed bytes, triggers unsigned. In the button frame byte 0
//! carries the direction flags (bit0 down, bit1 left, bit2 up, bit3 right),
//! byte 1 the face buttons (bit0 cross, bit1 square, bit2 triangle,
//! bit3 circle), and each of bytes 2..=7 is one button, pressed when non-zero.
//!
//! The two frames are never fused: analog and button data may be arbitrarily
//! stale relative to each other.

use controller_core::{AnalogStick, Buttons, ControllerState, DPad, CAN_PAYLOAD_LEN};

/// Identifier of the stick/trigger frame.
pub const CAN_ID_ANALOG: u32 = 50;

/// Identifier of the button/d-pad frame.
pub const CAN_ID_BUTTONS: u32 = 51;

/// Direction flag bits in byte 0 of the button frame.
pub const DPAD_BIT_DOWN: u8 = 1 << 0;
pub const DPAD_BIT_LEFT: u8 = 1 << 1;
pub const DPAD_BIT_UP: u8 = 1 << 2;
pub const DPAD_BIT_RIGHT: u8 = 1 << 3;

/// Face button bits in byte 1 of the button frame.
pub const FACE_BIT_CROSS: u8 = 1 << 0;
pub const FACE_BIT_SQUARE: u8 = 1 << 1;
pub const FACE_BIT_TRIANGLE: u8 = 1 << 2;
pub const FACE_BIT_CIRCLE: u8 = 1 << 3;

/// Buttons carried one per byte in bytes 2..=7 of the button frame.
pub const BYTE_BUTTONS: [Buttons; 6] = [
    Buttons::L1,
    Buttons::R1,
    Buttons::L3,
    Buttons::R3,
    Buttons::OPTIONS,
    Buttons::SHARE,
];

/// Stateless decoder of controller bus frames into a [`ControllerState`].
///
/// The only state kept across calls is the decoded controller state itself.
#[derive(Debug, Clone, Default)]
pub struct CanParser {
    state: ControllerState,
}

impl CanParser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ControllerState::neutral(),
        }
    }

    /// Decode one bus frame.
    ///
    /// Returns `true` if `id` is one of the controller identifiers, in which
    /// case every field carried by that frame has been overwritten. Any other
    /// identifier leaves the state untouched and returns `false`.
    pub fn parse(&mut self, id: u32, data: &[u8; CAN_PAYLOAD_LEN]) -> bool {
        match id {
            CAN_ID_ANALOG => {
                let [lx, ly, rx, ry, l2, r2, ..] = *data;
                self.state.left_stick = AnalogStick::new(lx as i8, ly as i8);
                self.state.right_stick = AnalogStick::new(rx as i8, ry as i8);
                self.state.l2_trigger = l2;
                self.state.r2_trigger = r2;
                true
            }
            CAN_ID_BUTTONS => {
                self.state.dpad = decode_dpad(data[0]);
                self.state.buttons = decode_buttons(data);
                true
            }
            _ => {
                trace!("ignoring CAN id {}", id);
                false
            }
        }
    }

    /// Get the decoded controller state.
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
}

/// Decode the direction flags of byte 0 (upper nibble ignored).
#[inline]
#[must_use]
pub fn decode_dpad(bits: u8) -> DPad {
    DPad::from_flags(
        bits & DPAD_BIT_UP != 0,
        bits & DPAD_BIT_DOWN != 0,
        bits & DPAD_BIT_LEFT != 0,
        bits & DPAD_BIT_RIGHT != 0,
    )
}

/// Decode the complete button mask of a button frame.
#[must_use]
pub fn decode_buttons(data: &[u8; CAN_PAYLOAD_LEN]) -> Buttons {
    let face = data[1];
    let mut buttons = Buttons::NONE;
    buttons.set(Buttons::CROSS, face & FACE_BIT_CROSS != 0);
    buttons.set(Buttons::SQUARE, face & FACE_BIT_SQUARE != 0);
    buttons.set(Buttons::TRIANGLE, face & FACE_BIT_TRIANGLE != 0);
    buttons.set(Buttons::CIRCLE, face & FACE_BIT_CIRCLE != 0);

    for (&byte, &button) in data[2..].iter().zip(BYTE_BUTTONS.iter()) {
        buttons.set(button, byte != 0);
    }
    buttons
}
