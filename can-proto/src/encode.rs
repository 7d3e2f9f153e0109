//! Sender side: build the two controller frames from a state.
//!
//! Used by transmitter firmware and by bench tools that replay a recorded
//! state onto the bus. The output is exactly what [`CanParser`] accepts.
//!
//! [`CanParser`]: crate::CanParser

use controller_core::{Buttons, CanFrame, ControllerState, DPad};

use crate::parser::{
    BYTE_BUTTONS, CAN_ID_ANALOG, CAN_ID_BUTTONS, DPAD_BIT_DOWN, DPAD_BIT_LEFT, DPAD_BIT_RIGHT,
    DPAD_BIT_UP, FACE_BIT_CIRCLE, FACE_BIT_CROSS, FACE_BIT_SQUARE, FACE_BIT_TRIANGLE,
};

/// Build the stick/trigger frame. Bytes 6 and 7 are zero.
#[must_use]
pub fn encode_analog(state: &ControllerState) -> CanFrame {
    CanFrame::new(
        CAN_ID_ANALOG,
        [
            state.left_stick.x as u8,
            state.left_stick.y as u8,
            state.right_stick.x as u8,
            state.right_stick.y as u8,
            state.l2_trigger,
            state.r2_trigger,
            0,
            0,
        ],
    )
}

/// Build the button/d-pad frame.
///
/// Diagonals set both of their flags. Buttons without a slot in the frame
/// (mask bits above Options) are not transmitted.
#[must_use]
pub fn encode_buttons(state: &ControllerState) -> CanFrame {
    let mut data = [0u8; 8];
    data[0] = encode_dpad(state.dpad);

    let face = [
        (Buttons::CROSS, FACE_BIT_CROSS),
        (Buttons::SQUARE, FACE_BIT_SQUARE),
        (Buttons::TRIANGLE, FACE_BIT_TRIANGLE),
        (Buttons::CIRCLE, FACE_BIT_CIRCLE),
    ];
    for (button, bit) in face {
        if state.is_pressed(button) {
            data[1] |= bit;
        }
    }

    for (slot, &button) in data[2..].iter_mut().zip(BYTE_BUTTONS.iter()) {
        *slot = u8::from(state.is_pressed(button));
    }

    CanFrame::new(CAN_ID_BUTTONS, data)
}

/// Direction flags for byte 0 of the button frame.
#[must_use]
pub fn encode_dpad(dpad: DPad) -> u8 {
    let mut bits = 0;
    if dpad.is_up() {
        bits |= DPAD_BIT_UP;
    }
    if dpad.is_down() {
        bits |= DPAD_BIT_DOWN;
    }
    if dpad.is_left() {
        bits |= DPAD_BIT_LEFT;
    }
    if dpad.is_right() {
        bits |= DPAD_BIT_RIGHT;
    }
    bits
}
