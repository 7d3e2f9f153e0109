//! Property tests for the serial stream decoder.

use controller_core::{AnalogStick, Buttons, ControllerState, DPad};
use proptest::prelude::*;
use serial_proto::{
    encode_frame, SerialDecoder, SerialPacket, MAX_ENCODED_FRAME_SIZE, MAX_FRAME_SIZE,
    PACKET_SIZE,
};

fn any_state() -> impl Strategy<Value = ControllerState> {
    (
        any::<[i8; 4]>(),
        any::<u8>(),
        any::<u8>(),
        any::<u16>(),
        0u8..=8,
    )
        .prop_map(|([lx, ly, rx, ry], l2, r2, buttons, dpad)| ControllerState {
            left_stick: AnalogStick::new(lx, ly),
            right_stick: AnalogStick::new(rx, ry),
            l2_trigger: l2,
            r2_trigger: r2,
            buttons: Buttons(buttons),
            dpad: DPad::from_code(dpad).unwrap_or_default(),
        })
}

fn encode(packet: &SerialPacket) -> Vec<u8> {
    let mut buf = [0u8; MAX_ENCODED_FRAME_SIZE];
    let len = encode_frame(packet, &mut buf).unwrap();
    buf[..len].to_vec()
}

proptest! {
    #[test]
    fn prop_encoded_packet_decodes_exactly(state in any_state()) {
        let frame = encode(&SerialPacket::from_state(&state));
        let mut decoder = SerialDecoder::new();

        let mut successes = 0;
        for &byte in &frame {
            if decoder.process_byte(byte) {
                successes += 1;
            }
        }
        prop_assert_eq!(successes, 1);
        prop_assert_eq!(*decoder.state(), state);
    }

    #[test]
    fn prop_single_bit_flip_is_rejected(
        state in any_state(),
        byte in 0usize..PACKET_SIZE - 1,
        bit in 0u8..8,
    ) {
        let mut bytes = SerialPacket::from_state(&state).to_bytes();
        bytes[byte] ^= 1 << bit;
        let frame = encode(&SerialPacket::from_bytes(&bytes));

        let mut decoder = SerialDecoder::new();
        prop_assert!(!decoder.process_bytes(&frame));
        prop_assert_eq!(*decoder.state(), ControllerState::neutral());
    }

    #[test]
    fn prop_overflow_never_yields_spurious_frame(
        // No delimiter and no header byte, so the overflowed tail can never
        // form a packet by accident
        filler in proptest::collection::vec(1u8..SerialPacket::HEADER, MAX_FRAME_SIZE..4 * MAX_FRAME_SIZE),
        state in any_state(),
    ) {
        let mut decoder = SerialDecoder::new();
        for &byte in &filler {
            prop_assert!(!decoder.process_byte(byte));
        }
        prop_assert!(decoder.buffered_len() < MAX_FRAME_SIZE);
        prop_assert!(decoder.stats().overflows >= 1);

        // The delimiter closing the overflowed tail must not report success
        prop_assert!(!decoder.process_byte(0x00));
        prop_assert_eq!(*decoder.state(), ControllerState::neutral());

        // Next well-formed frame decodes normally
        prop_assert!(decoder.process_bytes(&encode(&SerialPacket::from_state(&state))));
        prop_assert_eq!(*decoder.state(), state);
    }

    #[test]
    fn prop_garbage_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let mut decoder = SerialDecoder::new();
        let decoded = decoder.process_bytes_with(&bytes, |state| {
            assert!(DPad::from_code(state.dpad.code()).is_some());
        });
        prop_assert!(decoder.buffered_len() < MAX_FRAME_SIZE);
        prop_assert_eq!(decoder.stats().frames_decoded as usize, decoded);
    }

    #[test]
    fn prop_every_frame_in_batch_is_reported(states in proptest::collection::vec(any_state(), 1..8)) {
        let stream: Vec<u8> = states
            .iter()
            .flat_map(|s| encode(&SerialPacket::from_state(s)))
            .collect();

        let mut seen = Vec::new();
        let mut decoder = SerialDecoder::new();
        let count = decoder.process_bytes_with(&stream, |s| seen.push(*s));

        prop_assert_eq!(count, states.len());
        prop_assert_eq!(&seen, &states);
        prop_assert_eq!(decoder.state(), states.last().unwrap());
    }
}
