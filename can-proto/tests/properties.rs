//! Property tests for the bus frame decoder.

use can_proto::{encode_analog, encode_buttons, CanParser, CAN_ID_ANALOG, CAN_ID_BUTTONS};
use controller_core::{AnalogStick, Buttons, ControllerState, DPad};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_analog_decode_is_idempotent(data in any::<[u8; 8]>()) {
        let mut once = CanParser::new();
        prop_assert!(once.parse(CAN_ID_ANALOG, &data));

        let mut twice = CanParser::new();
        twice.parse(CAN_ID_ANALOG, &data);
        twice.parse(CAN_ID_ANALOG, &data);

        prop_assert_eq!(once.state(), twice.state());
    }

    #[test]
    fn prop_unknown_ids_touch_nothing(
        id in any::<u32>().prop_filter("controller id", |id| *id != CAN_ID_ANALOG && *id != CAN_ID_BUTTONS),
        seed in any::<[u8; 8]>(),
        data in any::<[u8; 8]>(),
    ) {
        let mut parser = CanParser::new();
        parser.parse(CAN_ID_ANALOG, &seed);
        parser.parse(CAN_ID_BUTTONS, &seed);
        let before = *parser.state();

        prop_assert!(!parser.parse(id, &data));
        prop_assert_eq!(*parser.state(), before);
    }

    #[test]
    fn prop_button_frame_dpad_is_always_valid(data in any::<[u8; 8]>()) {
        let mut parser = CanParser::new();
        prop_assert!(parser.parse(CAN_ID_BUTTONS, &data));
        prop_assert!(DPad::from_code(parser.state().dpad.code()).is_some());
        // Only the ten named buttons can ever be set from the bus
        prop_assert_eq!(parser.state().buttons.raw() & !0x03FF, 0);
    }

    #[test]
    fn prop_encoded_frames_decode_back(
        axes in any::<[i8; 4]>(),
        triggers in any::<[u8; 2]>(),
        buttons in 0u16..=0x03FF,
        dpad in 0u8..=8,
    ) {
        let state = ControllerState {
            left_stick: AnalogStick::new(axes[0], axes[1]),
            right_stick: AnalogStick::new(axes[2], axes[3]),
            l2_trigger: triggers[0],
            r2_trigger: triggers[1],
            buttons: Buttons(buttons),
            dpad: DPad::from_code(dpad).unwrap_or_default(),
        };

        let mut parser = CanParser::new();
        for frame in [encode_analog(&state), encode_buttons(&state)] {
            prop_assert!(parser.parse(frame.id, &frame.data));
        }
        prop_assert_eq!(*parser.state(), state);
    }
}
