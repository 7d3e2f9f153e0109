//! Core controller types: Buttons, DPad, AnalogStick, ControllerState.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Button state represented as a bitfield.
///
/// The bit positions are the wire layout of the serial packet's button mask,
/// so a decoded mask can be stored as-is. Bits above [`Buttons::OPTIONS`] are
/// not named but are carried through untouched.
///
/// # Example
///
/// ```
/// use controller_core::Buttons;
///
/// let buttons = Buttons::CROSS | Buttons::CIRCLE;
/// assert!(buttons.contains(Buttons::CROSS));
/// assert!(buttons.contains(Buttons::CIRCLE));
/// assert!(!buttons.contains(Buttons::SQUARE));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const CROSS: Self = Self(1 << 0);
    pub const CIRCLE: Self = Self(1 << 1);
    pub const SQUARE: Self = Self(1 << 2);
    pub const TRIANGLE: Self = Self(1 << 3);
    pub const L1: Self = Self(1 << 4);
    pub const R1: Self = Self(1 << 5);
    pub const L3: Self = Self(1 << 6); // Left stick press
    pub const R3: Self = Self(1 << 7); // Right stick press
    pub const SHARE: Self = Self(1 << 8);
    pub const OPTIONS: Self = Self(1 << 9);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Every named button, in bit order.
    pub const ALL: [Self; 10] = [
        Self::CROSS,
        Self::CIRCLE,
        Self::SQUARE,
        Self::TRIANGLE,
        Self::L1,
        Self::R1,
        Self::L3,
        Self::R3,
        Self::SHARE,
        Self::OPTIONS,
    ];

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Check if the given button is pressed (alias for contains).
    #[inline]
    #[must_use]
    pub const fn is_pressed(self, button: Buttons) -> bool {
        self.contains(button)
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Direction pad reading: centered or one of eight compass directions.
///
/// The discriminants are the wire codes used by the serial packet.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DPad {
    #[default]
    None = 0,
    Up = 1,
    UpRight = 2,
    Right = 3,
    DownRight = 4,
    Down = 5,
    DownLeft = 6,
    Left = 7,
    UpLeft = 8,
}

impl DPad {
    /// Combine four independent direction flags into one reading.
    ///
    /// Diagonals win over single directions, checked in the order
    /// up-right, down-right, down-left, up-left, then up, right, down, left.
    /// An over-determined input (all four set) therefore reads as up-right.
    #[must_use]
    pub const fn from_flags(up: bool, down: bool, left: bool, right: bool) -> Self {
        if up && right {
            Self::UpRight
        } else if down && right {
            Self::DownRight
        } else if down && left {
            Self::DownLeft
        } else if up && left {
            Self::UpLeft
        } else if up {
            Self::Up
        } else if right {
            Self::Right
        } else if down {
            Self::Down
        } else if left {
            Self::Left
        } else {
            Self::None
        }
    }

    /// Look up a wire code. Codes above 8 have no meaning.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::None,
            1 => Self::Up,
            2 => Self::UpRight,
            3 => Self::Right,
            4 => Self::DownRight,
            5 => Self::Down,
            6 => Self::DownLeft,
            7 => Self::Left,
            8 => Self::UpLeft,
            _ => return None,
        })
    }

    /// Wire code of this reading.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up | Self::UpRight | Self::UpLeft)
    }

    #[must_use]
    pub const fn is_down(self) -> bool {
        matches!(self, Self::DownRight | Self::Down | Self::DownLeft)
    }

    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::DownLeft | Self::Left | Self::UpLeft)
    }

    #[must_use]
    pub const fn is_right(self) -> bool {
        matches!(self, Self::UpRight | Self::Right | Self::DownRight)
    }
}

impl TryFrom<u8> for DPad {
    type Error = u8;

    /// Fails with the offending code when it is not a valid reading.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

impl From<DPad> for u8 {
    fn from(dpad: DPad) -> Self {
        dpad.code()
    }
}

/// Analog stick with X/Y axes.
///
/// Range: [-128, 127], centered at 0.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogStick {
    pub x: i8,
    pub y: i8,
}

impl AnalogStick {
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub const NEUTRAL: Self = Self { x: 0, y: 0 };
}

/// One instant of controller input, independent of the transport it came from.
///
/// Decoders write into this in place; readers only query it. Nothing is
/// validated at read time: a [`DPad`] cannot hold an invalid code and every
/// other field accepts its full range.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    pub left_stick: AnalogStick,
    pub right_stick: AnalogStick,
    /// Left trigger (0-255).
    pub l2_trigger: u8,
    /// Right trigger (0-255).
    pub r2_trigger: u8,
    pub buttons: Buttons,
    pub dpad: DPad,
}

impl ControllerState {
    /// Create a neutral state (no buttons pressed, sticks centered, triggers released).
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            left_stick: AnalogStick::NEUTRAL,
            right_stick: AnalogStick::NEUTRAL,
            l2_trigger: 0,
            r2_trigger: 0,
            buttons: Buttons::NONE,
            dpad: DPad::None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_pressed(&self, button: Buttons) -> bool {
        self.buttons.is_pressed(button)
    }

    /// Current direction pad reading.
    #[inline]
    #[must_use]
    pub const fn dpad(&self) -> DPad {
        self.dpad
    }

    /// Up is held, alone or as part of a diagonal.
    #[must_use]
    pub const fn dpad_up(&self) -> bool {
        self.dpad.is_up()
    }

    #[must_use]
    pub const fn dpad_down(&self) -> bool {
        self.dpad.is_down()
    }

    #[must_use]
    pub const fn dpad_left(&self) -> bool {
        self.dpad.is_left()
    }

    #[must_use]
    pub const fn dpad_right(&self) -> bool {
        self.dpad.is_right()
    }

    #[must_use]
    pub const fn cross(&self) -> bool {
        self.is_pressed(Buttons::CROSS)
    }

    #[must_use]
    pub const fn circle(&self) -> bool {
        self.is_pressed(Buttons::CIRCLE)
    }

    #[must_use]
    pub const fn square(&self) -> bool {
        self.is_pressed(Buttons::SQUARE)
    }

    #[must_use]
    pub const fn triangle(&self) -> bool {
        self.is_pressed(Buttons::TRIANGLE)
    }

    #[must_use]
    pub const fn l1(&self) -> bool {
        self.is_pressed(Buttons::L1)
    }

    #[must_use]
    pub const fn r1(&self) -> bool {
        self.is_pressed(Buttons::R1)
    }

    #[must_use]
    pub const fn l3(&self) -> bool {
        self.is_pressed(Buttons::L3)
    }

    #[must_use]
    pub const fn r3(&self) -> bool {
        self.is_pressed(Buttons::R3)
    }

    #[must_use]
    pub const fn share(&self) -> bool {
        self.is_pressed(Buttons::SHARE)
    }

    #[must_use]
    pub const fn options(&self) -> bool {
        self.is_pressed(Buttons::OPTIONS)
    }
}
