//! Raw evdev records and the deltas they translate to.
//!
//! A device delivers [`RawEvent`]s (type, code, value). Only a handful of them
//! mean anything for a light gun; [`RawEvent::translate`] maps those onto an
//! [`InputKind`] delta addressed by state slot, and drops the rest.
//!
//! ## Value conventions
//! - **Axes:** raw device units, verbatim. Nothing is clamped to the calibrated
//!   range; a misbehaving device can report values outside it.
//! - **Buttons:** any non-zero value is "pressed" (autorepeat `2` included).

use crate::codes;

/// One fixed-size record from the event stream, minus its timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawEvent {
    /// Event type (`EV_*`).
    pub kind: u16,
    /// Event code within the type (`ABS_*`, `BTN_*`, ...).
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub const fn new(kind: u16, code: u16, value: i32) -> Self {
        Self { kind, code, value }
    }

    pub const fn abs(code: u16, value: i32) -> Self {
        Self::new(codes::EV_ABS, code, value)
    }

    pub const fn key(code: u16, value: i32) -> Self {
        Self::new(codes::EV_KEY, code, value)
    }

    /// The state update this record stands for, if any.
    ///
    /// Unknown types and unmapped codes yield `None`; they are not errors.
    pub fn translate(&self) -> Option<InputKind> {
        match self.kind {
            codes::EV_ABS => codes::axis_index(self.code).map(|axis| InputKind::AxisMoved {
                axis,
                value: self.value,
            }),
            codes::EV_KEY => codes::button_index(self.code).map(|button| InputKind::ButtonChanged {
                button,
                pressed: self.value != 0,
            }),
            _ => None,
        }
    }
}

/// A single state update, addressed by slot in [`DeviceState`](crate::DeviceState).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// `axes[axis].value = value`.
    AxisMoved { axis: usize, value: i32 },
    /// `buttons[button].pressed = pressed`.
    ButtonChanged { button: usize, pressed: bool },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::*;

    #[test]
    fn axis_codes_map_to_slots() {
        assert_eq!(
            RawEvent::abs(ABS_Y, 300).translate(),
            Some(InputKind::AxisMoved { axis: IDX_Y, value: 300 })
        );
        assert_eq!(RawEvent::abs(0x28, 1).translate(), None);
    }

    #[test]
    fn any_nonzero_key_value_is_pressed() {
        for (value, pressed) in [(0, false), (1, true), (2, true), (-1, true)] {
            assert_eq!(
                RawEvent::key(BTN_RIGHT, value).translate(),
                Some(InputKind::ButtonChanged { button: IDX_RIGHT, pressed })
            );
        }
    }

    #[test]
    fn other_types_are_dropped() {
        assert_eq!(RawEvent::new(EV_SYN, 0, 0).translate(), None);
        assert_eq!(RawEvent::new(EV_REL, ABS_X, 5).translate(), None);
        // BTN_LEFT's number under EV_ABS is not a button.
        assert_eq!(RawEvent::new(EV_ABS, BTN_LEFT, 1).translate(), None);
    }
}
