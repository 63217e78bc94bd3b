//! Typed light gun state.
//!
//! Identity is positional: `axes` is always `[X, Y]` and `buttons` is always
//! `[left, middle, right]` (see [`codes`](crate::codes) for the slot constants).
//! [`DeviceState`] is `Clone` but deliberately not `Copy`; take an explicit
//! [`Snapshot`](crate::Snapshot) when you need a copy detached from the handle.

use crate::codes;
use crate::event::InputKind;
use serde::{Deserialize, Serialize};

/// One absolute axis: calibrated bounds plus the latest raw reading.
///
/// `min <= value <= max` is expected, not enforced. Treat `value` as untrusted telemetry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub min: i32,
    pub max: i32,
    pub value: i32,
}

impl Axis {
    /// Axis with the given range and `value` at the calibration midpoint `(max - min) / 2`.
    pub fn calibrated(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            value: midpoint(min, max),
        }
    }

    /// Current value mapped onto `[-1.0, 1.0]` over `min..=max`.
    ///
    /// `None` for an empty or inverted range. Out-of-range readings are clamped.
    pub fn normalized(&self) -> Option<f32> {
        if self.max <= self.min {
            return None;
        }
        let span = (self.max as f64) - (self.min as f64);
        let t = ((self.value as f64) - (self.min as f64)) / span;
        Some((t * 2.0 - 1.0).clamp(-1.0, 1.0) as f32)
    }
}

/// Midpoint used at calibration time: `(max - min) / 2`, integer division.
///
/// Note this is half the span, not the centre of `[min, max]`; the two agree
/// for the usual `min == 0` devices.
pub fn midpoint(min: i32, max: i32) -> i32 {
    ((max as i64 - min as i64) / 2) as i32
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub pressed: bool,
}

/// Exactly two axes and three buttons, in fixed order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub axes: [Axis; 2],
    pub buttons: [Button; 3],
}

impl DeviceState {
    /// Apply one delta in place.
    pub fn apply(&mut self, kind: InputKind) {
        match kind {
            InputKind::AxisMoved { axis, value } => self.axes[axis].value = value,
            InputKind::ButtonChanged { button, pressed } => self.buttons[button].pressed = pressed,
        }
    }

    pub fn x(&self) -> &Axis {
        &self.axes[codes::IDX_X]
    }

    pub fn y(&self) -> &Axis {
        &self.axes[codes::IDX_Y]
    }

    /// Left button; the trigger on most guns.
    pub fn trigger(&self) -> bool {
        self.buttons[codes::IDX_LEFT].pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_half_span() {
        assert_eq!(Axis::calibrated(0, 1023).value, 511);
        assert_eq!(Axis::calibrated(100, 200).value, 50);
        assert_eq!(Axis::calibrated(-32768, 32767).value, 32767);
    }

    #[test]
    fn normalized_covers_range() {
        let mut a = Axis::calibrated(0, 1000);
        a.value = 0;
        assert_eq!(a.normalized(), Some(-1.0));
        a.value = 1000;
        assert_eq!(a.normalized(), Some(1.0));
        a.value = 500;
        assert_eq!(a.normalized(), Some(0.0));
        a.value = 5000;
        assert_eq!(a.normalized(), Some(1.0));
        assert_eq!(Axis::calibrated(5, 5).normalized(), None);
    }

    #[test]
    fn apply_writes_slot() {
        let mut s = DeviceState::default();
        s.apply(InputKind::AxisMoved { axis: 1, value: -4 });
        s.apply(InputKind::ButtonChanged { button: 2, pressed: true });
        assert_eq!(s.y().value, -4);
        assert!(s.buttons[2].pressed);
        assert!(!s.trigger());
    }
}
