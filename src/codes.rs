//! Event type/code numbers and the fixed light gun tables.
//!
//! Values mirror `linux/input-event-codes.h`; they are part of the kernel ABI
//! and identical on every architecture.

/// Synchronization events.
pub const EV_SYN: u16 = 0x00;
/// Keys and buttons.
pub const EV_KEY: u16 = 0x01;
/// Relative axes.
pub const EV_REL: u16 = 0x02;
/// Absolute axes.
pub const EV_ABS: u16 = 0x03;
pub const EV_MAX: u16 = 0x1f;
pub const EV_CNT: usize = EV_MAX as usize + 1;

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_MAX: u16 = 0x3f;
pub const ABS_CNT: usize = ABS_MAX as usize + 1;

pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const BTN_MIDDLE: u16 = 0x112;
pub const KEY_MAX: u16 = 0x2ff;
pub const KEY_CNT: usize = KEY_MAX as usize + 1;

/// USB vendor id of the supported light guns.
pub const LIGHTGUN_VENDOR_ID: u16 = 0xd209;

/// How many `eventN` nodes a scan visits by default.
pub const DEFAULT_MAX_CANDIDATES: u32 = 20;

/// Absolute axes, in state order: `axes[0]` is X, `axes[1]` is Y.
pub const REQUIRED_AXES: [u16; 2] = [ABS_X, ABS_Y];

/// Buttons, in state order: left, middle, right.
pub const REQUIRED_BUTTONS: [u16; 3] = [BTN_LEFT, BTN_MIDDLE, BTN_RIGHT];

pub const IDX_X: usize = 0;
pub const IDX_Y: usize = 1;
pub const IDX_LEFT: usize = 0;
pub const IDX_MIDDLE: usize = 1;
pub const IDX_RIGHT: usize = 2;

/// State slot for an absolute axis code, if it is one we track.
#[inline]
pub fn axis_index(code: u16) -> Option<usize> {
    REQUIRED_AXES.iter().position(|&c| c == code)
}

/// State slot for a button code, if it is one we track.
#[inline]
pub fn button_index(code: u16) -> Option<usize> {
    REQUIRED_BUTTONS.iter().position(|&c| c == code)
}
