//! Device metadata snapshot.
//!
//! [`DeviceMeta`] is a lightweight, cloneable description of the located device,
//! suitable for logging and display. Backends fill in what they know; unknown
//! fields stay `None`.
//!
//! ## Persistence notes
//! - `vid`/`pid` are stable and identify the model.
//! - `path` (`/dev/input/eventN`) is assigned by the kernel and changes across
//!   reconnects; treat it as diagnostic only.

use serde::{Deserialize, Serialize};

/// Identity block returned by the device (`struct input_id`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceId {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// Short bus hint such as `"usb"` or `"bluetooth"`.
    pub bus: Option<String>,

    /// USB Vendor ID (VID).
    pub vid: Option<u16>,

    /// USB Product ID (PID).
    pub pid: Option<u16>,

    /// Firmware/driver version from the identity block.
    pub version: Option<u16>,

    /// Human-readable device name reported by the kernel driver.
    pub name: Option<String>,

    /// Node path the device was opened from.
    pub path: Option<String>,
}

impl DeviceMeta {
    pub fn from_id(id: DeviceId, name: Option<String>, path: Option<String>) -> Self {
        Self {
            bus: bus_name(id.bustype).map(str::to_string),
            vid: Some(id.vendor),
            pid: Some(id.product),
            version: Some(id.version),
            name,
            path,
        }
    }
}

/// `BUS_*` values from `linux/input.h` that a light gun can plausibly sit on.
fn bus_name(bustype: u16) -> Option<&'static str> {
    match bustype {
        0x03 => Some("usb"),
        0x05 => Some("bluetooth"),
        0x06 => Some("virtual"),
        0x11 => Some("i8042"),
        _ => None,
    }
}

impl std::fmt::Display for DeviceMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{:04x}:{:04x}]",
            self.name.as_deref().unwrap_or("Unknown"),
            self.vid.unwrap_or(0),
            self.pid.unwrap_or(0)
        )?;
        if let Some(path) = &self.path {
            write!(f, " at {path}")?;
        }
        Ok(())
    }
}
