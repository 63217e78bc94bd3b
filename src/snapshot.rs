//! Point-in-time copy of a located device.
//!
//! [`Snapshot`] is an **owned**, read-only view of a handle's state at a point
//! in time (typically "this frame"). It is the sanctioned way to move state out
//! of a live [`DeviceHandle`](crate::DeviceHandle); the handle itself keeps
//! mutating in place on every poll.
//!
//! # Example
//! ```no_run
//! use lightgun::{DeviceHandle, Locator, LocatorConfig, ProductFilter};
//!
//! let locator = Locator::evdev(LocatorConfig::default());
//! let mut gun = DeviceHandle::new();
//! if locator.locate(ProductFilter::Any, &mut gun) {
//!     gun.poll();
//!     println!("{}", gun.snapshot().to_json().unwrap());
//! }
//! ```

use crate::metadata::DeviceMeta;
use crate::state::DeviceState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub meta: DeviceMeta,
    pub state: DeviceState,
}

impl Snapshot {
    /// Serialize to a compact JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Normalized `(x, y)` in `[-1, 1]`, if both axes have a usable range.
    pub fn position(&self) -> Option<(f32, f32)> {
        Some((self.state.x().normalized()?, self.state.y().normalized()?))
    }
}
