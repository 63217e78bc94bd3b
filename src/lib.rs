//! lightgun — discovery and polling for USB light guns on Linux evdev.
//!
//! The crate finds one absolute-positioning "light gun" among the
//! `/dev/input/eventN` nodes, calibrates its two axes, and folds the raw
//! event stream into a small typed [`DeviceState`] (X/Y axes plus
//! left/middle/right buttons).
//!
//! The caller owns the cadence:
//! 1. [`Locator::locate`] scans a bounded candidate range and fills a [`DeviceHandle`].
//! 2. [`DeviceHandle::poll`] drains whatever is buffered, without blocking.
//! 3. [`DeviceHandle::close`] releases the stream (also done on drop).
//!
//! # Example
//! ```no_run
//! use lightgun::{DeviceHandle, Locator, LocatorConfig, ProductFilter};
//!
//! let locator = Locator::evdev(LocatorConfig::default());
//! let mut gun = DeviceHandle::new();
//! if locator.locate(ProductFilter::Any, &mut gun) {
//!     loop {
//!         if gun.poll() > 0 {
//!             let s = gun.state();
//!             println!("x={} y={} trigger={}", s.axes[0].value, s.axes[1].value, s.buttons[0].pressed);
//!         }
//!         std::thread::sleep(std::time::Duration::from_millis(16));
//!     }
//! }
//! ```
//!
//! # Feature flags
//! - **`evdev`** (default) — the Linux `/dev/input` backend.
//! - **`debug-log`** — diagnostic logging through the `log` facade in debug builds.

/// Diagnostic logging, compiled in only for `debug-log` debug builds.
macro_rules! diag {
    ($lvl:ident, $($arg:tt)+) => {
        if cfg!(all(feature = "debug-log", debug_assertions)) {
            log::$lvl!($($arg)+);
        }
    };
}

pub mod backends;
pub mod bits;
pub mod calibrate;
pub mod codes;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod handle;
pub mod locator;
pub mod metadata;
pub mod poller;
pub mod snapshot;
pub mod state;

pub use config::{LocatorConfig, ProductFilter};
pub use device::{EventNode, NodeSource};
pub use error::{ConfigError, ProbeError};
pub use event::{InputKind, RawEvent};
pub use handle::DeviceHandle;
pub use locator::{CandidateReport, Locator, Verdict};
pub use metadata::DeviceMeta;
pub use snapshot::Snapshot;
pub use state::{Axis, Button, DeviceState};
