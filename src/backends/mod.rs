//! Node backends for `lightgun`.
//!
//! Implementations of [`NodeSource`](crate::device::NodeSource) and
//! [`EventNode`](crate::device::EventNode).
//!
//! # Feature flags
//! - **`evdev`** — enables the Linux `/dev/input/eventN` backend (default).
//!
//! The virtual backend is always available; it needs no hardware and backs the
//! test suite.

#[cfg(all(feature = "evdev", target_os = "linux"))]
#[cfg_attr(docsrs, doc(cfg(all(feature = "evdev", target_os = "linux"))))]
pub mod linux;

pub mod virtual_input;
