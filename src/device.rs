//! Backend seam: what the locator and poller need from a device node.
//!
//! [`NodeSource`] addresses candidate nodes by index (`eventN`), [`EventNode`]
//! is one open node. The Linux backend implements both over `/dev/input`; the
//! virtual backend implements them in memory so the whole scan/poll pipeline
//! runs without hardware.

use crate::bits::{CodeBits, EventTypeBits};
use crate::error::ProbeError;
use crate::event::RawEvent;
use crate::metadata::DeviceId;

/// `struct input_absinfo`, the part we use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbsInfo {
    pub value: i32,
    pub minimum: i32,
    pub maximum: i32,
}

/// An open, non-blocking, read-only device stream.
///
/// Dropping the node closes it.
pub trait EventNode: Send {
    /// Coarse capabilities: which event types the device emits.
    fn event_types(&self) -> Result<EventTypeBits, ProbeError>;

    /// Fine capabilities: which codes the device emits for `kind`.
    fn event_codes(&self, kind: u16) -> Result<CodeBits, ProbeError>;

    /// Identity block (bus, vendor, product, version).
    fn identity(&self) -> Result<DeviceId, ProbeError>;

    /// Range information for one absolute axis.
    fn abs_info(&self, axis: u16) -> Result<AbsInfo, ProbeError>;

    /// Read one record without blocking.
    ///
    /// `Ok(None)` means nothing is buffered right now.
    fn read_event(&mut self) -> Result<Option<RawEvent>, ProbeError>;

    /// Driver-reported name, when the device answers.
    fn name(&self) -> Option<String> {
        None
    }
}

/// Addresses candidate nodes by a small non-negative index.
pub trait NodeSource {
    /// Human-readable location of candidate `index`, e.g. `/dev/input/event3`.
    fn path(&self, index: u32) -> String;

    /// Open candidate `index` non-blocking and read-only.
    fn open(&self, index: u32) -> Result<Box<dyn EventNode>, ProbeError>;
}

impl<S: NodeSource + ?Sized> NodeSource for &S {
    fn path(&self, index: u32) -> String {
        (**self).path(index)
    }

    fn open(&self, index: u32) -> Result<Box<dyn EventNode>, ProbeError> {
        (**self).open(index)
    }
}
