//! In-memory evdev bus.
//!
//! [`VirtualBus`] stands in for `/dev/input`: each index holds a
//! [`VirtualDevice`], a permission-denied node, a broken node, or nothing.
//! Devices describe their identity, capabilities, and axis ranges, and carry a
//! shared event queue that tests (or demos) feed while the locator/poller hold
//! the opened node.
//!
//! The bus counts how many of its nodes are currently open and which indices
//! were tried, so callers can check that a scan stayed in bounds and closed
//! everything it rejected.

use crate::bits::{CodeBits, EventTypeBits};
use crate::codes;
use crate::device::{AbsInfo, EventNode, NodeSource};
use crate::error::ProbeError;
use crate::event::RawEvent;
use crate::metadata::DeviceId;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Size of `struct input_event` on 64-bit Linux; used for simulated short reads.
const RECORD_SIZE: usize = 24;

/// Queries a [`VirtualDevice`] can be told to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    EventTypes,
    EventCodes,
    Identity,
    AbsInfo,
}

#[derive(Clone, Debug)]
enum Feed {
    Event(RawEvent),
    Fault,
    Short(usize),
}

/// A simulated device. Clones share the same event queue.
#[derive(Clone, Debug)]
pub struct VirtualDevice {
    id: DeviceId,
    name: String,
    types: EventTypeBits,
    codes: HashMap<u16, CodeBits>,
    abs: HashMap<u16, AbsInfo>,
    failing: HashSet<Query>,
    queue: Arc<Mutex<VecDeque<Feed>>>,
}

impl VirtualDevice {
    /// A bare device with the given identity and no capabilities.
    pub fn new(vendor: u16, product: u16, name: &str) -> Self {
        Self {
            id: DeviceId {
                bustype: 0x03,
                vendor,
                product,
                version: 1,
            },
            name: name.to_string(),
            types: EventTypeBits::new(),
            codes: HashMap::new(),
            abs: HashMap::new(),
            failing: HashSet::new(),
            queue: Arc::default(),
        }
    }

    /// A complete light gun: X/Y over `0..=1023`, all three buttons.
    pub fn lightgun(product: u16) -> Self {
        Self::new(codes::LIGHTGUN_VENDOR_ID, product, "Virtual Light Gun")
            .with_axis(codes::ABS_X, 0, 1023)
            .with_axis(codes::ABS_Y, 0, 1023)
            .with_button(codes::BTN_LEFT)
            .with_button(codes::BTN_MIDDLE)
            .with_button(codes::BTN_RIGHT)
    }

    /// Declare an absolute axis with its range.
    pub fn with_axis(mut self, code: u16, min: i32, max: i32) -> Self {
        self.declare(codes::EV_ABS, code);
        self.abs.insert(
            code,
            AbsInfo {
                value: 0,
                minimum: min,
                maximum: max,
            },
        );
        self
    }

    /// Declare an absolute axis whose range query fails.
    pub fn with_axis_without_info(mut self, code: u16) -> Self {
        self.declare(codes::EV_ABS, code);
        self.abs.remove(&code);
        self
    }

    pub fn with_button(mut self, code: u16) -> Self {
        self.declare(codes::EV_KEY, code);
        self
    }

    /// Declare `kind` and `code` in the capability masks without anything else.
    pub fn declare(&mut self, kind: u16, code: u16) {
        self.types.set(kind);
        self.codes.entry(kind).or_default().set(code);
    }

    /// Make `query` fail on every node opened from this device.
    pub fn failing(mut self, query: Query) -> Self {
        self.failing.insert(query);
        self
    }

    pub fn feed(&self, event: RawEvent) {
        self.queue().push_back(Feed::Event(event));
    }

    pub fn move_axis(&self, code: u16, value: i32) {
        self.feed(RawEvent::abs(code, value));
    }

    pub fn press_button(&self, code: u16) {
        self.feed(RawEvent::key(code, 1));
    }

    pub fn release_button(&self, code: u16) {
        self.feed(RawEvent::key(code, 0));
    }

    /// Queue a read that fails with an I/O error.
    pub fn inject_fault(&self) {
        self.queue().push_back(Feed::Fault);
    }

    /// Queue a read that returns `got` bytes instead of a full record.
    pub fn inject_short_read(&self, got: usize) {
        self.queue().push_back(Feed::Short(got));
    }

    /// Records still waiting to be read.
    pub fn pending(&self) -> usize {
        self.queue().len()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<Feed>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check(&self, query: Query, name: &'static str) -> Result<(), ProbeError> {
        if self.failing.contains(&query) {
            Err(ProbeError::CapabilityQueryFailed { query: name })
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Debug)]
enum Slot {
    Device(VirtualDevice),
    Denied,
    Broken,
}

/// Simulated `/dev/input`.
#[derive(Debug, Default)]
pub struct VirtualBus {
    slots: BTreeMap<u32, Slot>,
    open: Arc<AtomicUsize>,
    attempts: Mutex<Vec<u32>>,
}

impl VirtualBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug `device` in at `index`, replacing whatever was there.
    pub fn insert(&mut self, index: u32, device: VirtualDevice) -> &mut Self {
        self.slots.insert(index, Slot::Device(device));
        self
    }

    /// A node that exists but may not be opened.
    pub fn insert_denied(&mut self, index: u32) -> &mut Self {
        self.slots.insert(index, Slot::Denied);
        self
    }

    /// A node whose open fails with an unclassified I/O error.
    pub fn insert_broken(&mut self, index: u32) -> &mut Self {
        self.slots.insert(index, Slot::Broken);
        self
    }

    /// Nodes opened from this bus and not yet dropped.
    pub fn open_nodes(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    /// Every index `open` was called with, in call order.
    pub fn attempts(&self) -> Vec<u32> {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear_attempts(&self) {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl NodeSource for VirtualBus {
    fn path(&self, index: u32) -> String {
        format!("virtual:event{index}")
    }

    fn open(&self, index: u32) -> Result<Box<dyn EventNode>, ProbeError> {
        self.attempts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(index);

        match self.slots.get(&index) {
            None => Err(ProbeError::ResourceUnavailable),
            Some(Slot::Denied) => Err(ProbeError::PermissionDenied),
            Some(Slot::Broken) => Err(ProbeError::Io(io::Error::other("device busy"))),
            Some(Slot::Device(dev)) => {
                self.open.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(VirtualNode {
                    dev: dev.clone(),
                    open: Arc::clone(&self.open),
                }))
            }
        }
    }
}

/// An open handle onto a [`VirtualDevice`].
#[derive(Debug)]
pub struct VirtualNode {
    dev: VirtualDevice,
    open: Arc<AtomicUsize>,
}

impl EventNode for VirtualNode {
    fn event_types(&self) -> Result<EventTypeBits, ProbeError> {
        self.dev.check(Query::EventTypes, "event type")?;
        Ok(self.dev.types)
    }

    fn event_codes(&self, kind: u16) -> Result<CodeBits, ProbeError> {
        self.dev.check(Query::EventCodes, "event code")?;
        Ok(self.dev.codes.get(&kind).copied().unwrap_or_default())
    }

    fn identity(&self) -> Result<DeviceId, ProbeError> {
        self.dev.check(Query::Identity, "identity")?;
        Ok(self.dev.id)
    }

    fn abs_info(&self, axis: u16) -> Result<AbsInfo, ProbeError> {
        self.dev.check(Query::AbsInfo, "axis info")?;
        self.dev
            .abs
            .get(&axis)
            .copied()
            .ok_or(ProbeError::CapabilityQueryFailed { query: "axis info" })
    }

    fn read_event(&mut self) -> Result<Option<RawEvent>, ProbeError> {
        match self.dev.queue().pop_front() {
            None => Ok(None),
            Some(Feed::Event(e)) => Ok(Some(e)),
            Some(Feed::Fault) => Err(ProbeError::StreamRead(io::Error::other("injected fault"))),
            Some(Feed::Short(got)) => Err(ProbeError::ShortRead {
                got,
                expected: RECORD_SIZE,
            }),
        }
    }

    fn name(&self) -> Option<String> {
        Some(self.dev.name.clone())
    }
}

impl Drop for VirtualNode {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}
