//! Device handle lifecycle.
//!
//! A [`DeviceHandle`] owns at most one open [`EventNode`] together with the
//! [`DeviceState`] it feeds. It starts out invalid, becomes valid after a
//! successful [`Locator::locate`](crate::Locator::locate), is mutated in place
//! by every [`poll`](DeviceHandle::poll), and is released by
//! [`close`](DeviceHandle::close) or drop, whichever comes first.
//!
//! The handle is not `Clone`: a copy of the state would drift away from the
//! live stream. Use [`DeviceHandle::snapshot`] for an explicit, detached copy.

use crate::bits::EventTypeBits;
use crate::calibrate::calibrate;
use crate::device::{EventNode, NodeSource};
use crate::error::ProbeError;
use crate::metadata::DeviceMeta;
use crate::snapshot::Snapshot;
use crate::state::DeviceState;

/// A freshly opened candidate.
pub struct OpenNode {
    pub node: Box<dyn EventNode>,
    /// Coarse capability mask, when it was requested.
    pub event_types: Option<EventTypeBits>,
}

/// Open candidate `index` of `source`, optionally fetching its event-type mask.
///
/// If the mask is requested and the query fails, the node is closed again and
/// the error returned.
pub fn open_node<S: NodeSource + ?Sized>(
    source: &S,
    index: u32,
    want_caps: bool,
) -> Result<OpenNode, ProbeError> {
    let node = source.open(index)?;
    let event_types = if want_caps {
        match node.event_types() {
            Ok(bits) => Some(bits),
            Err(e) => {
                diag!(debug, "event type query failed on {}: {}", source.path(index), e);
                return Err(e);
            }
        }
    } else {
        None
    };
    Ok(OpenNode { node, event_types })
}

#[derive(Default)]
pub struct DeviceHandle {
    pub(crate) node: Option<Box<dyn EventNode>>,
    pub(crate) state: DeviceState,
    meta: DeviceMeta,
}

impl DeviceHandle {
    /// An empty, invalid handle ready to be filled by a locate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-open node. Used by the locator once a candidate qualifies.
    pub(crate) fn attach(node: Box<dyn EventNode>, state: DeviceState, meta: DeviceMeta) -> Self {
        Self {
            node: Some(node),
            state,
            meta,
        }
    }

    /// Open a named evdev node directly, skipping the scan.
    ///
    /// The node still has to answer its identity query and calibrate both
    /// axes; otherwise it is closed and the error returned. Vendor and product
    /// are not filtered.
    #[cfg(all(feature = "evdev", target_os = "linux"))]
    pub fn open_path(path: impl AsRef<std::path::Path>) -> Result<Self, ProbeError> {
        let path = path.as_ref();
        let node = crate::backends::linux::EvdevNode::open(path)?;
        Self::qualify(Box::new(node), path.display().to_string())
    }

    /// Identify and calibrate an open node, yielding a valid handle.
    pub(crate) fn qualify(node: Box<dyn EventNode>, path: String) -> Result<Self, ProbeError> {
        let id = node.identity()?;
        let meta = DeviceMeta::from_id(id, node.name(), Some(path));
        let axes = calibrate(node.as_ref())?;
        let state = DeviceState {
            axes,
            ..DeviceState::default()
        };
        Ok(Self::attach(node, state, meta))
    }

    /// `true` while the handle holds an open stream.
    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn meta(&self) -> &DeviceMeta {
        &self.meta
    }

    /// Detached copy of metadata and state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            meta: self.meta.clone(),
            state: self.state.clone(),
        }
    }

    /// Release the stream and mark the handle invalid. Idempotent.
    pub fn close(&mut self) {
        if let Some(node) = self.node.take() {
            diag!(debug, "closing {}", self.meta);
            drop(node);
        }
    }

    /// Reset to the empty state, closing any open stream first.
    pub(crate) fn reset(&mut self) {
        self.close();
        self.state = DeviceState::default();
        self.meta = DeviceMeta::default();
    }
}

impl std::fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("valid", &self.is_valid())
            .field("meta", &self.meta)
            .field("state", &self.state)
            .finish()
    }
}
