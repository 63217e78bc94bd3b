//! Light gun discovery.
//!
//! The locator walks candidates `0..max_candidates` in order and keeps the first
//! one that passes every stage:
//!
//! 1. **Open** non-blocking/read-only and read the event-type mask.
//!    Missing nodes are skipped silently, permission failures are logged.
//! 2. **Identity**: vendor must equal the configured vendor, product must pass
//!    the [`ProductFilter`].
//! 3. **Capabilities**, two levels deep: `EV_ABS` must be declared and overlap
//!    `{ABS_X, ABS_Y}`, *and* `EV_KEY` must be declared and overlap
//!    `{BTN_LEFT, BTN_MIDDLE, BTN_RIGHT}`.
//! 4. **Calibration** of both axes (see [`calibrate`](crate::calibrate)).
//!
//! A candidate that fails any stage is closed before the scan moves on, so a
//! failed locate leaves nothing open. Each call starts from scratch.
//!
//! [`Locator::survey`] runs the same stages over every candidate without
//! stopping and reports where each one dropped out; it is meant for tooling.

use crate::bits::EventTypeBits;
use crate::calibrate::calibrate;
use crate::codes;
use crate::config::{LocatorConfig, ProductFilter};
use crate::device::{EventNode, NodeSource};
use crate::error::ProbeError;
use crate::handle::{open_node, DeviceHandle};
use crate::metadata::DeviceMeta;
use crate::state::DeviceState;

/// Where along the probe pipeline a candidate ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Passed every stage.
    Accepted,
    /// No such node.
    Absent,
    /// Node exists but could not be opened for lack of permission.
    Denied,
    /// Open failed for another reason.
    OpenFailed(String),
    /// Event-type or identity query went unanswered.
    QueryFailed,
    /// Vendor or product did not match.
    WrongIdentity { vendor: u16, product: u16 },
    /// Axis or button capability set missing.
    MissingCapability,
    /// Axis range could not be established.
    CalibrationFailed { axis: u16 },
}

/// Diagnostic record for one candidate, produced by [`Locator::survey`].
#[derive(Clone, Debug)]
pub struct CandidateReport {
    pub index: u32,
    pub path: String,
    pub verdict: Verdict,
    /// Filled once the identity query has answered.
    pub meta: Option<DeviceMeta>,
}

pub struct Locator<S> {
    source: S,
    config: LocatorConfig,
}

#[cfg(all(feature = "evdev", target_os = "linux"))]
impl Locator<crate::backends::linux::EvdevSource> {
    /// Locator over `/dev/input` (or whatever `config.node_prefix` names).
    pub fn evdev(config: LocatorConfig) -> Self {
        let source = crate::backends::linux::EvdevSource::new(config.node_prefix.clone());
        Self::new(source, config)
    }
}

impl<S: NodeSource> Locator<S> {
    pub fn new(source: S, config: LocatorConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Find the first qualifying device and load it into `handle`.
    ///
    /// `handle` is reset (closing anything it held) before the scan. Returns
    /// `true` if a device was found; on `false` the handle is left invalid.
    pub fn locate(&self, product: ProductFilter, handle: &mut DeviceHandle) -> bool {
        handle.reset();
        for index in 0..self.config.max_candidates {
            if let Ok(found) = self.probe(index, product) {
                diag!(info, "light gun found: {}", found.meta());
                *handle = found;
                return true;
            }
        }
        diag!(debug, "no light gun among {} candidates", self.config.max_candidates);
        false
    }

    /// [`locate`](Self::locate) with the configured product filter, returning the handle.
    pub fn find(&self) -> Option<DeviceHandle> {
        let mut handle = DeviceHandle::new();
        self.locate(self.config.product(), &mut handle).then_some(handle)
    }

    /// Probe every candidate and report the outcome of each.
    ///
    /// Accepted devices are closed again before this returns.
    pub fn survey(&self, product: ProductFilter) -> Vec<CandidateReport> {
        (0..self.config.max_candidates)
            .map(|index| {
                let path = self.source.path(index);
                let (verdict, meta) = match self.probe(index, product) {
                    Ok(mut handle) => {
                        let meta = handle.meta().clone();
                        handle.close();
                        (Verdict::Accepted, Some(meta))
                    }
                    Err(rejected) => (rejected.verdict, rejected.meta),
                };
                CandidateReport {
                    index,
                    path,
                    verdict,
                    meta,
                }
            })
            .collect()
    }

    /// Run every stage on candidate `index`. The node is dropped (closed) on any rejection.
    fn probe(&self, index: u32, product: ProductFilter) -> Result<DeviceHandle, Rejected> {
        let path = self.source.path(index);

        let opened = open_node(&self.source, index, true).map_err(|e| {
            match &e {
                ProbeError::ResourceUnavailable => {}
                ProbeError::PermissionDenied => diag!(warn, "can't open device {}", path),
                other => diag!(debug, "skipping {}: {}", path, other),
            }
            Rejected::from(open_verdict(e))
        })?;
        let node = opened.node;
        let types = opened.event_types.unwrap_or_default();

        let id = node.identity().map_err(|e| {
            diag!(debug, "identity query failed on {}: {}", path, e);
            Rejected::from(Verdict::QueryFailed)
        })?;
        let meta = DeviceMeta::from_id(id, node.name(), Some(path.clone()));

        if id.vendor != self.config.vendor_id || !product.matches(id.product) {
            return Err(Rejected {
                verdict: Verdict::WrongIdentity {
                    vendor: id.vendor,
                    product: id.product,
                },
                meta: Some(meta),
            });
        }

        if !is_absolute_pointer(node.as_ref(), &types) {
            diag!(debug, "{} lacks axis or button capabilities", meta);
            return Err(Rejected {
                verdict: Verdict::MissingCapability,
                meta: Some(meta),
            });
        }

        let axes = match calibrate(node.as_ref()) {
            Ok(axes) => axes,
            Err(ProbeError::CalibrationFailed { axis }) => {
                diag!(debug, "{}: axis {:#04x} not available", meta, axis);
                return Err(Rejected {
                    verdict: Verdict::CalibrationFailed { axis },
                    meta: Some(meta),
                });
            }
            Err(_) => {
                return Err(Rejected {
                    verdict: Verdict::QueryFailed,
                    meta: Some(meta),
                })
            }
        };

        let state = DeviceState {
            axes,
            ..DeviceState::default()
        };
        Ok(DeviceHandle::attach(node, state, meta))
    }
}

/// Probe failure, carried back to `locate`/`survey`.
struct Rejected {
    verdict: Verdict,
    meta: Option<DeviceMeta>,
}

impl From<Verdict> for Rejected {
    fn from(verdict: Verdict) -> Self {
        Self { verdict, meta: None }
    }
}

fn open_verdict(err: ProbeError) -> Verdict {
    match err {
        ProbeError::ResourceUnavailable => Verdict::Absent,
        ProbeError::PermissionDenied => Verdict::Denied,
        ProbeError::CapabilityQueryFailed { .. } => Verdict::QueryFailed,
        other => Verdict::OpenFailed(other.to_string()),
    }
}

/// `true` if `kind` is declared in `types` and its code mask overlaps `required`.
fn supports_any(node: &dyn EventNode, types: &EventTypeBits, kind: u16, required: &[u16]) -> bool {
    if !types.is_set(kind) {
        return false;
    }
    match node.event_codes(kind) {
        Ok(bits) => bits.any_of(required),
        Err(e) => {
            diag!(debug, "code mask query for type {:#04x} failed: {}", kind, e);
            false
        }
    }
}

/// Absolute X/Y plus at least one of the three mouse buttons.
pub fn is_absolute_pointer(node: &dyn EventNode, types: &EventTypeBits) -> bool {
    supports_any(node, types, codes::EV_ABS, &codes::REQUIRED_AXES)
        && supports_any(node, types, codes::EV_KEY, &codes::REQUIRED_BUTTONS)
}
