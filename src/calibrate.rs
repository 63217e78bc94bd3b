//! Axis calibration.
//!
//! For X then Y: the axis bit must be set in the device's absolute-axis mask
//! and its range query must answer. Any miss fails the whole calibration; a
//! half-calibrated device never reaches the caller.

use crate::codes;
use crate::device::EventNode;
use crate::error::ProbeError;
use crate::state::Axis;

/// Read both axis ranges and seed each value at the midpoint.
pub fn calibrate(node: &dyn EventNode) -> Result<[Axis; 2], ProbeError> {
    let abs_bits = node.event_codes(codes::EV_ABS).map_err(|e| {
        diag!(debug, "absolute axis mask unavailable: {}", e);
        ProbeError::CalibrationFailed {
            axis: codes::REQUIRED_AXES[0],
        }
    })?;

    let mut axes = [Axis::default(); 2];
    for (slot, &code) in axes.iter_mut().zip(codes::REQUIRED_AXES.iter()) {
        if !abs_bits.is_set(code) {
            diag!(debug, "axis {:#04x} not declared", code);
            return Err(ProbeError::CalibrationFailed { axis: code });
        }
        let info = node.abs_info(code).map_err(|e| {
            diag!(debug, "axis {:#04x} info unavailable: {}", code, e);
            ProbeError::CalibrationFailed { axis: code }
        })?;
        *slot = Axis::calibrated(info.minimum, info.maximum);
    }
    Ok(axes)
}
