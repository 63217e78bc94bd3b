//! Draining the event stream.
//!
//! [`DeviceHandle::poll`] reads records one at a time until the device has
//! nothing buffered, folding each recognized record into the handle's state.
//! Later records for the same field overwrite earlier ones (last write wins,
//! in delivery order). Reads never block, so a poll always returns promptly.
//!
//! A read error or short record ends the current drain early. The handle stays
//! open and the next poll picks up where the stream left off.

use crate::handle::DeviceHandle;

impl DeviceHandle {
    /// Apply every buffered event and return how many changed a state field.
    ///
    /// Ignored records (unknown types, unmapped codes, `EV_SYN`) are consumed
    /// but not counted. An invalid handle polls as `0`.
    pub fn poll(&mut self) -> usize {
        let Some(node) = self.node.as_deref_mut() else {
            return 0;
        };

        let mut applied = 0;
        loop {
            match node.read_event() {
                Ok(Some(event)) => {
                    diag!(trace, "read type {} code {} value {}", event.kind, event.code, event.value);
                    if let Some(kind) = event.translate() {
                        self.state.apply(kind);
                        applied += 1;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    diag!(debug, "stopping drain: {}", e);
                    break;
                }
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use crate::backends::virtual_input::{VirtualBus, VirtualDevice};
    use crate::codes::*;
    use crate::event::RawEvent;
    use crate::{DeviceHandle, Locator, LocatorConfig, ProductFilter};
    use proptest::prelude::*;

    fn located(dev: &VirtualDevice) -> DeviceHandle {
        let mut bus = VirtualBus::new();
        bus.insert(0, dev.clone());
        let locator = Locator::new(bus, LocatorConfig::default());
        let mut handle = DeviceHandle::new();
        assert!(locator.locate(ProductFilter::Any, &mut handle));
        handle
    }

    #[test]
    fn invalid_handle_polls_zero() {
        assert_eq!(DeviceHandle::new().poll(), 0);
    }

    #[test]
    fn syn_reports_are_consumed_not_counted() {
        let dev = VirtualDevice::lightgun(1);
        let mut gun = located(&dev);
        dev.move_axis(ABS_X, 12);
        dev.feed(RawEvent::new(EV_SYN, 0, 0));
        assert_eq!(gun.poll(), 1);
        assert_eq!(dev.pending(), 0);
    }

    proptest! {
        /// The poll count equals the number of mapped records, and each slot
        /// holds the last value delivered for it.
        #[test]
        fn prop_poll_folds_in_order(
            events in proptest::collection::vec((0u16..4, 0u16..0x120, -2000i32..2000), 0..64)
        ) {
            let dev = VirtualDevice::lightgun(1);
            let mut gun = located(&dev);
            let mut expected = gun.state().clone();
            let mut mapped = 0;

            for &(kind, code, value) in &events {
                let raw = RawEvent::new(kind, code, value);
                if let Some(k) = raw.translate() {
                    expected.apply(k);
                    mapped += 1;
                }
                dev.feed(raw);
            }

            prop_assert_eq!(gun.poll(), mapped);
            prop_assert_eq!(gun.state(), &expected);
            prop_assert_eq!(gun.poll(), 0);
        }
    }
}
