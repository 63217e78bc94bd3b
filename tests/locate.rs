//! Discovery over the virtual bus: scan bounds, filters, and rejection paths.

use lightgun::backends::virtual_input::{Query, VirtualBus, VirtualDevice};
use lightgun::codes::*;
use lightgun::{DeviceHandle, Locator, LocatorConfig, ProductFilter, Verdict};

fn locator(bus: VirtualBus) -> Locator<VirtualBus> {
    Locator::new(bus, LocatorConfig::default())
}

fn locate(loc: &Locator<VirtualBus>, product: ProductFilter) -> Option<DeviceHandle> {
    let mut handle = DeviceHandle::new();
    loc.locate(product, &mut handle).then_some(handle)
}

#[test]
fn empty_bus_visits_every_candidate_once() {
    let loc = locator(VirtualBus::new());
    assert!(locate(&loc, ProductFilter::Any).is_none());
    assert_eq!(loc.source().attempts(), (0..20).collect::<Vec<_>>());
    assert_eq!(loc.source().open_nodes(), 0);
}

#[test]
fn devices_past_the_bound_are_never_opened() {
    let mut bus = VirtualBus::new();
    bus.insert(20, VirtualDevice::lightgun(1));
    let loc = locator(bus);

    assert!(locate(&loc, ProductFilter::Any).is_none());
    assert!(loc.source().attempts().iter().all(|&i| i < 20));
}

#[test]
fn configured_bound_is_honoured() {
    let mut bus = VirtualBus::new();
    bus.insert(5, VirtualDevice::lightgun(1));
    let cfg = LocatorConfig {
        max_candidates: 5,
        ..LocatorConfig::default()
    };
    let loc = Locator::new(bus, cfg);

    assert!(locate(&loc, ProductFilter::Any).is_none());
    assert_eq!(loc.source().attempts().len(), 5);
}

#[test]
fn rejected_candidates_are_closed() {
    let mut bus = VirtualBus::new();
    bus.insert(0, VirtualDevice::new(0x046d, 0xc077, "mouse"))
        .insert(1, VirtualDevice::lightgun(1).failing(Query::Identity))
        .insert(2, VirtualDevice::new(LIGHTGUN_VENDOR_ID, 1, "no caps"))
        .insert(3, VirtualDevice::lightgun(1).failing(Query::AbsInfo))
        .insert(4, VirtualDevice::lightgun(1).failing(Query::EventTypes))
        .insert(5, VirtualDevice::lightgun(1).failing(Query::EventCodes));
    let loc = locator(bus);

    assert!(locate(&loc, ProductFilter::Any).is_none());
    assert_eq!(loc.source().open_nodes(), 0);
}

#[test]
fn unanswered_code_mask_query_rejects() {
    let mut bus = VirtualBus::new();
    bus.insert(0, VirtualDevice::lightgun(1).failing(Query::EventCodes));
    let loc = locator(bus);

    assert!(locate(&loc, ProductFilter::Any).is_none());
    let report = loc.survey(ProductFilter::Any);
    assert_eq!(report[0].verdict, Verdict::MissingCapability);
    assert_eq!(loc.source().open_nodes(), 0);
}

#[test]
fn first_match_wins_and_stops_the_scan() {
    let mut bus = VirtualBus::new();
    bus.insert(4, VirtualDevice::lightgun(0x1601))
        .insert(9, VirtualDevice::lightgun(0x1602));
    let loc = locator(bus);

    let gun = locate(&loc, ProductFilter::Any).expect("gun");
    assert_eq!(gun.meta().pid, Some(0x1601));
    assert_eq!(gun.meta().path.as_deref(), Some("virtual:event4"));
    assert_eq!(loc.source().attempts(), vec![0, 1, 2, 3, 4]);
    assert_eq!(loc.source().open_nodes(), 1);
}

#[test]
fn wrong_vendor_is_rejected_whatever_else_matches() {
    let dev = VirtualDevice::new(0xd20a, 0x1601, "impostor")
        .with_axis(ABS_X, 0, 1023)
        .with_axis(ABS_Y, 0, 1023)
        .with_button(BTN_LEFT);
    let mut bus = VirtualBus::new();
    bus.insert(0, dev);
    let loc = locator(bus);

    assert!(locate(&loc, ProductFilter::Any).is_none());
    assert!(locate(&loc, ProductFilter::Exact(0x1601)).is_none());
}

#[test]
fn exact_product_skips_siblings() {
    let mut bus = VirtualBus::new();
    bus.insert(0, VirtualDevice::lightgun(0x1601))
        .insert(1, VirtualDevice::lightgun(0x1602));
    let loc = locator(bus);

    let gun = locate(&loc, ProductFilter::Exact(0x1602)).expect("second gun");
    assert_eq!(gun.meta().pid, Some(0x1602));
    assert!(locate(&loc, ProductFilter::Exact(0x1603)).is_none());
}

#[test]
fn wildcard_accepts_any_product_from_vendor() {
    for pid in [0x0000, 0x1601, 0xffff] {
        let mut bus = VirtualBus::new();
        bus.insert(0, VirtualDevice::lightgun(pid));
        let gun = locate(&locator(bus), ProductFilter::Any).expect("gun");
        assert_eq!(gun.meta().pid, Some(pid));
    }
}

#[test]
fn missing_buttons_or_axes_reject() {
    let axes_only = VirtualDevice::new(LIGHTGUN_VENDOR_ID, 1, "axes")
        .with_axis(ABS_X, 0, 1023)
        .with_axis(ABS_Y, 0, 1023);
    let buttons_only = VirtualDevice::new(LIGHTGUN_VENDOR_ID, 1, "buttons")
        .with_button(BTN_LEFT)
        .with_button(BTN_MIDDLE)
        .with_button(BTN_RIGHT);
    // Keys present, but none of the three we need.
    let wrong_keys = VirtualDevice::new(LIGHTGUN_VENDOR_ID, 1, "keys")
        .with_axis(ABS_X, 0, 1023)
        .with_axis(ABS_Y, 0, 1023)
        .with_button(0x113);

    for dev in [axes_only, buttons_only, wrong_keys] {
        let mut bus = VirtualBus::new();
        bus.insert(0, dev);
        let loc = locator(bus);
        assert!(locate(&loc, ProductFilter::Any).is_none());
        assert_eq!(loc.source().open_nodes(), 0);
    }
}

#[test]
fn partial_calibration_is_never_returned() {
    // Passes the capability probe on X alone, then fails calibrating Y.
    let dev = VirtualDevice::new(LIGHTGUN_VENDOR_ID, 1, "one axis")
        .with_axis(ABS_X, 0, 1023)
        .with_button(BTN_LEFT);
    let mut bus = VirtualBus::new();
    bus.insert(0, dev).insert(1, VirtualDevice::lightgun(2));
    let loc = locator(bus);

    let gun = locate(&loc, ProductFilter::Any).expect("fallback gun");
    assert_eq!(gun.meta().pid, Some(2));
    assert_eq!(loc.source().open_nodes(), 1);
}

#[test]
fn unopenable_nodes_are_skipped() {
    let mut bus = VirtualBus::new();
    bus.insert_denied(0).insert_broken(1).insert(2, VirtualDevice::lightgun(7));
    let loc = locator(bus);

    let gun = locate(&loc, ProductFilter::Any).expect("gun");
    assert_eq!(gun.meta().pid, Some(7));
}

#[test]
fn locate_is_stateless_between_calls() {
    let mut bus = VirtualBus::new();
    bus.insert(1, VirtualDevice::lightgun(1));
    let loc = locator(bus);

    let mut handle = DeviceHandle::new();
    assert!(loc.locate(ProductFilter::Any, &mut handle));
    loc.source().clear_attempts();

    // Relocating into the same handle closes the old stream first and rescans from 0.
    assert!(loc.locate(ProductFilter::Any, &mut handle));
    assert_eq!(loc.source().attempts(), vec![0, 1]);
    assert_eq!(loc.source().open_nodes(), 1);

    assert!(!loc.locate(ProductFilter::Exact(9), &mut handle));
    assert!(!handle.is_valid());
    assert_eq!(loc.source().open_nodes(), 0);
}

#[test]
fn find_uses_configured_product() {
    let mut bus = VirtualBus::new();
    bus.insert(0, VirtualDevice::lightgun(1)).insert(1, VirtualDevice::lightgun(2));
    let cfg = LocatorConfig::from_toml_str("product_id = 2").unwrap();
    let gun = Locator::new(bus, cfg).find().expect("gun");
    assert_eq!(gun.meta().pid, Some(2));
}

#[test]
fn survey_reports_every_candidate_and_closes_all() {
    let mut bus = VirtualBus::new();
    bus.insert_denied(0)
        .insert(1, VirtualDevice::new(0x046d, 0xc077, "mouse"))
        .insert(2, VirtualDevice::new(LIGHTGUN_VENDOR_ID, 1, "bare"))
        .insert(3, VirtualDevice::lightgun(1).failing(Query::AbsInfo))
        .insert(4, VirtualDevice::lightgun(1))
        .insert(5, VirtualDevice::lightgun(1).failing(Query::Identity))
        .insert_broken(6);
    let loc = locator(bus);

    let report = loc.survey(ProductFilter::Any);
    assert_eq!(report.len(), 20);
    assert!(matches!(report[6].verdict, Verdict::OpenFailed(_)));
    let verdicts: Vec<_> = report
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 6)
        .take(7)
        .map(|(_, r)| r.verdict.clone())
        .collect();
    assert_eq!(
        verdicts,
        vec![
            Verdict::Denied,
            Verdict::WrongIdentity {
                vendor: 0x046d,
                product: 0xc077
            },
            Verdict::MissingCapability,
            Verdict::CalibrationFailed { axis: ABS_X },
            Verdict::Accepted,
            Verdict::QueryFailed,
            Verdict::Absent,
        ]
    );
    assert_eq!(report[4].meta.as_ref().and_then(|m| m.name.clone()).as_deref(), Some("Virtual Light Gun"));
    assert_eq!(loc.source().open_nodes(), 0);
}
