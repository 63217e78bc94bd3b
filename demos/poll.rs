use lightgun::LocatorConfig;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => LocatorConfig::load(&path).expect("load config"),
        None => LocatorConfig::default(),
    };
    run(config);
}

#[cfg(all(feature = "evdev", target_os = "linux"))]
fn run(config: LocatorConfig) {
    use lightgun::{DeviceHandle, Locator};
    use std::time::Duration;

    let product = config.product();
    let vendor = config.vendor_id;
    let locator = Locator::evdev(config);
    let mut gun = DeviceHandle::new();
    if !locator.locate(product, &mut gun) {
        eprintln!("No light gun found (vendor {vendor:04x}, product {product:?})");
        return;
    }
    println!("Found {}", gun.meta());

    loop {
        if gun.poll() > 0 {
            println!("{}", gun.snapshot().to_json().expect("serialize snapshot"));
        }
        // Roughly one frame at 60 Hz
        std::thread::sleep(Duration::from_millis(16));
    }
}

#[cfg(not(all(feature = "evdev", target_os = "linux")))]
fn run(_config: LocatorConfig) {
    eprintln!("This demo needs the Linux evdev backend.");
}
