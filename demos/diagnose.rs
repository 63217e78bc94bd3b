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
    use lightgun::{Locator, Verdict};

    let product = config.product();
    let locator = Locator::evdev(config);
    for report in locator.survey(product) {
        if report.verdict == Verdict::Absent {
            continue;
        }
        let who = report
            .meta
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<22} {:<40} {:?}", report.path, who, report.verdict);
    }
}

#[cfg(not(all(feature = "evdev", target_os = "linux")))]
fn run(_config: LocatorConfig) {
    eprintln!("This demo needs the Linux evdev backend.");
}
