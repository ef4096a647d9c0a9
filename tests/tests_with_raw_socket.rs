use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Once;
use std::time::{Duration, Instant};

use more_asserts as ma;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ping_probe::{AddressFamily, PingError, ProbeOutcome, SessionConfig, Target};

static SETUP: Once = Once::new();

fn setup() {
    SETUP.call_once(|| {
        let subscriber = FmtSubscriber::builder().with_max_level(Level::ERROR).finish();
        tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
    });
}

/*
* Note: Raw sockets work only with root privileges (or CAP_NET_RAW).
*/
#[test]
#[ignore = "needs raw socket privileges"]
fn ping_localhost_with_raw_socket_succeeds() {
    setup();

    let config = SessionConfig {
        timeout: Duration::from_millis(1300),
        packet_size: 32,
        interval: Duration::from_millis(500),
        max_number_of_times: 4,
        address_family: AddressFamily::V4,
    };
    let session = ping_probe::create(&config, Target::from(IpAddr::V4(Ipv4Addr::LOCALHOST))).unwrap();

    let outcomes: Vec<ProbeOutcome> = session.map(Result::unwrap).collect();

    assert_eq!(4, outcomes.len());
    for outcome in outcomes {
        if let ProbeOutcome::Success { round_trip_ms } = outcome {
            ma::assert_lt!(round_trip_ms, 1300);
        } else {
            panic!("expected a reply from localhost, got {outcome:?}");
        }
    }
}

#[test]
#[ignore = "needs raw socket privileges"]
fn ping_ipv6_localhost_with_raw_socket_succeeds() {
    setup();

    let config = SessionConfig {
        interval: Duration::ZERO,
        max_number_of_times: 2,
        address_family: AddressFamily::V6,
        ..SessionConfig::default()
    };
    let session = ping_probe::create(&config, Target::from(IpAddr::V6(Ipv6Addr::LOCALHOST))).unwrap();

    let outcomes: Vec<ProbeOutcome> = session.map(Result::unwrap).collect();

    assert_eq!(2, outcomes.len());
    assert!(outcomes.iter().all(ProbeOutcome::is_success));
}

#[test]
#[ignore = "needs raw socket privileges and a route to TEST-NET-1"]
fn silent_target_times_out_and_terminates() {
    setup();

    let timeout = Duration::from_millis(200);
    let interval = Duration::from_millis(100);
    let config = SessionConfig { timeout, interval, ..SessionConfig::default() };
    // 192.0.2.0/24 is reserved for documentation and never answers.
    let session = ping_probe::create(&config, Target::from(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)))).unwrap();

    let start = Instant::now();
    let outcomes: Vec<ProbeOutcome> = session.map(Result::unwrap).collect();
    let elapsed = start.elapsed();

    assert_eq!(vec![ProbeOutcome::Timeout; 4], outcomes);
    ma::assert_ge!(elapsed, 4 * timeout + 3 * interval);
    ma::assert_lt!(elapsed, 4 * timeout + 3 * interval + Duration::from_secs(1));
}

#[test]
fn create_succeeds_or_reports_permission_denied() {
    setup();

    let config = SessionConfig::default();
    match ping_probe::create(&config, Target::from(IpAddr::V4(Ipv4Addr::LOCALHOST))) {
        Ok(session) => assert_eq!(IpAddr::V4(Ipv4Addr::LOCALHOST), session.target().ip_addr()),
        Err(PingError::PermissionDenied(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
}
