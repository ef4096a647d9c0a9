use ping_probe::{AddressFamily, ProbeOutcome, ReplyError, SessionConfig, Target};
use std::net::{IpAddr, ToSocketAddrs};
use std::process::ExitCode;
use std::time::Duration;

type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(argh::FromArgs)]
/// ping - send ICMP ECHO_REQUEST to a host
struct Args {
    #[argh(option, default = "1.3")]
    /// seconds to wait for each reply
    timeout: f64,

    #[argh(option, default = "32")]
    /// number of payload bytes per request
    packet_size: usize,

    #[argh(option, default = "0.5")]
    /// seconds between requests
    interval: f64,

    #[argh(option, default = "4")]
    /// number of requests to send
    max_number_of_times: u16,

    #[argh(switch)]
    /// use IPv6 instead of IPv4
    ipv6: bool,

    #[argh(positional)]
    /// host name or address
    target: String,
}

fn resolve(host: &str, address_family: AddressFamily) -> Option<IpAddr> {
    (host, 0)
        .to_socket_addrs()
        .ok()?
        .map(|addr| addr.ip())
        .find(|ip| match address_family {
            AddressFamily::V4 => ip.is_ipv4(),
            AddressFamily::V6 => ip.is_ipv6(),
        })
}

fn main() -> Result<ExitCode, GenericError> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let args: Args = argh::from_env();
    let address_family = if args.ipv6 { AddressFamily::V6 } else { AddressFamily::V4 };

    let Some(ip_addr) = resolve(&args.target, address_family) else {
        eprintln!("Ping request could not find host {}. Please check the name and try again.", args.target);
        return Ok(ExitCode::FAILURE);
    };

    let config = SessionConfig {
        timeout: Duration::try_from_secs_f64(args.timeout)?,
        packet_size: args.packet_size,
        interval: Duration::try_from_secs_f64(args.interval)?,
        max_number_of_times: args.max_number_of_times,
        address_family,
    };
    let session = ping_probe::create(&config, Target::from(ip_addr))?;

    println!("Pinging {} [{ip_addr}] with {} bytes of data:", args.target, args.packet_size);
    let mut exit_code = ExitCode::FAILURE;
    for outcome in session {
        match outcome? {
            ProbeOutcome::Success { round_trip_ms } => {
                exit_code = ExitCode::SUCCESS;
                println!("Reply from {ip_addr}: bytes={} time={round_trip_ms}ms", args.packet_size);
            }
            ProbeOutcome::Timeout => println!("Ping timeout"),
            ProbeOutcome::ProtocolError(ReplyError::UnexpectedReply { icmp_type, icmp_code }) => {
                println!("ICMP type: {icmp_type} code: {icmp_code}");
            }
            ProbeOutcome::ProtocolError(ReplyError::MalformedReply { length }) => {
                println!("Malformed reply of {length} bytes");
            }
        }
    }

    Ok(exit_code)
}
