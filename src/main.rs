use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

mod bridge;
mod nfc;
mod wire;

#[derive(Debug, PartialEq)]
enum Mode {
    Bridge { connstring: Option<String> },
    List,
    Usage,
}

impl Mode {
    fn from_args(args: &[String]) -> Mode {
        match args {
            [] => Mode::Bridge { connstring: None },
            [flag] if flag == "-l" => Mode::List,
            [connstring] => Mode::Bridge {
                connstring: Some(connstring.clone()),
            },
            _ => Mode::Usage,
        }
    }
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match Mode::from_args(&args) {
        Mode::Bridge { connstring } => run_bridge(connstring.as_deref()),
        Mode::List => list_devices(),
        Mode::Usage => {
            println!("usage: till-nfc-bridge [-l | connstring]");
            Ok(())
        }
    }
}

fn run_bridge(connstring: Option<&str>) -> eyre::Result<()> {
    let mut context = nfc::init_context()?;
    let mut session = nfc::ReaderSession::open(&mut context, connstring)?;
    let mut forwarder = wire::UdpForwarder::bind().wrap_err("unable to create datagram socket")?;

    // Runs until the driver reports a poll failure; socket, device and
    // context are dropped in scope order on the way out.
    bridge::run(&mut session, &mut forwarder, bridge::POLL_INTERVAL);

    Ok(())
}

fn list_devices() -> eyre::Result<()> {
    let mut context = nfc::init_context()?;
    let connstrings = nfc::list_devices(&mut context)?;
    print!("{}", format_device_list(&connstrings));

    Ok(())
}

fn format_device_list(connstrings: &[String]) -> String {
    if connstrings.is_empty() {
        return "0 devices found\n".to_string();
    }

    let mut out = format!("{} devices found:\n", connstrings.len());
    for connstring in connstrings {
        out.push_str(connstring);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_no_args_bridges_first_device() {
        assert_eq!(Mode::from_args(&[]), Mode::Bridge { connstring: None });
    }

    #[test]
    fn test_list_flag_selects_listing_mode() {
        assert_eq!(Mode::from_args(&args(&["-l"])), Mode::List);
    }

    #[test]
    fn test_single_arg_is_a_connstring() {
        assert_eq!(
            Mode::from_args(&args(&["pn532_uart:/dev/ttyUSB0"])),
            Mode::Bridge {
                connstring: Some("pn532_uart:/dev/ttyUSB0".to_string()),
            }
        );
    }

    #[test]
    fn test_extra_args_select_usage() {
        assert_eq!(Mode::from_args(&args(&["a", "b"])), Mode::Usage);
        assert_eq!(Mode::from_args(&args(&["-l", "extra"])), Mode::Usage);
        assert_eq!(Mode::from_args(&args(&["a", "b", "c"])), Mode::Usage);
    }

    #[test]
    fn test_format_device_list() {
        assert_eq!(format_device_list(&[]), "0 devices found\n");

        let connstrings = args(&[
            "acr122_usb:001:004",
            "pn532_uart:/dev/ttyUSB0",
            "pn53x_usb:160:012",
        ]);
        assert_eq!(
            format_device_list(&connstrings),
            "3 devices found:\nacr122_usb:001:004\npn532_uart:/dev/ttyUSB0\npn53x_usb:160:012\n"
        );
    }
}
